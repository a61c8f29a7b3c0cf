//! Stored session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// The persisted current session.
///
/// Only the identity is stored; the account record is resolved on
/// resume. The administrator session carries no account at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSession {
    pub username: String,
    pub role: Role,
    pub logged_in_at: DateTime<Utc>,
}
