//! User account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Capability set of an authenticated actor.
///
/// An explicit field rather than a sentinel username: the administrator
/// principal itself never has a stored account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub name: String,
    /// Unique business key; login and all ledger operations address
    /// accounts by username.
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub total_points: u32,
    pub missions_completed: u32,
    pub last_completed_date: Option<DateTime<Utc>>,
    /// Mission ids submitted and awaiting admin review.
    pub pending_approvals: Vec<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserAccount {
    pub name: String,
    pub username: String,
    pub email: String,
    /// Raw password (hashed with Argon2id before storage).
    pub password: String,
    pub role: Role,
}
