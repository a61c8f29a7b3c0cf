//! Submission domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A geographic coordinate pair captured with a submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

/// A user's proof-of-completion record for a mission.
///
/// Immutable except for `status`, which transitions exactly once from
/// `Pending` to one of the terminal states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    /// Username of the submitting account. Retained even if the account
    /// is later deleted (orphaned history).
    pub username: String,
    pub mission_id: u32,
    pub submitted_at: DateTime<Utc>,
    pub location: Option<GeoPoint>,
    /// Link to the public post proving the action.
    pub proof_link: String,
    pub description: String,
    pub agreed_to_terms: bool,
    pub status: SubmissionStatus,
}

/// An in-progress submission, filled by the user before validation.
///
/// `location` may legitimately be absent here — location acquisition
/// degrades softly — but `submit` requires it to be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub username: String,
    pub mission_id: u32,
    pub location: Option<GeoPoint>,
    pub proof_link: String,
    pub description: String,
    pub agreed_to_terms: bool,
}
