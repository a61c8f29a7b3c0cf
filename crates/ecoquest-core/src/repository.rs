//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Business rules (conflict checks,
//! the admin-protection rule, submission validation) live in the service
//! layer; repositories only guard invariants that must hold at the store
//! itself, such as the single review transition per submission.

use crate::error::EcoQuestResult;
use crate::models::mission_set::DailyMissionSet;
use crate::models::session::StoredSession;
use crate::models::submission::{Submission, SubmissionDraft, SubmissionStatus};
use crate::models::user::{CreateUserAccount, UserAccount};

pub trait UserRepository: Send + Sync {
    fn create(
        &self,
        input: CreateUserAccount,
    ) -> impl Future<Output = EcoQuestResult<UserAccount>> + Send;
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = EcoQuestResult<UserAccount>> + Send;
    /// All accounts in registration order.
    fn list(&self) -> impl Future<Output = EcoQuestResult<Vec<UserAccount>>> + Send;
    /// Append a mission id to the account's pending approvals.
    fn add_pending_approval(
        &self,
        username: &str,
        mission_id: u32,
    ) -> impl Future<Output = EcoQuestResult<UserAccount>> + Send;
    /// Apply an approval outcome: add points, bump the completion count,
    /// stamp the completion time, and drop the pending entry.
    fn credit(
        &self,
        username: &str,
        points: u32,
        mission_id: u32,
    ) -> impl Future<Output = EcoQuestResult<UserAccount>> + Send;
    /// Zero both counters; pending approvals are left untouched.
    fn reset_points(&self, username: &str) -> impl Future<Output = EcoQuestResult<()>> + Send;
    /// Clear the last-completed stamp (daily carry-over on resume).
    fn clear_last_completed(
        &self,
        username: &str,
    ) -> impl Future<Output = EcoQuestResult<()>> + Send;
    /// Hard delete. Submissions referencing the account are retained.
    fn delete(&self, username: &str) -> impl Future<Output = EcoQuestResult<()>> + Send;
}

pub trait SubmissionRepository: Send + Sync {
    /// Persist a validated draft as a new `Pending` submission.
    fn create(
        &self,
        draft: SubmissionDraft,
    ) -> impl Future<Output = EcoQuestResult<Submission>> + Send;
    fn get_by_id(&self, id: &str) -> impl Future<Output = EcoQuestResult<Submission>> + Send;
    /// All submissions in creation order.
    fn list(&self) -> impl Future<Output = EcoQuestResult<Vec<Submission>>> + Send;
    /// Submissions with the given status, newest first.
    fn list_by_status(
        &self,
        status: SubmissionStatus,
    ) -> impl Future<Output = EcoQuestResult<Vec<Submission>>> + Send;
    /// Transition `Pending -> Approved|Rejected`. The update is guarded on
    /// the pending status at the store, so a terminal submission can never
    /// transition a second time.
    fn mark_reviewed(
        &self,
        id: &str,
        status: SubmissionStatus,
    ) -> impl Future<Output = EcoQuestResult<Submission>> + Send;
    /// Whether an approved submission already exists for this pair.
    fn has_approved(
        &self,
        username: &str,
        mission_id: u32,
    ) -> impl Future<Output = EcoQuestResult<bool>> + Send;
}

pub trait MissionSetRepository: Send + Sync {
    fn get_by_date(
        &self,
        date_key: &str,
    ) -> impl Future<Output = EcoQuestResult<DailyMissionSet>> + Send;
    fn create(
        &self,
        set: DailyMissionSet,
    ) -> impl Future<Output = EcoQuestResult<DailyMissionSet>> + Send;
    /// The date key of the most recent draw, if any.
    fn last_reset_date(&self) -> impl Future<Output = EcoQuestResult<Option<String>>> + Send;
    fn record_reset(&self, date_key: &str) -> impl Future<Output = EcoQuestResult<()>> + Send;
}

pub trait SessionRepository: Send + Sync {
    /// Replace the current session.
    fn set(&self, session: StoredSession) -> impl Future<Output = EcoQuestResult<()>> + Send;
    fn get(&self) -> impl Future<Output = EcoQuestResult<Option<StoredSession>>> + Send;
    fn clear(&self) -> impl Future<Output = EcoQuestResult<()>> + Send;
}
