//! Submission lifecycle — draft, validate, persist, review.
//!
//! A submission moves `Pending -> Approved | Rejected` exactly once.
//! Approval credits the mission's catalog point value to the account;
//! rejection changes nothing on the ledger.

use ecoquest_core::catalog;
use ecoquest_core::error::{EcoQuestError, EcoQuestResult};
use ecoquest_core::models::submission::{
    Submission, SubmissionDraft, SubmissionStatus,
};
use ecoquest_core::repository::{SubmissionRepository, UserRepository};
use tracing::{info, warn};

use crate::geo::LocationProvider;
use crate::ledger::AccountLedger;

pub struct SubmissionWorkflow<S: SubmissionRepository, U: UserRepository> {
    submissions: S,
    ledger: AccountLedger<U>,
}

impl<S: SubmissionRepository, U: UserRepository> SubmissionWorkflow<S, U> {
    pub fn new(submissions: S, ledger: AccountLedger<U>) -> Self {
        Self {
            submissions,
            ledger,
        }
    }

    /// Open a draft for a mission, capturing the current position.
    ///
    /// Location acquisition degrades softly: a failed provider leaves
    /// the draft without a location rather than erroring, and the
    /// missing field is caught at `submit` time.
    pub async fn start_submission<L: LocationProvider>(
        &self,
        username: &str,
        mission_id: u32,
        locator: &L,
    ) -> EcoQuestResult<SubmissionDraft> {
        catalog::get(mission_id)?;
        self.ledger.account(username).await?;

        let location = match locator.current_position().await {
            Ok(point) => Some(point),
            Err(e) => {
                warn!(error = %e, "Could not acquire location, continuing without one");
                None
            }
        };

        Ok(SubmissionDraft {
            username: username.to_string(),
            mission_id,
            location,
            proof_link: String::new(),
            description: String::new(),
            agreed_to_terms: false,
        })
    }

    /// Validate a draft and persist it as a pending submission.
    ///
    /// On success the submission record and the account's pending entry
    /// are both written; a validation failure writes nothing.
    pub async fn submit(&self, draft: SubmissionDraft) -> EcoQuestResult<Submission> {
        if draft.location.is_none() {
            return Err(EcoQuestError::Validation {
                message: "a verified location is required".into(),
            });
        }
        if draft.proof_link.trim().is_empty() {
            return Err(EcoQuestError::Validation {
                message: "a link to the proof post is required".into(),
            });
        }
        if !draft.agreed_to_terms {
            return Err(EcoQuestError::Validation {
                message: "the originality terms must be accepted".into(),
            });
        }

        catalog::get(draft.mission_id)?;
        let account = self.ledger.account(&draft.username).await?;

        // One in-flight submission per (user, mission), and no
        // resubmitting an already-completed mission.
        if account.pending_approvals.contains(&draft.mission_id) {
            return Err(EcoQuestError::AlreadyExists {
                entity: "pending submission".into(),
            });
        }
        if self
            .submissions
            .has_approved(&draft.username, draft.mission_id)
            .await?
        {
            return Err(EcoQuestError::AlreadyExists {
                entity: "approved submission".into(),
            });
        }

        let submission = self.submissions.create(draft).await?;
        self.ledger
            .record_pending(&submission.username, submission.mission_id)
            .await?;

        info!(
            id = %submission.id,
            username = %submission.username,
            mission_id = submission.mission_id,
            "Submission queued for approval"
        );

        Ok(submission)
    }

    /// Approve a pending submission and credit the account.
    pub async fn approve(&self, id: &str) -> EcoQuestResult<Submission> {
        let current = self.submissions.get_by_id(id).await?;
        if current.status != SubmissionStatus::Pending {
            return Err(EcoQuestError::InvalidState {
                reason: format!("submission {id} has already been reviewed"),
            });
        }

        let updated = self
            .submissions
            .mark_reviewed(id, SubmissionStatus::Approved)
            .await?;

        let mission = catalog::get(updated.mission_id)?;
        self.ledger
            .credit(&updated.username, mission.points, updated.mission_id)
            .await?;

        info!(id = %updated.id, username = %updated.username, "Submission approved");

        Ok(updated)
    }

    /// Reject a pending submission. The ledger is untouched.
    pub async fn reject(&self, id: &str) -> EcoQuestResult<Submission> {
        let current = self.submissions.get_by_id(id).await?;
        if current.status != SubmissionStatus::Pending {
            return Err(EcoQuestError::InvalidState {
                reason: format!("submission {id} has already been reviewed"),
            });
        }

        let updated = self
            .submissions
            .mark_reviewed(id, SubmissionStatus::Rejected)
            .await?;

        info!(id = %updated.id, username = %updated.username, "Submission rejected");

        Ok(updated)
    }

    /// Submissions awaiting review, newest first.
    pub async fn pending_queue(&self) -> EcoQuestResult<Vec<Submission>> {
        self.submissions
            .list_by_status(SubmissionStatus::Pending)
            .await
    }

    /// Review history for one terminal status, newest first.
    pub async fn history(&self, status: SubmissionStatus) -> EcoQuestResult<Vec<Submission>> {
        self.submissions.list_by_status(status).await
    }

    /// Every submission in creation order.
    pub async fn all_submissions(&self) -> EcoQuestResult<Vec<Submission>> {
        self.submissions.list().await
    }
}
