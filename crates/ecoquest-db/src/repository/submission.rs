//! SurrealDB implementation of [`SubmissionRepository`].
//!
//! The review transition is guarded at the store: the UPDATE matches
//! only records still in the `Pending` status, so a terminal submission
//! can never transition a second time regardless of caller behavior.

use chrono::Utc;
use ecoquest_core::error::{EcoQuestError, EcoQuestResult};
use ecoquest_core::models::submission::{GeoPoint, Submission, SubmissionDraft, SubmissionStatus};
use ecoquest_core::repository::SubmissionRepository;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::user::parse_timestamp;

#[derive(Debug, Deserialize)]
struct SubmissionRow {
    username: String,
    mission_id: u32,
    submitted_at: String,
    location: Option<GeoPoint>,
    proof_link: String,
    description: String,
    agreed_to_terms: bool,
    status: String,
}

#[derive(Debug, Deserialize)]
struct SubmissionRowWithId {
    record_id: String,
    username: String,
    mission_id: u32,
    submitted_at: String,
    location: Option<GeoPoint>,
    proof_link: String,
    description: String,
    agreed_to_terms: bool,
    status: String,
}

fn parse_status(s: &str) -> Result<SubmissionStatus, DbError> {
    match s {
        "Pending" => Ok(SubmissionStatus::Pending),
        "Approved" => Ok(SubmissionStatus::Approved),
        "Rejected" => Ok(SubmissionStatus::Rejected),
        other => Err(DbError::Decode(format!("unknown submission status: {other}"))),
    }
}

fn status_to_string(s: &SubmissionStatus) -> &'static str {
    match s {
        SubmissionStatus::Pending => "Pending",
        SubmissionStatus::Approved => "Approved",
        SubmissionStatus::Rejected => "Rejected",
    }
}

impl SubmissionRow {
    fn into_submission(self, id: Uuid) -> Result<Submission, DbError> {
        Ok(Submission {
            id,
            username: self.username,
            mission_id: self.mission_id,
            submitted_at: parse_timestamp(&self.submitted_at)?,
            location: self.location,
            proof_link: self.proof_link,
            description: self.description,
            agreed_to_terms: self.agreed_to_terms,
            status: parse_status(&self.status)?,
        })
    }
}

impl SubmissionRowWithId {
    fn try_into_submission(self) -> Result<Submission, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let row = SubmissionRow {
            username: self.username,
            mission_id: self.mission_id,
            submitted_at: self.submitted_at,
            location: self.location,
            proof_link: self.proof_link,
            description: self.description,
            agreed_to_terms: self.agreed_to_terms,
            status: self.status,
        };
        row.into_submission(id)
    }
}

/// Row struct for count queries.
#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Submission repository.
#[derive(Clone)]
pub struct SurrealSubmissionRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSubmissionRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SubmissionRepository for SurrealSubmissionRepository<C> {
    async fn create(&self, draft: SubmissionDraft) -> EcoQuestResult<Submission> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let now = Utc::now().to_rfc3339();

        let result = self
            .db
            .query(
                "CREATE type::thing('submission', $id) SET \
                 username = $username, \
                 mission_id = $mission_id, \
                 submitted_at = $submitted_at, \
                 location = $location, \
                 proof_link = $proof_link, \
                 description = $description, \
                 agreed_to_terms = $agreed_to_terms, \
                 status = 'Pending'",
            )
            .bind(("id", id_str.clone()))
            .bind(("username", draft.username))
            .bind(("mission_id", draft.mission_id))
            .bind(("submitted_at", now))
            .bind(("location", draft.location))
            .bind(("proof_link", draft.proof_link))
            .bind(("description", draft.description))
            .bind(("agreed_to_terms", draft.agreed_to_terms))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<SubmissionRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "submission".into(),
            id: id_str,
        })?;

        Ok(row.into_submission(id)?)
    }

    async fn get_by_id(&self, id: &str) -> EcoQuestResult<Submission> {
        let parsed = Uuid::parse_str(id).map_err(|_| EcoQuestError::NotFound {
            entity: "submission".into(),
            id: id.to_string(),
        })?;

        let mut result = self
            .db
            .query("SELECT * FROM type::thing('submission', $id)")
            .bind(("id", parsed.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SubmissionRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "submission".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_submission(parsed)?)
    }

    async fn list(&self) -> EcoQuestResult<Vec<Submission>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM submission \
                 ORDER BY submitted_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SubmissionRowWithId> = result.take(0).map_err(DbError::from)?;

        let submissions = rows
            .into_iter()
            .map(|row| row.try_into_submission())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(submissions)
    }

    async fn list_by_status(&self, status: SubmissionStatus) -> EcoQuestResult<Vec<Submission>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM submission \
                 WHERE status = $status \
                 ORDER BY submitted_at DESC",
            )
            .bind(("status", status_to_string(&status).to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SubmissionRowWithId> = result.take(0).map_err(DbError::from)?;

        let submissions = rows
            .into_iter()
            .map(|row| row.try_into_submission())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(submissions)
    }

    async fn mark_reviewed(
        &self,
        id: &str,
        status: SubmissionStatus,
    ) -> EcoQuestResult<Submission> {
        if status == SubmissionStatus::Pending {
            return Err(EcoQuestError::InvalidState {
                reason: "a review outcome must be a terminal status".into(),
            });
        }

        // Existence check first so an unknown id reports NotFound
        // rather than a state error.
        let current = self.get_by_id(id).await?;

        let result = self
            .db
            .query(
                "UPDATE type::thing('submission', $id) SET \
                 status = $status \
                 WHERE status = 'Pending'",
            )
            .bind(("id", current.id.to_string()))
            .bind(("status", status_to_string(&status).to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<SubmissionRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| EcoQuestError::InvalidState {
                reason: format!(
                    "submission {id} is already {}",
                    status_to_string(&current.status)
                ),
            })?;

        Ok(row.into_submission(current.id)?)
    }

    async fn has_approved(&self, username: &str, mission_id: u32) -> EcoQuestResult<bool> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM submission \
                 WHERE username = $username AND mission_id = $mission_id \
                 AND status = 'Approved' GROUP ALL",
            )
            .bind(("username", username.to_string()))
            .bind(("mission_id", mission_id))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0) > 0)
    }
}
