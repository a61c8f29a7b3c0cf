//! SurrealDB implementation of [`MissionSetRepository`].
//!
//! Daily sets are keyed by their `YYYY-MM-DD` date key; the last-reset
//! marker lives in a dedicated single-record table.

use chrono::Utc;
use ecoquest_core::error::EcoQuestResult;
use ecoquest_core::models::mission_set::DailyMissionSet;
use ecoquest_core::repository::MissionSetRepository;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, Deserialize)]
struct MissionSetRow {
    date_key: String,
    mission_ids: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct ResetMarkerRow {
    date_key: String,
}

impl MissionSetRow {
    fn into_set(self) -> DailyMissionSet {
        DailyMissionSet {
            date_key: self.date_key,
            mission_ids: self.mission_ids,
        }
    }
}

/// SurrealDB implementation of the MissionSet repository.
#[derive(Clone)]
pub struct SurrealMissionSetRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealMissionSetRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> MissionSetRepository for SurrealMissionSetRepository<C> {
    async fn get_by_date(&self, date_key: &str) -> EcoQuestResult<DailyMissionSet> {
        let mut result = self
            .db
            .query("SELECT * FROM mission_set WHERE date_key = $date_key")
            .bind(("date_key", date_key.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MissionSetRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "mission_set".into(),
            id: date_key.to_string(),
        })?;

        Ok(row.into_set())
    }

    async fn create(&self, set: DailyMissionSet) -> EcoQuestResult<DailyMissionSet> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let now = Utc::now().to_rfc3339();

        let result = self
            .db
            .query(
                "CREATE type::thing('mission_set', $id) SET \
                 date_key = $date_key, \
                 mission_ids = $mission_ids, \
                 created_at = $now",
            )
            .bind(("id", id_str.clone()))
            .bind(("date_key", set.date_key))
            .bind(("mission_ids", set.mission_ids))
            .bind(("now", now))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<MissionSetRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "mission_set".into(),
            id: id_str,
        })?;

        Ok(row.into_set())
    }

    async fn last_reset_date(&self) -> EcoQuestResult<Option<String>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::thing('mission_reset', 'last')")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ResetMarkerRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(|r| r.date_key))
    }

    async fn record_reset(&self, date_key: &str) -> EcoQuestResult<()> {
        self.db
            .query(
                "UPSERT type::thing('mission_reset', 'last') SET \
                 date_key = $date_key",
            )
            .bind(("date_key", date_key.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
