//! SurrealDB implementation of [`SessionRepository`].
//!
//! A single browsing session is the only writer, so the store holds at
//! most one session under the fixed record id `current`.

use ecoquest_core::error::EcoQuestResult;
use ecoquest_core::models::session::StoredSession;
use ecoquest_core::repository::SessionRepository;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};

use crate::error::DbError;
use crate::repository::user::{parse_role, parse_timestamp, role_to_string};

#[derive(Debug, Deserialize)]
struct SessionRow {
    username: String,
    role: String,
    logged_in_at: String,
}

impl SessionRow {
    fn into_session(self) -> Result<StoredSession, DbError> {
        Ok(StoredSession {
            username: self.username,
            role: parse_role(&self.role)?,
            logged_in_at: parse_timestamp(&self.logged_in_at)?,
        })
    }
}

/// SurrealDB implementation of the Session repository.
#[derive(Clone)]
pub struct SurrealSessionRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSessionRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SessionRepository for SurrealSessionRepository<C> {
    async fn set(&self, session: StoredSession) -> EcoQuestResult<()> {
        self.db
            .query(
                "UPSERT type::thing('session', 'current') SET \
                 username = $username, \
                 role = $role, \
                 logged_in_at = $logged_in_at",
            )
            .bind(("username", session.username))
            .bind(("role", role_to_string(&session.role).to_string()))
            .bind(("logged_in_at", session.logged_in_at.to_rfc3339()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn get(&self) -> EcoQuestResult<Option<StoredSession>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::thing('session', 'current')")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SessionRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_session()?)),
            None => Ok(None),
        }
    }

    async fn clear(&self) -> EcoQuestResult<()> {
        self.db
            .query("DELETE type::thing('session', 'current')")
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
