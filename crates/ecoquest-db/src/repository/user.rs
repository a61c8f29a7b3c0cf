//! SurrealDB implementation of [`UserRepository`].
//!
//! Password hashing uses Argon2id with OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
//! generated per hash. An optional pepper (deployment-side secret) can
//! be provided at construction time.
//!
//! Ledger mutations are single UPDATE statements (`+=`/`-=` on the
//! point counters and the pending array), so there is no
//! read-modify-write window at this layer.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use chrono::{DateTime, Utc};
use ecoquest_core::error::EcoQuestResult;
use ecoquest_core::models::user::{CreateUserAccount, Role, UserAccount};
use ecoquest_core::repository::UserRepository;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, Deserialize)]
struct UserRow {
    name: String,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    total_points: u32,
    missions_completed: u32,
    last_completed_date: Option<String>,
    pending_approvals: Vec<u32>,
    created_at: String,
    updated_at: String,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, Deserialize)]
struct UserRowWithId {
    record_id: String,
    name: String,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    total_points: u32,
    missions_completed: u32,
    last_completed_date: Option<String>,
    pending_approvals: Vec<u32>,
    created_at: String,
    updated_at: String,
}

pub(crate) fn parse_role(s: &str) -> Result<Role, DbError> {
    match s {
        "User" => Ok(Role::User),
        "Admin" => Ok(Role::Admin),
        other => Err(DbError::Decode(format!("unknown role: {other}"))),
    }
}

pub(crate) fn role_to_string(role: &Role) -> &'static str {
    match role {
        Role::User => "User",
        Role::Admin => "Admin",
    }
}

pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DbError::Decode(format!("invalid timestamp '{s}': {e}")))
}

impl UserRow {
    fn into_account(self, id: Uuid) -> Result<UserAccount, DbError> {
        Ok(UserAccount {
            id,
            name: self.name,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role: parse_role(&self.role)?,
            total_points: self.total_points,
            missions_completed: self.missions_completed,
            last_completed_date: self
                .last_completed_date
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
            pending_approvals: self.pending_approvals,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

impl UserRowWithId {
    fn try_into_account(self) -> Result<UserAccount, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let row = UserRow {
            name: self.name,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            total_points: self.total_points,
            missions_completed: self.missions_completed,
            last_completed_date: self.last_completed_date,
            pending_approvals: self.pending_approvals,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        row.into_account(id)
    }
}

/// Hash a password with Argon2id using OWASP-recommended parameters.
///
/// If a pepper is provided, it is prepended to the password before
/// hashing. The salt is randomly generated for each call.
fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, DbError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::Decode(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(input, &salt)
        .map_err(|e| DbError::Decode(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
    /// Optional deployment-side pepper for password hashing.
    pepper: Option<String>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db, pepper: None }
    }

    pub fn with_pepper(db: Surreal<C>, pepper: String) -> Self {
        Self {
            db,
            pepper: Some(pepper),
        }
    }

    /// Resolve a username to its record id, or `NotFound`.
    async fn record_id(&self, username: &str) -> Result<Uuid, DbError> {
        #[derive(Debug, Deserialize)]
        struct IdRow {
            record_id: String,
        }

        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id FROM user WHERE username = $username")
            .bind(("username", username.to_string()))
            .await?;

        let rows: Vec<IdRow> = result.take(0)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: format!("username={username}"),
        })?;

        Uuid::parse_str(&row.record_id).map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUserAccount) -> EcoQuestResult<UserAccount> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let now = Utc::now().to_rfc3339();

        let password_hash = hash_password(&input.password, self.pepper.as_deref())?;

        let result = self
            .db
            .query(
                "CREATE type::thing('user', $id) SET \
                 name = $name, \
                 username = $username, email = $email, \
                 password_hash = $password_hash, \
                 role = $role, \
                 total_points = 0, \
                 missions_completed = 0, \
                 last_completed_date = NONE, \
                 pending_approvals = [], \
                 created_at = $now, updated_at = $now",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("username", input.username))
            .bind(("email", input.email))
            .bind(("password_hash", password_hash))
            .bind(("role", role_to_string(&input.role).to_string()))
            .bind(("now", now))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.into_account(id)?)
    }

    async fn get_by_username(&self, username: &str) -> EcoQuestResult<UserAccount> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE username = $username",
            )
            .bind(("username", username.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: format!("username={username}"),
        })?;

        Ok(row.try_into_account()?)
    }

    async fn list(&self) -> EcoQuestResult<Vec<UserAccount>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;

        let accounts = rows
            .into_iter()
            .map(|row| row.try_into_account())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(accounts)
    }

    async fn add_pending_approval(
        &self,
        username: &str,
        mission_id: u32,
    ) -> EcoQuestResult<UserAccount> {
        let id = self.record_id(username).await?;
        let now = Utc::now().to_rfc3339();

        let result = self
            .db
            .query(
                "UPDATE type::thing('user', $id) SET \
                 pending_approvals += $mission_id, \
                 updated_at = $now",
            )
            .bind(("id", id.to_string()))
            .bind(("mission_id", mission_id))
            .bind(("now", now))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_account(id)?)
    }

    async fn credit(
        &self,
        username: &str,
        points: u32,
        mission_id: u32,
    ) -> EcoQuestResult<UserAccount> {
        let id = self.record_id(username).await?;
        let now = Utc::now().to_rfc3339();

        let result = self
            .db
            .query(
                "UPDATE type::thing('user', $id) SET \
                 total_points += $points, \
                 missions_completed += 1, \
                 last_completed_date = $now, \
                 pending_approvals -= $mission_id, \
                 updated_at = $now",
            )
            .bind(("id", id.to_string()))
            .bind(("points", points))
            .bind(("mission_id", mission_id))
            .bind(("now", now))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_account(id)?)
    }

    async fn reset_points(&self, username: &str) -> EcoQuestResult<()> {
        let id = self.record_id(username).await?;
        let now = Utc::now().to_rfc3339();

        self.db
            .query(
                "UPDATE type::thing('user', $id) SET \
                 total_points = 0, \
                 missions_completed = 0, \
                 updated_at = $now",
            )
            .bind(("id", id.to_string()))
            .bind(("now", now))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn clear_last_completed(&self, username: &str) -> EcoQuestResult<()> {
        let id = self.record_id(username).await?;
        let now = Utc::now().to_rfc3339();

        self.db
            .query(
                "UPDATE type::thing('user', $id) SET \
                 last_completed_date = NONE, \
                 updated_at = $now",
            )
            .bind(("id", id.to_string()))
            .bind(("now", now))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn delete(&self, username: &str) -> EcoQuestResult<()> {
        let id = self.record_id(username).await?;

        self.db
            .query("DELETE type::thing('user', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}

/// Verify a password against an Argon2id hash.
///
/// Public for use by the auth layer.
pub fn verify_password(password: &str, hash: &str, pepper: Option<&str>) -> Result<bool, DbError> {
    use argon2::PasswordVerifier;

    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| DbError::Decode(format!("invalid hash format: {e}")))?;

    let argon2 = Argon2::default();
    match argon2.verify_password(input, &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(DbError::Decode(format!("verify error: {e}"))),
    }
}
