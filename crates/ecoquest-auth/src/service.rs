//! Session gate — registration, login, logout, and resume orchestration.

use chrono::{NaiveDate, Utc};
use ecoquest_core::error::{EcoQuestError, EcoQuestResult};
use ecoquest_core::models::session::StoredSession;
use ecoquest_core::models::user::{CreateUserAccount, Role, UserAccount};
use ecoquest_core::repository::{SessionRepository, UserRepository};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// An authenticated actor and its capability set.
///
/// The administrator is a configured principal, not a stored account.
#[derive(Debug, Clone)]
pub enum Actor {
    Admin { username: String },
    User(UserAccount),
}

impl Actor {
    pub fn role(&self) -> Role {
        match self {
            Actor::Admin { .. } => Role::Admin,
            Actor::User(_) => Role::User,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Actor::Admin { username } => username,
            Actor::User(account) => &account.username,
        }
    }
}

/// The gate's view of the current session.
#[derive(Debug, Clone)]
pub enum SessionState {
    Anonymous,
    Authenticated(Actor),
}

/// Session/role gate.
///
/// Generic over repository implementations so that the auth layer
/// has no dependency on the database crate.
pub struct SessionGate<U: UserRepository, S: SessionRepository> {
    users: U,
    sessions: S,
    config: AuthConfig,
}

impl<U: UserRepository, S: SessionRepository> SessionGate<U, S> {
    pub fn new(users: U, sessions: S, config: AuthConfig) -> Self {
        Self {
            users,
            sessions,
            config,
        }
    }

    /// Register a new account and start a session for it.
    pub async fn register(&self, input: RegisterInput) -> EcoQuestResult<UserAccount> {
        // 1. Field validation.
        if input.username.trim().is_empty() {
            return Err(EcoQuestError::Validation {
                message: "username must not be empty".into(),
            });
        }
        if input.password.len() < self.config.min_password_length {
            return Err(AuthError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }

        // 2. The administrator name is reserved.
        if input.username == self.config.admin_username {
            return Err(EcoQuestError::AlreadyExists {
                entity: "user".into(),
            });
        }

        // 3. Username uniqueness.
        match self.users.get_by_username(&input.username).await {
            Ok(_) => {
                return Err(EcoQuestError::AlreadyExists {
                    entity: "user".into(),
                });
            }
            Err(EcoQuestError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        // 4. Create the account with zeroed counters.
        let account = self
            .users
            .create(CreateUserAccount {
                name: input.name,
                username: input.username,
                email: input.email,
                password: input.password,
                role: Role::User,
            })
            .await?;

        // 5. Start a session for the new account.
        self.sessions
            .set(StoredSession {
                username: account.username.clone(),
                role: Role::User,
                logged_in_at: Utc::now(),
            })
            .await?;

        Ok(account)
    }

    /// Authenticate with username + password and start a session.
    ///
    /// With `as_admin`, credentials are checked against the single
    /// configured administrator pair instead of the user store.
    pub async fn login(&self, input: LoginInput, as_admin: bool) -> EcoQuestResult<Actor> {
        let actor = if as_admin {
            self.verify_admin(&input)?
        } else {
            self.verify_user(&input).await?
        };

        self.sessions
            .set(StoredSession {
                username: actor.username().to_string(),
                role: actor.role(),
                logged_in_at: Utc::now(),
            })
            .await?;

        Ok(actor)
    }

    fn verify_admin(&self, input: &LoginInput) -> EcoQuestResult<Actor> {
        let Some(hash) = self.config.admin_password_hash.as_deref() else {
            return Err(AuthError::AdminLoginDisabled.into());
        };

        if input.username != self.config.admin_username {
            return Err(AuthError::InvalidCredentials.into());
        }

        let valid = password::verify_password(&input.password, hash, self.config.pepper.as_deref())
            .map_err(EcoQuestError::from)?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(Actor::Admin {
            username: self.config.admin_username.clone(),
        })
    }

    async fn verify_user(&self, input: &LoginInput) -> EcoQuestResult<Actor> {
        // A missing account reports the same error as a bad password.
        let account = match self.users.get_by_username(&input.username).await {
            Ok(account) => account,
            Err(EcoQuestError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            &input.password,
            &account.password_hash,
            self.config.pepper.as_deref(),
        )
        .map_err(EcoQuestError::from)?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(Actor::User(account))
    }

    /// Clear the current session.
    pub async fn logout(&self) -> EcoQuestResult<()> {
        self.sessions.clear().await
    }

    /// Restore the stored session, if any.
    ///
    /// A dangling session (deleted account) is cleared and resolves to
    /// `Anonymous` rather than an error. Daily carry-over: when the
    /// account's last completion is not from `today`, the stamp is
    /// cleared while pending approvals are preserved.
    pub async fn resume(&self, today: NaiveDate) -> EcoQuestResult<SessionState> {
        let Some(stored) = self.sessions.get().await? else {
            return Ok(SessionState::Anonymous);
        };

        if stored.role == Role::Admin {
            return Ok(SessionState::Authenticated(Actor::Admin {
                username: stored.username,
            }));
        }

        let mut account = match self.users.get_by_username(&stored.username).await {
            Ok(account) => account,
            Err(EcoQuestError::NotFound { .. }) => {
                self.sessions.clear().await?;
                return Ok(SessionState::Anonymous);
            }
            Err(e) => return Err(e),
        };

        if let Some(last) = account.last_completed_date {
            if last.date_naive() != today {
                self.users.clear_last_completed(&account.username).await?;
                account.last_completed_date = None;
            }
        }

        Ok(SessionState::Authenticated(Actor::User(account)))
    }
}
