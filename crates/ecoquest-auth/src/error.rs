//! Authentication error types.

use ecoquest_core::error::EcoQuestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("admin login is not configured")]
    AdminLoginDisabled,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for EcoQuestError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::AdminLoginDisabled => {
                EcoQuestError::AuthenticationFailed {
                    reason: err.to_string(),
                }
            }
            AuthError::PasswordTooShort { .. } => EcoQuestError::Validation {
                message: err.to_string(),
            },
            AuthError::Crypto(msg) => EcoQuestError::Internal(msg),
        }
    }
}
