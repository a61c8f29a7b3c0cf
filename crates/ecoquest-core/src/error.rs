//! Error types for the ECOQUEST system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EcoQuestError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Operation forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },

    #[error("External service unavailable: {service}: {reason}")]
    ExternalUnavailable { service: String, reason: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EcoQuestResult<T> = Result<T, EcoQuestError>;
