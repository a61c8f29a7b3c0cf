//! ECOQUEST Auth — the session/role gate: registration, login (user and
//! admin), logout, and session resume with the daily carry-over rule.

pub mod config;
pub mod error;
pub mod password;
pub mod service;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{Actor, LoginInput, RegisterInput, SessionGate, SessionState};
