//! SurrealDB repository implementations.

mod mission_set;
mod session;
mod submission;
mod user;

pub use mission_set::SurrealMissionSetRepository;
pub use session::SurrealSessionRepository;
pub use submission::SurrealSubmissionRepository;
pub use user::{SurrealUserRepository, verify_password};
