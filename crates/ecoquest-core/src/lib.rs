//! ECOQUEST Core — domain models, the mission catalog, repository trait
//! definitions, and the shared error taxonomy.
//!
//! These are the types shared across all crates. Persistence lives in
//! `ecoquest-db`, the session gate in `ecoquest-auth`, and the workflow
//! services in `ecoquest-engine`.

pub mod catalog;
pub mod error;
pub mod models;
pub mod repository;
