//! Mission domain model.

use serde::{Deserialize, Serialize};

/// A single eco-action challenge with a fixed point reward.
///
/// Missions are immutable and sourced from the static catalog; they are
/// never persisted individually.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissionDefinition {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub points: u32,
}
