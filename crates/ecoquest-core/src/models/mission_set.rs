//! Daily mission set domain model.

use serde::{Deserialize, Serialize};

/// The missions active for a given calendar day.
///
/// Exactly one set exists per `date_key`; once created it is never
/// mutated, only superseded by the next day's set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyMissionSet {
    /// Calendar day in `YYYY-MM-DD` form.
    pub date_key: String,
    /// Ordered sequence of distinct mission ids.
    pub mission_ids: Vec<u32>,
}
