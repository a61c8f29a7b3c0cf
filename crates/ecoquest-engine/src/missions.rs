//! Daily mission selection and the reset scheduler.
//!
//! One set of four missions is active per calendar day, drawn uniformly
//! without replacement from the catalog. The day's set is created on
//! first load at or after 03:00 local time; before that boundary the
//! previous day's set keeps being served. Once created for a day, a set
//! is never redrawn.

use std::time::Duration as StdDuration;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use ecoquest_core::catalog;
use ecoquest_core::error::{EcoQuestError, EcoQuestResult};
use ecoquest_core::models::mission::MissionDefinition;
use ecoquest_core::models::mission_set::DailyMissionSet;
use ecoquest_core::repository::MissionSetRepository;
use rand::seq::SliceRandom;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

/// Number of missions active on any given day.
pub const DAILY_MISSION_COUNT: usize = 4;

/// Local hour at which the daily set rolls over.
pub const RESET_HOUR: u32 = 3;

/// Calendar day key in `YYYY-MM-DD` form.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The next 03:00 boundary strictly after `now`.
pub fn next_reset_at(now: NaiveDateTime) -> NaiveDateTime {
    let date = if now.hour() < RESET_HOUR {
        now.date()
    } else {
        now.date() + Duration::days(1)
    };
    date.and_hms_opt(RESET_HOUR, 0, 0)
        .expect("03:00 is a valid time of day")
}

/// Serves the active mission set for any point in time.
#[derive(Clone)]
pub struct DailyMissionBoard<R: MissionSetRepository> {
    sets: R,
    count: usize,
}

impl<R: MissionSetRepository> DailyMissionBoard<R> {
    pub fn new(sets: R) -> Self {
        Self {
            sets,
            count: DAILY_MISSION_COUNT,
        }
    }

    /// The missions active at `now` (local wall-clock time).
    ///
    /// Repeated calls within the same day return the same set; a new
    /// set is drawn the first time this runs at or after 03:00 on a day
    /// without one. On a completely fresh store the current day is
    /// bootstrapped immediately so there is always something to serve.
    pub async fn active_missions(
        &self,
        now: NaiveDateTime,
    ) -> EcoQuestResult<Vec<MissionDefinition>> {
        let key = date_key(now.date());

        match self.sets.get_by_date(&key).await {
            Ok(set) => return self.resolve(&set),
            Err(EcoQuestError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let last_reset = self.sets.last_reset_date().await?;

        if now.hour() >= RESET_HOUR && last_reset.as_deref() != Some(key.as_str()) {
            return self.draw_for(&key).await;
        }

        // Before the reset window: keep serving the previous set.
        if let Some(prev) = last_reset {
            match self.sets.get_by_date(&prev).await {
                Ok(set) => return self.resolve(&set),
                Err(EcoQuestError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        // Fresh store: nothing to carry over, bootstrap today.
        self.draw_for(&key).await
    }

    /// Draw a new set for `key`, persist it, and record the reset.
    async fn draw_for(&self, key: &str) -> EcoQuestResult<Vec<MissionDefinition>> {
        let pool = catalog::all();
        if pool.len() < self.count {
            return Err(EcoQuestError::Validation {
                message: format!(
                    "mission catalog holds {} entries, {} requested",
                    pool.len(),
                    self.count
                ),
            });
        }

        let mission_ids: Vec<u32> = {
            let mut rng = rand::thread_rng();
            pool.choose_multiple(&mut rng, self.count)
                .map(|m| m.id)
                .collect()
        };

        let set = self
            .sets
            .create(DailyMissionSet {
                date_key: key.to_string(),
                mission_ids,
            })
            .await?;
        self.sets.record_reset(key).await?;

        info!(date_key = %key, ids = ?set.mission_ids, "Daily mission set drawn");

        self.resolve(&set)
    }

    /// Resolve a persisted set through the catalog.
    fn resolve(&self, set: &DailyMissionSet) -> EcoQuestResult<Vec<MissionDefinition>> {
        set.mission_ids
            .iter()
            .map(|&id| catalog::get(id).cloned())
            .collect()
    }
}

/// Handle for the background reset task.
///
/// The task is aborted when the handle is dropped, so the owning
/// context cannot leak it past its own teardown.
pub struct ResetTask {
    handle: JoinHandle<()>,
}

impl ResetTask {
    /// Stop the task explicitly.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for ResetTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a task that re-evaluates the daily set at each 03:00 boundary.
///
/// Replaces minute-granularity polling: the task sleeps until the next
/// boundary, refreshes, and reschedules itself.
pub fn spawn_reset_task<R>(board: DailyMissionBoard<R>) -> ResetTask
where
    R: MissionSetRepository + Clone + Send + Sync + 'static,
{
    let handle = tokio::spawn(async move {
        loop {
            let now = Local::now().naive_local();
            let wait = (next_reset_at(now) - now)
                .to_std()
                .unwrap_or(StdDuration::from_secs(60));
            // Land just past the boundary so the hour check passes.
            sleep(wait + StdDuration::from_secs(1)).await;

            let now = Local::now().naive_local();
            match board.active_missions(now).await {
                Ok(missions) => {
                    info!(count = missions.len(), "Daily mission set refreshed");
                }
                Err(e) => {
                    warn!(error = %e, "Daily mission refresh failed");
                }
            }
        }
    });

    ResetTask { handle }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    #[test]
    fn date_key_is_iso_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(date_key(date), "2026-03-07");
    }

    #[test]
    fn reset_later_today_before_three() {
        let now = at(2026, 3, 7, 2, 59);
        assert_eq!(next_reset_at(now), at(2026, 3, 7, 3, 0));
    }

    #[test]
    fn reset_tomorrow_at_three_exactly() {
        let now = at(2026, 3, 7, 3, 0);
        assert_eq!(next_reset_at(now), at(2026, 3, 8, 3, 0));
    }

    #[test]
    fn reset_tomorrow_in_the_afternoon() {
        let now = at(2026, 3, 7, 15, 30);
        assert_eq!(next_reset_at(now), at(2026, 3, 8, 3, 0));
    }
}
