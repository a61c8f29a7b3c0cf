//! ECOQUEST Engine — the workflow services: daily mission selection and
//! the reset scheduler, the submission lifecycle, the account ledger,
//! the leaderboard, and the external-provider boundaries.

pub mod activity;
pub mod geo;
pub mod leaderboard;
pub mod ledger;
pub mod missions;
pub mod submissions;

pub use leaderboard::{Leaderboard, RankedAccount, StandingsFilter};
pub use ledger::AccountLedger;
pub use missions::{DailyMissionBoard, ResetTask, spawn_reset_task};
pub use submissions::SubmissionWorkflow;
