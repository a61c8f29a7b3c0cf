//! Leaderboard — standings by points and the recent-activity feed.

use chrono::{DateTime, Duration, Utc};
use ecoquest_core::error::EcoQuestResult;
use ecoquest_core::models::submission::{Submission, SubmissionStatus};
use ecoquest_core::models::user::UserAccount;
use ecoquest_core::repository::{SubmissionRepository, UserRepository};

/// An account with its global rank (1-based, by total points).
#[derive(Debug, Clone)]
pub struct RankedAccount {
    pub rank: usize,
    pub account: UserAccount,
}

#[derive(Debug, Clone, Copy)]
pub enum StandingsFilter {
    /// Every account.
    All,
    /// The N highest-ranked accounts.
    Top(usize),
    /// Accounts with a completion at or after the cutoff.
    ActiveSince(DateTime<Utc>),
    /// Every account, newest registrations first. Ranks stay global.
    Newest,
}

impl StandingsFilter {
    /// Accounts active within the last 30 days.
    pub fn monthly(now: DateTime<Utc>) -> Self {
        StandingsFilter::ActiveSince(now - Duration::days(30))
    }
}

pub struct Leaderboard<U: UserRepository, S: SubmissionRepository> {
    users: U,
    submissions: S,
}

impl<U: UserRepository, S: SubmissionRepository> Leaderboard<U, S> {
    pub fn new(users: U, submissions: S) -> Self {
        Self { users, submissions }
    }

    /// Accounts ordered by points descending, rank attached before any
    /// filtering so a filtered view still shows global positions.
    pub async fn standings(&self, filter: StandingsFilter) -> EcoQuestResult<Vec<RankedAccount>> {
        let mut accounts = self.users.list().await?;
        accounts.sort_by(|a, b| b.total_points.cmp(&a.total_points));

        let mut ranked: Vec<RankedAccount> = accounts
            .into_iter()
            .enumerate()
            .map(|(i, account)| RankedAccount {
                rank: i + 1,
                account,
            })
            .collect();

        match filter {
            StandingsFilter::All => {}
            StandingsFilter::Top(n) => ranked.truncate(n),
            StandingsFilter::ActiveSince(cutoff) => {
                ranked.retain(|r| {
                    r.account
                        .last_completed_date
                        .is_some_and(|last| last >= cutoff)
                });
            }
            StandingsFilter::Newest => {
                ranked.sort_by(|a, b| b.account.created_at.cmp(&a.account.created_at));
            }
        }

        Ok(ranked)
    }

    /// The most recently approved submissions, newest first.
    pub async fn recent_activity(&self, limit: usize) -> EcoQuestResult<Vec<Submission>> {
        let mut approved = self
            .submissions
            .list_by_status(SubmissionStatus::Approved)
            .await?;
        approved.truncate(limit);
        Ok(approved)
    }
}
