//! Account ledger — the per-user points/completions record.
//!
//! The only mutator of account state: submissions record pending
//! approvals here, approvals credit through here, and the admin
//! management operations (point reset, deletion) live here too.

use ecoquest_core::error::{EcoQuestError, EcoQuestResult};
use ecoquest_core::models::user::UserAccount;
use ecoquest_core::repository::UserRepository;
use tracing::info;

#[derive(Clone)]
pub struct AccountLedger<U: UserRepository> {
    users: U,
    /// The protected administrator identity; never deletable.
    admin_username: String,
}

impl<U: UserRepository> AccountLedger<U> {
    pub fn new(users: U, admin_username: impl Into<String>) -> Self {
        Self {
            users,
            admin_username: admin_username.into(),
        }
    }

    pub async fn account(&self, username: &str) -> EcoQuestResult<UserAccount> {
        self.users.get_by_username(username).await
    }

    /// All accounts in registration order.
    pub async fn all_accounts(&self) -> EcoQuestResult<Vec<UserAccount>> {
        self.users.list().await
    }

    /// Mark a mission as awaiting admin review on the account.
    pub async fn record_pending(
        &self,
        username: &str,
        mission_id: u32,
    ) -> EcoQuestResult<UserAccount> {
        self.users.add_pending_approval(username, mission_id).await
    }

    /// Apply an approval outcome to the account.
    pub async fn credit(
        &self,
        username: &str,
        points: u32,
        mission_id: u32,
    ) -> EcoQuestResult<UserAccount> {
        let account = self.users.credit(username, points, mission_id).await?;
        info!(
            username = %username,
            points,
            mission_id,
            total = account.total_points,
            "Points credited"
        );
        Ok(account)
    }

    /// Zero both counters. Pending approvals are left untouched.
    pub async fn reset_points(&self, username: &str) -> EcoQuestResult<()> {
        self.users.reset_points(username).await?;
        info!(username = %username, "Points reset");
        Ok(())
    }

    /// Permanently remove an account.
    ///
    /// The administrator identity is protected; submissions referencing
    /// the removed account are retained as orphaned history.
    pub async fn delete_account(&self, username: &str) -> EcoQuestResult<()> {
        if username == self.admin_username {
            return Err(EcoQuestError::Forbidden {
                reason: "the administrator account cannot be deleted".into(),
            });
        }
        self.users.delete(username).await?;
        info!(username = %username, "Account deleted");
        Ok(())
    }
}
