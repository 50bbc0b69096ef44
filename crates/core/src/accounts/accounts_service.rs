use log::debug;
use std::sync::Arc;

use super::accounts_model::{CurrentAccount, LedgerEntry, NewCurrentAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::Result;

/// Service for reading and opening current accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn open_account(&self, new_account: NewCurrentAccount) -> Result<CurrentAccount> {
        new_account.validate()?;
        debug!(
            "Opening account for user {} with balance {}",
            new_account.user_id, new_account.opening_balance
        );
        self.repository.create(new_account).await
    }

    fn get_account(&self, user_id: &str) -> Result<CurrentAccount> {
        self.repository.get_by_user(user_id)
    }

    fn list_ledger_entries(&self, user_id: &str) -> Result<Vec<LedgerEntry>> {
        let account = self.repository.get_by_user(user_id)?;
        self.repository.list_entries(&account.id)
    }
}
