//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{CurrentAccount, LedgerEntry, NewCurrentAccount};
use crate::errors::Result;

/// Trait defining the contract for CurrentAccount repository operations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Opens an account. A non-zero opening balance is recorded as the
    /// account's first ledger entry.
    async fn create(&self, new_account: NewCurrentAccount) -> Result<CurrentAccount>;

    /// Retrieves the account owned by `user_id`.
    ///
    /// Fails with `DatabaseError::NotFound` when the user has no account.
    fn get_by_user(&self, user_id: &str) -> Result<CurrentAccount>;

    /// Writes the new balance and appends `entry` as one atomic unit.
    ///
    /// Implementations must refuse the write when the stored balance no
    /// longer equals `entry.previous_balance()`.
    async fn persist(&self, account: CurrentAccount, entry: LedgerEntry)
        -> Result<CurrentAccount>;

    /// Lists ledger entries for an account, oldest first.
    fn list_entries(&self, account_id: &str) -> Result<Vec<LedgerEntry>>;
}

/// Trait defining the contract for account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn open_account(&self, new_account: NewCurrentAccount) -> Result<CurrentAccount>;
    fn get_account(&self, user_id: &str) -> Result<CurrentAccount>;
    fn list_ledger_entries(&self, user_id: &str) -> Result<Vec<LedgerEntry>>;
}
