//! Current accounts module - balances, ledger entries and settlement.

mod accounts_model;
mod accounts_service;
mod accounts_traits;
mod ledger;


pub use accounts_model::{CurrentAccount, LedgerEntry, NewCurrentAccount};
pub use accounts_service::AccountService;
pub use accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
pub use ledger::settle;
