//! SQLite storage implementation for current accounts and their ledger.

mod model;
mod repository;

pub use model::{CurrentAccountDB, LedgerEntryDB};
pub(crate) use repository::apply_settlement;
pub use repository::AccountRepository;
