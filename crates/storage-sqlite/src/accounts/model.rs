//! Database models for current accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use parking_core::accounts::{CurrentAccount, LedgerEntry};

use crate::errors::StorageError;
use crate::utils::{format_decimal, parse_decimal};

/// Database model for current accounts
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::current_accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CurrentAccountDB {
    pub id: String,
    pub user_id: String,
    pub balance: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for ledger entries
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::account_ledger_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LedgerEntryDB {
    pub id: String,
    pub account_id: String,
    pub label: String,
    pub delta: String,
    pub resulting_balance: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<CurrentAccountDB> for CurrentAccount {
    type Error = StorageError;

    fn try_from(db: CurrentAccountDB) -> Result<Self, Self::Error> {
        Ok(Self {
            balance: parse_decimal("current_accounts.balance", &db.balance)?,
            id: db.id,
            user_id: db.user_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<CurrentAccount> for CurrentAccountDB {
    fn from(domain: CurrentAccount) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            balance: format_decimal(domain.balance),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl TryFrom<LedgerEntryDB> for LedgerEntry {
    type Error = StorageError;

    fn try_from(db: LedgerEntryDB) -> Result<Self, Self::Error> {
        Ok(Self {
            delta: parse_decimal("account_ledger_entries.delta", &db.delta)?,
            resulting_balance: parse_decimal(
                "account_ledger_entries.resulting_balance",
                &db.resulting_balance,
            )?,
            id: db.id,
            account_id: db.account_id,
            label: db.label,
            created_at: db.created_at,
        })
    }
}

impl From<LedgerEntry> for LedgerEntryDB {
    fn from(domain: LedgerEntry) -> Self {
        Self {
            id: domain.id,
            account_id: domain.account_id,
            label: domain.label,
            delta: format_decimal(domain.delta),
            resulting_balance: format_decimal(domain.resulting_balance),
            created_at: domain.created_at,
        }
    }
}
