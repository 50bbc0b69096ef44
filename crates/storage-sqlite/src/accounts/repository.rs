use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::{info, warn};
use parking_core::accounts::{
    AccountRepositoryTrait, CurrentAccount, LedgerEntry, NewCurrentAccount,
};
use parking_core::constants::OPENING_BALANCE_LABEL;
use parking_core::errors::{DatabaseError, Error, Result};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::model::{CurrentAccountDB, LedgerEntryDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{account_ledger_entries, current_accounts};
use crate::utils::{format_decimal, parse_decimal};

/// Repository for current accounts and their ledger
pub struct AccountRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

/// Writes a settled balance and its ledger entry on the writer connection.
///
/// Refuses when the stored balance is not the one the entry was computed
/// from. Must run inside the caller's write transaction.
pub(crate) fn apply_settlement(
    conn: &mut SqliteConnection,
    account: CurrentAccount,
    entry: LedgerEntry,
) -> Result<CurrentAccountDB> {
    let stored = current_accounts::table
        .find(&account.id)
        .select(current_accounts::balance)
        .first::<String>(conn)
        .into_core()?;
    let stored: Decimal = parse_decimal("current_accounts.balance", &stored)?;

    if stored != entry.previous_balance() {
        warn!(
            "Refusing ledger entry {} on account {}: stored balance {} differs from {}",
            entry.id,
            account.id,
            stored,
            entry.previous_balance()
        );
        return Err(DatabaseError::TransactionFailed(format!(
            "Balance of account {} changed concurrently",
            account.id
        ))
        .into());
    }

    let account_db = CurrentAccountDB::from(account);
    diesel::update(current_accounts::table.find(&account_db.id))
        .set((
            current_accounts::balance.eq(&account_db.balance),
            current_accounts::updated_at.eq(account_db.updated_at),
        ))
        .execute(conn)
        .into_core()?;

    diesel::insert_into(account_ledger_entries::table)
        .values(LedgerEntryDB::from(entry))
        .execute(conn)
        .into_core()?;

    Ok(account_db)
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewCurrentAccount) -> Result<CurrentAccount> {
        new_account.validate()?;

        self.writer
            .exec(move |conn| -> Result<CurrentAccount> {
                let now = Utc::now().naive_utc();
                let account_db = CurrentAccountDB {
                    id: Uuid::new_v4().to_string(),
                    user_id: new_account.user_id.trim().to_string(),
                    balance: format_decimal(new_account.opening_balance),
                    created_at: now,
                    updated_at: now,
                };

                diesel::insert_into(current_accounts::table)
                    .values(&account_db)
                    .execute(conn)
                    .into_core()?;

                if !new_account.opening_balance.is_zero() {
                    let entry = LedgerEntryDB {
                        id: Uuid::new_v4().to_string(),
                        account_id: account_db.id.clone(),
                        label: OPENING_BALANCE_LABEL.to_string(),
                        delta: account_db.balance.clone(),
                        resulting_balance: account_db.balance.clone(),
                        created_at: now,
                    };
                    diesel::insert_into(account_ledger_entries::table)
                        .values(&entry)
                        .execute(conn)
                        .into_core()?;
                }

                info!(
                    "Opened account {} for user {}",
                    account_db.id, account_db.user_id
                );
                Ok(CurrentAccount::try_from(account_db)?)
            })
            .await
    }

    fn get_by_user(&self, user_id: &str) -> Result<CurrentAccount> {
        let mut conn = get_connection(&self.pool)?;

        let account = current_accounts::table
            .filter(current_accounts::user_id.eq(user_id))
            .select(CurrentAccountDB::as_select())
            .first::<CurrentAccountDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| DatabaseError::NotFound(format!("Account for user {}", user_id)))?;

        Ok(CurrentAccount::try_from(account)?)
    }

    async fn persist(&self, account: CurrentAccount, entry: LedgerEntry) -> Result<CurrentAccount> {
        self.writer
            .exec(move |conn| -> Result<CurrentAccount> {
                Ok(CurrentAccount::try_from(apply_settlement(conn, account, entry)?)?)
            })
            .await
    }

    fn list_entries(&self, account_id: &str) -> Result<Vec<LedgerEntry>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = account_ledger_entries::table
            .filter(account_ledger_entries::account_id.eq(account_id))
            .select(LedgerEntryDB::as_select())
            .order(account_ledger_entries::created_at.asc())
            .load::<LedgerEntryDB>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|row| LedgerEntry::try_from(row).map_err(Error::from))
            .collect()
    }
}
