//! Balance settlement.

use chrono::{DateTime, Utc};
use log::error;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::accounts_model::{CurrentAccount, LedgerEntry};
use crate::errors::{Result, ValidationError};
use crate::parking::ParkingError;

/// Debits `amount` from `account` and produces the matching ledger entry.
///
/// Nothing is written here; the caller hands both values to
/// [`AccountRepositoryTrait::persist`](super::AccountRepositoryTrait::persist)
/// so the balance and the entry land together.
///
/// A balance below `amount` is an invariant violation (the start gate should
/// have prevented it) and is reported as
/// [`ParkingError::InsufficientFundsAtSettlement`], never clamped.
pub fn settle(
    account: &CurrentAccount,
    amount: Decimal,
    label: &str,
    at: DateTime<Utc>,
) -> Result<(CurrentAccount, LedgerEntry)> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "Settlement amount must not be negative, got {}",
            amount
        ))
        .into());
    }

    if account.balance < amount {
        error!(
            "Invariant violation: account {} (user {}) holds {} but settlement '{}' requires {}",
            account.id, account.user_id, account.balance, label, amount
        );
        return Err(ParkingError::InsufficientFundsAtSettlement {
            balance: account.balance,
            required: amount,
        }
        .into());
    }

    let now = at.naive_utc();
    let resulting_balance = account.balance - amount;

    let entry = LedgerEntry {
        id: Uuid::new_v4().to_string(),
        account_id: account.id.clone(),
        label: label.to_string(),
        delta: -amount,
        resulting_balance,
        created_at: now,
    };

    let updated = CurrentAccount {
        balance: resulting_balance,
        updated_at: now,
        ..account.clone()
    };

    Ok((updated, entry))
}
