//! Current account domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Prepaid balance owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentAccount {
    pub id: String,
    pub user_id: String,
    pub balance: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Audit record of one balance adjustment. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub account_id: String,
    pub label: String,
    pub delta: Decimal,
    pub resulting_balance: Decimal,
    pub created_at: NaiveDateTime,
}

impl LedgerEntry {
    /// Balance the account held before this entry was applied.
    pub fn previous_balance(&self) -> Decimal {
        self.resulting_balance - self.delta
    }
}

/// Input model for opening an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCurrentAccount {
    pub user_id: String,
    #[serde(default)]
    pub opening_balance: Decimal,
}

impl NewCurrentAccount {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.opening_balance < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Opening balance cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}
