//! Transfer model

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, TransferId};
use super::money::Money;

/// Money moved from one account to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// Unique identifier
    pub id: TransferId,

    /// Amount moved (always positive)
    pub amount: Money,

    /// When the transfer happened
    pub date: NaiveDate,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Account the money leaves
    pub source_account_id: AccountId,

    /// Account the money enters
    pub destination_account_id: AccountId,

    /// When the transfer was recorded
    pub created_at: DateTime<Utc>,
}

impl Transfer {
    /// Create a new transfer
    pub fn new(
        amount: Money,
        date: NaiveDate,
        source_account_id: AccountId,
        destination_account_id: AccountId,
    ) -> Self {
        Self {
            id: TransferId::new(),
            amount,
            date,
            description: None,
            source_account_id,
            destination_account_id,
            created_at: Utc::now(),
        }
    }

    /// The transfer date as an instant at the start of that day
    pub fn instant(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }

    /// Validate the transfer
    pub fn validate(&self) -> Result<(), TransferValidationError> {
        if !self.amount.is_positive() {
            return Err(TransferValidationError::NonPositiveAmount(self.amount));
        }

        if self.source_account_id == self.destination_account_id {
            return Err(TransferValidationError::SameAccount);
        }

        Ok(())
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} -> {}",
            self.date, self.amount, self.source_account_id, self.destination_account_id
        )
    }
}

/// Validation errors for transfers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferValidationError {
    NonPositiveAmount(Money),
    SameAccount,
}

impl fmt::Display for TransferValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transfer amount must be positive (got {})", amount)
            }
            Self::SameAccount => write!(f, "Transfer source and destination must differ"),
        }
    }
}

impl std::error::Error for TransferValidationError {}
