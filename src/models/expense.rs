//! Expense model

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, BudgetId, CategoryId, ExpenseId};
use super::money::Money;

/// Money spent against a category and budget, optionally paid from an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What the money was spent on
    pub description: String,

    /// Amount spent (always positive)
    pub amount: Money,

    /// When the expense happened
    pub date: NaiveDate,

    /// Category the expense is classified under
    pub category_id: CategoryId,

    /// Budget the expense is charged to
    pub budget_id: BudgetId,

    /// Account the expense was paid from, if tracked
    #[serde(default)]
    pub account_id: Option<AccountId>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense not tied to an account
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category_id: CategoryId,
        budget_id: BudgetId,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            amount,
            date,
            category_id,
            budget_id,
            account_id: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the account this expense was paid from
    pub fn paid_from(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// The expense date as an instant at the start of that day
    pub fn instant(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.description, self.amount)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive (got {})", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
