//! Budget model
//!
//! A budget is a spending limit for one category that resets every period
//! and applies only inside its validity window.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId, UserId};
use super::money::Money;
use super::period::BudgetPeriod;

/// A recurring spending limit for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Budget name (e.g., "Monthly Groceries Budget")
    pub name: String,

    /// Spending limit per period
    pub limit: Money,

    /// How often the limit resets
    pub period: BudgetPeriod,

    /// First day the budget applies
    pub start_date: NaiveDate,

    /// Last day the budget applies (inclusive)
    pub end_date: NaiveDate,

    /// Inactive budgets are skipped by summaries
    #[serde(default = "default_active")]
    pub active: bool,

    /// The category this budget limits
    pub category_id: CategoryId,

    /// Owning user
    pub user_id: UserId,

    /// When the budget was created
    pub created_at: DateTime<Utc>,

    /// When the budget was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Budget {
    /// Create a new active budget
    pub fn new(
        name: impl Into<String>,
        limit: Money,
        period: BudgetPeriod,
        start_date: NaiveDate,
        end_date: NaiveDate,
        category_id: CategoryId,
        user_id: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            name: name.into(),
            limit,
            period,
            start_date,
            end_date,
            active: true,
            category_id,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the budget applies on `date`: active and inside its window
    pub fn is_in_effect(&self, date: NaiveDate) -> bool {
        self.active && self.start_date <= date && date <= self.end_date
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.limit));
        }

        if self.end_date < self.start_date {
            return Err(BudgetValidationError::InvertedWindow {
                start: self.start_date,
                end: self.end_date,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.period, self.limit)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NonPositiveLimit(Money),
    InvertedWindow { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be positive (got {})", limit)
            }
            Self::InvertedWindow { start, end } => {
                write!(f, "Budget end date {} is before start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
