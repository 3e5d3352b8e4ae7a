//! Budget recurrence period
//!
//! A budget's limit applies once per period. The concrete window a period
//! covers for a given date is resolved by `services::range::budget_window`.

use serde::{Deserialize, Serialize};
use std::fmt;

use chrono::NaiveDate;

use super::range::{DateRange, RangePeriod};

/// How often a budget's limit resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// Every week (Sunday through Saturday)
    Weekly,
    /// Every fourteen days, counted from the budget's start date
    BiWeekly,
    /// Every calendar month
    Monthly,
    /// Every calendar year
    Annual,
}

impl BudgetPeriod {
    /// The calendar range period this budget period lines up with, if any
    ///
    /// Bi-weekly budgets are anchored on their own start date and have no
    /// calendar equivalent.
    pub fn calendar_range(&self) -> Option<RangePeriod> {
        match self {
            Self::Weekly => Some(RangePeriod::Week),
            Self::BiWeekly => None,
            Self::Monthly => Some(RangePeriod::Month),
            Self::Annual => Some(RangePeriod::Year),
        }
    }

    /// The window of this period that contains `reference`
    ///
    /// `anchor` is the budget's start date; only bi-weekly periods use it.
    pub fn window(&self, reference: NaiveDate, anchor: NaiveDate) -> DateRange {
        crate::services::range::budget_window(*self, reference, anchor)
    }

    /// Parse a period string
    ///
    /// Accepts "weekly", "biweekly"/"bi-weekly", "monthly", "annual"/"yearly",
    /// case-insensitive.
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "biweekly" | "bi-weekly" | "bi_weekly" | "fortnightly" => Ok(Self::BiWeekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "annual" | "annually" | "yearly" | "year" => Ok(Self::Annual),
            _ => Err(PeriodParseError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "Weekly"),
            Self::BiWeekly => write!(f, "Bi-weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Annual => write!(f, "Annual"),
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
        }
    }
}

impl std::error::Error for PeriodParseError {}
