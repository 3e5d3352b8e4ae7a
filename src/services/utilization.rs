//! Budget utilization
//!
//! Compares what was spent against a budget's limit.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::ledger::{sum_amounts, Amount};
use crate::models::Money;

/// Spend measured against a limit
///
/// `remaining` is clamped at zero: once spending passes the limit it stays at
/// zero and does not go negative. Consumers wanting the size of an overspend
/// must compute `used - limit` themselves; `percentage` above 100 (or
/// `is_overspent`) is the only overspend signal carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Utilization {
    /// Total spent
    pub used: Money,
    /// Limit minus spent, never below zero
    pub remaining: Money,
    /// Spent as a percentage of the limit; zero when the limit is not positive
    pub percentage: Decimal,
}

impl Utilization {
    /// Whether spending went past the limit
    pub fn is_overspent(&self) -> bool {
        self.percentage > dec!(100)
    }
}

/// Evaluate `expenses` against `limit`
pub fn evaluate<I>(expenses: I, limit: Money) -> Utilization
where
    I: IntoIterator,
    I::Item: Amount,
{
    let used = sum_amounts(expenses);
    let remaining = (limit - used).max(Money::zero());
    let percentage = if limit.is_positive() {
        used.to_decimal() / limit.to_decimal() * dec!(100)
    } else {
        Decimal::ZERO
    };

    tracing::debug!(%used, %limit, %percentage, "evaluated utilization");

    Utilization {
        used,
        remaining,
        percentage,
    }
}
