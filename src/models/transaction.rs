//! Normalized account transaction
//!
//! A `Transaction` is never stored. It is the signed view of an expense or a
//! transfer from the perspective of a single account, built by
//! `services::balance::account_transactions` and consumed by the balance
//! calculator.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Which way money moves relative to the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money entering the account (incoming transfer, income)
    Inflow,
    /// Money leaving the account (expense, outgoing transfer)
    Outflow,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inflow => write!(f, "+"),
            Self::Outflow => write!(f, "-"),
        }
    }
}

/// Unsigned amount plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Money,
    pub direction: Direction,
}

impl Transaction {
    /// Money entering the account
    pub fn inflow(amount: Money) -> Self {
        Self {
            amount,
            direction: Direction::Inflow,
        }
    }

    /// Money leaving the account
    pub fn outflow(amount: Money) -> Self {
        Self {
            amount,
            direction: Direction::Outflow,
        }
    }

    /// The amount with its sign applied
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            Direction::Inflow => self.amount,
            Direction::Outflow => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction, self.amount)
    }
}
