//! Core data models for budget-manager
//!
//! Typed, already-validated records handed to the calculation core, plus the
//! derived value types the core returns.

pub mod account;
pub mod budget;
pub mod category;
pub mod currency;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;
pub mod range;
pub mod transaction;
pub mod transfer;

pub use account::{Account, AccountType};
pub use budget::Budget;
pub use category::Category;
pub use currency::Currency;
pub use expense::Expense;
pub use ids::{AccountId, BudgetId, CategoryId, ExpenseId, TransferId, UserId};
pub use money::Money;
pub use period::BudgetPeriod;
pub use range::{DateRange, RangePeriod};
pub use transaction::{Direction, Transaction};
pub use transfer::Transfer;
