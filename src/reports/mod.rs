//! Reports module for budget-manager
//!
//! Budget summary, account balances and expense listings, each with a
//! terminal rendering and (for the tabular ones) CSV export.

pub mod account_balances;
pub mod budget_summary;
pub mod expense_list;

pub use account_balances::{AccountBalanceReport, AccountBalanceRow};
pub use budget_summary::BudgetSummaryReport;
pub use expense_list::ExpenseListReport;
