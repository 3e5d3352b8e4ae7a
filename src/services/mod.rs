//! Service layer for budget-manager
//!
//! `range`, `ledger`, `balance` and `utilization` are the pure calculation
//! core. `validation` holds the multi-record checks used when records are
//! added, and `summary` builds reports over a `LedgerRepository`.

pub mod balance;
pub mod ledger;
pub mod range;
pub mod summary;
pub mod utilization;
pub mod validation;

pub use balance::{account_transactions, effective_balance, BalanceReport};
pub use ledger::{
    sum_amounts, totals_by, totals_by_account, totals_by_budget, totals_by_category, within_range,
    Amount, Dated,
};
pub use range::{budget_window, resolve_current_range, resolve_date_range, resolve_range};
pub use summary::{
    AccountBalance, BudgetSummaryRow, BudgetUtilization, ExpenseListing, SummaryService,
};
pub use utilization::{evaluate, Utilization};
