//! Storage layer for budget-manager
//!
//! Services read records through the `LedgerRepository` trait and never reach
//! for a global store. `LedgerSnapshot` is the JSON-file implementation used
//! by the CLI and the tests.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use snapshot::LedgerSnapshot;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Account, AccountId, Budget, BudgetId, Category, CategoryId, Expense, Transfer, UserId,
};

/// Read access to the records the calculation core consumes
pub trait LedgerRepository {
    fn accounts(&self) -> &[Account];
    fn categories(&self) -> &[Category];
    fn budgets(&self) -> &[Budget];
    fn expenses(&self) -> &[Expense];
    fn transfers(&self) -> &[Transfer];

    fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts().iter().find(|a| a.id == id)
    }

    fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories().iter().find(|c| c.id == id)
    }

    fn budget(&self, id: BudgetId) -> Option<&Budget> {
        self.budgets().iter().find(|b| b.id == id)
    }

    /// Accounts owned by `user_id`
    fn accounts_for_user(&self, user_id: UserId) -> Vec<&Account> {
        self.accounts()
            .iter()
            .filter(|a| a.user_id == user_id)
            .collect()
    }

    /// Budgets owned by `user_id`
    fn budgets_for_user(&self, user_id: UserId) -> Vec<&Budget> {
        self.budgets()
            .iter()
            .filter(|b| b.user_id == user_id)
            .collect()
    }

    /// Find an account by full ID, short display ID or name (case-insensitive)
    fn find_account(&self, identifier: &str) -> BudgetResult<&Account> {
        let by_id = identifier.parse::<AccountId>().ok();
        self.accounts()
            .iter()
            .find(|a| {
                Some(a.id) == by_id
                    || a.id.to_string() == identifier
                    || a.name.eq_ignore_ascii_case(identifier)
            })
            .ok_or_else(|| BudgetError::account_not_found(identifier))
    }

    /// Find a category by full ID, short display ID or name (case-insensitive)
    fn find_category(&self, identifier: &str) -> BudgetResult<&Category> {
        let by_id = identifier.parse::<CategoryId>().ok();
        self.categories()
            .iter()
            .find(|c| {
                Some(c.id) == by_id
                    || c.id.to_string() == identifier
                    || c.name.eq_ignore_ascii_case(identifier)
            })
            .ok_or_else(|| BudgetError::category_not_found(identifier))
    }

    /// Find a budget by full ID, short display ID or name (case-insensitive)
    fn find_budget(&self, identifier: &str) -> BudgetResult<&Budget> {
        let by_id = identifier.parse::<BudgetId>().ok();
        self.budgets()
            .iter()
            .find(|b| {
                Some(b.id) == by_id
                    || b.id.to_string() == identifier
                    || b.name.eq_ignore_ascii_case(identifier)
            })
            .ok_or_else(|| BudgetError::budget_not_found(identifier))
    }
}
