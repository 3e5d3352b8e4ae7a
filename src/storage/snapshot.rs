//! JSON ledger snapshot
//!
//! The whole ledger in one file: every account, category, budget, expense and
//! transfer. Records added through the `add_*` methods are validated first;
//! records read from disk are checked as a whole by `check_integrity`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::file_io::{read_json_required, write_json_atomic};
use super::LedgerRepository;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Account, Budget, Category, Expense, Transfer};
use crate::services::validation;

/// Current snapshot file format
pub const SNAPSHOT_VERSION: u32 = 1;

/// In-memory ledger, serializable to a single JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default = "default_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub transfers: Vec<Transfer>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl LedgerSnapshot {
    /// An empty snapshot at the current format version
    pub fn new() -> Self {
        Self {
            schema_version: SNAPSHOT_VERSION,
            ..Default::default()
        }
    }

    /// Load a snapshot, failing if the file does not exist
    pub fn load(path: impl AsRef<Path>) -> BudgetResult<Self> {
        let path = path.as_ref();
        let snapshot: Self = read_json_required(path)?;
        snapshot.check_version()?;
        tracing::info!(
            path = %path.display(),
            accounts = snapshot.accounts.len(),
            budgets = snapshot.budgets.len(),
            expenses = snapshot.expenses.len(),
            transfers = snapshot.transfers.len(),
            "loaded ledger snapshot"
        );
        Ok(snapshot)
    }

    /// Write the snapshot atomically
    pub fn save(&self, path: impl AsRef<Path>) -> BudgetResult<()> {
        write_json_atomic(path, self)
    }

    fn check_version(&self) -> BudgetResult<()> {
        if self.schema_version > SNAPSHOT_VERSION {
            return Err(BudgetError::Storage(format!(
                "Snapshot format version {} is newer than supported version {}",
                self.schema_version, SNAPSHOT_VERSION
            )));
        }
        Ok(())
    }

    /// Add an account after validating it and its name's uniqueness
    pub fn add_account(&mut self, account: Account) -> BudgetResult<()> {
        validation::ensure_account(&account)?;
        validation::validate_unique_account_name(&account.name, account.user_id, &self.accounts)?;
        self.accounts.push(account);
        Ok(())
    }

    /// Add a category after validating its name and parent
    pub fn add_category(&mut self, category: Category) -> BudgetResult<()> {
        validation::ensure_category(&category)?;
        validation::validate_unique_category_name(
            &category.name,
            category.budget_id,
            &self.categories,
        )?;
        if let Some(parent_id) = category.parent_id {
            validation::validate_category_parent(category.id, parent_id, &self.categories)?;
        }
        self.categories.push(category);
        Ok(())
    }

    /// Add a budget; one per category and period for each user
    pub fn add_budget(&mut self, budget: Budget) -> BudgetResult<()> {
        validation::ensure_budget(&budget)?;
        validation::validate_unique_budget(
            budget.category_id,
            budget.user_id,
            budget.period,
            &self.budgets,
        )?;
        self.budgets.push(budget);
        Ok(())
    }

    /// Add an expense; its budget, category and account must exist
    pub fn add_expense(&mut self, expense: Expense) -> BudgetResult<()> {
        validation::ensure_expense(&expense)?;
        if self.budget(expense.budget_id).is_none() {
            return Err(BudgetError::budget_not_found(expense.budget_id.to_string()));
        }
        if self.category(expense.category_id).is_none() {
            return Err(BudgetError::category_not_found(expense.category_id.to_string()));
        }
        if let Some(account_id) = expense.account_id {
            if self.account(account_id).is_none() {
                return Err(BudgetError::account_not_found(account_id.to_string()));
            }
        }
        self.expenses.push(expense);
        Ok(())
    }

    /// Add a transfer; both accounts must exist
    pub fn add_transfer(&mut self, transfer: Transfer) -> BudgetResult<()> {
        validation::ensure_transfer(&transfer)?;
        for account_id in [transfer.source_account_id, transfer.destination_account_id] {
            if self.account(account_id).is_none() {
                return Err(BudgetError::account_not_found(account_id.to_string()));
            }
        }
        self.transfers.push(transfer);
        Ok(())
    }

    /// Validate every record and every cross-reference
    ///
    /// Returns one message per problem found; an empty list means the
    /// snapshot is consistent.
    pub fn check_integrity(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for account in &self.accounts {
            if let Err(e) = account.validate() {
                problems.push(format!("account {}: {}", account.id, e));
            }
        }
        for category in &self.categories {
            if let Err(e) = category.validate() {
                problems.push(format!("category {}: {}", category.id, e));
            }
            if let Some(parent_id) = category.parent_id {
                if let Err(e) =
                    validation::validate_category_parent(category.id, parent_id, &self.categories)
                {
                    problems.push(format!("category {}: {}", category.id, e));
                }
            }
        }
        for budget in &self.budgets {
            if let Err(e) = budget.validate() {
                problems.push(format!("budget {}: {}", budget.id, e));
            }
            if self.category(budget.category_id).is_none() {
                problems.push(format!(
                    "budget {}: unknown category {}",
                    budget.id, budget.category_id
                ));
            }
        }
        for expense in &self.expenses {
            if let Err(e) = expense.validate() {
                problems.push(format!("expense {}: {}", expense.id, e));
            }
            if self.budget(expense.budget_id).is_none() {
                problems.push(format!(
                    "expense {}: unknown budget {}",
                    expense.id, expense.budget_id
                ));
            }
            if self.category(expense.category_id).is_none() {
                problems.push(format!(
                    "expense {}: unknown category {}",
                    expense.id, expense.category_id
                ));
            }
            if let Some(account_id) = expense.account_id {
                if self.account(account_id).is_none() {
                    problems.push(format!(
                        "expense {}: unknown account {}",
                        expense.id, account_id
                    ));
                }
            }
        }
        for transfer in &self.transfers {
            if let Err(e) = transfer.validate() {
                problems.push(format!("transfer {}: {}", transfer.id, e));
            }
            for (side, account_id) in [
                ("source", transfer.source_account_id),
                ("destination", transfer.destination_account_id),
            ] {
                if self.account(account_id).is_none() {
                    problems.push(format!(
                        "transfer {}: unknown {} account {}",
                        transfer.id, side, account_id
                    ));
                }
            }
        }

        problems
    }
}

impl LedgerRepository for LedgerSnapshot {
    fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, AccountType, BudgetId, BudgetPeriod, CategoryId, Money, UserId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Fixture {
        snapshot: LedgerSnapshot,
        user: UserId,
        account: Account,
        budget: Budget,
        category: Category,
    }

    fn fixture() -> Fixture {
        let user = UserId::new();
        let mut snapshot = LedgerSnapshot::new();

        let account =
            Account::with_opening_balance("Nomina", AccountType::Debit, user, Money::from_units(15000));
        snapshot.add_account(account.clone()).unwrap();

        // Categories reference a budget and budgets reference a category;
        // the budget id is fixed up front to tie the two together.
        let budget_id = BudgetId::new();
        let category = Category::new("Groceries", budget_id);
        snapshot.add_category(category.clone()).unwrap();

        let mut budget = Budget::new(
            "Groceries",
            Money::from_units(5000),
            BudgetPeriod::Monthly,
            date(2025, 1, 1),
            date(2025, 12, 31),
            category.id,
            user,
        );
        budget.id = budget_id;
        snapshot.add_budget(budget.clone()).unwrap();

        Fixture {
            snapshot,
            user,
            account,
            budget,
            category,
        }
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut f = fixture();

        let again = Account::new("Nomina", AccountType::Savings, f.user);
        assert!(f.snapshot.add_account(again).unwrap_err().is_duplicate());

        let mut second = f.budget.clone();
        second.id = BudgetId::new();
        assert!(f.snapshot.add_budget(second).unwrap_err().is_duplicate());
    }

    #[test]
    fn test_add_expense_checks_references() {
        let mut f = fixture();

        let ok = Expense::new(
            "Market",
            Money::from_units(120),
            date(2025, 3, 3),
            f.category.id,
            f.budget.id,
        )
        .paid_from(f.account.id);
        f.snapshot.add_expense(ok).unwrap();

        let orphan = Expense::new(
            "Lost",
            Money::from_units(1),
            date(2025, 3, 3),
            f.category.id,
            BudgetId::new(),
        );
        assert!(f.snapshot.add_expense(orphan).unwrap_err().is_not_found());

        let negative = Expense::new(
            "Refund",
            Money::from_units(-5),
            date(2025, 3, 3),
            f.category.id,
            f.budget.id,
        );
        assert!(f.snapshot.add_expense(negative).unwrap_err().is_validation());
    }

    #[test]
    fn test_add_transfer_requires_accounts() {
        let mut f = fixture();
        let savings = Account::new("Ahorro", AccountType::Savings, f.user);
        let savings_id = savings.id;
        f.snapshot.add_account(savings).unwrap();

        let transfer = Transfer::new(Money::from_units(500), date(2025, 3, 1), f.account.id, savings_id);
        f.snapshot.add_transfer(transfer).unwrap();

        let dangling = Transfer::new(
            Money::from_units(500),
            date(2025, 3, 1),
            f.account.id,
            AccountId::new(),
        );
        assert!(f.snapshot.add_transfer(dangling).unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_and_load() {
        let f = fixture();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("ledger.json");

        f.snapshot.save(&path).unwrap();
        let loaded = LedgerSnapshot::load(&path).unwrap();
        assert_eq!(loaded, f.snapshot);
        assert!(loaded.check_integrity().is_empty());
    }

    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        assert!(LedgerSnapshot::load(&path).unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, r#"{"schema_version": 99}"#).unwrap();
        assert!(LedgerSnapshot::load(&path).is_err());
    }

    #[test]
    fn test_integrity_reports_dangling_budget() {
        let mut f = fixture();
        f.snapshot.expenses.push(Expense::new(
            "Bypass",
            Money::from_units(1),
            date(2025, 3, 1),
            f.category.id,
            BudgetId::new(),
        ));
        let problems = f.snapshot.check_integrity();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("unknown budget"));
    }

    #[test]
    fn test_integrity_reports_dangling_category() {
        let mut f = fixture();
        f.snapshot.expenses.push(Expense::new(
            "Bypass",
            Money::from_units(1),
            date(2025, 3, 1),
            CategoryId::new(),
            f.budget.id,
        ));
        let problems = f.snapshot.check_integrity();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("unknown category"));
    }

    #[test]
    fn test_integrity_reports_dangling_transfer_accounts() {
        let mut f = fixture();
        f.snapshot.transfers.push(Transfer::new(
            Money::from_units(3000),
            date(2025, 3, 10),
            f.account.id,
            AccountId::new(),
        ));
        f.snapshot.transfers.push(Transfer::new(
            Money::from_units(10),
            date(2025, 3, 11),
            AccountId::new(),
            f.account.id,
        ));

        let problems = f.snapshot.check_integrity();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("unknown destination account"));
        assert!(problems[1].contains("unknown source account"));
    }

    #[test]
    fn test_lookup_by_name_and_short_id() {
        let f = fixture();
        assert_eq!(f.snapshot.find_account("nomina").unwrap().id, f.account.id);
        assert_eq!(
            f.snapshot.find_budget(&f.budget.id.to_string()).unwrap().id,
            f.budget.id
        );
        assert!(f.snapshot.find_category("Rent").unwrap_err().is_not_found());
    }
}
