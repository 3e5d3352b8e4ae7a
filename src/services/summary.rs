//! Summary service
//!
//! Assembles the figures the dashboard and the CLI show: budget summaries,
//! per-category and per-budget spend, expense listings and account balances.

use chrono::NaiveDate;
use serde::Serialize;

use super::balance::{account_transactions, effective_balance, BalanceReport};
use super::ledger::{sum_amounts, within_range};
use super::utilization::{evaluate, Utilization};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Account, AccountId, Budget, BudgetId, BudgetPeriod, CategoryId, DateRange, Expense, Money,
    UserId,
};
use crate::storage::LedgerRepository;

/// Service computing reports over a ledger repository
pub struct SummaryService<'a> {
    repo: &'a dyn LedgerRepository,
}

/// One budget's standing inside its current period window
#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummaryRow {
    pub budget_id: BudgetId,
    pub budget_name: String,
    pub category_id: CategoryId,
    pub category_name: String,
    pub period: BudgetPeriod,
    pub limit: Money,
    pub window: DateRange,
    pub utilization: Utilization,
}

/// A list of expenses with its total
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseListing {
    pub expenses: Vec<Expense>,
    pub total: Money,
    pub count: usize,
}

impl ExpenseListing {
    fn from_expenses(mut expenses: Vec<Expense>) -> Self {
        // Newest first; creation time breaks ties within a day
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        let total = sum_amounts(&expenses);
        let count = expenses.len();
        Self {
            expenses,
            total,
            count,
        }
    }

    /// Keep only expenses of at least `min`, recomputing the total
    pub fn at_least(self, min: Money) -> Self {
        Self::from_expenses(
            self.expenses
                .into_iter()
                .filter(|e| e.amount >= min)
                .collect(),
        )
    }
}

/// Spend charged to one budget, measured against its limit
#[derive(Debug, Clone, Serialize)]
pub struct BudgetUtilization {
    pub budget_id: BudgetId,
    pub budget_name: String,
    pub limit: Money,
    pub range: Option<DateRange>,
    pub expense_count: usize,
    pub utilization: Utilization,
}

/// One account's stored and effective balance
#[derive(Debug, Clone, Serialize)]
pub struct AccountBalance {
    pub account_id: AccountId,
    pub account_name: String,
    pub balance: BalanceReport,
}

impl<'a> SummaryService<'a> {
    /// Create a new summary service
    pub fn new(repo: &'a dyn LedgerRepository) -> Self {
        Self { repo }
    }

    /// Budget summary for `reference`
    ///
    /// Covers every active budget in effect on `reference`, optionally limited
    /// to one user and one period. Spend is the budget's category expenses
    /// inside the budget's period window containing `reference`.
    pub fn budget_summary(
        &self,
        user_id: Option<UserId>,
        period: Option<BudgetPeriod>,
        reference: NaiveDate,
    ) -> Vec<BudgetSummaryRow> {
        let mut rows: Vec<BudgetSummaryRow> = self
            .repo
            .budgets()
            .iter()
            .filter(|b| user_id.map_or(true, |u| b.user_id == u))
            .filter(|b| period.map_or(true, |p| b.period == p))
            .filter(|b| b.is_in_effect(reference))
            .map(|budget| self.summarize(budget, reference))
            .collect();

        rows.sort_by(|a, b| {
            a.period
                .cmp(&b.period)
                .then_with(|| a.budget_name.cmp(&b.budget_name))
        });

        tracing::debug!(rows = rows.len(), %reference, "built budget summary");
        rows
    }

    fn summarize(&self, budget: &Budget, reference: NaiveDate) -> BudgetSummaryRow {
        let window = budget.period.window(reference, budget.start_date);
        let spent = within_range(
            self.repo
                .expenses()
                .iter()
                .filter(|e| e.category_id == budget.category_id),
            &window,
        );
        let utilization = evaluate(spent, budget.limit);

        let category_name = self
            .repo
            .category(budget.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "(unknown)".to_string());

        BudgetSummaryRow {
            budget_id: budget.id,
            budget_name: budget.name.clone(),
            category_id: budget.category_id,
            category_name,
            period: budget.period,
            limit: budget.limit,
            window,
            utilization,
        }
    }

    /// Expenses classified under a category, optionally inside `range`
    pub fn category_expenses(
        &self,
        category_id: CategoryId,
        range: Option<&DateRange>,
    ) -> BudgetResult<ExpenseListing> {
        if self.repo.category(category_id).is_none() {
            return Err(BudgetError::category_not_found(category_id.to_string()));
        }

        let expenses = self
            .repo
            .expenses()
            .iter()
            .filter(|e| e.category_id == category_id)
            .filter(|e| range.map_or(true, |r| r.contains(e.instant())))
            .cloned()
            .collect();

        Ok(ExpenseListing::from_expenses(expenses))
    }

    /// Spend charged to a budget, optionally inside `range`, against its limit
    pub fn budget_utilization(
        &self,
        budget_id: BudgetId,
        range: Option<&DateRange>,
    ) -> BudgetResult<BudgetUtilization> {
        let budget = self
            .repo
            .budget(budget_id)
            .ok_or_else(|| BudgetError::budget_not_found(budget_id.to_string()))?;

        let charged: Vec<&Expense> = self
            .repo
            .expenses()
            .iter()
            .filter(|e| e.budget_id == budget_id)
            .filter(|e| range.map_or(true, |r| r.contains(e.instant())))
            .collect();

        Ok(BudgetUtilization {
            budget_id,
            budget_name: budget.name.clone(),
            limit: budget.limit,
            range: range.copied(),
            expense_count: charged.len(),
            utilization: evaluate(&charged, budget.limit),
        })
    }

    /// Expenses dated `start` through `end` (inclusive), newest first
    ///
    /// With a user, only expenses charged to that user's budgets are listed.
    pub fn expenses_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        user_id: Option<UserId>,
    ) -> BudgetResult<ExpenseListing> {
        if end < start {
            return Err(BudgetError::Validation(format!(
                "End date {} is before start date {}",
                end, start
            )));
        }

        let range = DateRange::between(start, end);
        let owned: Option<Vec<BudgetId>> =
            user_id.map(|u| self.repo.budgets_for_user(u).iter().map(|b| b.id).collect());

        let expenses = within_range(self.repo.expenses(), &range)
            .filter(|e| owned.as_ref().map_or(true, |ids| ids.contains(&e.budget_id)))
            .cloned()
            .collect();

        Ok(ExpenseListing::from_expenses(expenses))
    }

    /// Opening and effective balance of one account
    pub fn account_balance(&self, account_id: AccountId) -> BudgetResult<AccountBalance> {
        let account = self
            .repo
            .account(account_id)
            .ok_or_else(|| BudgetError::account_not_found(account_id.to_string()))?;
        Ok(self.balance_of(account))
    }

    /// Balances of every account, optionally limited to one user
    pub fn account_balances(&self, user_id: Option<UserId>) -> Vec<AccountBalance> {
        let accounts = match user_id {
            Some(user_id) => self.repo.accounts_for_user(user_id),
            None => self.repo.accounts().iter().collect(),
        };
        accounts.into_iter().map(|a| self.balance_of(a)).collect()
    }

    fn balance_of(&self, account: &Account) -> AccountBalance {
        let transactions =
            account_transactions(account.id, self.repo.expenses(), self.repo.transfers());
        let balance = effective_balance(account.opening_balance, &transactions);

        if balance.has_drift() {
            tracing::info!(
                account = %account.name,
                opening = %balance.opening_balance,
                effective = %balance.effective_balance,
                "account balance differs from stored opening balance"
            );
        }

        AccountBalance {
            account_id: account.id,
            account_name: account.name.clone(),
            balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Category, Transfer};
    use crate::storage::LedgerSnapshot;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Ledger {
        snapshot: LedgerSnapshot,
        user: UserId,
        checking: AccountId,
        groceries: Budget,
        groceries_category: CategoryId,
    }

    fn ledger() -> Ledger {
        let user = UserId::new();
        let mut snapshot = LedgerSnapshot::new();

        let checking = Account::with_opening_balance(
            "Checking",
            AccountType::Debit,
            user,
            Money::from_units(15000),
        );
        let savings = Account::new("Savings", AccountType::Savings, user);
        let checking_id = checking.id;
        let savings_id = savings.id;
        snapshot.add_account(checking).unwrap();
        snapshot.add_account(savings).unwrap();

        let budget_id = BudgetId::new();
        let category = Category::new("Groceries", budget_id);
        let category_id = category.id;
        snapshot.add_category(category).unwrap();

        let mut groceries = Budget::new(
            "Groceries",
            Money::from_units(5000),
            BudgetPeriod::Monthly,
            date(2025, 1, 1),
            date(2025, 12, 31),
            category_id,
            user,
        );
        groceries.id = budget_id;
        snapshot.add_budget(groceries.clone()).unwrap();

        for (amount, day) in [(18500, 3), (12300, 14), (2000, 28)] {
            let expense = Expense::new(
                "Market",
                Money::from_units(amount),
                date(2025, 3, day),
                category_id,
                budget_id,
            );
            snapshot.add_expense(expense).unwrap();
        }
        // Outside March
        snapshot
            .add_expense(
                Expense::new(
                    "Market",
                    Money::from_units(700),
                    date(2025, 4, 1),
                    category_id,
                    budget_id,
                )
                .paid_from(checking_id),
            )
            .unwrap();

        snapshot
            .add_transfer(Transfer::new(
                Money::from_units(3000),
                date(2025, 3, 10),
                savings_id,
                checking_id,
            ))
            .unwrap();

        Ledger {
            snapshot,
            user,
            checking: checking_id,
            groceries,
            groceries_category: category_id,
        }
    }

    #[test]
    fn test_budget_summary_uses_period_window() {
        let l = ledger();
        let service = SummaryService::new(&l.snapshot);

        let rows = service.budget_summary(Some(l.user), None, date(2025, 3, 20));
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.category_name, "Groceries");
        assert_eq!(row.window.start_date(), date(2025, 3, 1));
        assert_eq!(row.utilization.used, Money::from_units(32800));
        assert_eq!(row.utilization.remaining, Money::zero());
        assert_eq!(row.utilization.percentage, dec!(656));
    }

    #[test]
    fn test_budget_summary_filters() {
        let l = ledger();
        let service = SummaryService::new(&l.snapshot);

        assert!(service
            .budget_summary(None, Some(BudgetPeriod::Weekly), date(2025, 3, 20))
            .is_empty());
        assert!(service
            .budget_summary(Some(UserId::new()), None, date(2025, 3, 20))
            .is_empty());
        // Outside the budget's validity window
        assert!(service.budget_summary(None, None, date(2026, 3, 20)).is_empty());
    }

    #[test]
    fn test_category_expenses() {
        let l = ledger();
        let service = SummaryService::new(&l.snapshot);

        let all = service.category_expenses(l.groceries_category, None).unwrap();
        assert_eq!(all.count, 4);
        assert_eq!(all.total, Money::from_units(33500));

        let march = DateRange::between(date(2025, 3, 1), date(2025, 3, 31));
        let listing = service
            .category_expenses(l.groceries_category, Some(&march))
            .unwrap();
        assert_eq!(listing.total, Money::from_units(32800));

        assert!(service
            .category_expenses(CategoryId::new(), None)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_budget_utilization() {
        let l = ledger();
        let service = SummaryService::new(&l.snapshot);

        let april = DateRange::between(date(2025, 4, 1), date(2025, 4, 30));
        let result = service
            .budget_utilization(l.groceries.id, Some(&april))
            .unwrap();
        assert_eq!(result.expense_count, 1);
        assert_eq!(result.utilization.used, Money::from_units(700));
        assert_eq!(result.utilization.remaining, Money::from_units(4300));
        assert_eq!(result.utilization.percentage, dec!(14));
    }

    #[test]
    fn test_expenses_by_date_range_newest_first() {
        let l = ledger();
        let service = SummaryService::new(&l.snapshot);

        let listing = service
            .expenses_by_date_range(date(2025, 3, 14), date(2025, 4, 1), Some(l.user))
            .unwrap();
        assert_eq!(listing.count, 3);
        assert_eq!(listing.expenses[0].date, date(2025, 4, 1));
        assert_eq!(listing.expenses[2].date, date(2025, 3, 14));
        assert_eq!(listing.total, Money::from_units(15000));

        let none = service
            .expenses_by_date_range(date(2025, 3, 1), date(2025, 3, 31), Some(UserId::new()))
            .unwrap();
        assert_eq!(none.count, 0);
        assert_eq!(none.total, Money::zero());

        assert!(service
            .expenses_by_date_range(date(2025, 3, 31), date(2025, 3, 1), None)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_account_balance() {
        let l = ledger();
        let service = SummaryService::new(&l.snapshot);

        let checking = service.account_balance(l.checking).unwrap();
        // 15000 + 3000 transfer in - 700 expense
        assert_eq!(checking.balance.effective_balance, Money::from_units(17300));
        assert_eq!(checking.balance.opening_balance, Money::from_units(15000));

        let all = service.account_balances(Some(l.user));
        assert_eq!(all.len(), 2);
        let total: Money = all.iter().map(|a| a.balance.effective_balance).sum();
        // savings went from 0 to -3000
        assert_eq!(total, Money::from_units(14300));
        assert!(service.account_balances(Some(UserId::new())).is_empty());
        assert_eq!(service.account_balances(None).len(), 2);

        assert!(service
            .account_balance(AccountId::new())
            .unwrap_err()
            .is_not_found());
    }
}
