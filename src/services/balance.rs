//! Balance calculation
//!
//! An account's effective balance is its stored opening balance plus the
//! signed sum of every transaction touching it. The stored figure is never
//! overwritten; both are reported so callers can spot drift.

use serde::Serialize;

use crate::models::{AccountId, Expense, Money, Transaction, Transfer};

/// Opening and effective balance of one account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    /// Balance stored on the account record
    pub opening_balance: Money,
    /// Opening balance plus signed transaction history
    pub effective_balance: Money,
}

impl BalanceReport {
    /// Effective minus opening balance
    pub fn drift(&self) -> Money {
        self.effective_balance - self.opening_balance
    }

    /// Whether the transaction history moved the balance at all
    pub fn has_drift(&self) -> bool {
        !self.drift().is_zero()
    }
}

/// Fold `transactions` onto `opening`
///
/// Inflows add their amount, outflows subtract it. The result does not depend
/// on the order of `transactions`.
pub fn effective_balance<'a, I>(opening: Money, transactions: I) -> BalanceReport
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let effective = transactions
        .into_iter()
        .fold(opening, |balance, txn| balance + txn.signed_amount());

    BalanceReport {
        opening_balance: opening,
        effective_balance: effective,
    }
}

/// Normalize the expenses and transfers touching `account_id`
///
/// Expenses paid from the account and transfers leaving it are outflows;
/// transfers arriving at it are inflows. A transfer from the account to
/// itself yields one of each.
pub fn account_transactions<'a, E, T>(
    account_id: AccountId,
    expenses: E,
    transfers: T,
) -> Vec<Transaction>
where
    E: IntoIterator<Item = &'a Expense>,
    T: IntoIterator<Item = &'a Transfer>,
{
    let mut transactions: Vec<Transaction> = expenses
        .into_iter()
        .filter(|e| e.account_id == Some(account_id))
        .map(|e| Transaction::outflow(e.amount))
        .collect();

    for transfer in transfers {
        if transfer.source_account_id == account_id {
            transactions.push(Transaction::outflow(transfer.amount));
        }
        if transfer.destination_account_id == account_id {
            transactions.push(Transaction::inflow(transfer.amount));
        }
    }

    transactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, CategoryId};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_no_transactions_keeps_opening() {
        let report = effective_balance(Money::from_units(15000), &[]);
        assert_eq!(report.effective_balance, Money::from_units(15000));
        assert!(!report.has_drift());
    }

    #[test]
    fn test_expense_and_income() {
        let txns = [
            Transaction::outflow(Money::from_units(5000)),
            Transaction::inflow(Money::from_units(3000)),
        ];
        let report = effective_balance(Money::from_units(15000), &txns);
        assert_eq!(report.opening_balance, Money::from_units(15000));
        assert_eq!(report.effective_balance, Money::from_units(13000));
        assert_eq!(report.drift(), Money::from_units(-2000));
        assert!(report.has_drift());
    }

    #[test]
    fn test_can_go_negative() {
        let txns = [Transaction::outflow(Money::from_units(500))];
        let report = effective_balance(Money::from_units(100), &txns);
        assert_eq!(report.effective_balance, Money::from_units(-400));
    }

    #[test]
    fn test_account_transactions() {
        let checking = AccountId::new();
        let savings = AccountId::new();
        let category = CategoryId::new();
        let budget = BudgetId::new();

        let expenses = vec![
            Expense::new("Groceries", Money::from_units(5000), date(), category, budget)
                .paid_from(checking),
            Expense::new("Cash lunch", Money::from_units(200), date(), category, budget),
            Expense::new("Fuel", Money::from_units(800), date(), category, budget)
                .paid_from(savings),
        ];
        let transfers = vec![
            Transfer::new(Money::from_units(1000), date(), checking, savings),
            Transfer::new(Money::from_units(3000), date(), savings, checking),
        ];

        let txns = account_transactions(checking, &expenses, &transfers);
        assert_eq!(txns.len(), 3);

        let report = effective_balance(Money::from_units(15000), &txns);
        // 15000 - 5000 - 1000 + 3000
        assert_eq!(report.effective_balance, Money::from_units(12000));
    }

    #[test]
    fn test_self_transfer_nets_to_zero() {
        let account = AccountId::new();
        let transfers = vec![Transfer::new(Money::from_units(250), date(), account, account)];

        let txns = account_transactions(account, Vec::<&Expense>::new(), &transfers);
        assert_eq!(txns.len(), 2);
        assert_eq!(
            effective_balance(Money::from_units(10), &txns).effective_balance,
            Money::from_units(10)
        );
    }

    fn transaction() -> impl Strategy<Value = Transaction> {
        (1i64..10_000_000, any::<bool>()).prop_map(|(cents, inflow)| {
            if inflow {
                Transaction::inflow(Money::from_cents(cents))
            } else {
                Transaction::outflow(Money::from_cents(cents))
            }
        })
    }

    fn transactions_and_permutation() -> impl Strategy<Value = (Vec<Transaction>, Vec<Transaction>)> {
        prop::collection::vec(transaction(), 0..100)
            .prop_flat_map(|txns| (Just(txns.clone()), Just(txns).prop_shuffle()))
    }

    proptest! {
        #[test]
        fn prop_order_does_not_matter(
            opening in -1_000_000_000i64..1_000_000_000,
            (txns, shuffled) in transactions_and_permutation(),
        ) {
            let opening = Money::from_cents(opening);
            prop_assert_eq!(
                effective_balance(opening, &shuffled),
                effective_balance(opening, &txns)
            );
        }
    }
}
