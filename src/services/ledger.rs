//! Ledger aggregation
//!
//! Sums and buckets monetary records. Filtering is the caller's concern: apply
//! `within_range` (or any iterator adaptor) first, then reduce.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::models::{AccountId, BudgetId, CategoryId, DateRange, Expense, Money, Transfer};

/// Anything carrying a single monetary amount
pub trait Amount {
    fn amount(&self) -> Money;
}

impl Amount for Money {
    fn amount(&self) -> Money {
        *self
    }
}

impl Amount for Expense {
    fn amount(&self) -> Money {
        self.amount
    }
}

impl Amount for Transfer {
    fn amount(&self) -> Money {
        self.amount
    }
}

impl<T: Amount + ?Sized> Amount for &T {
    fn amount(&self) -> Money {
        (**self).amount()
    }
}

/// Anything that happened at a point in time
pub trait Dated {
    fn instant(&self) -> NaiveDateTime;
}

impl Dated for Expense {
    fn instant(&self) -> NaiveDateTime {
        Expense::instant(self)
    }
}

impl Dated for Transfer {
    fn instant(&self) -> NaiveDateTime {
        Transfer::instant(self)
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn instant(&self) -> NaiveDateTime {
        (**self).instant()
    }
}

/// Exact sum of the amounts of `records`; zero when empty
pub fn sum_amounts<I>(records: I) -> Money
where
    I: IntoIterator,
    I::Item: Amount,
{
    records.into_iter().map(|r| r.amount()).sum()
}

/// Bucket `records` by `key` and sum each bucket
pub fn totals_by<I, K, F>(records: I, mut key: F) -> BTreeMap<K, Money>
where
    I: IntoIterator,
    I::Item: Amount,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(key(&record)).or_insert_with(Money::zero) += record.amount();
    }
    totals
}

/// Expense totals per category
pub fn totals_by_category<'a, I>(expenses: I) -> BTreeMap<CategoryId, Money>
where
    I: IntoIterator<Item = &'a Expense>,
{
    totals_by(expenses, |e| e.category_id)
}

/// Expense totals per budget
pub fn totals_by_budget<'a, I>(expenses: I) -> BTreeMap<BudgetId, Money>
where
    I: IntoIterator<Item = &'a Expense>,
{
    totals_by(expenses, |e| e.budget_id)
}

/// Expense totals per paying account; expenses without an account are skipped
pub fn totals_by_account<'a, I>(expenses: I) -> BTreeMap<AccountId, Money>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals = BTreeMap::new();
    for expense in expenses {
        if let Some(account_id) = expense.account_id {
            *totals.entry(account_id).or_insert_with(Money::zero) += expense.amount;
        }
    }
    totals
}

/// Keep only the records whose instant falls inside `range`
pub fn within_range<'r, I>(records: I, range: &'r DateRange) -> impl Iterator<Item = I::Item> + 'r
where
    I: IntoIterator,
    I::IntoIter: 'r,
    I::Item: Dated,
{
    records
        .into_iter()
        .filter(move |record| range.contains(record.instant()))
}
