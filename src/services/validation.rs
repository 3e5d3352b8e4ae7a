//! Record validation
//!
//! Uniqueness and tree-shape checks that need more than one record to decide.
//! Single-record checks live on the models' `validate()` methods; `ensure_*`
//! lifts those into `BudgetError::Validation`.

use std::collections::HashSet;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Account, Budget, BudgetId, BudgetPeriod, Category, CategoryId, Expense, Transfer, UserId,
};

/// Reject an account name already used by the same user (exact match)
pub fn validate_unique_account_name(
    name: &str,
    user_id: UserId,
    existing: &[Account],
) -> BudgetResult<()> {
    if existing
        .iter()
        .any(|a| a.user_id == user_id && a.name == name)
    {
        return Err(BudgetError::Duplicate {
            entity_type: "Account",
            identifier: name.to_string(),
        });
    }
    Ok(())
}

/// Reject a category name already used within the same budget (exact match)
pub fn validate_unique_category_name(
    name: &str,
    budget_id: BudgetId,
    existing: &[Category],
) -> BudgetResult<()> {
    if existing
        .iter()
        .any(|c| c.budget_id == budget_id && c.name == name)
    {
        return Err(BudgetError::Duplicate {
            entity_type: "Category",
            identifier: name.to_string(),
        });
    }
    Ok(())
}

/// Reject a second budget for the same category and period of one user
pub fn validate_unique_budget(
    category_id: CategoryId,
    user_id: UserId,
    period: BudgetPeriod,
    existing: &[Budget],
) -> BudgetResult<()> {
    if existing
        .iter()
        .any(|b| b.category_id == category_id && b.user_id == user_id && b.period == period)
    {
        return Err(BudgetError::Duplicate {
            entity_type: "Budget",
            identifier: format!("{} / {}", category_id, period),
        });
    }
    Ok(())
}

/// Walk the parent chain of `category_id`, nearest parent first
///
/// Stops at a root, at a parent id that is not in `categories`, or when a
/// cycle is detected in already-corrupt data.
pub fn category_ancestors(category_id: CategoryId, categories: &[Category]) -> Vec<CategoryId> {
    let mut ancestors = Vec::new();
    let mut seen = HashSet::from([category_id]);
    let mut current = category_id;

    while let Some(parent_id) = categories
        .iter()
        .find(|c| c.id == current)
        .and_then(|c| c.parent_id)
    {
        if !seen.insert(parent_id) {
            break;
        }
        ancestors.push(parent_id);
        current = parent_id;
    }

    ancestors
}

/// Check that `parent_id` may become the parent of `category_id`
///
/// The parent must exist, must not be the category itself and must not be
/// one of its descendants.
pub fn validate_category_parent(
    category_id: CategoryId,
    parent_id: CategoryId,
    categories: &[Category],
) -> BudgetResult<()> {
    if parent_id == category_id {
        return Err(BudgetError::Validation(
            "A category cannot be its own parent".into(),
        ));
    }

    if !categories.iter().any(|c| c.id == parent_id) {
        return Err(BudgetError::category_not_found(parent_id.to_string()));
    }

    if category_ancestors(parent_id, categories).contains(&category_id) {
        return Err(BudgetError::Validation(format!(
            "Category {} is a descendant of {}; moving it there would create a cycle",
            parent_id, category_id
        )));
    }

    Ok(())
}

pub fn ensure_account(account: &Account) -> BudgetResult<()> {
    account
        .validate()
        .map_err(|e| BudgetError::Validation(e.to_string()))
}

pub fn ensure_category(category: &Category) -> BudgetResult<()> {
    category
        .validate()
        .map_err(|e| BudgetError::Validation(e.to_string()))
}

pub fn ensure_budget(budget: &Budget) -> BudgetResult<()> {
    budget
        .validate()
        .map_err(|e| BudgetError::Validation(e.to_string()))
}

pub fn ensure_expense(expense: &Expense) -> BudgetResult<()> {
    expense
        .validate()
        .map_err(|e| BudgetError::Validation(e.to_string()))
}

pub fn ensure_transfer(transfer: &Transfer) -> BudgetResult<()> {
    transfer
        .validate()
        .map_err(|e| BudgetError::Validation(e.to_string()))
}
