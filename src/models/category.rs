//! Category model
//!
//! Categories form a tree through an optional parent back-reference. Parents
//! are resolved by ID lookup against the full category list; a category never
//! owns its children.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};

/// A spending category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name, unique within its budget
    pub name: String,

    /// Parent category, if this is a subcategory
    #[serde(default)]
    pub parent_id: Option<CategoryId>,

    /// The budget this category belongs to
    pub budget_id: BudgetId,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new top-level category
    pub fn new(name: impl Into<String>, budget_id: BudgetId) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            parent_id: None,
            budget_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a subcategory under `parent_id`
    pub fn child_of(name: impl Into<String>, budget_id: BudgetId, parent_id: CategoryId) -> Self {
        let mut category = Self::new(name, budget_id);
        category.parent_id = Some(parent_id);
        category
    }

    /// Validate the category on its own (tree shape is checked by
    /// `services::validation::validate_category_parent`)
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if self.parent_id == Some(self.id) {
            return Err(CategoryValidationError::SelfParent);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    SelfParent,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::SelfParent => write!(f, "Category cannot be its own parent"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_of() {
        let budget = BudgetId::new();
        let parent = Category::new("Hogar", budget);
        let child = Category::child_of("Luz", budget, parent.id);

        assert!(parent.parent_id.is_none());
        assert_eq!(child.parent_id, Some(parent.id));
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Educacion", BudgetId::new());
        assert!(category.validate().is_ok());

        category.parent_id = Some(category.id);
        assert_eq!(category.validate(), Err(CategoryValidationError::SelfParent));

        category.parent_id = None;
        category.name = String::new();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));
    }
}
