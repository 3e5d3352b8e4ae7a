//! Expense listing report
//!
//! Renders an `ExpenseListing` (category expenses, expenses by date range)
//! newest first, with category names resolved and the total at the bottom.

use crate::display::report::{separator, truncate};
use crate::models::{Currency, DateRange};
use crate::services::ExpenseListing;
use crate::storage::LedgerRepository;

/// A titled expense listing ready for display
#[derive(Debug, Clone)]
pub struct ExpenseListReport {
    pub title: String,
    pub range: Option<DateRange>,
    pub listing: ExpenseListing,
    /// Category name per expense, in listing order
    category_names: Vec<String>,
}

impl ExpenseListReport {
    pub fn new(
        repo: &dyn LedgerRepository,
        title: impl Into<String>,
        range: Option<DateRange>,
        listing: ExpenseListing,
    ) -> Self {
        let category_names = listing
            .expenses
            .iter()
            .map(|e| {
                repo.category(e.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default()
            })
            .collect();

        Self {
            title: title.into(),
            range,
            listing,
            category_names,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: Currency, date_format: &str) -> String {
        let mut output = String::new();

        output.push_str(&self.title);
        if let Some(range) = &self.range {
            output.push_str(&format!(
                " ({} to {})",
                range.start_date().format(date_format),
                range.end_date().format(date_format)
            ));
        }
        output.push('\n');
        output.push_str(&"=".repeat(78));
        output.push('\n');

        if self.listing.expenses.is_empty() {
            output.push_str("No expenses found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:<30} {:<18} {:>14}\n",
            "Date", "Description", "Category", "Amount"
        ));
        output.push_str(&separator(78));
        output.push('\n');

        for (expense, category) in self.listing.expenses.iter().zip(&self.category_names) {
            output.push_str(&format!(
                "{:<12} {:<30} {:<18} {:>14}\n",
                expense.date.format(date_format).to_string(),
                truncate(&expense.description, 30),
                truncate(category, 18),
                expense.amount.format_currency(currency)
            ));
        }

        output.push_str(&separator(78));
        output.push('\n');
        output.push_str(&format!(
            "{:<62} {:>14}\n",
            format!("TOTAL ({} expenses)", self.listing.count),
            self.listing.total.format_currency(currency)
        ));

        output
    }
}
