//! Budget Summary Report
//!
//! Every active budget with its spend in the current period window, the
//! remaining allowance and utilization percentage.

use std::io::Write;

use chrono::NaiveDate;

use crate::display::report::{format_bar, format_percentage, separator, truncate};
use crate::error::BudgetResult;
use crate::models::{BudgetPeriod, Currency, Money, UserId};
use crate::services::{BudgetSummaryRow, SummaryService};
use crate::storage::LedgerRepository;

/// Budget summary for one reference date
#[derive(Debug, Clone)]
pub struct BudgetSummaryReport {
    /// Date the period windows were resolved around
    pub reference: NaiveDate,
    /// Period filter, if any
    pub period: Option<BudgetPeriod>,
    pub rows: Vec<BudgetSummaryRow>,
    pub total_limit: Money,
    pub total_used: Money,
    pub total_remaining: Money,
}

impl BudgetSummaryReport {
    /// Generate the summary
    pub fn generate(
        repo: &dyn LedgerRepository,
        user_id: Option<UserId>,
        period: Option<BudgetPeriod>,
        reference: NaiveDate,
    ) -> Self {
        let rows = SummaryService::new(repo).budget_summary(user_id, period, reference);

        let total_limit = rows.iter().map(|r| r.limit).sum();
        let total_used = rows.iter().map(|r| r.utilization.used).sum();
        let total_remaining = rows.iter().map(|r| r.utilization.remaining).sum();

        Self {
            reference,
            period,
            rows,
            total_limit,
            total_used,
            total_remaining,
        }
    }

    /// Budgets whose spend passed their limit
    pub fn overspent(&self) -> Vec<&BudgetSummaryRow> {
        self.rows
            .iter()
            .filter(|r| r.utilization.is_overspent())
            .collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: Currency) -> String {
        let mut output = String::new();

        match self.period {
            Some(period) => output.push_str(&format!(
                "Budget Summary - {} budgets as of {}\n",
                period, self.reference
            )),
            None => output.push_str(&format!("Budget Summary - as of {}\n", self.reference)),
        }
        output.push_str(&"=".repeat(96));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No active budgets.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<24} {:<10} {:>14} {:>14} {:>14} {:>7}  {}\n",
            "Budget", "Period", "Limit", "Spent", "Remaining", "Used", "Window"
        ));
        output.push_str(&separator(96));
        output.push('\n');

        for row in &self.rows {
            let marker = if row.utilization.is_overspent() { " *" } else { "" };
            output.push_str(&format!(
                "{:<24} {:<10} {:>14} {:>14} {:>14} {:>7}  {} .. {}{}\n",
                truncate(&row.budget_name, 24),
                row.period.to_string(),
                row.limit.format_currency(currency),
                row.utilization.used.format_currency(currency),
                row.utilization.remaining.format_currency(currency),
                format_percentage(row.utilization.percentage),
                row.window.start_date(),
                row.window.end_date(),
                marker
            ));
            output.push_str(&format!(
                "  {:<22} {}\n",
                truncate(&row.category_name, 22),
                format_bar(row.utilization.percentage, 30)
            ));
        }

        output.push_str(&separator(96));
        output.push('\n');
        output.push_str(&format!(
            "{:<35} {:>14} {:>14} {:>14}\n",
            "TOTAL",
            self.total_limit.format_currency(currency),
            self.total_used.format_currency(currency),
            self.total_remaining.format_currency(currency)
        ));

        let overspent = self.overspent().len();
        if overspent > 0 {
            output.push_str(&format!("\n* = Overspent ({} budgets)\n", overspent));
        }

        output
    }

    /// Export the report as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        csv.write_record([
            "Budget",
            "Category",
            "Period",
            "WindowStart",
            "WindowEnd",
            "Limit",
            "Spent",
            "Remaining",
            "Percentage",
        ])?;

        for row in &self.rows {
            csv.write_record([
                row.budget_name.clone(),
                row.category_name.clone(),
                row.period.to_string(),
                row.window.start_date().to_string(),
                row.window.end_date().to_string(),
                row.limit.to_decimal().to_string(),
                row.utilization.used.to_decimal().to_string(),
                row.utilization.remaining.to_decimal().to_string(),
                row.utilization.percentage.round_dp(2).normalize().to_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}
