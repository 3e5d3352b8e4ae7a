//! Account Balance Report
//!
//! Stored opening balance next to the effective balance for every account,
//! with the dashboard's total balance across them.

use std::io::Write;

use crate::display::report::{format_money_colored, separator, truncate};
use crate::error::BudgetResult;
use crate::models::{AccountType, Currency, Money, UserId};
use crate::services::{AccountBalance, SummaryService};
use crate::storage::LedgerRepository;

/// One line of the report
#[derive(Debug, Clone)]
pub struct AccountBalanceRow {
    pub account_type: AccountType,
    pub balance: AccountBalance,
}

/// Balances of a set of accounts
#[derive(Debug, Clone)]
pub struct AccountBalanceReport {
    pub rows: Vec<AccountBalanceRow>,
    pub total_opening: Money,
    pub total_effective: Money,
}

impl AccountBalanceReport {
    /// Report on every account, optionally limited to one user
    pub fn generate(repo: &dyn LedgerRepository, user_id: Option<UserId>) -> Self {
        let balances = SummaryService::new(repo).account_balances(user_id);
        Self::from_balances(repo, balances)
    }

    /// Report built from already computed balances
    pub fn from_balances(repo: &dyn LedgerRepository, balances: Vec<AccountBalance>) -> Self {
        let rows: Vec<AccountBalanceRow> = balances
            .into_iter()
            .map(|balance| AccountBalanceRow {
                account_type: repo
                    .account(balance.account_id)
                    .map(|a| a.account_type)
                    .unwrap_or_default(),
                balance,
            })
            .collect();

        let total_opening = rows.iter().map(|r| r.balance.balance.opening_balance).sum();
        let total_effective = rows.iter().map(|r| r.balance.balance.effective_balance).sum();

        Self {
            rows,
            total_opening,
            total_effective,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: Currency) -> String {
        let mut output = String::new();

        output.push_str("Account Balances\n");
        output.push_str(&"=".repeat(78));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No accounts.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<26} {:<8} {:>14} {:>14} {:>14}\n",
            "Account", "Type", "Opening", "Balance", "Change"
        ));
        output.push_str(&separator(78));
        output.push('\n');

        for row in &self.rows {
            let report = &row.balance.balance;
            output.push_str(&format!(
                "{:<26} {:<8} {:>14} {:>14} {:>14}\n",
                truncate(&row.balance.account_name, 26),
                row.account_type.to_string(),
                report.opening_balance.format_currency(currency),
                report.effective_balance.format_currency(currency),
                format_money_colored(report.drift(), currency),
            ));
        }

        output.push_str(&separator(78));
        output.push('\n');
        output.push_str(&format!(
            "{:<35} {:>14} {:>14}\n",
            "TOTAL BALANCE",
            self.total_opening.format_currency(currency),
            self.total_effective.format_currency(currency)
        ));

        output
    }

    /// Export the report as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        csv.write_record(["Account", "Type", "Opening", "Balance", "Change"])?;
        for row in &self.rows {
            let report = &row.balance.balance;
            csv.write_record([
                row.balance.account_name.clone(),
                row.account_type.to_string(),
                report.opening_balance.to_decimal().to_string(),
                report.effective_balance.to_decimal().to_string(),
                report.drift().to_decimal().to_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, Transfer};
    use crate::storage::LedgerSnapshot;
    use chrono::NaiveDate;

    fn snapshot() -> (LedgerSnapshot, UserId) {
        let user = UserId::new();
        let mut snapshot = LedgerSnapshot::new();
        let nomina = Account::with_opening_balance(
            "Nomina",
            AccountType::Debit,
            user,
            Money::from_units(15000),
        );
        let card = Account::with_opening_balance(
            "Tarjeta",
            AccountType::Credit,
            user,
            Money::from_units(-2000),
        );
        let (nomina_id, card_id) = (nomina.id, card.id);
        snapshot.add_account(nomina).unwrap();
        snapshot.add_account(card).unwrap();
        snapshot
            .add_transfer(Transfer::new(
                Money::from_units(1500),
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                nomina_id,
                card_id,
            ))
            .unwrap();
        (snapshot, user)
    }

    #[test]
    fn test_totals() {
        let (snapshot, user) = snapshot();
        let report = AccountBalanceReport::generate(&snapshot, Some(user));

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.total_opening, Money::from_units(13000));
        // Transfers between the user's own accounts do not change the total
        assert_eq!(report.total_effective, Money::from_units(13000));
        assert_eq!(report.rows[1].account_type, AccountType::Credit);
    }

    #[test]
    fn test_terminal_format() {
        let (snapshot, _) = snapshot();
        let output = AccountBalanceReport::generate(&snapshot, None).format_terminal(Currency::Mxn);

        assert!(output.contains("Nomina"));
        assert!(output.contains("$13,500.00"));
        assert!(output.contains("-$500.00"));
        assert!(output.contains("TOTAL BALANCE"));
    }

    #[test]
    fn test_csv_export() {
        let (snapshot, _) = snapshot();
        let mut out = Vec::new();
        AccountBalanceReport::generate(&snapshot, None)
            .export_csv(&mut out)
            .unwrap();
        let csv = String::from_utf8(out).unwrap();

        assert!(csv.starts_with("Account,Type,Opening,Balance,Change\n"));
        assert!(csv.contains("Nomina,Debit,15000.00,13500.00,-1500.00"));
    }
}
