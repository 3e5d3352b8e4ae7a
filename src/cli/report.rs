//! CLI commands for reports
//!
//! Each command resolves its arguments, runs the matching service or report
//! and prints it (or writes CSV when `--output` is given).

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::report::{format_bar, format_percentage};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetPeriod, DateRange, Money, RangePeriod, UserId};
use crate::reports::{AccountBalanceReport, BudgetSummaryReport, ExpenseListReport};
use crate::services::{resolve_date_range, SummaryService};
use crate::storage::LedgerRepository;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show the date window a period covers
    Range {
        /// week, month or year (defaults to the configured range)
        period: Option<String>,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show opening and effective account balances
    #[command(alias = "balances")]
    Balance {
        /// Account name or ID (all accounts when omitted)
        account: Option<String>,

        /// Only accounts of this user
        #[arg(short, long)]
        user: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show every active budget against its limit
    Summary {
        /// Only budgets with this period (weekly, biweekly, monthly, annual)
        #[arg(short, long)]
        period: Option<String>,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Only budgets of this user
        #[arg(short, long)]
        user: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how much of one budget has been used
    Utilization {
        /// Budget name or ID
        budget: String,

        /// Only expenses inside this week, month or year
        #[arg(short, long)]
        range: Option<String>,

        /// Reference date for --range (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List the expenses of one category
    Category {
        /// Category name or ID
        category: String,

        /// Only expenses inside this week, month or year
        #[arg(short, long)]
        range: Option<String>,

        /// Reference date for --range (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses between two dates, newest first
    Expenses {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(short, long)]
        end: String,

        /// Only expenses charged to this user's budgets
        #[arg(short, long)]
        user: Option<String>,

        /// Only expenses of at least this amount (e.g. 1,250.00)
        #[arg(short, long)]
        min: Option<String>,
    },
}

impl ReportCommands {
    /// Whether the command reads the ledger snapshot
    pub fn needs_ledger(&self) -> bool {
        !matches!(self, Self::Range { .. })
    }
}

/// Handle report commands
pub fn handle_report_command(
    repo: &dyn LedgerRepository,
    settings: &Settings,
    cmd: ReportCommands,
) -> BudgetResult<()> {
    match cmd {
        ReportCommands::Range { period, date } => handle_range(settings, period, date),
        ReportCommands::Balance {
            account,
            user,
            output,
        } => handle_balance(repo, settings, account, user, output),
        ReportCommands::Summary {
            period,
            date,
            user,
            output,
        } => handle_summary(repo, settings, period, date, user, output),
        ReportCommands::Utilization {
            budget,
            range,
            date,
        } => handle_utilization(repo, settings, budget, range, date),
        ReportCommands::Category {
            category,
            range,
            date,
        } => handle_category(repo, settings, category, range, date),
        ReportCommands::Expenses {
            start,
            end,
            user,
            min,
        } => handle_expenses(repo, settings, start, end, user, min),
    }
}

fn parse_date(value: Option<String>) -> BudgetResult<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            BudgetError::Validation(format!("Invalid date: {}. Use YYYY-MM-DD", s))
        }),
        None => Ok(Local::now().date_naive()),
    }
}

fn parse_range_period(value: &str) -> BudgetResult<RangePeriod> {
    RangePeriod::parse(value).ok_or_else(|| {
        BudgetError::Validation(format!(
            "Invalid range: {}. Use week, month or year",
            value
        ))
    })
}

fn parse_user(value: Option<String>) -> BudgetResult<Option<UserId>> {
    value
        .map(|s| {
            s.parse::<UserId>()
                .map_err(|_| BudgetError::Validation(format!("Invalid user ID: {}", s)))
        })
        .transpose()
}

fn parse_amount(value: &str) -> BudgetResult<Money> {
    Money::parse(value).map_err(|e| BudgetError::Validation(e.to_string()))
}

fn resolve_optional_range(
    range: Option<String>,
    date: Option<String>,
) -> BudgetResult<Option<DateRange>> {
    match range {
        Some(r) => {
            let period = parse_range_period(&r)?;
            Ok(Some(resolve_date_range(period, parse_date(date)?)))
        }
        None => Ok(None),
    }
}

fn create_export_file(path: &Path) -> BudgetResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn handle_range(
    settings: &Settings,
    period: Option<String>,
    date: Option<String>,
) -> BudgetResult<()> {
    let period = match period {
        Some(p) => parse_range_period(&p)?,
        None => settings.default_range,
    };
    let range = resolve_date_range(period, parse_date(date)?);

    println!("Period: {}", period);
    println!("Start:  {}", range.start.format("%Y-%m-%d %H:%M:%S%.3f"));
    println!("End:    {}", range.end.format("%Y-%m-%d %H:%M:%S%.3f"));
    println!("Days:   {}", range.num_days());
    Ok(())
}

fn handle_balance(
    repo: &dyn LedgerRepository,
    settings: &Settings,
    account: Option<String>,
    user: Option<String>,
    output: Option<PathBuf>,
) -> BudgetResult<()> {
    let report = match account {
        Some(identifier) => {
            let account = repo.find_account(&identifier)?;
            let balance = SummaryService::new(repo).account_balance(account.id)?;
            AccountBalanceReport::from_balances(repo, vec![balance])
        }
        None => AccountBalanceReport::generate(repo, parse_user(user)?),
    };

    if let Some(path) = output {
        report.export_csv(create_export_file(&path)?)?;
        println!("Account balances exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal(settings.currency));
    }
    Ok(())
}

fn handle_summary(
    repo: &dyn LedgerRepository,
    settings: &Settings,
    period: Option<String>,
    date: Option<String>,
    user: Option<String>,
    output: Option<PathBuf>,
) -> BudgetResult<()> {
    let period = period
        .map(|p| {
            BudgetPeriod::parse(&p).map_err(|e| {
                BudgetError::Validation(format!(
                    "{}. Use weekly, biweekly, monthly or annual",
                    e
                ))
            })
        })
        .transpose()?;

    let report =
        BudgetSummaryReport::generate(repo, parse_user(user)?, period, parse_date(date)?);

    if let Some(path) = output {
        report.export_csv(create_export_file(&path)?)?;
        println!("Budget summary exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal(settings.currency));
    }
    Ok(())
}

fn handle_utilization(
    repo: &dyn LedgerRepository,
    settings: &Settings,
    budget: String,
    range: Option<String>,
    date: Option<String>,
) -> BudgetResult<()> {
    let budget = repo.find_budget(&budget)?;
    let range = resolve_optional_range(range, date)?;
    let result = SummaryService::new(repo).budget_utilization(budget.id, range.as_ref())?;
    let currency = settings.currency;
    let utilization = &result.utilization;

    println!("Budget:    {} ({})", result.budget_name, budget.period);
    match &result.range {
        Some(r) => println!("Range:     {} to {}", r.start_date(), r.end_date()),
        None => println!("Range:     all time"),
    }
    println!("Limit:     {}", result.limit.format_currency(currency));
    println!(
        "Spent:     {} ({} expenses)",
        utilization.used.format_currency(currency),
        result.expense_count
    );
    println!("Remaining: {}", utilization.remaining.format_currency(currency));
    println!(
        "Used:      {} {}",
        format_bar(utilization.percentage, 30),
        format_percentage(utilization.percentage)
    );
    if utilization.is_overspent() {
        println!("Over budget by {}", (utilization.used - result.limit).format_currency(currency));
    }
    Ok(())
}

fn handle_category(
    repo: &dyn LedgerRepository,
    settings: &Settings,
    category: String,
    range: Option<String>,
    date: Option<String>,
) -> BudgetResult<()> {
    let category = repo.find_category(&category)?;
    let range = resolve_optional_range(range, date)?;
    let listing = SummaryService::new(repo).category_expenses(category.id, range.as_ref())?;

    let report = ExpenseListReport::new(repo, category.name.clone(), range, listing);
    print!(
        "{}",
        report.format_terminal(settings.currency, &settings.date_format)
    );
    Ok(())
}

fn handle_expenses(
    repo: &dyn LedgerRepository,
    settings: &Settings,
    start: String,
    end: String,
    user: Option<String>,
    min: Option<String>,
) -> BudgetResult<()> {
    let start = parse_date(Some(start))?;
    let end = parse_date(Some(end))?;
    let min = min.as_deref().map(parse_amount).transpose()?;
    let mut listing =
        SummaryService::new(repo).expenses_by_date_range(start, end, parse_user(user)?)?;
    if let Some(min) = min {
        listing = listing.at_least(min);
    }

    let report = ExpenseListReport::new(
        repo,
        "Expenses",
        Some(DateRange::between(start, end)),
        listing,
    );
    print!(
        "{}",
        report.format_terminal(settings.currency, &settings.date_format)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2024-02-29".into())).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date(Some("29/02/2024".into()))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_resolve_optional_range() {
        assert!(resolve_optional_range(None, None).unwrap().is_none());

        let range = resolve_optional_range(Some("week".into()), Some("2025-03-12".into()))
            .unwrap()
            .unwrap();
        assert_eq!(range.start_date(), NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());

        assert!(resolve_optional_range(Some("decade".into()), None).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250.50").unwrap(), Money::from_cents(125_050));
        assert!(parse_amount("1.-5").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_user() {
        assert!(parse_user(None).unwrap().is_none());
        assert!(parse_user(Some("550e8400-e29b-41d4-a716-446655440000".into()))
            .unwrap()
            .is_some());
        assert!(parse_user(Some("alice".into())).is_err());
    }

    #[test]
    fn test_only_range_skips_ledger() {
        let range = ReportCommands::Range {
            period: None,
            date: None,
        };
        assert!(!range.needs_ledger());

        let summary = ReportCommands::Summary {
            period: None,
            date: None,
            user: None,
            output: None,
        };
        assert!(summary.needs_ledger());
    }
}
