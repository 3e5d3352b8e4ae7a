use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use budget_manager::cli::{handle_report_command, ReportCommands};
use budget_manager::config::{paths::BudgetPaths, settings::Settings};
use budget_manager::storage::LedgerSnapshot;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Budget utilization, balances and expense reports",
    long_about = "budget computes budget utilization, account balances and expense \
                  totals over a JSON ledger snapshot of accounts, categories, \
                  budgets, expenses and transfers."
)]
struct Cli {
    /// Ledger snapshot to read (defaults to data/ledger.json in the data directory)
    #[arg(long, global = true, env = "BUDGET_MANAGER_LEDGER")]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_default(&paths)?;
    budget_manager::init_tracing(&settings.log_filter);

    let ledger_path = cli.ledger.unwrap_or_else(|| paths.ledger_file());

    match cli.command {
        Some(Commands::Report(cmd)) => {
            let snapshot = if cmd.needs_ledger() {
                LedgerSnapshot::load(&ledger_path).with_context(|| {
                    format!("Could not load ledger from {}", ledger_path.display())
                })?
            } else {
                LedgerSnapshot::new()
            };

            let problems = snapshot.check_integrity();
            for problem in &problems {
                tracing::warn!("{}", problem);
            }

            handle_report_command(&snapshot, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("budget-manager configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Ledger file:      {}", ledger_path.display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency:      {}", settings.currency);
            println!("  Default range: {}", settings.default_range);
            println!("  Date format:   {}", settings.date_format);
            println!("  Log filter:    {}", settings.log_filter);
        }
        None => {
            println!("budget - budget utilization and balance reports");
            println!();
            println!("Run 'budget --help' for usage information.");
        }
    }

    Ok(())
}
