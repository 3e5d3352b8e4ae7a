//! budget-manager - budget utilization and balance calculation core
//!
//! This library implements the calculation core of a personal budget and
//! expense tracker: it aggregates expenses and transfers, derives effective
//! account balances, evaluates budget utilization and resolves reporting
//! windows. Persistence, transport and authentication live outside the core
//! and hand it already-validated records.
//!
//! # Architecture
//!
//! - `models`: typed records (accounts, categories, budgets, expenses, transfers)
//! - `services`: the calculation core plus validation and report services
//! - `storage`: the repository trait and the JSON snapshot store
//! - `reports`: report builders with terminal and CSV output
//! - `config`: path resolution and user settings
//! - `display`: terminal formatting helpers
//! - `cli`: command handlers for the `budget` binary
//!
//! # Example
//!
//! ```
//! use budget_manager::models::Money;
//! use budget_manager::services::utilization::evaluate;
//!
//! let expenses = [Money::from_cents(18500), Money::from_cents(12300), Money::from_cents(2000)];
//! let utilization = evaluate(&expenses, Money::from_cents(5000));
//! assert_eq!(utilization.used, Money::from_cents(32800));
//! assert!(utilization.remaining.is_zero());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; `default_filter` applies when it is unset.
/// Subsequent calls are no-ops.
pub fn init_tracing(default_filter: &str) {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();

        tracing::debug!("tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing("debug");
        super::init_tracing("not a valid filter ===");
    }
}
