//! User settings for budget-manager
//!
//! Display currency, the default reporting range, date format and the log
//! filter used when `RUST_LOG` is not set.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetResult;
use crate::models::{Currency, RangePeriod};
use crate::storage::{read_json, write_json_atomic};

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency amounts are rendered in
    #[serde(default)]
    pub currency: Currency,

    /// Range used by reports when none is given
    #[serde(default)]
    pub default_range: RangePeriod,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: Currency::default(),
            default_range: RangePeriod::default(),
            date_format: default_date_format(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, falling back to defaults when the file is absent
    ///
    /// Nothing is written; call `save` to persist.
    pub fn load_or_default(paths: &BudgetPaths) -> BudgetResult<Self> {
        read_json(paths.settings_file())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> BudgetResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
