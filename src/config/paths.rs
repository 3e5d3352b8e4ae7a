//! Path management for budget-manager
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_MANAGER_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `budget-manager`
//!    (`~/.config/budget-manager` on Linux, `%APPDATA%\budget-manager\config`
//!    on Windows, `~/Library/Application Support/budget-manager` on macOS)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{BudgetError, BudgetResult};

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BUDGET_MANAGER_DATA_DIR";

/// Manages all paths used by budget-manager
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    base_dir: PathBuf,
}

impl BudgetPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> BudgetResult<Self> {
        if let Some(custom) = std::env::var_os(DATA_DIR_ENV) {
            return Ok(Self::with_base_dir(PathBuf::from(custom)));
        }

        let dirs = ProjectDirs::from("", "", "budget-manager").ok_or_else(|| {
            BudgetError::Config("Could not determine a home directory".into())
        })?;
        Ok(Self::with_base_dir(dirs.config_dir().to_path_buf()))
    }

    /// Use an explicit base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Settings file (`config.json`)
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Data directory (`data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default ledger snapshot (`data/ledger.json`)
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Default directory for exported reports (`exports/`)
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Create the base, data and export directories
    pub fn ensure_directories(&self) -> BudgetResult<()> {
        for dir in [self.base_dir.clone(), self.data_dir(), self.export_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                BudgetError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }
}
