//! Configuration for budget-manager
//!
//! Path resolution (with an environment override) and persisted user settings.

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
