//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service and report layers.

pub mod report;

pub use report::{handle_report_command, ReportCommands};
