//! Display formatting for terminal output

pub mod report;

pub use report::{format_bar, format_money_colored, format_percentage, separator, truncate};
