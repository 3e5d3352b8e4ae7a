//! Report formatting utilities for terminal output

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{Currency, Money};

/// Format a money amount, red when negative
pub fn format_money_colored(amount: Money, currency: Currency) -> String {
    let text = amount.format_currency(currency);
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text)
    } else {
        text
    }
}

/// Format a percentage with two decimals, trailing zeros dropped
pub fn format_percentage(pct: Decimal) -> String {
    format!("{}%", pct.round_dp(2).normalize())
}

/// Utilization bar; anything past 100% fills the bar
pub fn format_bar(pct: Decimal, width: usize) -> String {
    if pct <= Decimal::ZERO {
        return "░".repeat(width);
    }

    let ratio = (pct / Decimal::ONE_HUNDRED).min(Decimal::ONE);
    let filled = (ratio * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(width)
        .min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to at most `max_len` characters, ending in "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec!(656)), "656%");
        assert_eq!(format_percentage(dec!(33.333333)), "33.33%");
        assert_eq!(format_percentage(dec!(12.50)), "12.5%");
        assert_eq!(format_percentage(Decimal::ZERO), "0%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(dec!(50), 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);

        let over = format_bar(dec!(656), 10);
        assert_eq!(over, "█".repeat(10));

        assert_eq!(format_bar(Decimal::ZERO, 4), "░░░░");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Energía eléctrica", 10), "Energía...");
    }

    #[test]
    fn test_colored_money() {
        assert_eq!(
            format_money_colored(Money::from_units(10), Currency::Mxn),
            "$10.00"
        );
        assert!(format_money_colored(Money::from_units(-10), Currency::Mxn).contains("\x1b[31m"));
    }
}
