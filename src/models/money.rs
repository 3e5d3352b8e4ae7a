//! Money type for representing currency amounts
//!
//! Amounts are stored as an `i64` count of minor units (cents), so sums and
//! differences are exact. Ratios derived from amounts are computed with
//! `rust_decimal` instead of floating point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::currency::Currency;

/// A monetary amount stored as minor units (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use budget_manager::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.units(), 10);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    ///
    /// # Examples
    /// ```
    /// use budget_manager::models::Money;
    /// assert_eq!(Money::from_units(15000).cents(), 1_500_000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the minor units portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Exact decimal view of this amount (two fractional digits)
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "1,250.00", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s.trim();

        let (negative, s) = match original.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, original),
        };

        let s = s.strip_prefix('$').unwrap_or(s);
        let s: String = s.chars().filter(|c| *c != ',').collect();
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());

        let cents = if let Some((units_str, cents_str)) = s.split_once('.') {
            if units_str.is_empty() || !is_digits(units_str) || !is_digits(cents_str) {
                return Err(invalid());
            }

            let units: i64 = units_str.parse().map_err(|_| invalid())?;
            let cents: i64 = match cents_str.len() {
                0 => 0,
                1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
                2 => cents_str.parse().map_err(|_| invalid())?,
                _ => return Err(MoneyParseError::TooPrecise(original.to_string())),
            };

            units
                .checked_mul(100)
                .and_then(|u| u.checked_add(cents))
                .ok_or_else(invalid)?
        } else {
            if s.is_empty() || !is_digits(s.as_str()) {
                return Err(invalid());
            }
            s.parse::<i64>()
                .ok()
                .and_then(|u| u.checked_mul(100))
                .ok_or_else(invalid)?
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Render the amount for display in the given currency
    ///
    /// Uses comma digit grouping and two decimals. MXN uses the bare `$`
    /// symbol; other currencies are prefixed with their ISO code.
    ///
    /// # Examples
    /// ```
    /// use budget_manager::models::{Currency, Money};
    /// assert_eq!(Money::from_cents(123456789).format_currency(Currency::Mxn), "$1,234,567.89");
    /// assert_eq!(Money::from_cents(-500).format_currency(Currency::Usd), "-USD 5.00");
    /// ```
    pub fn format_currency(&self, currency: Currency) -> String {
        let units = group_thousands(self.units().unsigned_abs());
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            currency.prefix(),
            units,
            self.cents_part()
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "Amount has more than two decimal places: {}", s)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_constructors() {
        assert_eq!(Money::from_cents(1050).units(), 10);
        assert_eq!(Money::from_cents(1050).cents_part(), 50);
        assert_eq!(Money::from_units(18500).cents(), 1_850_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("1,250.75").unwrap().cents(), 125075);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Money::parse("abc"),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Money::parse("1.2.3"),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        for input in ["1.-5", "--5", "$-5", "1.+5", "+5", "", "-", "$", ".50", "1 000"] {
            assert!(
                matches!(Money::parse(input), Err(MoneyParseError::InvalidFormat(_))),
                "accepted {:?}",
                input
            );
        }
        assert!(matches!(
            Money::parse("1.005"),
            Err(MoneyParseError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_to_decimal_is_exact() {
        assert_eq!(Money::from_cents(1050).to_decimal(), dec!(10.50));
        assert_eq!(Money::from_cents(-1).to_decimal(), dec!(-0.01));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(Money::from_units(18500).format_currency(Currency::Mxn), "$18,500.00");
        assert_eq!(Money::from_cents(99).format_currency(Currency::Mxn), "$0.99");
        assert_eq!(Money::from_units(1000).format_currency(Currency::Eur), "EUR 1,000.00");
        assert_eq!(Money::from_units(-100).format_currency(Currency::Mxn), "-$100.00");
        assert_eq!(Money::from_units(123).format_currency(Currency::Usd), "USD 123.00");
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
        assert_eq!(by_ref, total);
    }

    #[test]
    fn test_serializes_as_minor_units() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
    }
}
