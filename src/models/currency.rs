//! Supported display currencies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency an amount is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Mexican peso
    #[default]
    Mxn,
    /// US dollar
    Usd,
    /// Euro
    Eur,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Mxn => "MXN",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }

    /// Prefix placed before the amount when formatting
    pub(crate) fn prefix(&self) -> &'static str {
        match self {
            Self::Mxn => "$",
            Self::Usd => "USD ",
            Self::Eur => "EUR ",
        }
    }

    /// Parse a currency from its ISO code (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "MXN" => Some(Self::Mxn),
            "USD" => Some(Self::Usd),
            "EUR" => Some(Self::Eur),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
