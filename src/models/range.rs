//! Reporting windows
//!
//! A `RangePeriod` is the symbolic granularity a caller asks for; a
//! `DateRange` is the concrete inclusive window it resolves to.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RangePeriod {
    /// Sunday through Saturday
    Week,
    /// First through last day of the month
    #[default]
    Month,
    /// January 1 through December 31
    Year,
}

impl RangePeriod {
    /// Parse a range period from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" | "weekly" | "w" => Some(Self::Week),
            "month" | "monthly" | "m" => Some(Self::Month),
            "year" | "yearly" | "annual" | "y" => Some(Self::Year),
            _ => None,
        }
    }
}

impl fmt::Display for RangePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

/// An inclusive window of local wall-clock instants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First instant of the window (00:00:00.000 of the first day)
    pub start: NaiveDateTime,
    /// Last instant of the window (23:59:59.999 of the last day)
    pub end: NaiveDateTime,
}

/// First instant of a calendar day (00:00:00.000)
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last instant of a calendar day (23:59:59.999)
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

impl DateRange {
    /// Window covering `first` through `last`, whole days on both ends
    pub fn between(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    /// Check if an instant falls inside the window (both bounds inclusive)
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Check if a calendar date falls inside the window
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// First calendar day of the window
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Last calendar day of the window
    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Number of calendar days covered, counting both ends
    pub fn num_days(&self) -> i64 {
        (self.end_date() - self.start_date()).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%dT%H:%M:%S%.3f"),
            self.end.format("%Y-%m-%dT%H:%M:%S%.3f")
        )
    }
}
