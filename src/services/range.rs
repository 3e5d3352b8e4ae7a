//! Date-range resolution
//!
//! Turns a symbolic period and a reference instant into the inclusive window
//! of local wall-clock instants that period covers. Weeks start on Sunday.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

use crate::models::range::{end_of_day, start_of_day};
use crate::models::{BudgetPeriod, DateRange, RangePeriod};

/// Resolve `period` around `reference`
///
/// The window starts at 00:00:00.000 of its first day and ends at
/// 23:59:59.999 of its last day. The time-of-day of `reference` is ignored.
///
/// # Examples
/// ```
/// use budget_manager::models::RangePeriod;
/// use budget_manager::services::range::resolve_range;
/// use chrono::NaiveDate;
///
/// let reference = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap().and_hms_opt(9, 30, 0).unwrap();
/// let range = resolve_range(RangePeriod::Month, reference);
/// assert_eq!(range.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn resolve_range(period: RangePeriod, reference: NaiveDateTime) -> DateRange {
    resolve_date_range(period, reference.date())
}

/// Resolve `period` around a calendar date
pub fn resolve_date_range(period: RangePeriod, date: NaiveDate) -> DateRange {
    let (first, last) = match period {
        RangePeriod::Week => {
            let first = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
            (first, first + Duration::days(6))
        }
        RangePeriod::Month => {
            let first = date - Duration::days(date.day0() as i64);
            let length = days_in_month(date.year(), date.month());
            (first, first + Duration::days(length - 1))
        }
        RangePeriod::Year => {
            let first = date - Duration::days(date.ordinal0() as i64);
            let length = if is_leap_year(date.year()) { 366 } else { 365 };
            (first, first + Duration::days(length - 1))
        }
    };

    DateRange {
        start: start_of_day(first),
        end: end_of_day(last),
    }
}

/// Resolve `period` around the current local time
pub fn resolve_current_range(period: RangePeriod) -> DateRange {
    resolve_range(period, Local::now().naive_local())
}

/// The window of a budget's period that contains `reference`
///
/// Weekly, monthly and annual budgets follow the calendar. Bi-weekly budgets
/// repeat every fourteen days counted from `anchor` (normally the budget's
/// start date), in both directions.
pub fn budget_window(period: BudgetPeriod, reference: NaiveDate, anchor: NaiveDate) -> DateRange {
    match period.calendar_range() {
        Some(range_period) => resolve_date_range(range_period, reference),
        None => {
            let offset = (reference - anchor).num_days().div_euclid(14);
            let first = anchor + Duration::days(offset * 14);
            DateRange::between(first, first + Duration::days(13))
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> i64 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}
