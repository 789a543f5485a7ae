//! Business-day arithmetic and duration display helpers.
//!
//! The production calendar treats Saturday and Sunday as non-working days.
//! Branch holidays are handled upstream by scheduling staff, so they are
//! deliberately not modelled here.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Returns true when the date falls on a Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advances `date` by `offset_days` calendar days, then keeps advancing
/// while the result lands on a weekend.
///
/// With `offset_days = 1` this yields the next working day: a Friday
/// assignment produces the following Monday, a Tuesday assignment produces
/// Wednesday.
#[must_use]
pub fn next_business_day(date: NaiveDate, offset_days: u32) -> NaiveDate {
    let mut candidate = date + Duration::days(i64::from(offset_days));
    while is_weekend(candidate) {
        candidate += Duration::days(1);
    }
    candidate
}

/// Formats a duration for display in schedule summaries.
///
/// Negative durations render as `"0m"`; sub-minute durations round down.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else {
        format!("{minutes}m")
    }
}
