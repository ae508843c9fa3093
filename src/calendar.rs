//! ISO week numbering and weekday helpers.

use chrono::{Datelike, NaiveDate, Weekday};

/// ISO week key: week-numbering year plus week number.
///
/// Ordered by year then week, so it can key a `BTreeMap` across a
/// year boundary without merging week 1 of two different years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    pub iso_year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            iso_year: iso.year(),
            week: iso.week(),
        }
    }
}

/// ISO week number (1-53) of `date`.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Returns true for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Iterates every date in `[start, end]`. Empty when `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .take_while(move |d| *d <= end)
}
