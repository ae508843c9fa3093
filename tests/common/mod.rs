//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use pick_plan::capacity::CapacityTemplate;
use pick_plan::plan::{CapacityRecord, DemandRecord};

/// Monday 2024-03-04 plus `offset` days.
pub fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4)
        .and_then(|d| d.checked_add_days(chrono::Days::new(offset)))
        .expect("valid date")
}

/// Demand series starting on Monday 2024-03-04.
pub fn demand(quantities: &[u64]) -> Vec<DemandRecord> {
    quantities
        .iter()
        .enumerate()
        .map(|(i, q)| DemandRecord::new(day(i as u64), *q))
        .collect()
}

/// Capacity series from working flags, starting on Monday 2024-03-04.
pub fn capacity(working: &[bool]) -> Vec<CapacityRecord> {
    working
        .iter()
        .enumerate()
        .map(|(i, w)| {
            if *w {
                CapacityRecord::new(day(i as u64), 400, 300, 0)
            } else {
                CapacityRecord::closed(day(i as u64))
            }
        })
        .collect()
}

/// Weekday-open, weekend-closed capacity for `days` days from the Monday.
pub fn default_capacity(days: u64) -> Vec<CapacityRecord> {
    CapacityTemplate::default().propagate(day(0), day(days - 1))
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
