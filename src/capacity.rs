//! Capacity propagation from a default template.
//!
//! Fills a date range with capacity records before the engine runs. Weekday
//! rules live here, never in the engine.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::calendar::{days_inclusive, is_weekend};
use crate::plan::types::CapacityRecord;

/// Default capacity applied to every propagated date.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CapacityTemplate {
    pub picking_capacity: i64,
    pub packing_capacity: i64,
    pub forecast_addition_pct: i32,
    /// Zero both capacities on Saturday and Sunday.
    pub weekend_closed: bool,
}

impl Default for CapacityTemplate {
    fn default() -> Self {
        Self {
            picking_capacity: 1000,
            packing_capacity: 1000,
            forecast_addition_pct: 0,
            weekend_closed: true,
        }
    }
}

impl CapacityTemplate {
    /// One record per date in `[start, end]`.
    pub fn propagate(&self, start: NaiveDate, end: NaiveDate) -> Vec<CapacityRecord> {
        days_inclusive(start, end)
            .map(|date| {
                if self.weekend_closed && is_weekend(date) {
                    CapacityRecord {
                        forecast_addition_pct: self.forecast_addition_pct,
                        ..CapacityRecord::closed(date)
                    }
                } else {
                    CapacityRecord::new(
                        date,
                        self.picking_capacity,
                        self.packing_capacity,
                        self.forecast_addition_pct,
                    )
                }
            })
            .collect()
    }
}

/// Replaces propagated records with explicit ones on matching dates.
///
/// Explicit records outside the propagated range are kept. The result is
/// ascending by date.
pub fn overlay(base: Vec<CapacityRecord>, explicit: &[CapacityRecord]) -> Vec<CapacityRecord> {
    let mut by_date: BTreeMap<NaiveDate, CapacityRecord> =
        base.into_iter().map(|r| (r.date, r)).collect();
    for record in explicit {
        by_date.insert(record.date, *record);
    }
    by_date.into_values().collect()
}
