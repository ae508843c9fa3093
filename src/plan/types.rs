//! Core plan types: input records and the derived per-day plan row.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Forecasted demand for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandRecord {
    /// Calendar date, unique within a series.
    pub date: NaiveDate,
    /// Forecasted units for this date.
    pub raw_quantity: u64,
}

impl DemandRecord {
    pub fn new(date: NaiveDate, raw_quantity: u64) -> Self {
        Self { date, raw_quantity }
    }
}

/// Capacity and forecast parameters for one calendar date.
///
/// Capacities are signed so that negative values coming from an upstream
/// source can be reported as `InvalidParameter` instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRecord {
    /// Calendar date.
    pub date: NaiveDate,
    /// Picking capacity in units (must be >= 0).
    pub picking_capacity: i64,
    /// Packing capacity in units (must be >= 0).
    pub packing_capacity: i64,
    /// Percentage added to the raw forecast, expected in [-100, 100].
    pub forecast_addition_pct: i32,
}

impl CapacityRecord {
    pub fn new(
        date: NaiveDate,
        picking_capacity: i64,
        packing_capacity: i64,
        forecast_addition_pct: i32,
    ) -> Self {
        Self {
            date,
            picking_capacity,
            packing_capacity,
            forecast_addition_pct,
        }
    }

    /// A record with zero capacity on both lines and no adjustment.
    pub fn closed(date: NaiveDate) -> Self {
        Self::new(date, 0, 0, 0)
    }
}

/// One day of the computed pick plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRow {
    /// Calendar date.
    pub date: NaiveDate,
    /// Raw forecast after the percentage adjustment.
    pub adjusted_demand: u64,
    /// Whether the day has any picking or packing capacity.
    pub is_working_day: bool,
    /// Demand this day must absorb, including demand folded in from a closure.
    pub cumulative_demand: u64,
    /// Reserve carved out of cumulative demand (0 on non-working days).
    pub leave_buffer: f64,
    /// Smoothed baseline obligation (0 on non-working days).
    pub min_pick_qty: f64,
    /// Surplus above the baseline, redistributed across the week.
    pub extra_qty: f64,
    /// ISO week-numbering year.
    pub iso_year: i32,
    /// ISO week number (1-53).
    pub week_number: u32,
    /// Sum of `extra_qty` over the ISO week.
    pub weekly_extra_total: f64,
    /// Number of working days in the ISO week.
    pub working_days_in_week: u32,
    /// This day's share of the weekly surplus (0 on non-working days).
    pub daily_extra_share: f64,
    /// Final planned pick quantity.
    pub final_daily_qty: f64,
}

impl fmt::Display for PlanRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (W{:02}) {} | demand={:>6} cum={:>6} | buffer={:>8.2} min={:>8.2} \
             extra={:>8.2} | share={:>8.2} final={:>8.2}",
            self.date,
            self.week_number,
            if self.is_working_day { "work" } else { "shut" },
            self.adjusted_demand,
            self.cumulative_demand,
            self.leave_buffer,
            self.min_pick_qty,
            self.extra_qty,
            self.daily_extra_share,
            self.final_daily_qty,
        )
    }
}
