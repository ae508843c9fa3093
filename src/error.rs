//! Typed failures returned by the leveling engine.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by [`crate::plan::engine::PlanEngine`].
///
/// The engine is pure and deterministic, so none of these are transient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("invalid parameter on {date}: {field} = {value} ({reason})")]
    InvalidParameter {
        date: NaiveDate,
        field: &'static str,
        value: i64,
        reason: &'static str,
    },

    #[error("leave buffer ratio {ratio} is outside [0, 1]")]
    InvalidBufferRatio { ratio: f64 },

    #[error("{series} series is empty")]
    EmptySeries { series: &'static str },

    #[error(
        "week {iso_year}-W{week:02} has surplus {total:.4} but no working day to absorb it"
    )]
    UnresolvableSurplus {
        iso_year: i32,
        week: u32,
        total: f64,
    },

    #[error(
        "demand ({demand_start}..={demand_end}) and capacity ({capacity_start}..={capacity_end}) share no dates"
    )]
    MisalignedSeries {
        demand_start: NaiveDate,
        demand_end: NaiveDate,
        capacity_start: NaiveDate,
        capacity_end: NaiveDate,
    },

    #[error("{series} series is not strictly ascending at {date}")]
    UnorderedSeries {
        series: &'static str,
        date: NaiveDate,
    },
}
