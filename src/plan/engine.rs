//! Leveling engine that runs the plan stages over one input batch.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Deserialize;

use super::adjust::{adjust, resolve_pct};
use super::leveling::cumulative_demand;
use super::run_length::max_run;
use super::split::{DEFAULT_LEAVE_BUFFER_RATIO, split};
use super::types::{CapacityRecord, DemandRecord, PlanRow};
use super::weekly::redistribute;
use super::working_day::classify;
use crate::calendar::days_inclusive;
use crate::error::PlanError;

/// Demand handling for dates that have no capacity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCapacity {
    /// Keep the raw forecast, unadjusted.
    #[default]
    PassThrough,
    /// Treat the day's demand as 0.
    ZeroDemand,
}

/// Handling of `forecast_addition_pct` outside `[-100, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditionPctPolicy {
    #[default]
    Reject,
    Clamp,
}

/// Handling of a week with surplus but no working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurplusPolicy {
    #[default]
    Fail,
    Drop,
}

/// Engine parameters; the `[engine]` section of a plan config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Share of cumulative demand held back as leave buffer.
    pub leave_buffer_ratio: f64,
    pub missing_capacity: MissingCapacity,
    pub addition_pct: AdditionPctPolicy,
    pub unresolvable_surplus: SurplusPolicy,
    /// Fail with `EmptySeries` instead of returning an empty plan.
    pub require_rows: bool,
    /// Fail with `MisalignedSeries` when demand and capacity share no date.
    pub strict_alignment: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            leave_buffer_ratio: DEFAULT_LEAVE_BUFFER_RATIO,
            missing_capacity: MissingCapacity::default(),
            addition_pct: AdditionPctPolicy::default(),
            unresolvable_surplus: SurplusPolicy::default(),
            require_rows: false,
            strict_alignment: true,
        }
    }
}

/// Production leveling engine.
///
/// Stateless apart from its configuration: every call to [`PlanEngine::plan`]
/// is a pure function of the two input series.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pick_plan::plan::engine::{EngineConfig, PlanEngine};
/// use pick_plan::plan::types::{CapacityRecord, DemandRecord};
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let demand = [DemandRecord::new(monday, 100)];
/// let capacity = [CapacityRecord::new(monday, 500, 500, 10)];
///
/// let rows = PlanEngine::new(EngineConfig::default()).plan(&demand, &capacity).unwrap();
/// assert_eq!(rows[0].adjusted_demand, 110);
/// assert_eq!(rows[0].final_daily_qty, 110.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlanEngine {
    config: EngineConfig,
}

impl PlanEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Computes the daily pick plan.
    ///
    /// Both series must be strictly ascending by date. The plan has one row
    /// per calendar date from the earliest to the latest date of either
    /// series: capacity-less dates are non-working, demand-less dates have
    /// zero demand.
    ///
    /// # Errors
    ///
    /// * `InvalidBufferRatio` - `leave_buffer_ratio` is not a number in [0, 1]
    /// * `UnorderedSeries` - a series is unsorted or repeats a date
    /// * `EmptySeries` - a series is empty and `require_rows` is set
    /// * `InvalidParameter` - negative capacity, or out-of-range percentage
    ///   under the reject policy
    /// * `MisalignedSeries` - no shared date and `strict_alignment` is set
    /// * `UnresolvableSurplus` - see [`redistribute`]
    pub fn plan(
        &self,
        demand: &[DemandRecord],
        capacity: &[CapacityRecord],
    ) -> Result<Vec<PlanRow>, PlanError> {
        let ratio = self.config.leave_buffer_ratio;
        if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
            return Err(PlanError::InvalidBufferRatio { ratio });
        }
        ensure_ascending("demand", demand.iter().map(|r| r.date))?;
        ensure_ascending("capacity", capacity.iter().map(|r| r.date))?;

        for (series, len) in [("demand", demand.len()), ("capacity", capacity.len())] {
            if len == 0 {
                if self.config.require_rows {
                    return Err(PlanError::EmptySeries { series });
                }
                tracing::warn!(series, "input series is empty, returning an empty plan");
                return Ok(Vec::new());
            }
        }

        let capacity_by_date = self.validated_capacity(capacity)?;
        self.check_alignment(demand, capacity)?;

        let demand_by_date: BTreeMap<NaiveDate, u64> =
            demand.iter().map(|r| (r.date, r.raw_quantity)).collect();
        // Both series are non-empty and ascending here.
        let (Some(d0), Some(d1), Some(c0), Some(c1)) =
            (demand.first(), demand.last(), capacity.first(), capacity.last())
        else {
            return Ok(Vec::new());
        };
        let (first, last) = (d0.date.min(c0.date), d1.date.max(c1.date));
        let dates: Vec<NaiveDate> = days_inclusive(first, last).collect();

        let mut adjusted = Vec::with_capacity(dates.len());
        let mut is_working = Vec::with_capacity(dates.len());
        for date in &dates {
            let raw = demand_by_date.get(date).copied().unwrap_or(0);
            let record = capacity_by_date.get(date);
            is_working.push(classify(record));
            adjusted.push(match record {
                Some(r) => adjust(raw, r.forecast_addition_pct),
                None => match self.config.missing_capacity {
                    MissingCapacity::PassThrough => raw,
                    MissingCapacity::ZeroDemand => 0,
                },
            });
        }

        let longest_closure = max_run(&is_working);
        tracing::debug!(
            days = dates.len(),
            working_days = is_working.iter().filter(|w| **w).count(),
            longest_closure,
            "classified days"
        );

        let cumulative = cumulative_demand(&adjusted, &is_working);
        let splits = split(&cumulative, &is_working, self.config.leave_buffer_ratio);
        let shares = redistribute(
            &dates,
            &is_working,
            &splits,
            self.config.unresolvable_surplus,
        )?;

        let rows: Vec<PlanRow> = dates
            .iter()
            .enumerate()
            .map(|(i, date)| PlanRow {
                date: *date,
                adjusted_demand: adjusted[i],
                is_working_day: is_working[i],
                cumulative_demand: cumulative[i],
                leave_buffer: splits[i].leave_buffer,
                min_pick_qty: splits[i].min_pick_qty,
                extra_qty: splits[i].extra_qty,
                iso_year: shares[i].week.iso_year,
                week_number: shares[i].week.week,
                weekly_extra_total: shares[i].weekly_extra_total,
                working_days_in_week: shares[i].working_days_in_week,
                daily_extra_share: shares[i].daily_extra_share,
                final_daily_qty: shares[i].final_daily_qty,
            })
            .collect();

        tracing::debug!(rows = rows.len(), "plan computed");
        Ok(rows)
    }

    /// Rejects negative capacities, resolves percentages per policy and
    /// indexes the records by date.
    fn validated_capacity(
        &self,
        capacity: &[CapacityRecord],
    ) -> Result<BTreeMap<NaiveDate, CapacityRecord>, PlanError> {
        let mut by_date = BTreeMap::new();
        for record in capacity {
            for (field, value) in [
                ("picking_capacity", record.picking_capacity),
                ("packing_capacity", record.packing_capacity),
            ] {
                if value < 0 {
                    return Err(PlanError::InvalidParameter {
                        date: record.date,
                        field,
                        value,
                        reason: "must be >= 0",
                    });
                }
            }
            let pct = resolve_pct(
                record.date,
                record.forecast_addition_pct,
                self.config.addition_pct,
            )?;
            by_date.insert(
                record.date,
                CapacityRecord {
                    forecast_addition_pct: pct,
                    ..*record
                },
            );
        }
        Ok(by_date)
    }

    fn check_alignment(
        &self,
        demand: &[DemandRecord],
        capacity: &[CapacityRecord],
    ) -> Result<(), PlanError> {
        let capacity_dates: BTreeSet<NaiveDate> = capacity.iter().map(|r| r.date).collect();
        if demand.iter().any(|r| capacity_dates.contains(&r.date)) {
            return Ok(());
        }

        // Both series are non-empty and ascending here.
        let (Some(d0), Some(d1), Some(c0), Some(c1)) =
            (demand.first(), demand.last(), capacity.first(), capacity.last())
        else {
            return Ok(());
        };
        let err = PlanError::MisalignedSeries {
            demand_start: d0.date,
            demand_end: d1.date,
            capacity_start: c0.date,
            capacity_end: c1.date,
        };
        if self.config.strict_alignment {
            return Err(err);
        }
        tracing::warn!(%err, "planning over disjoint series");
        Ok(())
    }
}

fn ensure_ascending(
    series: &'static str,
    dates: impl Iterator<Item = NaiveDate>,
) -> Result<(), PlanError> {
    let mut previous: Option<NaiveDate> = None;
    for date in dates {
        if previous.is_some_and(|p| p >= date) {
            return Err(PlanError::UnorderedSeries { series, date });
        }
        previous = Some(date);
    }
    Ok(())
}
