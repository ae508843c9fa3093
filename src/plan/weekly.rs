//! Weekly surplus redistribution.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::engine::SurplusPolicy;
use super::split::Split;
use crate::calendar::WeekKey;
use crate::error::PlanError;

/// Surplus totals below this magnitude count as zero.
const SURPLUS_EPSILON: f64 = 1e-9;

/// Per-day result of the weekly pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklyShare {
    pub week: WeekKey,
    pub weekly_extra_total: f64,
    pub working_days_in_week: u32,
    pub daily_extra_share: f64,
    pub final_daily_qty: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct WeekTotals {
    extra: f64,
    working_days: u32,
}

/// Spreads each ISO week's surplus evenly over that week's working days.
///
/// `final_daily_qty = min_pick_qty + daily_extra_share` on working days and
/// 0 on non-working days.
///
/// # Errors
///
/// Returns `PlanError::UnresolvableSurplus` for a week with non-zero surplus
/// and no working day, unless `policy` is [`SurplusPolicy::Drop`], in which
/// case that week's surplus is discarded.
pub fn redistribute(
    dates: &[NaiveDate],
    is_working: &[bool],
    splits: &[Split],
    policy: SurplusPolicy,
) -> Result<Vec<WeeklyShare>, PlanError> {
    debug_assert_eq!(dates.len(), is_working.len());
    debug_assert_eq!(dates.len(), splits.len());

    let keys: Vec<WeekKey> = dates.iter().map(|d| WeekKey::of(*d)).collect();

    let mut weeks: BTreeMap<WeekKey, WeekTotals> = BTreeMap::new();
    for ((key, &working), s) in keys.iter().zip(is_working).zip(splits) {
        let totals = weeks.entry(*key).or_default();
        totals.extra += s.extra_qty;
        if working {
            totals.working_days += 1;
        }
    }

    for (key, totals) in &weeks {
        if totals.working_days == 0 && totals.extra.abs() > SURPLUS_EPSILON {
            match policy {
                SurplusPolicy::Fail => {
                    return Err(PlanError::UnresolvableSurplus {
                        iso_year: key.iso_year,
                        week: key.week,
                        total: totals.extra,
                    });
                }
                SurplusPolicy::Drop => {
                    tracing::warn!(
                        iso_year = key.iso_year,
                        week = key.week,
                        surplus = totals.extra,
                        "dropping surplus of a week without working days"
                    );
                }
            }
        }
    }

    let shares = keys
        .iter()
        .zip(is_working)
        .zip(splits)
        .map(|((key, &working), s)| {
            let totals = weeks.get(key).copied().unwrap_or_default();
            let daily_extra_share = if working && totals.working_days > 0 {
                totals.extra / f64::from(totals.working_days)
            } else {
                0.0
            };
            let final_daily_qty = if working {
                s.min_pick_qty + daily_extra_share
            } else {
                0.0
            };
            WeeklyShare {
                week: *key,
                weekly_extra_total: totals.extra,
                working_days_in_week: totals.working_days,
                daily_extra_share,
                final_daily_qty,
            }
        })
        .collect();

    Ok(shares)
}
