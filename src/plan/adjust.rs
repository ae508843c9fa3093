//! Percentage adjustment of raw forecast quantities.

use chrono::NaiveDate;

use super::engine::AdditionPctPolicy;
use crate::error::PlanError;

/// Lowest accepted `forecast_addition_pct`.
pub const MIN_ADDITION_PCT: i32 = -100;
/// Highest accepted `forecast_addition_pct`.
pub const MAX_ADDITION_PCT: i32 = 100;

/// Applies `addition_pct` to `raw_quantity`, rounding half-up.
///
/// Computes `round(raw * (100 + pct) / 100)` in integer arithmetic. The
/// percentage is clamped to `[-100, 100]` so the result is never negative;
/// use [`resolve_pct`] first when out-of-range input must be rejected.
///
/// # Examples
///
/// ```
/// use pick_plan::plan::adjust::adjust;
///
/// assert_eq!(adjust(100, 50), 150);
/// assert_eq!(adjust(100, -100), 0);
/// assert_eq!(adjust(3, 1), 3);
/// ```
pub fn adjust(raw_quantity: u64, addition_pct: i32) -> u64 {
    let pct = addition_pct.clamp(MIN_ADDITION_PCT, MAX_ADDITION_PCT);
    // 0..=200 after clamping
    let factor = u128::from((100 + pct).unsigned_abs());
    let scaled = u128::from(raw_quantity) * factor;
    let rounded = (scaled + 50) / 100;
    u64::try_from(rounded).unwrap_or(u64::MAX)
}

/// Checks `addition_pct` against the accepted range under `policy`.
///
/// # Errors
///
/// Returns `PlanError::InvalidParameter` when the value is out of range and
/// the policy is [`AdditionPctPolicy::Reject`].
pub fn resolve_pct(
    date: NaiveDate,
    addition_pct: i32,
    policy: AdditionPctPolicy,
) -> Result<i32, PlanError> {
    if (MIN_ADDITION_PCT..=MAX_ADDITION_PCT).contains(&addition_pct) {
        return Ok(addition_pct);
    }
    match policy {
        AdditionPctPolicy::Clamp => Ok(addition_pct.clamp(MIN_ADDITION_PCT, MAX_ADDITION_PCT)),
        AdditionPctPolicy::Reject => Err(PlanError::InvalidParameter {
            date,
            field: "forecast_addition_pct",
            value: i64::from(addition_pct),
            reason: "must be in [-100, 100]",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).expect("valid date")
    }

    #[test]
    fn reference_values() {
        assert_eq!(adjust(100, 0), 100);
        assert_eq!(adjust(100, 50), 150);
        assert_eq!(adjust(100, -100), 0);
        assert_eq!(adjust(3, 1), 3);
    }

    #[test]
    fn rounds_half_up() {
        // 5 * 1.1 = 5.5 -> 6
        assert_eq!(adjust(5, 10), 6);
        // 5 * 0.9 = 4.5 -> 5
        assert_eq!(adjust(5, -10), 5);
        // 7 * 0.93 = 6.51 -> 7
        assert_eq!(adjust(7, -7), 7);
        // 1 * 0.49 = 0.49 -> 0
        assert_eq!(adjust(1, -51), 0);
    }

    #[test]
    fn out_of_range_pct_is_clamped_not_panicking() {
        assert_eq!(adjust(10, 400), 20);
        assert_eq!(adjust(10, -250), 0);
        assert_eq!(adjust(u64::MAX, 100), u64::MAX);
    }

    #[test]
    fn resolve_rejects_under_reject_policy() {
        let err = resolve_pct(date(), 101, AdditionPctPolicy::Reject);
        assert!(matches!(
            err,
            Err(PlanError::InvalidParameter {
                field: "forecast_addition_pct",
                value: 101,
                ..
            })
        ));
    }

    #[test]
    fn resolve_clamps_under_clamp_policy() {
        assert_eq!(resolve_pct(date(), -130, AdditionPctPolicy::Clamp), Ok(-100));
        assert_eq!(resolve_pct(date(), 42, AdditionPctPolicy::Reject), Ok(42));
    }
}
