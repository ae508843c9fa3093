//! Seeded synthetic demand for running the planner without input files.

use chrono::{Datelike, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Deserialize;

use crate::calendar::days_inclusive;
use crate::plan::types::DemandRecord;

/// Weekday demand multipliers, Monday first.
const WEEKDAY_PROFILE: [f64; 7] = [1.25, 1.05, 1.0, 0.95, 1.15, 0.45, 0.3];

/// Parameters of the synthetic demand series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// First date of the series.
    pub start_date: NaiveDate,
    /// Number of days to generate (must be > 0).
    pub days: u32,
    /// Average daily quantity before the weekday profile.
    pub mean_quantity: f64,
    /// Uniform noise half-width as a fraction of the mean (0.0-1.0).
    pub spread: f64,
    /// Random seed.
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            // Monday
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            days: 28,
            mean_quantity: 800.0,
            spread: 0.2,
            seed: 42,
        }
    }
}

/// Generator of daily demand with weekly seasonality and uniform noise.
///
/// # Examples
///
/// ```
/// use pick_plan::demo::{DemandGenerator, DemoConfig};
///
/// let a = DemandGenerator::new(&DemoConfig::default()).generate();
/// let b = DemandGenerator::new(&DemoConfig::default()).generate();
/// assert_eq!(a.len(), 28);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct DemandGenerator {
    start_date: NaiveDate,
    days: u32,
    mean_quantity: f64,
    spread: f64,
    rng: StdRng,
}

impl DemandGenerator {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            start_date: config.start_date,
            days: config.days,
            mean_quantity: config.mean_quantity.max(0.0),
            spread: config.spread.clamp(0.0, 1.0),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Generates one record per day, ascending by date.
    pub fn generate(&mut self) -> Vec<DemandRecord> {
        let Some(end) = self
            .days
            .checked_sub(1)
            .and_then(|n| self.start_date.checked_add_days(chrono::Days::new(u64::from(n))))
        else {
            return Vec::new();
        };

        days_inclusive(self.start_date, end)
            .map(|date| {
                let profile = WEEKDAY_PROFILE[date.weekday().num_days_from_monday() as usize];
                let noise = if self.spread > 0.0 {
                    self.rng.random_range(-self.spread..=self.spread)
                } else {
                    0.0
                };
                let qty = (self.mean_quantity * profile * (1.0 + noise)).round().max(0.0);
                DemandRecord::new(date, qty as u64)
            })
            .collect()
    }
}
