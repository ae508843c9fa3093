//! Post-hoc summary of a computed plan.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use super::run_length::max_run;
use super::types::PlanRow;

/// Aggregate figures derived from a complete plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    /// Number of planned dates.
    pub days: usize,
    /// Number of working days.
    pub working_days: usize,
    /// Number of distinct ISO weeks touched by the plan.
    pub weeks: usize,
    /// Longest contiguous run of non-working days.
    pub longest_closure: usize,
    /// Sum of adjusted demand over all dates.
    pub total_adjusted_demand: u64,
    /// Sum of final daily quantities.
    pub total_planned: f64,
    /// Largest final daily quantity and its date.
    pub peak: Option<(NaiveDate, f64)>,
}

impl PlanSummary {
    pub fn from_rows(rows: &[PlanRow]) -> Self {
        let flags: Vec<bool> = rows.iter().map(|r| r.is_working_day).collect();
        let weeks: BTreeSet<(i32, u32)> = rows.iter().map(|r| (r.iso_year, r.week_number)).collect();

        let mut peak: Option<(NaiveDate, f64)> = None;
        for r in rows.iter().filter(|r| r.is_working_day) {
            if peak.is_none_or(|(_, qty)| r.final_daily_qty > qty) {
                peak = Some((r.date, r.final_daily_qty));
            }
        }

        Self {
            days: rows.len(),
            working_days: flags.iter().filter(|w| **w).count(),
            weeks: weeks.len(),
            longest_closure: max_run(&flags),
            total_adjusted_demand: rows
                .iter()
                .map(|r| r.adjusted_demand)
                .fold(0, u64::saturating_add),
            total_planned: rows.iter().map(|r| r.final_daily_qty).sum(),
            peak,
        }
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Plan Summary ---")?;
        writeln!(f, "Days planned:          {}", self.days)?;
        writeln!(f, "Working days:          {}", self.working_days)?;
        writeln!(f, "ISO weeks:             {}", self.weeks)?;
        writeln!(f, "Longest closure:       {} days", self.longest_closure)?;
        writeln!(f, "Adjusted demand:       {}", self.total_adjusted_demand)?;
        writeln!(f, "Planned picks:         {:.2}", self.total_planned)?;
        match self.peak {
            Some((date, qty)) => write!(f, "Peak day:              {date} ({qty:.2})"),
            None => write!(f, "Peak day:              -"),
        }
    }
}
