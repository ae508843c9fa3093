/// Percentage adjustment of raw demand.
pub mod adjust;
pub mod engine;
/// Sequential cumulative demand leveling.
pub mod leveling;
pub mod run_length;
/// Leave-buffer and baseline/surplus split.
pub mod split;
pub mod summary;
pub mod types;
/// Weekly surplus redistribution.
pub mod weekly;
pub mod working_day;

pub use engine::{EngineConfig, PlanEngine};
pub use summary::PlanSummary;
pub use types::{CapacityRecord, DemandRecord, PlanRow};
