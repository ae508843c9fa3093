//! Warehouse pick planning: levels a daily demand forecast against
//! capacity into a smoothed daily pick plan.

pub mod calendar;
/// Capacity propagation from a default template.
pub mod capacity;
pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod io;
pub mod logging;
/// Leveling engine and its stages.
pub mod plan;

pub use error::PlanError;
