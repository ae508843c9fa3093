/// Plan export to CSV and JSON.
pub mod export;
/// Demand and capacity import from delimiter-separated files.
pub mod import;
