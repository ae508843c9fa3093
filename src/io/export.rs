//! CSV and JSON export of a computed plan.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::config::ExportConfig;
use crate::plan::types::PlanRow;

/// Column header for tabular plan export.
pub const HEADER: &[&str] = &[
    "date",
    "iso_year",
    "week_number",
    "is_working_day",
    "adjusted_demand",
    "cumulative_demand",
    "leave_buffer",
    "min_pick_qty",
    "extra_qty",
    "weekly_extra_total",
    "working_days_in_week",
    "daily_extra_share",
    "final_daily_qty",
];

/// Exports a plan to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(rows: &[PlanRow], config: &ExportConfig, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(rows, config, buf)
}

/// Writes a plan as delimiter-separated text to any writer.
///
/// Fractional columns use `config.precision` decimal places and a decimal
/// comma when `config.decimal_comma` is set. Output is deterministic for
/// identical input.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails or the delimiter is not ASCII.
pub fn write_csv(rows: &[PlanRow], config: &ExportConfig, writer: impl Write) -> io::Result<()> {
    let delimiter = u8::try_from(config.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("delimiter {:?} is not ASCII", config.delimiter),
            )
        })?;
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    wtr.write_record(HEADER)?;

    let num = |v: f64| format_decimal(v, config.precision, config.decimal_comma);
    for r in rows {
        wtr.write_record(&[
            r.date.to_string(),
            r.iso_year.to_string(),
            r.week_number.to_string(),
            r.is_working_day.to_string(),
            r.adjusted_demand.to_string(),
            r.cumulative_demand.to_string(),
            num(r.leave_buffer),
            num(r.min_pick_qty),
            num(r.extra_qty),
            num(r.weekly_extra_total),
            r.working_days_in_week.to_string(),
            num(r.daily_extra_share),
            num(r.final_daily_qty),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a plan as a JSON array of records.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_json(rows: &[PlanRow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut buf = io::BufWriter::new(file);
    write_json(rows, &mut buf)?;
    buf.flush()
}

/// Writes a plan as a JSON array of records to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json(rows: &[PlanRow], writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, rows).map_err(io::Error::from)
}

fn format_decimal(value: f64, precision: usize, decimal_comma: bool) -> String {
    let s = format!("{value:.precision$}");
    // avoid "-0.00"
    let s = if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    };
    if decimal_comma { s.replace('.', ",") } else { s }
}
