//! Delimiter-separated import of demand and capacity series.
//!
//! Files carry a header row. Column names are matched case-insensitively,
//! dates accept `YYYY-MM-DD`, `DD.MM.YYYY` and `DD/MM/YYYY`, and numbers
//! accept a decimal comma.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use crate::plan::types::{CapacityRecord, DemandRecord};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];
const DEMAND_QUANTITY_COLUMNS: &[&str] = &["quantity", "forecast", "raw_quantity"];

/// Errors raised while reading an input file.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("cannot read input: {0}")]
    Io(#[from] io::Error),

    #[error("malformed file: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column \"{0}\"")]
    MissingColumn(&'static str),

    #[error("line {line}: invalid date \"{value}\"")]
    InvalidDate { line: usize, value: String },

    #[error("line {line}: invalid {field} \"{value}\"")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Reads a demand series (`date` plus a quantity column) sorted by date.
///
/// # Errors
///
/// Returns an `ImportError` for unreadable input, missing columns, or
/// unparsable or negative values.
pub fn read_demand<R: Read>(reader: R, delimiter: u8) -> Result<Vec<DemandRecord>, ImportError> {
    let mut rdr = reader_for(reader, delimiter);
    let headers = rdr.headers()?.clone();
    let date_col = column(&headers, &["date"]).ok_or(ImportError::MissingColumn("date"))?;
    let qty_col =
        column(&headers, DEMAND_QUANTITY_COLUMNS).ok_or(ImportError::MissingColumn("quantity"))?;

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        let line = i + 2;
        let date = parse_date(line, field(&row, date_col))?;
        let qty = parse_quantity(line, "quantity", field(&row, qty_col))?;
        records.push(DemandRecord::new(date, qty));
    }
    records.sort_by_key(|r| r.date);
    tracing::debug!(rows = records.len(), "demand series imported");
    Ok(records)
}

/// Reads a capacity series sorted by date.
///
/// `forecast_addition_pct` is optional and defaults to 0. Negative
/// capacities are passed through for the engine to reject.
///
/// # Errors
///
/// Returns an `ImportError` for unreadable input, missing columns, or
/// unparsable values.
pub fn read_capacity<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<CapacityRecord>, ImportError> {
    let mut rdr = reader_for(reader, delimiter);
    let headers = rdr.headers()?.clone();
    let date_col = column(&headers, &["date"]).ok_or(ImportError::MissingColumn("date"))?;
    let pick_col = column(&headers, &["picking_capacity"])
        .ok_or(ImportError::MissingColumn("picking_capacity"))?;
    let pack_col = column(&headers, &["packing_capacity"])
        .ok_or(ImportError::MissingColumn("packing_capacity"))?;
    let pct_col = column(&headers, &["forecast_addition_pct"]);

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        let line = i + 2;
        let date = parse_date(line, field(&row, date_col))?;
        let picking = parse_int(line, "picking_capacity", field(&row, pick_col))?;
        let packing = parse_int(line, "packing_capacity", field(&row, pack_col))?;
        let pct = match pct_col.map(|c| field(&row, c)) {
            Some(raw) if !raw.is_empty() => {
                let value = parse_int(line, "forecast_addition_pct", raw)?;
                i32::try_from(value).map_err(|_| ImportError::InvalidNumber {
                    line,
                    field: "forecast_addition_pct",
                    value: raw.to_string(),
                })?
            }
            _ => 0,
        };
        records.push(CapacityRecord::new(date, picking, packing, pct));
    }
    records.sort_by_key(|r| r.date);
    tracing::debug!(rows = records.len(), "capacity series imported");
    Ok(records)
}

/// Opens `path` and reads a demand series.
///
/// # Errors
///
/// See [`read_demand`].
pub fn read_demand_file(path: &Path, delimiter: u8) -> Result<Vec<DemandRecord>, ImportError> {
    read_demand(File::open(path)?, delimiter)
}

/// Opens `path` and reads a capacity series.
///
/// # Errors
///
/// See [`read_capacity`].
pub fn read_capacity_file(
    path: &Path,
    delimiter: u8,
) -> Result<Vec<CapacityRecord>, ImportError> {
    read_capacity(File::open(path)?, delimiter)
}

fn reader_for<R: Read>(reader: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
}

fn field(row: &csv::StringRecord, index: usize) -> &str {
    row.get(index).unwrap_or("")
}

fn parse_date(line: usize, raw: &str) -> Result<NaiveDate, ImportError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| ImportError::InvalidDate {
            line,
            value: raw.to_string(),
        })
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Non-negative quantity, rounded half-up to whole units.
fn parse_quantity(line: usize, field: &'static str, raw: &str) -> Result<u64, ImportError> {
    match parse_decimal(raw) {
        Some(v) if v >= 0.0 => Ok(v.round() as u64),
        _ => Err(ImportError::InvalidNumber {
            line,
            field,
            value: raw.to_string(),
        }),
    }
}

/// Whole number; a fractional part is an error, not rounded away.
fn parse_int(line: usize, field: &'static str, raw: &str) -> Result<i64, ImportError> {
    match parse_decimal(raw) {
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        _ => Err(ImportError::InvalidNumber {
            line,
            field,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn reads_semicolon_demand_with_mixed_dates() {
        let input = "Date;Quantity\n2024-03-05;12,6\n04.03.2024;100\n";
        let rows = read_demand(input.as_bytes(), b';').expect("import should succeed");
        assert_eq!(
            rows,
            vec![
                DemandRecord::new(ymd(2024, 3, 4), 100),
                DemandRecord::new(ymd(2024, 3, 5), 13),
            ]
        );
    }

    #[test]
    fn accepts_forecast_alias() {
        let input = "date,forecast\n06/03/2024,7\n";
        let rows = read_demand(input.as_bytes(), b',').expect("import should succeed");
        assert_eq!(rows[0].raw_quantity, 7);
        assert_eq!(rows[0].date, ymd(2024, 3, 6));
    }

    #[test]
    fn missing_quantity_column() {
        let input = "date;amount\n2024-03-04;1\n";
        let err = read_demand(input.as_bytes(), b';');
        assert!(matches!(err, Err(ImportError::MissingColumn("quantity"))));
    }

    #[test]
    fn negative_demand_is_rejected() {
        let input = "date;quantity\n2024-03-04;5\n2024-03-05;-3\n";
        let err = read_demand(input.as_bytes(), b';');
        assert!(matches!(
            err,
            Err(ImportError::InvalidNumber { line: 3, .. })
        ));
    }

    #[test]
    fn bad_date_reports_line() {
        let input = "date;quantity\nnot-a-date;5\n";
        let err = read_demand(input.as_bytes(), b';');
        assert!(matches!(err, Err(ImportError::InvalidDate { line: 2, .. })));
    }

    #[test]
    fn reads_capacity_with_optional_pct() {
        let input = "date;picking_capacity;packing_capacity;forecast_addition_pct\n\
                     2024-03-04;500;400;10\n\
                     2024-03-05;500;400;\n\
                     2024-03-09;0;0;0\n";
        let rows = read_capacity(input.as_bytes(), b';').expect("import should succeed");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], CapacityRecord::new(ymd(2024, 3, 4), 500, 400, 10));
        assert_eq!(rows[1].forecast_addition_pct, 0);
        assert_eq!(rows[2], CapacityRecord::closed(ymd(2024, 3, 9)));
    }

    #[test]
    fn capacity_without_pct_column() {
        let input = "date;picking_capacity;packing_capacity\n2024-03-04;1;2\n";
        let rows = read_capacity(input.as_bytes(), b';').expect("import should succeed");
        assert_eq!(rows[0].forecast_addition_pct, 0);
    }

    #[test]
    fn fractional_capacity_fields_are_rejected() {
        let input = "date;picking_capacity;packing_capacity;forecast_addition_pct\n\
                     2024-03-04;500;400;12,5\n";
        let err = read_capacity(input.as_bytes(), b';');
        assert!(matches!(
            err,
            Err(ImportError::InvalidNumber {
                line: 2,
                field: "forecast_addition_pct",
                ..
            })
        ));

        let input = "date;picking_capacity;packing_capacity\n2024-03-04;500,0;0.5\n";
        let err = read_capacity(input.as_bytes(), b';');
        assert!(matches!(
            err,
            Err(ImportError::InvalidNumber {
                field: "packing_capacity",
                ..
            })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_demand_file(Path::new("/nonexistent/demand.csv"), b';');
        assert!(matches!(err, Err(ImportError::Io(_))));
    }
}
