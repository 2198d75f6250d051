//! Reads a daily OHLCV CSV into a price series.
//!
//! # Column Detection
//!
//! Columns are found by header name (case-insensitive, surrounding spaces
//! ignored):
//! - `date`, `datetime`, `timestamp`, `time` → trading day
//! - `open`, `high`, `low` → prices
//! - `close`, `adj close`, `adjusted close`, `price` → close
//! - `volume`, `vol` → volume
//!
//! Dates are `YYYY-MM-DD`, optionally followed by a `HH:MM:SS` time that is
//! dropped. Data providers often list the newest day first, so rows are sorted
//! ascending by date before the series is returned. Duplicate days are left
//! in place for the core's validation to reject.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use trendcast::PriceBar;

use crate::error::{CliError, Result};

/// Header positions of the six required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str], label: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| names.contains(&normalize_header(h).as_str()))
                .ok_or_else(|| CliError::CsvParse {
                    message: format!(
                        "no '{label}' column found (expected one of: {})",
                        names.join(", ")
                    ),
                    line: Some(1),
                })
        };
        Ok(Self {
            date: find(&["date", "datetime", "timestamp", "time"], "date")?,
            open: find(&["open"], "open")?,
            high: find(&["high"], "high")?,
            low: find(&["low"], "low")?,
            close: find(&["close", "adj close", "adjusted close", "price"], "close")?,
            volume: find(&["volume", "vol"], "volume")?,
        })
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

fn field<'a>(record: &'a StringRecord, idx: usize, name: &str) -> std::result::Result<&'a str, String> {
    match record.get(idx).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(format!("missing {name}")),
    }
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| format!("cannot parse '{value}' as a date (expected YYYY-MM-DD)"))
}

fn parse_price(value: &str, name: &str) -> std::result::Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("cannot parse '{value}' as {name}"))
}

/// Accepts integer volumes and whole-number floats such as `1200.0`.
fn parse_volume(value: &str) -> std::result::Result<u64, String> {
    if let Ok(v) = value.parse::<u64>() {
        return Ok(v);
    }
    match value.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(v as u64)
        }
        _ => Err(format!("cannot parse '{value}' as a non-negative whole volume")),
    }
}

fn parse_record(record: &StringRecord, columns: &ColumnMap) -> std::result::Result<PriceBar, String> {
    Ok(PriceBar::new(
        parse_date(field(record, columns.date, "date")?)?,
        parse_price(field(record, columns.open, "open")?, "open")?,
        parse_price(field(record, columns.high, "high")?, "high")?,
        parse_price(field(record, columns.low, "low")?, "low")?,
        parse_price(field(record, columns.close, "close")?, "close")?,
        parse_volume(field(record, columns.volume, "volume")?)?,
    ))
}

/// Reads a CSV file into a series sorted ascending by date.
///
/// # Errors
///
/// Returns `CliError::Io` if the file cannot be opened, or
/// `CliError::CsvParse` if a column is missing or a cell is malformed.
pub fn read_price_bars<P: AsRef<Path>>(path: P) -> Result<Vec<PriceBar>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CliError::io(e, path.display().to_string()))?;
    let bars = read_price_bars_from_reader(BufReader::new(file))?;
    log::info!("read {} bars from {}", bars.len(), path.display());
    Ok(bars)
}

/// Reads CSV data from any reader.
///
/// # Errors
///
/// See [`read_price_bars`].
pub fn read_price_bars_from_reader<R: Read>(reader: R) -> Result<Vec<PriceBar>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut bars = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        // +2: header line and 1-based numbering
        let line = idx + 2;
        let record = result.map_err(|e| CliError::CsvParse {
            message: e.to_string(),
            line: Some(line),
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let bar = parse_record(&record, &columns).map_err(|message| CliError::CsvParse {
            message,
            line: Some(line),
        })?;
        bars.push(bar);
    }

    if bars.is_empty() {
        return Err(CliError::CsvParse {
            message: "no data rows".to_string(),
            line: None,
        });
    }

    bars.sort_by_key(|bar| bar.timestamp);
    Ok(bars)
}
