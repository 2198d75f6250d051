//! Writes an [`Analysis`] as CSV or JSON.
//!
//! The indicator CSV has one row per bar. Undefined indicator values (warm-up
//! bars) are written as empty cells so spreadsheets and dataframe readers see
//! them as missing. When a forecast was computed, a trailing `fitted` column
//! carries the in-sample trend value of each bar.
//!
//! Failures while writing are I/O failures, never input errors.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::Writer;
use trendcast::{Analysis, ForecastPoint, IndicatorBar};

use crate::error::{CliError, Result};

/// Column names of the indicator CSV, in output order.
pub const INDICATOR_HEADERS: [&str; 24] = [
    "date",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "sma_20",
    "sma_50",
    "sma_200",
    "ema_12",
    "ema_26",
    "rsi_14",
    "macd",
    "macd_signal",
    "macd_histogram",
    "bollinger_mid",
    "bollinger_upper",
    "bollinger_lower",
    "atr_14",
    "stoch_k",
    "stoch_d",
    "williams_r",
    "cci_20",
    "obv",
];

/// Header of the optional in-sample trend column.
pub const FITTED_HEADER: &str = "fitted";

/// Where output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDest {
    /// Standard output.
    Stdout,
    /// A file, created or truncated.
    File(PathBuf),
}

impl OutputDest {
    /// `File` when a path is given, `Stdout` otherwise.
    #[must_use]
    pub fn from_option(path: Option<&Path>) -> Self {
        path.map_or(Self::Stdout, |p| Self::File(p.to_path_buf()))
    }

    /// Opens the destination for writing.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Io` if the file cannot be created.
    pub fn writer(&self) -> Result<Box<dyn Write>> {
        match self {
            Self::Stdout => Ok(Box::new(BufWriter::new(io::stdout()))),
            Self::File(path) => {
                let file =
                    File::create(path).map_err(|e| CliError::io(e, path.display().to_string()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn indicator_row(bar: &IndicatorBar) -> Vec<String> {
    let b = &bar.bar;
    vec![
        b.timestamp.to_string(),
        b.open.to_string(),
        b.high.to_string(),
        b.low.to_string(),
        b.close.to_string(),
        b.volume.to_string(),
        cell(bar.sma_20),
        cell(bar.sma_50),
        cell(bar.sma_200),
        cell(bar.ema_12),
        cell(bar.ema_26),
        cell(bar.rsi_14),
        cell(bar.macd),
        cell(bar.macd_signal),
        cell(bar.macd_histogram),
        cell(bar.bollinger_mid),
        cell(bar.bollinger_upper),
        cell(bar.bollinger_lower),
        cell(bar.atr_14),
        cell(bar.stoch_k),
        cell(bar.stoch_d),
        cell(bar.williams_r),
        cell(bar.cci_20),
        bar.obv.to_string(),
    ]
}

fn output_error(err: csv::Error) -> CliError {
    CliError::from(io::Error::from(err))
}

/// Writes the enriched series as CSV, with a `fitted` column when `fitted`
/// is given.
///
/// # Errors
///
/// Returns `CliError::Io` if writing fails.
pub fn write_indicators_csv<W: Write>(
    out: W,
    bars: &[IndicatorBar],
    fitted: Option<&[f64]>,
) -> Result<()> {
    let mut writer = Writer::from_writer(out);
    let mut headers = INDICATOR_HEADERS.to_vec();
    if fitted.is_some() {
        headers.push(FITTED_HEADER);
    }
    writer.write_record(&headers).map_err(output_error)?;

    for (i, bar) in bars.iter().enumerate() {
        let mut row = indicator_row(bar);
        if let Some(values) = fitted {
            row.push(cell(values.get(i).copied()));
        }
        writer.write_record(&row).map_err(output_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes forecast points as a `date,predicted_close` CSV.
///
/// # Errors
///
/// Returns `CliError::Io` if writing fails.
pub fn write_forecast_csv<W: Write>(out: W, points: &[ForecastPoint]) -> Result<()> {
    let mut writer = Writer::from_writer(out);
    writer
        .write_record(["date", "predicted_close"])
        .map_err(output_error)?;
    for point in points {
        writer
            .write_record([point.date.to_string(), point.predicted_close.to_string()])
            .map_err(output_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the whole analysis as one pretty-printed JSON document.
///
/// # Errors
///
/// Returns `CliError::Json` if serialization fails or `CliError::Io` if
/// writing fails.
pub fn write_json<W: Write>(mut out: W, analysis: &Analysis) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, analysis)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
