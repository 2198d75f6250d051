//! Command-line arguments.
//!
//! Forecast settings and the output format fall back to environment variables
//! when the flag is absent, so a deployment can pin them once.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use trendcast::forecast::{ForecastConfig, DEFAULT_DEGREE, DEFAULT_HORIZON_DAYS};

use crate::error::{CliError, Result};

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One CSV row per bar; the forecast goes to `--forecast-output`.
    #[default]
    Csv,
    /// A single JSON document holding bars and forecast.
    Json,
}

/// Compute indicators and a polynomial trend forecast for a daily OHLCV CSV.
#[derive(Parser, Debug)]
#[command(name = "trendcast")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input CSV file with date, open, high, low, close and volume columns
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Separate CSV file for the forecast rows (CSV format only)
    #[arg(long)]
    pub forecast_output: Option<PathBuf>,

    /// Number of calendar days to forecast
    #[arg(long, env = "TRENDCAST_HORIZON", default_value_t = DEFAULT_HORIZON_DAYS)]
    pub horizon: usize,

    /// Degree of the fitted polynomial
    #[arg(long, env = "TRENDCAST_DEGREE", default_value_t = DEFAULT_DEGREE)]
    pub degree: usize,

    /// Output format
    #[arg(long, value_enum, env = "TRENDCAST_FORMAT", default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Skip the forecast and only compute indicators
    #[arg(long)]
    pub no_forecast: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The forecast settings, or `None` with `--no-forecast`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidArgument` if the horizon is out of range.
    pub fn forecast_config(&self) -> Result<Option<ForecastConfig>> {
        if self.no_forecast {
            return Ok(None);
        }
        let config = ForecastConfig::new()
            .horizon_days(self.horizon)
            .degree(self.degree);
        config
            .validate()
            .map_err(|err| CliError::InvalidArgument {
                argument: "horizon".to_string(),
                reason: err.to_string(),
            })?;
        Ok(Some(config))
    }

    /// Log level implied by the `-v` count.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
