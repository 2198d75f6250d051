//! Library half of the `trendcast` command-line tool.
//!
//! Split out of the binary so the CSV handling and argument logic can be
//! tested directly.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod args;
pub mod csv_parser;
pub mod csv_writer;
pub mod error;

pub use error::{CliError, Result};

use args::{Args, OutputFormat};
use csv_writer::OutputDest;

/// Runs one invocation: read, analyze, write.
///
/// # Errors
///
/// Returns the first failure of any stage.
pub fn run(args: &Args) -> Result<()> {
    let config = args.forecast_config()?;
    let series = csv_parser::read_price_bars(&args.input)?;
    let analysis = trendcast::analyze(&series, config.as_ref())?;
    log::info!(
        "analyzed {} bars{}",
        analysis.bars.len(),
        if analysis.forecast.is_some() {
            " with forecast"
        } else {
            ""
        }
    );

    let dest = OutputDest::from_option(args.output.as_deref());
    match args.format {
        OutputFormat::Json => {
            if args.forecast_output.is_some() {
                log::warn!("--forecast-output is ignored with --format json");
            }
            csv_writer::write_json(dest.writer()?, &analysis)
        }
        OutputFormat::Csv => {
            let fitted = analysis.forecast.as_ref().map(|f| f.fitted.as_slice());
            csv_writer::write_indicators_csv(dest.writer()?, &analysis.bars, fitted)?;
            match (&analysis.forecast, &args.forecast_output) {
                (Some(result), Some(path)) => {
                    let dest = OutputDest::File(path.clone());
                    csv_writer::write_forecast_csv(dest.writer()?, &result.future)
                }
                (Some(_), None) => {
                    log::warn!("forecast computed but not written; pass --forecast-output");
                    Ok(())
                }
                (None, _) => Ok(()),
            }
        }
    }
}
