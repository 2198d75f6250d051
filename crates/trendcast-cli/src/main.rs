//! `trendcast` command-line interface.
//!
//! Reads a daily OHLCV CSV, computes the indicator set and a polynomial trend
//! forecast, and writes the result as CSV or JSON.

use std::process::ExitCode;

use clap::Parser;
use trendcast_cli::args::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    match trendcast_cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
