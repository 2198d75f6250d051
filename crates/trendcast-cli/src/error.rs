//! CLI error type covering file I/O, CSV input, analysis and arguments.
//!
//! Messages say what went wrong and, where there is one, what to do about it.

use std::io;

use thiserror::Error;

/// Every failure the CLI can report.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading or writing a file failed.
    #[error("I/O error{}: {source}", path_suffix(.path.as_deref()))]
    Io {
        /// The underlying I/O error.
        #[source]
        source: io::Error,
        /// Path involved, if known.
        path: Option<String>,
    },
    /// The input CSV could not be turned into a price series.
    #[error(
        "CSV parse error{}: {message}",
        .line.map(|l| format!(" on line {l}")).unwrap_or_default()
    )]
    CsvParse {
        /// What was wrong with the input.
        message: String,
        /// 1-based line number, header included, if known.
        line: Option<usize>,
    },
    /// The indicator engine or the forecaster rejected the series.
    #[error("analysis failed: {0}")]
    Analysis(#[from] trendcast::Error),
    /// JSON output could not be produced.
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
    /// A command-line value is out of range.
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// Flag name.
        argument: String,
        /// Why the value is rejected.
        reason: String,
    },
}

fn path_suffix(path: Option<&str>) -> String {
    path.map(|p| format!(" with file '{p}'")).unwrap_or_default()
}

impl CliError {
    /// Attaches a path to an I/O error.
    pub fn io(source: io::Error, path: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: Some(path.into()),
        }
    }

    /// Process exit code for this error: 2 for bad input or arguments, 1
    /// otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::CsvParse { .. } | Self::InvalidArgument { .. } => 2,
            Self::Analysis(err) if err.is_invalid_input() => 2,
            _ => 1,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, path: None }
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            return Self::from(io::Error::from(err));
        }
        let line = err
            .position()
            .and_then(|p| usize::try_from(p.line()).ok());
        Self::CsvParse {
            message: err.to_string(),
            line,
        }
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_display_with_path() {
        let err = CliError::io(
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
            "prices.csv",
        );
        let msg = err.to_string();
        assert!(msg.contains("prices.csv"));
        assert!(msg.contains("file not found"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_display_without_path() {
        let err = CliError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(err.to_string(), "I/O error: boom");
    }

    #[test]
    fn test_csv_parse_display() {
        let err = CliError::CsvParse {
            message: "cannot parse 'abc' as a price".to_string(),
            line: Some(7),
        };
        assert_eq!(
            err.to_string(),
            "CSV parse error on line 7: cannot parse 'abc' as a price"
        );

        let err = CliError::CsvParse {
            message: "no rows".to_string(),
            line: None,
        };
        assert_eq!(err.to_string(), "CSV parse error: no rows");
    }

    #[test]
    fn test_csv_io_failure_is_io_error() {
        let err = CliError::from(csv::Error::from(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "pipe closed",
        )));
        assert!(matches!(err, CliError::Io { path: None, .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_analysis_error_wraps_core() {
        let err: CliError = trendcast::Error::EmptyInput.into();
        assert!(err.to_string().starts_with("analysis failed:"));
        assert!(err.source().is_some());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_codes() {
        let degenerate: CliError = trendcast::Error::SingularDesign { degree: 3 }.into();
        assert_eq!(degenerate.exit_code(), 1);

        let arg = CliError::InvalidArgument {
            argument: "horizon".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(arg.exit_code(), 2);
        assert_eq!(
            arg.to_string(),
            "invalid argument 'horizon': must be at least 1"
        );

        let io_err = CliError::from(io::Error::new(io::ErrorKind::Other, "x"));
        assert_eq!(io_err.exit_code(), 1);
    }
}
