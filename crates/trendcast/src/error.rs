//! Error types for trendcast.
//!
//! Every failure the library reports is a variant of [`Error`]. Variants fall
//! into two families, exposed through [`Error::kind`]:
//!
//! - [`ErrorKind::InvalidInput`]: the caller handed over a malformed or
//!   insufficient series, or an out-of-range parameter. Not recoverable inside
//!   the library.
//! - [`ErrorKind::NumericDegeneracy`]: the input was well-formed but the
//!   computation degenerated (singular design matrix, non-finite result). The
//!   caller decides the fallback, e.g. retrying with a lower degree.

use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or insufficient input.
    InvalidInput,
    /// Well-formed input that produced a degenerate computation.
    NumericDegeneracy,
}

/// The main error type for trendcast operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input series is empty.
    #[error("empty input: no data provided")]
    EmptyInput,

    /// The input series is too short for the requested operation.
    #[error("insufficient data for {operation}: required {required} elements, got {actual}")]
    InsufficientData {
        /// The number of data points required.
        required: usize,
        /// The number of data points provided.
        actual: usize,
        /// The operation that rejected the input.
        operation: &'static str,
    },

    /// The period parameter is invalid.
    #[error("invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The invalid period value that was provided.
        period: usize,
        /// Description of why the period is invalid.
        reason: &'static str,
    },

    /// A non-period parameter is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of why the value is rejected.
        reason: &'static str,
    },

    /// Parallel input columns have different lengths.
    #[error("length mismatch: {description}")]
    LengthMismatch {
        /// Which columns disagree and by how much.
        description: String,
    },

    /// Timestamps are not strictly increasing.
    #[error("series is not strictly ascending by timestamp at bar {index}")]
    UnsortedSeries {
        /// Index of the first bar whose timestamp is not after its predecessor.
        index: usize,
    },

    /// A price is zero, negative, or not finite.
    #[error("invalid {field} price {value} at bar {index}: prices must be positive and finite")]
    InvalidPrice {
        /// Index of the offending bar.
        index: usize,
        /// Which price field failed.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A bar reports `high < low`.
    #[error("inverted range at bar {index}: high {high} is below low {low}")]
    InvertedRange {
        /// Index of the offending bar.
        index: usize,
        /// Reported high.
        high: f64,
        /// Reported low.
        low: f64,
    },

    /// The forecast horizon is out of range.
    #[error("invalid horizon {horizon}: {reason}")]
    InvalidHorizon {
        /// The rejected horizon in days.
        horizon: usize,
        /// Description of why the horizon is rejected.
        reason: &'static str,
    },

    /// A calendar computation left the representable date range.
    #[error("date out of range: {context}")]
    DateOutOfRange {
        /// What was being computed.
        context: &'static str,
    },

    /// Failed to convert a numeric value to the target type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },

    /// The polynomial design matrix is rank deficient for the chosen degree.
    #[error("singular design matrix for polynomial degree {degree}")]
    SingularDesign {
        /// Requested polynomial degree.
        degree: usize,
    },

    /// A computation produced NaN or infinity.
    #[error("non-finite result: {context}")]
    NonFiniteResult {
        /// Where the non-finite value appeared.
        context: &'static str,
    },
}

impl Error {
    /// Returns the taxonomy family of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput
            | Self::InsufficientData { .. }
            | Self::InvalidPeriod { .. }
            | Self::InvalidParameter { .. }
            | Self::LengthMismatch { .. }
            | Self::UnsortedSeries { .. }
            | Self::InvalidPrice { .. }
            | Self::InvertedRange { .. }
            | Self::InvalidHorizon { .. }
            | Self::DateOutOfRange { .. } => ErrorKind::InvalidInput,
            Self::NumericConversion { .. }
            | Self::SingularDesign { .. }
            | Self::NonFiniteResult { .. } => ErrorKind::NumericDegeneracy,
        }
    }

    /// Returns `true` for malformed or insufficient input.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidInput)
    }

    /// Returns `true` for degenerate numeric computations.
    #[must_use]
    pub const fn is_numeric_degeneracy(&self) -> bool {
        matches!(self.kind(), ErrorKind::NumericDegeneracy)
    }
}

/// Convenience type alias for Results using the trendcast Error type.
pub type Result<T> = std::result::Result<T, Error>;
