//! Error types for rollstat.
//!
//! This module defines the error types used throughout the rollstat library
//! for handling various failure conditions.

use thiserror::Error;

/// The main error type for rollstat operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An input and output slice passed to the same operation have
    /// different lengths.
    ///
    /// Moving-window statistics produce exactly one output sample per input
    /// sample, so every output slice (including auxiliary outputs such as the
    /// median slice of a MAD computation) must match the input length.
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// The length of the input slice.
        expected: usize,
        /// The length of the offending output slice.
        actual: usize,
    },

    /// The requested window geometry or parameter is invalid.
    ///
    /// Returned when a window length of zero is requested, when a robust
    /// scale estimator is invoked with a window shorter than two samples,
    /// or when a quantile parameter falls outside `[0, 0.5]`.
    #[error("invalid window: {reason}")]
    InvalidWindow {
        /// Description of why the window is invalid.
        reason: &'static str,
    },

    /// Workspace storage could not be allocated.
    #[error("allocation failure: could not reserve workspace storage")]
    AllocationFailure,

    /// A window statistic was requested from an accumulator holding no
    /// samples.
    ///
    /// The driver never queries an empty accumulator; seeing this error
    /// indicates accumulator state was consumed out of sequence.
    #[error("empty accumulator: no samples in window")]
    EmptyAccumulator,

    /// Failed to convert a numeric value to the target type.
    ///
    /// This error occurs when using `NumCast::from()` to convert values
    /// (e.g., converting a sample count to a generic `Float` type) and
    /// the conversion fails.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

/// Convenience type alias for Results using the rollstat Error type.
pub type Result<T> = std::result::Result<T, Error>;
