//! Engine errors
//!
//! Every procedure reports an unusable input through [`StatsError`] instead of
//! panicking, so one bad analysis never aborts a batch of unrelated ones.

use thiserror::Error;

/// Reasons a statistic cannot be computed from the given input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// A sample, group or matrix is smaller than the procedure's minimum
    #[error("Not enough data: got {actual}, need at least {required}")]
    InsufficientData {
        /// Minimum size the procedure needs
        required: usize,
        /// Size actually supplied
        actual: usize,
    },

    /// Zero spread makes the statistic undefined
    #[error("All values are identical; the statistic is undefined without variance")]
    DegenerateVariance,

    /// Paired inputs of different length, or ragged matrix rows
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Length the input should have had
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// A token that is not a finite number
    #[error("Invalid number '{token}' on line {line}")]
    MalformedInput {
        /// Offending token
        token: String,
        /// 1-based line of the token
        line: usize,
    },
}

impl StatsError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            StatsError::InsufficientData { .. } => "insufficient_data",
            StatsError::DegenerateVariance => "degenerate_variance",
            StatsError::DimensionMismatch { .. } => "dimension_mismatch",
            StatsError::MalformedInput { .. } => "malformed_input",
        }
    }

    pub(crate) fn insufficient(required: usize, actual: usize) -> Self {
        StatsError::InsufficientData { required, actual }
    }
}
