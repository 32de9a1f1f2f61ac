//! Benchmark errors

use mbench_numeric::NumericError;

/// Errors raised by a benchmark entry
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// An input value could not be parsed at the configured precision
    #[error("{name}: input #{index} ({input:?}) is not a valid number: {source}")]
    InvalidInput {
        /// Benchmark name
        name: String,
        /// Position in the input table
        index: usize,
        /// Offending input
        input: String,
        /// Parse failure
        source: NumericError,
    },

    /// `measure` called before `initialize`
    #[error("{name}: not initialized")]
    NotInitialized {
        /// Benchmark name
        name: String,
    },

    /// `initialize` called twice
    #[error("{name}: already initialized")]
    AlreadyInitialized {
        /// Benchmark name
        name: String,
    },

    /// The input table length changed between runs
    #[error("{name}: input table has {got} values, expected {expected}")]
    TableSizeChanged {
        /// Benchmark name
        name: String,
        /// Length captured at initialization
        expected: usize,
        /// Length passed now
        got: usize,
    },

    /// Numeric capability failure (e.g. unsupported precision)
    #[error(transparent)]
    Numeric(#[from] NumericError),
}
