#![warn(missing_docs)]
//! mbench Numeric - Arbitrary-Precision Floats
//!
//! The numeric capability consumed by the benchmark engine:
//! - `Float`: binary floating point value with a fixed precision in bits
//! - `RoundingMode`: the rounding applied by every operation
//! - `Status`: ternary result reported by every rounding operation
//!
//! Arithmetic, square root, exponential and logarithm are correctly rounded.
//! Trigonometric, hyperbolic and error functions are evaluated with guard
//! bits and rounded once in the requested mode.

mod elementary;
mod float;
mod rounding;
mod trig;

pub use float::{Float, Status};
pub use rounding::RoundingMode;

/// Smallest supported precision in bits
pub const MIN_PRECISION: usize = 2;

/// Largest supported precision in bits
pub const MAX_PRECISION: usize = 1 << 24;

/// Extra bits carried by the series evaluations before the final rounding
pub(crate) const GUARD_BITS: usize = 32;

/// Errors raised by the numeric capability
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumericError {
    /// Precision outside `MIN_PRECISION..=MAX_PRECISION`
    #[error("invalid precision {0} (must be between {MIN_PRECISION} and {MAX_PRECISION} bits)")]
    InvalidPrecision(usize),
    /// Input is not a decimal number
    #[error("cannot parse {input:?} as a decimal number")]
    Parse {
        /// Offending input
        input: String,
    },
}
