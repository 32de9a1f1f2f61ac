//! Run Options

use mbench_numeric::RoundingMode;
use mbench_stats::PrintOptions;
use serde::{Deserialize, Serialize};

/// Default precision in bits (IEEE double)
pub const DEFAULT_PRECISION: usize = 53;

/// Per-run configuration shared by every benchmark entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Precision of every prepared operand and scratch value, in bits
    pub precision: usize,
    /// Rounding mode of the measured operation
    pub rounding: RoundingMode,
    /// Options forwarded to the aggregator
    pub print: PrintOptions,
}

impl Options {
    /// Options with default reporting
    pub fn new(precision: usize, rounding: RoundingMode) -> Self {
        Self {
            precision,
            rounding,
            print: PrintOptions::default(),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION, RoundingMode::Nearest)
    }
}
