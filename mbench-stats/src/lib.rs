#![warn(missing_docs)]
//! mbench Statistical Engine
//!
//! Aggregates noisy per-call timings into a stable per-operation figure:
//! - `TimingStatistic`: one running minimum per input-pair slot
//! - `TimingSummary`: what gets reported once a pass is over
//! - IQR outlier detection and percentile helpers over the slot minima
//!
//! Timing a single short operation is dominated by scheduling and cache
//! noise, so the representative value of a slot is the smallest sample
//! ever seen for it. Averages are only taken across slots.

mod outliers;
mod percentiles;
mod summary;
mod timing;

pub use outliers::{OutlierAnalysis, OutlierMethod, detect_outliers};
pub use percentiles::{compute_median, compute_percentile};
pub use summary::{PrintOptions, SummarySink, TimingSummary};
pub use timing::{Slot, TimingStatistic};

/// A sample above `best * REJECTION_FACTOR` is counted as rejected
pub const REJECTION_FACTOR: u64 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(REJECTION_FACTOR, 2);
    }
}
