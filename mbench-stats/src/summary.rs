//! Timing Summaries
//!
//! The record emitted for one benchmark after a pass, and the sink that
//! receives it.

use serde::{Deserialize, Serialize};

/// Reporting options that reach the aggregator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintOptions {
    /// Include the per-slot minima in the summary
    pub verbose: bool,
}

/// Summary of one benchmark's timing statistic, in ticks
///
/// Central values are taken over the slot minima; slots that never
/// received a sample are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    /// Number of slots (input pairs)
    pub slots: usize,
    /// Smallest slot minimum
    pub min: f64,
    /// Mean of the slot minima
    pub mean: f64,
    /// Median of the slot minima
    pub median: f64,
    /// Largest slot minimum
    pub max: f64,
    /// Samples folded in, all slots and passes
    pub samples: u64,
    /// Samples far above their slot minimum
    pub rejected: u64,
    /// Slots whose minimum is an IQR outlier among all slot minima
    pub outlier_slots: usize,
    /// Per-slot minima in slot order, `None` for a slot with no samples (verbose only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_minima: Option<Vec<Option<u64>>>,
}

impl TimingSummary {
    /// Share of samples that were rejected, in percent
    pub fn rejected_percentage(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.rejected as f64 / self.samples as f64 * 100.0
        }
    }
}

/// Receives one summary per benchmark name
pub trait SummarySink {
    /// Record the summary for `name`
    fn record(&mut self, name: &str, summary: TimingSummary);
}

impl SummarySink for Vec<(String, TimingSummary)> {
    fn record(&mut self, name: &str, summary: TimingSummary) {
        self.push((name.to_string(), summary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_percentage() {
        let summary = TimingSummary {
            samples: 8,
            rejected: 2,
            ..TimingSummary::default()
        };
        assert!((summary.rejected_percentage() - 25.0).abs() < f64::EPSILON);
        assert_eq!(TimingSummary::default().rejected_percentage(), 0.0);
    }

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut sink: Vec<(String, TimingSummary)> = Vec::new();
        sink.record("b", TimingSummary::default());
        sink.record("a", TimingSummary::default());
        let names: Vec<_> = sink.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
