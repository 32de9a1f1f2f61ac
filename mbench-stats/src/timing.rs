//! Timing Statistic
//!
//! One slot per adjacent input pair. A slot keeps the smallest sample it
//! has ever seen; `update` reports whether that minimum moved, which is
//! how the driver tells a settled pass from an irregular one.

use crate::REJECTION_FACTOR;
use crate::outliers::{OutlierMethod, detect_outliers};
use crate::percentiles::compute_median;
use crate::summary::{PrintOptions, SummarySink, TimingSummary};

/// Running state of one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    best: u64,
    samples: u64,
    rejected: u64,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            best: u64::MAX,
            samples: 0,
            rejected: 0,
        }
    }
}

impl Slot {
    /// Smallest sample seen, if any
    pub fn best(&self) -> Option<u64> {
        (self.samples > 0).then_some(self.best)
    }

    /// Number of samples folded in
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Number of samples above `best * REJECTION_FACTOR` when they arrived.
    /// A minimum of 0 rejects nothing.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

/// Per-slot running minimum of timing samples
#[derive(Debug, Clone, Default)]
pub struct TimingStatistic {
    slots: Vec<Slot>,
}

impl TimingStatistic {
    /// Statistic with `slots` empty slots
    pub fn new(slots: usize) -> Self {
        Self {
            slots: vec![Slot::default(); slots],
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots at all
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot at `index`
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Forget every sample, keeping the slot count
    pub fn reset(&mut self) {
        self.slots.fill(Slot::default());
    }

    /// Fold `sample` into slot `index`.
    ///
    /// Returns `true` when the slot minimum changed. Out-of-range indices
    /// are ignored.
    pub fn update(&mut self, index: usize, sample: u64) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        slot.samples += 1;
        if sample < slot.best {
            slot.best = sample;
            return true;
        }
        if slot.best != 0 && sample > slot.best.saturating_mul(REJECTION_FACTOR) {
            slot.rejected += 1;
        }
        false
    }

    /// Summarize the slot minima
    pub fn summarize(&self, options: &PrintOptions) -> TimingSummary {
        let minima: Vec<u64> = self.slots.iter().filter_map(Slot::best).collect();
        let mut summary = TimingSummary {
            slots: self.slots.len(),
            samples: self.slots.iter().map(|s| s.samples).sum(),
            rejected: self.slots.iter().map(|s| s.rejected).sum(),
            slot_minima: options
                .verbose
                .then(|| self.slots.iter().map(Slot::best).collect()),
            ..TimingSummary::default()
        };
        if minima.is_empty() {
            return summary;
        }

        let values: Vec<f64> = minima.iter().map(|&m| m as f64).collect();
        summary.min = values.iter().copied().fold(f64::INFINITY, f64::min);
        summary.max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        summary.mean = values.iter().sum::<f64>() / values.len() as f64;
        summary.median = compute_median(&values);
        summary.outlier_slots = detect_outliers(&values, OutlierMethod::default()).count();
        summary
    }

    /// Hand the summary for `name` to `sink`
    pub fn print(&self, name: &str, options: &PrintOptions, sink: &mut dyn SummarySink) {
        sink.record(name, self.summarize(options));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_keeps_minimum() {
        let mut stat = TimingStatistic::new(2);
        assert!(stat.update(0, 100));
        assert!(!stat.update(0, 120));
        assert!(stat.update(0, 90));
        assert_eq!(stat.slot(0).unwrap().best(), Some(90));
        assert_eq!(stat.slot(0).unwrap().samples(), 3);
        assert_eq!(stat.slot(1).unwrap().best(), None);
    }

    #[test]
    fn test_same_sample_twice_is_idempotent() {
        let mut once = TimingStatistic::new(1);
        once.update(0, 42);

        let mut twice = TimingStatistic::new(1);
        twice.update(0, 42);
        assert!(!twice.update(0, 42));

        assert_eq!(once.slot(0).unwrap().best(), twice.slot(0).unwrap().best());
    }

    #[test]
    fn test_rejection_counting() {
        let mut stat = TimingStatistic::new(1);
        stat.update(0, 10);
        stat.update(0, 20);
        stat.update(0, 21);
        assert_eq!(stat.slot(0).unwrap().rejected(), 1);
    }

    #[test]
    fn test_zero_minimum_rejects_nothing() {
        let mut stat = TimingStatistic::new(1);
        stat.update(0, 0);
        assert!(!stat.update(0, 5));
        assert!(!stat.update(0, 500));
        let slot = stat.slot(0).unwrap();
        assert_eq!(slot.best(), Some(0));
        assert_eq!(slot.samples(), 3);
        assert_eq!(slot.rejected(), 0);
    }

    #[test]
    fn test_out_of_range_update_is_ignored() {
        let mut stat = TimingStatistic::new(1);
        assert!(!stat.update(5, 10));
        assert_eq!(stat.slot(0).unwrap().samples(), 0);
    }

    #[test]
    fn test_reset() {
        let mut stat = TimingStatistic::new(3);
        stat.update(1, 7);
        stat.reset();
        assert_eq!(stat.len(), 3);
        assert_eq!(stat.slot(1).unwrap().best(), None);
    }

    #[test]
    fn test_summarize() {
        let mut stat = TimingStatistic::new(4);
        for (i, sample) in [10, 12, 11, 90].into_iter().enumerate() {
            stat.update(i, sample);
            stat.update(i, sample + 5);
        }
        let summary = stat.summarize(&PrintOptions::default());
        assert_eq!(summary.slots, 4);
        assert_eq!(summary.samples, 8);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 90.0);
        assert!((summary.median - 11.5).abs() < f64::EPSILON);
        assert!((summary.mean - 30.75).abs() < f64::EPSILON);
        assert_eq!(summary.outlier_slots, 1);
        assert!(summary.slot_minima.is_none());
    }

    #[test]
    fn test_summarize_verbose_lists_minima() {
        let mut stat = TimingStatistic::new(2);
        stat.update(0, 3);
        stat.update(1, 4);
        let summary = stat.summarize(&PrintOptions { verbose: true });
        assert_eq!(summary.slot_minima, Some(vec![Some(3), Some(4)]));
    }

    #[test]
    fn test_verbose_minima_keep_empty_slots() {
        let mut stat = TimingStatistic::new(3);
        stat.update(0, 7);
        stat.update(2, 9);
        let summary = stat.summarize(&PrintOptions { verbose: true });
        assert_eq!(summary.slot_minima, Some(vec![Some(7), None, Some(9)]));
        assert_eq!(summary.min, 7.0);
        assert_eq!(summary.max, 9.0);
    }

    #[test]
    fn test_empty_statistic_prints_trivial_summary() {
        let stat = TimingStatistic::new(0);
        let mut sink: Vec<(String, TimingSummary)> = Vec::new();
        stat.print("fbig_add", &PrintOptions::default(), &mut sink);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].0, "fbig_add");
        assert_eq!(sink[0].1, TimingSummary::default());
    }
}
