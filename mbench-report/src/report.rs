//! Report Data Structures

use chrono::{DateTime, Utc};
use mbench_stats::{SummarySink, TimingSummary};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Version of the serialized report layout
pub const SCHEMA_VERSION: u32 = 1;

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub results: Vec<BenchmarkReportResult>,
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    /// Operand precision in bits
    pub precision: usize,
    /// Rounding mode of the measured operations
    pub rounding: String,
    /// Unit of every timing figure ("cycles" or "ns")
    pub tick_unit: String,
    /// Length of the input table
    pub inputs: usize,
    /// Passes actually run
    pub passes: usize,
    /// Calibrated clock overhead subtracted from each sample
    pub overhead_ticks: u64,
    /// Entries whose name disagrees with their bound adapter
    #[serde(default)]
    pub adapter_mismatches: Vec<String>,
    /// Names refused at registration because an earlier entry held them
    #[serde(default)]
    pub duplicate_names: Vec<String>,
}

impl ReportMeta {
    /// Metadata stamped with the current time and this crate's version
    pub fn new(precision: usize, rounding: impl Into<String>, tick_unit: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            precision,
            rounding: rounding.into(),
            tick_unit: tick_unit.into(),
            inputs: 0,
            passes: 0,
            overhead_ticks: 0,
            adapter_mismatches: Vec::new(),
            duplicate_names: Vec::new(),
        }
    }
}

/// Individual benchmark result in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReportResult {
    pub name: String,
    /// Primitive bound to the entry, if any
    pub primitive: Option<String>,
    pub status: BenchmarkStatus,
    /// Summary from the latest pass
    pub metrics: Option<TimingSummary>,
    pub failure: Option<FailureInfo>,
}

/// Benchmark execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkStatus {
    Passed,
    Failed,
    Crashed,
    Skipped,
}

impl BenchmarkStatus {
    /// Lowercase label, as serialized
    pub fn as_str(self) -> &'static str {
        match self {
            BenchmarkStatus::Passed => "passed",
            BenchmarkStatus::Failed => "failed",
            BenchmarkStatus::Crashed => "crashed",
            BenchmarkStatus::Skipped => "skipped",
        }
    }
}

/// Failure information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureInfo {
    pub kind: String,
    pub message: String,
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_benchmarks: usize,
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
    pub skipped: usize,
    pub passes: usize,
    pub total_duration_ms: f64,
}

impl Report {
    /// Empty report
    pub fn new(meta: ReportMeta) -> Self {
        Self {
            meta,
            results: Vec::new(),
            summary: ReportSummary::default(),
        }
    }

    /// Reserve a slot for `name`, so the report keeps registration order
    /// even for entries that never print.
    pub fn add_entry(&mut self, name: &str, primitive: Option<String>) {
        if self.result(name).is_none() {
            self.results.push(BenchmarkReportResult {
                name: name.to_string(),
                primitive,
                status: BenchmarkStatus::Skipped,
                metrics: None,
                failure: None,
            });
        }
    }

    /// Result for `name`
    pub fn result(&self, name: &str) -> Option<&BenchmarkReportResult> {
        self.results.iter().find(|r| r.name == name)
    }

    fn result_mut(&mut self, name: &str) -> &mut BenchmarkReportResult {
        match self.results.iter().position(|r| r.name == name) {
            Some(index) => &mut self.results[index],
            None => {
                self.add_entry(name, None);
                let last = self.results.len() - 1;
                &mut self.results[last]
            }
        }
    }

    /// Mark `name` failed or crashed
    pub fn record_failure(
        &mut self,
        name: &str,
        status: BenchmarkStatus,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) {
        let result = self.result_mut(name);
        result.status = status;
        result.failure = Some(FailureInfo {
            kind: kind.into(),
            message: message.into(),
        });
    }

    /// Whether any entry failed or crashed
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| {
            matches!(
                r.status,
                BenchmarkStatus::Failed | BenchmarkStatus::Crashed
            )
        })
    }

    /// Fill in the summary once the run is over
    pub fn finish(&mut self, passes: usize, duration: Duration) {
        self.meta.passes = passes;
        let count = |status| self.results.iter().filter(|r| r.status == status).count();
        self.summary = ReportSummary {
            total_benchmarks: self.results.len(),
            passed: count(BenchmarkStatus::Passed),
            failed: count(BenchmarkStatus::Failed),
            crashed: count(BenchmarkStatus::Crashed),
            skipped: count(BenchmarkStatus::Skipped),
            passes,
            total_duration_ms: duration.as_secs_f64() * 1000.0,
        };
    }
}

impl SummarySink for Report {
    /// Later passes replace the summary in place.
    fn record(&mut self, name: &str, summary: TimingSummary) {
        let result = self.result_mut(name);
        result.metrics = Some(summary);
        if result.failure.is_none() {
            result.status = BenchmarkStatus::Passed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(min: f64) -> TimingSummary {
        TimingSummary {
            slots: 3,
            min,
            samples: 3,
            ..TimingSummary::default()
        }
    }

    fn report() -> Report {
        Report::new(ReportMeta::new(53, "nearest", "cycles"))
    }

    #[test]
    fn test_record_keeps_first_position_and_replaces_metrics() {
        let mut report = report();
        report.record("fbig_sub", summary(20.0));
        report.record("fbig_add", summary(10.0));
        report.record("fbig_sub", summary(18.0));

        let names: Vec<_> = report.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["fbig_sub", "fbig_add"]);
        assert_eq!(report.result("fbig_sub").unwrap().metrics.as_ref().unwrap().min, 18.0);
        assert_eq!(report.result("fbig_sub").unwrap().status, BenchmarkStatus::Passed);
    }

    #[test]
    fn test_reserved_entries_keep_registration_order() {
        let mut report = report();
        report.add_entry("fbig_add", Some("add".to_string()));
        report.add_entry("fbig_sub", Some("sub".to_string()));
        report.record("fbig_sub", summary(5.0));

        assert_eq!(report.results[0].name, "fbig_add");
        assert_eq!(report.results[0].status, BenchmarkStatus::Skipped);
        assert_eq!(report.results[1].primitive.as_deref(), Some("sub"));
    }

    #[test]
    fn test_failure_sticks_across_later_prints() {
        let mut report = report();
        report.record_failure("fbig_log", BenchmarkStatus::Crashed, "panic", "boom");
        report.record("fbig_log", summary(1.0));

        let result = report.result("fbig_log").unwrap();
        assert_eq!(result.status, BenchmarkStatus::Crashed);
        assert_eq!(result.failure.as_ref().unwrap().message, "boom");
        assert!(report.has_failures());
    }

    #[test]
    fn test_finish_counts_statuses() {
        let mut report = report();
        report.add_entry("a", None);
        report.record("b", summary(1.0));
        report.record_failure("c", BenchmarkStatus::Failed, "input", "bad");
        report.finish(4, Duration::from_millis(250));

        assert_eq!(report.meta.passes, 4);
        assert_eq!(report.summary.total_benchmarks, 3);
        assert_eq!(report.summary.passed, 1);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.skipped, 1);
        assert!((report.summary.total_duration_ms - 250.0).abs() < 1e-9);
    }
}
