//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{BenchmarkStatus, ReportMeta};
    use mbench_stats::{SummarySink, TimingSummary};

    #[test]
    fn test_json_report_parses_back() {
        let mut report = Report::new(ReportMeta::new(113, "toward-zero", "ns"));
        report.record(
            "fbig_exp",
            TimingSummary {
                slots: 2,
                min: 120.0,
                samples: 4,
                ..TimingSummary::default()
            },
        );
        report.finish(2, std::time::Duration::from_millis(3));

        let json = generate_json_report(&report).unwrap();
        assert!(json.contains("\"status\": \"passed\""));
        assert!(!json.contains("slot_minima"));

        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.meta.precision, 113);
        assert_eq!(parsed.meta.rounding, "toward-zero");
        assert_eq!(parsed.results[0].status, BenchmarkStatus::Passed);
        assert_eq!(parsed.results[0].metrics.as_ref().unwrap().min, 120.0);
    }
}
