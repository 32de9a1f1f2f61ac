//! Output Formatting
//!
//! Human-readable output formatting for benchmark reports.
//!
//! Generates terminal-friendly output with:
//! - A run header (precision, rounding mode, tick unit, table size)
//! - One line per benchmark with a status icon (✓/✗/💥/⊘)
//! - Slot-minimum timings and the share of rejected samples
//! - Adapter mismatches and refused duplicate names flagged at registration

use mbench_report::{BenchmarkStatus, Report};

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let meta = &report.meta;
    let mut output = String::new();

    output.push('\n');
    output.push_str("mbench Results\n");
    output.push_str(&"=".repeat(72));
    output.push('\n');
    output.push_str(&format!(
        "precision: {} bits  rounding: {}  inputs: {}  passes: {}\n",
        meta.precision, meta.rounding, meta.inputs, meta.passes
    ));
    output.push_str(&format!(
        "unit: {}  (clock overhead {} subtracted)\n\n",
        meta.tick_unit, meta.overhead_ticks
    ));

    let width = report
        .results
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(12)
        .max(9);

    output.push_str(&format!(
        "    {:<width$}  {:>10}  {:>10}  {:>10}  {:>10}  {:>7}\n",
        "Benchmark", "min", "median", "mean", "max", "rej%"
    ));
    output.push_str(&format!("    {}\n", "-".repeat(width + 56)));

    for result in &report.results {
        let status_icon = match result.status {
            BenchmarkStatus::Passed => "✓",
            BenchmarkStatus::Failed => "✗",
            BenchmarkStatus::Crashed => "💥",
            BenchmarkStatus::Skipped => "⊘",
        };

        match &result.metrics {
            Some(m) => {
                output.push_str(&format!(
                    "  {} {:<width$}  {:>10.0}  {:>10.0}  {:>10.1}  {:>10.0}  {:>6.1}%\n",
                    status_icon,
                    result.name,
                    m.min,
                    m.median,
                    m.mean,
                    m.max,
                    m.rejected_percentage()
                ));
                if m.outlier_slots > 0 {
                    output.push_str(&format!(
                        "      {} of {} slots are outliers\n",
                        m.outlier_slots, m.slots
                    ));
                }
                if let Some(minima) = &m.slot_minima {
                    let rendered: Vec<String> = minima
                        .iter()
                        .map(|best| best.map_or_else(|| "-".to_string(), |t| t.to_string()))
                        .collect();
                    output.push_str(&format!("      slots: {}\n", rendered.join(" ")));
                }
            }
            None => output.push_str(&format!("  {} {}\n", status_icon, result.name)),
        }

        if let Some(failure) = &result.failure {
            output.push_str(&format!("      {}: {}\n", failure.kind, failure.message));
        }
    }

    if !meta.adapter_mismatches.is_empty() {
        output.push_str("\nAdapter mismatches\n");
        output.push_str(&"-".repeat(72));
        output.push('\n');
        for mismatch in &meta.adapter_mismatches {
            output.push_str(&format!("  ! {}\n", mismatch));
        }
    }

    if !meta.duplicate_names.is_empty() {
        output.push_str("\nDuplicate names (later entries dropped)\n");
        output.push_str(&"-".repeat(72));
        output.push('\n');
        for name in &meta.duplicate_names {
            output.push_str(&format!("  ! {}\n", name));
        }
    }

    // Summary
    output.push_str("\nSummary\n");
    output.push_str(&"-".repeat(72));
    output.push('\n');
    output.push_str(&format!(
        "  Total: {}  Passed: {}  Failed: {}  Crashed: {}  Skipped: {}\n",
        report.summary.total_benchmarks,
        report.summary.passed,
        report.summary.failed,
        report.summary.crashed,
        report.summary.skipped
    ));
    output.push_str(&format!(
        "  Passes: {}  Duration: {:.2} ms\n",
        report.summary.passes, report.summary.total_duration_ms
    ));

    output
}
