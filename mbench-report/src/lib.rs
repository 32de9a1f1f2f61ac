#![warn(missing_docs)]
//! mbench Report - Result Collection and Rendering
//!
//! `Report` is the sink every benchmark prints its timing summary into.
//! It renders as:
//! - JSON (machine-readable, full schema)
//! - CSV (one row per benchmark)
//!
//! Human-readable terminal output lives in the CLI.

mod csv;
mod json;
mod report;

pub use csv::generate_csv_report;
pub use json::generate_json_report;
pub use report::{
    BenchmarkReportResult, BenchmarkStatus, FailureInfo, Report, ReportMeta, ReportSummary,
    SCHEMA_VERSION,
};

/// Errors raised while rendering a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// JSON serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// CSV serialization failed
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] ::csv::Error),
    /// Flushing the CSV buffer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Rendered bytes were not UTF-8
    #[error("report is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Human,
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
