//! Benchmark Executor
//!
//! Drives the selected registry entries through repeated measurement
//! passes and renders the collected report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Registry (explicit build) ──► ExecutionPlan (regex filter)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Passes until stable, failures isolated
//! └──────┬──────┘
//!        │  Report (SummarySink)
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Pass driver with panic isolation and progress display
//! - [`formatting`] - Human-readable output formatting

mod execution;
mod formatting;

// Re-export public API
pub use execution::{ExecutionConfig, ExecutionOutcome, Executor};
pub use formatting::format_human_output;
