#![warn(missing_docs)]
//! # mbench
//!
//! Latency benchmarks for arbitrary-precision floating point primitives.
//!
//! mbench times one call of a numeric primitive (add, sqrt, exp, sin,
//! atanh, ...) over every adjacent pair of an input table and keeps, per
//! pair, the fastest observation across repeated passes:
//! - **Explicit Registry**: entries are registered in a build phase and run in registration order
//! - **Reusable State**: operands are parsed once and reused by every pass
//! - **Robust Aggregation**: running minimum per slot, with rejected-sample counts
//! - **Calibrated Timing**: RDTSCP / CNTVCT_EL0 with the clock overhead subtracted
//! - **Reports**: human, JSON and CSV output
//!
//! ## Quick Start
//!
//! ```ignore
//! use mbench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = Registry::build(|r| {
//!         register_standard(r, STANDARD_PREFIX);
//!         r.register("fbig_fma_like", MulOp);
//!     });
//!     mbench::run_with(registry)
//! }
//! ```

// Re-export core types
pub use mbench_core::{
    Benchmark, BenchError, Clock, Mismatch, Operation, OperationTest, Options, Primitive,
    Registrar, Registry, STANDARD_PREFIX, TICK_UNIT, TscClock, adapter_for, register_standard,
};

// Re-export adapters
pub use mbench_core::{
    AcosOp, AcoshOp, AddOp, AsinOp, AsinhOp, AtanOp, AtanhOp, CosOp, CoshOp, DivOp, ErfOp, ExpOp,
    LogOp, MulOp, SetOp, SinOp, SinhOp, SqrtOp, SubOp, TanOp, TanhOp,
};

// Re-export numeric types
pub use mbench_numeric::{Float, NumericError, RoundingMode, Status};

// Re-export stats
pub use mbench_stats::{PrintOptions, SummarySink, TimingStatistic, TimingSummary};

// Re-export reporting
pub use mbench_report::{BenchmarkStatus, OutputFormat, Report, ReportMeta};

// Re-export the driver
pub use mbench_cli::{MbenchConfig, RunSettings, run_suite, run_with};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Benchmark, Float, MulOp, Operation, Options, Primitive, Registrar, Registry,
        RoundingMode, STANDARD_PREFIX, Status, register_standard,
    };
}

/// Run the mbench CLI over the standard suite.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     mbench::run()
/// }
/// ```
pub use mbench_cli::run;
