#![warn(missing_docs)]
//! mbench Core - Benchmark Engine
//!
//! This crate provides the pieces that turn a table of decimal inputs into
//! per-operation timings:
//! - `Clock` and the calibrated tick counter (RDTSCP / CNTVCT_EL0)
//! - `Operation` adapters, one per numeric primitive
//! - `OperationTest`, the generic measurement loop
//! - `Registry`, built explicitly and iterated in registration order

mod entry;
mod error;
mod measure;
mod ops;
mod options;
mod registry;

pub use entry::{Benchmark, OperationTest};
pub use error::BenchError;
pub use measure::{
    CALIBRATION_ROUNDS, Clock, HAS_CYCLE_COUNTER, TICK_UNIT, Timer, TscClock, pin_to_cpu,
    read_ticks,
};
pub use ops::{
    AcosOp, AcoshOp, AddOp, AsinOp, AsinhOp, AtanOp, AtanhOp, CosOp, CoshOp, DivOp, ErfOp, ExpOp,
    LogOp, MulOp, Operation, Primitive, SetOp, SinOp, SinhOp, SqrtOp, SubOp, TanOp, TanhOp,
    adapter_for,
};
pub use options::{DEFAULT_PRECISION, Options};
pub use registry::{
    Mismatch, Registrar, Registry, STANDARD_PREFIX, declared_primitive, register_standard,
};

pub use mbench_numeric::{Float, RoundingMode, Status};
pub use mbench_stats::{PrintOptions, SummarySink, TimingStatistic, TimingSummary};
