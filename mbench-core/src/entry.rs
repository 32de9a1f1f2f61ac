//! Benchmark Entries
//!
//! `OperationTest` is the generic per-operation benchmark: it parses the
//! input table once, then every pass copies each adjacent pair of prepared
//! operands into scratch values and times exactly one adapter call on them.
//!
//! Lifecycle is explicit: `initialize` once, then any number of `measure`
//! passes. `run` does both, initializing on first use.

use crate::error::BenchError;
use crate::measure::{Clock, TscClock};
use crate::ops::{Operation, Primitive};
use crate::options::Options;
use mbench_numeric::{Float, NumericError, RoundingMode};
use mbench_stats::{SummarySink, TimingStatistic};
use tracing::debug;

/// A named, runnable benchmark
pub trait Benchmark {
    /// Name under which results are reported
    fn name(&self) -> &str;

    /// Primitive bound to this entry, if it measures one
    fn primitive(&self) -> Option<Primitive>;

    /// Length of the prepared input table, once initialized
    fn table_len(&self) -> Option<usize>;

    /// Whether `initialize` has succeeded
    fn is_initialized(&self) -> bool {
        self.table_len().is_some()
    }

    /// Prepare operands and the timing statistic. Callable once.
    fn initialize(&mut self, inputs: &[String], options: &Options) -> Result<(), BenchError>;

    /// Run one measurement pass and print the statistic into `sink`.
    ///
    /// Returns `true` when some slot saw an irregular sample.
    fn measure(
        &mut self,
        options: &Options,
        sink: &mut dyn SummarySink,
    ) -> Result<bool, BenchError>;

    /// Initialize on first use, then measure
    fn run(
        &mut self,
        inputs: &[String],
        options: &Options,
        sink: &mut dyn SummarySink,
    ) -> Result<bool, BenchError> {
        match self.table_len() {
            None => self.initialize(inputs, options)?,
            Some(expected) if expected != inputs.len() => {
                return Err(BenchError::TableSizeChanged {
                    name: self.name().to_string(),
                    expected,
                    got: inputs.len(),
                });
            }
            Some(_) => {}
        }
        self.measure(options, sink)
    }
}

/// Operands and statistic owned by an initialized entry
#[derive(Debug)]
struct Prepared {
    table: Vec<Float>,
    a: Float,
    b: Float,
    c: Float,
    statistic: TimingStatistic,
}

/// Generic benchmark timing one `Operation` over adjacent input pairs
#[derive(Debug)]
pub struct OperationTest<O, C = TscClock> {
    name: String,
    operation: O,
    clock: C,
    state: Option<Prepared>,
}

impl<O: Operation> OperationTest<O> {
    /// Entry using the calibrated tick clock
    pub fn new(name: impl Into<String>, operation: O) -> Self {
        Self::with_clock(name, operation, TscClock::calibrated())
    }
}

impl<O: Operation, C: Clock> OperationTest<O, C> {
    /// Entry using a custom clock
    pub fn with_clock(name: impl Into<String>, operation: O, clock: C) -> Self {
        Self {
            name: name.into(),
            operation,
            clock,
            state: None,
        }
    }

    /// The bound adapter
    pub fn operation(&self) -> &O {
        &self.operation
    }

    /// Prepared operands, once initialized
    pub fn table(&self) -> Option<&[Float]> {
        self.state.as_ref().map(|s| s.table.as_slice())
    }

    /// Timing statistic, once initialized
    pub fn statistic(&self) -> Option<&TimingStatistic> {
        self.state.as_ref().map(|s| &s.statistic)
    }

    /// Scratch values `(a, b, c)`, once initialized
    pub fn scratch(&self) -> Option<(&Float, &Float, &Float)> {
        self.state.as_ref().map(|s| (&s.a, &s.b, &s.c))
    }
}

impl<O: Operation, C: Clock> Benchmark for OperationTest<O, C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn primitive(&self) -> Option<Primitive> {
        Some(self.operation.primitive())
    }

    fn table_len(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.table.len())
    }

    fn initialize(&mut self, inputs: &[String], options: &Options) -> Result<(), BenchError> {
        if self.state.is_some() {
            return Err(BenchError::AlreadyInitialized {
                name: self.name.clone(),
            });
        }

        let precision = options.precision;
        let a = Float::new(precision)?;
        let b = Float::new(precision)?;
        let c = Float::new(precision)?;

        let table = inputs
            .iter()
            .enumerate()
            .map(|(index, input)| {
                Float::with_str(precision, input).map_err(|source| match source {
                    NumericError::Parse { .. } => BenchError::InvalidInput {
                        name: self.name.clone(),
                        index,
                        input: input.clone(),
                        source,
                    },
                    other => BenchError::Numeric(other),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let statistic = TimingStatistic::new(table.len().saturating_sub(1));
        debug!(
            name = %self.name,
            inputs = table.len(),
            precision,
            "prepared operand table"
        );
        self.state = Some(Prepared {
            table,
            a,
            b,
            c,
            statistic,
        });
        Ok(())
    }

    fn measure(
        &mut self,
        options: &Options,
        sink: &mut dyn SummarySink,
    ) -> Result<bool, BenchError> {
        let Some(state) = self.state.as_mut() else {
            return Err(BenchError::NotInitialized {
                name: self.name.clone(),
            });
        };

        let operation = &self.operation;
        let mut irregular = false;
        for i in 0..state.table.len().saturating_sub(1) {
            // operand copies are setup, always rounded to nearest
            state.b.set(&state.table[i], RoundingMode::Nearest);
            state.c.set(&state.table[i + 1], RoundingMode::Nearest);

            let (a, b, c) = (&mut state.a, &state.b, &state.c);
            let elapsed = self
                .clock
                .measure(|| operation.operate(a, b, c, options.rounding));
            irregular |= state.statistic.update(i, elapsed);
        }

        state.statistic.print(&self.name, &options.print, sink);
        Ok(irregular)
    }
}
