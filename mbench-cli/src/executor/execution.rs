//! Benchmark Execution
//!
//! The pass driver. Every pass runs each planned entry once over the
//! whole input table; passes repeat until the timings settle.
//!
//! ## Stopping rule
//!
//! ```text
//! pass ──► any slot irregular? ──yes──► stable = 0
//!                  │
//!                  no ──► stable += 1
//!
//! stop when passes >= min_passes && stable >= stable_passes
//!        or passes == max_passes
//! ```
//!
//! Entries are visited by registry position, once per pass. An entry that
//! fails (error or panic) is recorded in the report and left out of later
//! passes; the others keep running.

use crate::planner::ExecutionPlan;
use indicatif::{ProgressBar, ProgressStyle};
use mbench_core::{BenchError, Options, Registry};
use mbench_report::{BenchmarkStatus, Report};
use std::collections::HashSet;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, error, info};

/// Configuration for the pass driver
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Passes always run
    pub min_passes: usize,
    /// Hard cap on passes
    pub max_passes: usize,
    /// Consecutive regular passes that end the run
    pub stable_passes: usize,
    /// Draw a progress bar on stderr
    pub progress: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            min_passes: 3,
            max_passes: 50,
            stable_passes: 2,
            progress: true,
        }
    }
}

/// Outcome of a complete run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Passes actually run
    pub passes: usize,
    /// Whether the last `stable_passes` passes were all regular
    pub converged: bool,
}

/// Drives measurement passes over the planned entries (in-process)
pub struct Executor {
    config: ExecutionConfig,
    failed: HashSet<usize>,
}

impl Executor {
    /// New driver; `max_passes` is raised to at least `min_passes` and 1.
    pub fn new(mut config: ExecutionConfig) -> Self {
        config.max_passes = config.max_passes.max(config.min_passes).max(1);
        Self {
            config,
            failed: HashSet::new(),
        }
    }

    /// Run passes until the timings settle, printing into `report`.
    pub fn execute(
        &mut self,
        registry: &mut Registry,
        plan: &ExecutionPlan,
        inputs: &[String],
        options: &Options,
        report: &mut Report,
    ) -> ExecutionOutcome {
        let mut passes = 0;
        let mut stable = 0;

        while passes < self.config.max_passes {
            passes += 1;
            let irregular = self.run_pass(passes, registry, plan, inputs, options, report);
            if irregular {
                stable = 0;
            } else {
                stable += 1;
            }
            debug!(pass = passes, irregular, stable, "pass complete");

            if passes >= self.config.min_passes && stable >= self.config.stable_passes {
                break;
            }
            if plan.positions.iter().all(|p| self.failed.contains(p)) {
                info!("every planned benchmark failed; stopping");
                break;
            }
        }

        let converged = stable >= self.config.stable_passes;
        info!(passes, converged, "run finished");
        ExecutionOutcome { passes, converged }
    }

    /// Run each live entry once. Returns `true` if any reported an irregular sample.
    fn run_pass(
        &mut self,
        pass: usize,
        registry: &mut Registry,
        plan: &ExecutionPlan,
        inputs: &[String],
        options: &Options,
        report: &mut Report,
    ) -> bool {
        let pb = if self.config.progress {
            ProgressBar::new(plan.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} pass {prefix} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_prefix(pass.to_string());

        let mut irregular = false;
        for (position, entry) in registry.iter_mut().enumerate() {
            if !plan.includes(position) {
                continue;
            }
            if self.failed.contains(&position) {
                pb.inc(1);
                continue;
            }
            let name = entry.name().to_string();
            pb.set_message(name.clone());

            let result =
                catch_unwind(AssertUnwindSafe(|| entry.run(inputs, options, &mut *report)));
            match result {
                Ok(Ok(changed)) => irregular |= changed,
                Ok(Err(e)) => {
                    error!(benchmark = %name, "{e}");
                    report.record_failure(
                        &name,
                        BenchmarkStatus::Failed,
                        failure_kind(&e),
                        e.to_string(),
                    );
                    self.failed.insert(position);
                }
                Err(panic) => {
                    let message = if let Some(s) = panic.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    error!(benchmark = %name, "panicked: {message}");
                    report.record_failure(&name, BenchmarkStatus::Crashed, "panic", message);
                    self.failed.insert(position);
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        irregular
    }
}

fn failure_kind(error: &BenchError) -> &'static str {
    match error {
        BenchError::InvalidInput { .. } => "invalid-input",
        BenchError::NotInitialized { .. } => "not-initialized",
        BenchError::AlreadyInitialized { .. } => "already-initialized",
        BenchError::TableSizeChanged { .. } => "table-size-changed",
        BenchError::Numeric(_) => "numeric",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbench_core::{AddOp, Benchmark, Primitive, RoundingMode, SummarySink, TimingSummary};
    use mbench_report::ReportMeta;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Entry whose irregular flag follows a script, one value per pass
    struct Scripted {
        name: &'static str,
        script: Vec<bool>,
        calls: Rc<Cell<usize>>,
        panic_on: Option<usize>,
    }

    impl Benchmark for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        fn primitive(&self) -> Option<Primitive> {
            None
        }

        fn table_len(&self) -> Option<usize> {
            None
        }

        fn initialize(&mut self, _inputs: &[String], _options: &Options) -> Result<(), BenchError> {
            Ok(())
        }

        fn measure(
            &mut self,
            _options: &Options,
            sink: &mut dyn SummarySink,
        ) -> Result<bool, BenchError> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            if self.panic_on == Some(call) {
                panic!("scripted panic");
            }
            sink.record(self.name, TimingSummary::default());
            Ok(self.script.get(call).copied().unwrap_or(false))
        }
    }

    fn scripted(name: &'static str, script: &[bool]) -> (Box<dyn Benchmark>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let entry = Scripted {
            name,
            script: script.to_vec(),
            calls: calls.clone(),
            panic_on: None,
        };
        (Box::new(entry), calls)
    }

    fn quiet(min_passes: usize, max_passes: usize, stable_passes: usize) -> ExecutionConfig {
        ExecutionConfig {
            min_passes,
            max_passes,
            stable_passes,
            progress: false,
        }
    }

    fn report() -> Report {
        Report::new(ReportMeta::new(53, "nearest", "cycles"))
    }

    fn plan(registry: &Registry) -> ExecutionPlan {
        crate::planner::build_plan(registry.names(), None)
    }

    #[test]
    fn test_stops_after_stable_passes() {
        let (entry, calls) = scripted("s", &[true, true, false, false, true]);
        let mut registry = Registry::build(|r| {
            r.register_entry(entry);
        });
        let plan = plan(&registry);
        let mut report = report();

        let outcome = Executor::new(quiet(1, 10, 2)).execute(
            &mut registry,
            &plan,
            &[],
            &Options::default(),
            &mut report,
        );

        assert_eq!(outcome.passes, 4);
        assert!(outcome.converged);
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_min_passes_always_run() {
        let (entry, calls) = scripted("s", &[]);
        let mut registry = Registry::build(|r| {
            r.register_entry(entry);
        });
        let plan = plan(&registry);

        let outcome = Executor::new(quiet(5, 10, 1)).execute(
            &mut registry,
            &plan,
            &[],
            &Options::default(),
            &mut report(),
        );

        assert_eq!(outcome.passes, 5);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_max_passes_caps_irregular_runs() {
        let (entry, _) = scripted("s", &[true; 20]);
        let mut registry = Registry::build(|r| {
            r.register_entry(entry);
        });
        let plan = plan(&registry);

        let outcome = Executor::new(quiet(1, 6, 2)).execute(
            &mut registry,
            &plan,
            &[],
            &Options::default(),
            &mut report(),
        );

        assert_eq!(outcome.passes, 6);
        assert!(!outcome.converged);
    }

    #[test]
    fn test_failures_do_not_stop_other_entries() {
        let calls = Rc::new(Cell::new(0));
        let crashing = Box::new(Scripted {
            name: "crash",
            script: Vec::new(),
            calls: calls.clone(),
            panic_on: Some(0),
        });
        let (healthy, healthy_calls) = scripted("healthy", &[]);
        let mut registry = Registry::build(|r| {
            r.register_entry(crashing);
            r.register("fbig_add", AddOp);
            r.register_entry(healthy);
        });
        let plan = plan(&registry);
        let mut report = report();
        for name in &plan.benchmarks {
            report.add_entry(name, None);
        }

        let inputs = vec!["1.0".to_string(), "oops".to_string()];
        let outcome = Executor::new(quiet(3, 3, 1)).execute(
            &mut registry,
            &plan,
            &inputs,
            &Options::default(),
            &mut report,
        );

        assert_eq!(outcome.passes, 3);
        assert_eq!(calls.get(), 1);
        assert_eq!(healthy_calls.get(), 3);

        let crash = report.result("crash").unwrap();
        assert_eq!(crash.status, BenchmarkStatus::Crashed);
        assert_eq!(crash.failure.as_ref().unwrap().message, "scripted panic");

        let add = report.result("fbig_add").unwrap();
        assert_eq!(add.status, BenchmarkStatus::Failed);
        assert_eq!(add.failure.as_ref().unwrap().kind, "invalid-input");

        assert_eq!(report.result("healthy").unwrap().status, BenchmarkStatus::Passed);
        assert!(report.has_failures());
    }

    #[test]
    fn test_real_entry_prints_every_pass() {
        let mut registry = Registry::build(|r| {
            r.register("fbig_add", AddOp);
        });
        let plan = plan(&registry);
        let mut report = report();
        let inputs: Vec<String> = ["1.0", "2.0", "3.0", "4.5"].map(String::from).to_vec();

        let outcome = Executor::new(quiet(2, 2, 1)).execute(
            &mut registry,
            &plan,
            &inputs,
            &Options::new(53, RoundingMode::Nearest),
            &mut report,
        );

        let metrics = report.result("fbig_add").unwrap().metrics.clone().unwrap();
        assert_eq!(outcome.passes, 2);
        assert_eq!(metrics.slots, 3);
        assert_eq!(metrics.samples, 6);
    }

    #[test]
    fn test_each_entry_visited_once_per_pass() {
        let (first, first_calls) = scripted("twin", &[]);
        let (second, second_calls) = scripted("twin", &[]);
        let (other, other_calls) = scripted("other", &[]);
        let mut registry = Registry::build(|r| {
            r.register_entry(first)
                .register_entry(second)
                .register_entry(other);
        });
        assert_eq!(registry.duplicates(), ["twin"]);
        let plan = plan(&registry);
        assert_eq!(plan.positions, [0, 1]);

        let outcome = Executor::new(quiet(2, 2, 1)).execute(
            &mut registry,
            &plan,
            &[],
            &Options::default(),
            &mut report(),
        );

        assert_eq!(outcome.passes, 2);
        assert_eq!(first_calls.get(), 2);
        assert_eq!(second_calls.get(), 0);
        assert_eq!(other_calls.get(), 2);
    }

    #[test]
    fn test_unplanned_entries_are_not_run() {
        let (skipped, skipped_calls) = scripted("skipped", &[]);
        let (planned, planned_calls) = scripted("planned", &[]);
        let mut registry = Registry::build(|r| {
            r.register_entry(skipped).register_entry(planned);
        });
        let re = regex::Regex::new("^planned$").unwrap();
        let plan = crate::planner::build_plan(registry.names(), Some(&re));

        Executor::new(quiet(3, 3, 1)).execute(
            &mut registry,
            &plan,
            &[],
            &Options::default(),
            &mut report(),
        );

        assert_eq!(skipped_calls.get(), 0);
        assert_eq!(planned_calls.get(), 3);
    }
}
