#![warn(missing_docs)]
//! mbench CLI Library
//!
//! Command-line driver for the benchmark suite: reads `mbench.toml`,
//! prepares the input table, runs measurement passes over the registry
//! until the timings settle, and renders the report.
//!
//! # Example
//!
//! ```ignore
//! use mbench_core::{Registry, SinOp};
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = Registry::build(|r| {
//!         r.register("custom_sin", SinOp);
//!     });
//!     mbench_cli::run_with(registry)
//! }
//! ```

mod config;
mod executor;
mod inputs;
mod planner;

pub use config::*;
pub use executor::{ExecutionConfig, ExecutionOutcome, Executor, format_human_output};
pub use inputs::{InputError, generate_inputs, load_inputs, resolve_inputs};
pub use planner::{ExecutionPlan, build_plan};

use anyhow::Context;
use clap::{Parser, Subcommand};
use mbench_core::{
    Clock, Mismatch, Options, Registry, RoundingMode, TICK_UNIT, TscClock, pin_to_cpu,
};
use mbench_report::{
    OutputFormat, Report, ReportMeta, generate_csv_report, generate_json_report,
};
use mbench_stats::PrintOptions;
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// mbench CLI arguments
#[derive(Parser, Debug, Default)]
#[command(name = "mbench")]
#[command(
    author,
    version,
    about = "mbench - latency of arbitrary-precision floating point primitives"
)]
pub struct Cli {
    /// Optional subcommand (List, Run, Config); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter benchmarks by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Operand precision in bits
    #[arg(short, long)]
    pub precision: Option<usize>,

    /// Rounding mode: n, z, u, d, a (or nearest, toward-zero, ...)
    #[arg(short, long)]
    pub rounding: Option<RoundingMode>,

    /// Number of generated input values
    #[arg(short = 'n', long)]
    pub inputs: Option<usize>,

    /// Seed for generated inputs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Read inputs from a file, one decimal per line
    #[arg(short = 'f', long)]
    pub input_file: Option<PathBuf>,

    /// Lower bound of generated inputs
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<f64>,

    /// Upper bound (exclusive) of generated inputs
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<f64>,

    /// Fractional digits of generated inputs
    #[arg(long)]
    pub digits: Option<usize>,

    /// Passes always run
    #[arg(long)]
    pub min_passes: Option<usize>,

    /// Hard cap on passes
    #[arg(long)]
    pub max_passes: Option<usize>,

    /// Consecutive passes without irregular samples that end the run
    #[arg(long)]
    pub stable: Option<usize>,

    /// Pin the measuring thread to this CPU
    #[arg(long)]
    pub cpu: Option<usize>,

    /// Output format: human, json, csv
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose output (debug logs, per-slot minima)
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// List registered benchmarks in run order
    List,
    /// Run benchmarks (default)
    Run,
    /// Print a default mbench.toml
    Config,
}

/// Everything a run needs, after layering mbench.toml and CLI flags
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Numeric and reporting options handed to every entry
    pub options: Options,
    /// Input table source
    pub inputs: InputConfig,
    /// Pass driver configuration
    pub execution: ExecutionConfig,
    /// CPU to pin to
    pub cpu: Option<usize>,
    /// Name filter
    pub filter: Option<Regex>,
    /// Output format
    pub format: OutputFormat,
    /// Output file
    pub output: Option<PathBuf>,
}

impl RunSettings {
    /// Layer mbench.toml values and CLI overrides; CLI flags win.
    pub fn resolve(cli: &Cli, config: &MbenchConfig) -> anyhow::Result<Self> {
        let precision = cli.precision.unwrap_or(config.numeric.precision);
        let rounding = cli.rounding.unwrap_or(config.numeric.rounding);
        let verbose = cli.verbose || config.output.verbose;

        let inputs = InputConfig {
            file: cli.input_file.clone().or_else(|| config.inputs.file.clone()),
            count: cli.inputs.unwrap_or(config.inputs.count),
            seed: cli.seed.unwrap_or(config.inputs.seed),
            min: cli.min.unwrap_or(config.inputs.min),
            max: cli.max.unwrap_or(config.inputs.max),
            digits: cli.digits.unwrap_or(config.inputs.digits),
        };

        let execution = ExecutionConfig {
            min_passes: cli.min_passes.unwrap_or(config.runner.min_passes),
            max_passes: cli.max_passes.unwrap_or(config.runner.max_passes),
            stable_passes: cli.stable.unwrap_or(config.runner.stable_passes),
            progress: true,
        };

        let filter = match cli.filter.as_str() {
            "" | ".*" => None,
            pattern => Some(
                Regex::new(pattern).with_context(|| format!("invalid filter {pattern:?}"))?,
            ),
        };

        let format_name = cli.format.as_deref().unwrap_or(config.output.format.as_str());
        let format: OutputFormat = format_name.parse().map_err(anyhow::Error::msg)?;

        Ok(Self {
            options: Options {
                precision,
                rounding,
                print: PrintOptions { verbose },
            },
            inputs,
            execution,
            cpu: cli.cpu.or(config.runner.cpu),
            filter,
            format,
            output: cli.output.clone(),
        })
    }
}

/// Run the mbench CLI over the standard suite.
/// This is the main entry point of the `mbench` binary.
pub fn run() -> anyhow::Result<()> {
    run_with(Registry::standard())
}

/// Run the mbench CLI over a caller-built registry.
pub fn run_with(registry: Registry) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli, registry)
}

/// Run the mbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli, mut registry: Registry) -> anyhow::Result<()> {
    init_tracing(cli.verbose);

    // Discover mbench.toml configuration (CLI flags override)
    let config = MbenchConfig::discover().unwrap_or_default();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::List => {
            print!("{}", format_listing(&registry, &cli.filter)?);
        }
        Commands::Config => {
            print!("{}", MbenchConfig::default_toml());
        }
        Commands::Run => {
            let settings = RunSettings::resolve(&cli, &config)?;
            let report = run_suite(&mut registry, &settings)?;
            let output = render(&report, settings.format)?;

            if let Some(ref path) = settings.output {
                let mut file = std::fs::File::create(path)
                    .with_context(|| format!("cannot create {}", path.display()))?;
                file.write_all(output.as_bytes())?;
                println!("Report written to: {}", path.display());
            } else {
                print!("{}", output);
            }

            if report.has_failures() {
                eprintln!(
                    "\n{} benchmark(s) failed, {} crashed",
                    report.summary.failed, report.summary.crashed
                );
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Install the global subscriber once; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose { "mbench=debug" } else { "mbench=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Measure every selected entry of `registry` until timings settle.
///
/// The report lists the selected entries in registration order; entries
/// that failed or crashed carry their failure.
pub fn run_suite(registry: &mut Registry, settings: &RunSettings) -> anyhow::Result<Report> {
    let start_time = Instant::now();
    let inputs = resolve_inputs(&settings.inputs)?;

    if let Some(cpu) = settings.cpu {
        if let Err(e) = pin_to_cpu(cpu) {
            warn!(cpu, "cannot pin to CPU: {e}");
        }
    }

    let plan = build_plan(registry.names(), settings.filter.as_ref());
    if plan.is_empty() {
        warn!("no benchmark matches the filter");
    }

    let mut meta = ReportMeta::new(
        settings.options.precision,
        settings.options.rounding.to_string(),
        TICK_UNIT,
    );
    meta.inputs = inputs.len();
    meta.overhead_ticks = TscClock::calibrated().overhead();
    meta.adapter_mismatches = registry.mismatches().iter().map(describe_mismatch).collect();
    meta.duplicate_names = registry.duplicates().to_vec();

    let mut report = Report::new(meta);
    for (position, entry) in registry.iter().enumerate() {
        if plan.includes(position) {
            report.add_entry(entry.name(), entry.primitive().map(|p| p.name().to_string()));
        }
    }

    info!(
        benchmarks = plan.len(),
        inputs = inputs.len(),
        precision = settings.options.precision,
        rounding = %settings.options.rounding,
        "running benchmarks"
    );

    let mut executor = Executor::new(settings.execution.clone());
    let outcome = executor.execute(registry, &plan, &inputs, &settings.options, &mut report);
    if !outcome.converged {
        warn!(
            passes = outcome.passes,
            "timings still irregular after the last pass"
        );
    }

    report.finish(outcome.passes, start_time.elapsed());
    Ok(report)
}

/// Render `report` in `format`
pub fn render(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Csv => generate_csv_report(report)?,
        OutputFormat::Human => format_human_output(report),
    })
}

fn describe_mismatch(mismatch: &Mismatch) -> String {
    format!(
        "{}: named {}, bound to {}",
        mismatch.name, mismatch.declared, mismatch.bound
    )
}

/// Registry listing in run order, flagging name/adapter mismatches and refused duplicates.
pub fn format_listing(registry: &Registry, filter: &str) -> anyhow::Result<String> {
    let filter_re = Regex::new(filter).with_context(|| format!("invalid filter {filter:?}"))?;
    let plan = build_plan(registry.names(), Some(&filter_re));

    let mut output = String::from("mbench Plan:\n");
    for (position, entry) in registry.iter().enumerate() {
        if !plan.includes(position) {
            continue;
        }
        let bound = entry
            .primitive()
            .map(|p| format!("{} ({}-ary)", p, p.arity()))
            .unwrap_or_else(|| "custom".to_string());
        let flag = registry
            .mismatches()
            .iter()
            .find(|m| m.name == entry.name())
            .map(|m| format!("  ! named {}", m.declared))
            .unwrap_or_default();
        output.push_str(&format!("├── {:<16} {}{}\n", entry.name(), bound, flag));
    }
    for name in registry.duplicates() {
        output.push_str(&format!("!   {name}: duplicate name, later entry dropped\n"));
    }
    output.push_str(&format!("{} benchmarks found.\n", plan.len()));
    Ok(output)
}
