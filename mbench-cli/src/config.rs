//! Configuration loading from mbench.toml
//!
//! mbench configuration can be specified in an `mbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use mbench_core::{DEFAULT_PRECISION, RoundingMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// mbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MbenchConfig {
    /// Numeric configuration
    #[serde(default)]
    pub numeric: NumericConfig,
    /// Input table configuration
    #[serde(default)]
    pub inputs: InputConfig,
    /// Pass driver configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Precision and rounding of every benchmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericConfig {
    /// Operand precision in bits
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Rounding mode of the measured operation
    #[serde(default)]
    pub rounding: RoundingMode,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            rounding: RoundingMode::default(),
        }
    }
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

/// Where the input table comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Load values from this file instead of generating them
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Number of generated values
    #[serde(default = "default_count")]
    pub count: usize,
    /// Seed of the generator
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Lower bound (inclusive) of generated values
    #[serde(default = "default_min")]
    pub min: f64,
    /// Upper bound (exclusive) of generated values
    #[serde(default = "default_max")]
    pub max: f64,
    /// Fractional digits of generated values
    #[serde(default = "default_digits")]
    pub digits: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            file: None,
            count: default_count(),
            seed: default_seed(),
            min: default_min(),
            max: default_max(),
            digits: default_digits(),
        }
    }
}

fn default_count() -> usize {
    100
}
fn default_seed() -> u64 {
    42
}
fn default_min() -> f64 {
    0.0
}
fn default_max() -> f64 {
    1.0
}
fn default_digits() -> usize {
    20
}

/// Pass driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Passes always run
    #[serde(default = "default_min_passes")]
    pub min_passes: usize,
    /// Hard cap on passes
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
    /// Consecutive passes without an irregular sample that end the run
    #[serde(default = "default_stable_passes")]
    pub stable_passes: usize,
    /// Pin the measuring thread to this CPU
    #[serde(default)]
    pub cpu: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_passes: default_min_passes(),
            max_passes: default_max_passes(),
            stable_passes: default_stable_passes(),
            cpu: None,
        }
    }
}

fn default_min_passes() -> usize {
    3
}
fn default_max_passes() -> usize {
    50
}
fn default_stable_passes() -> usize {
    2
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Include per-slot minima in summaries
    #[serde(default)]
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            verbose: false,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl MbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` looking for `mbench.toml`
    pub fn discover_from(start: &Path) -> Option<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join("mbench.toml");
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), "ignoring mbench.toml: {e}");
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# mbench Configuration

[numeric]
# Operand precision in bits
precision = 53
# Rounding mode: nearest, toward-zero, up, down, away-from-zero
rounding = "nearest"

[inputs]
# Read one decimal per line from a file (uncomment to enable)
# file = "inputs.txt"
# Otherwise generate `count` values uniform in [min, max)
count = 100
seed = 42
min = 0.0
max = 1.0
# Fractional digits of generated values
digits = 20

[runner]
# Passes always run
min_passes = 3
# Hard cap on passes
max_passes = 50
# Consecutive passes without an irregular sample that end the run
stable_passes = 2
# Pin the measuring thread to a CPU (uncomment to enable)
# cpu = 2

[output]
# Default output format: human, json, csv
format = "human"
# Include per-slot minima in summaries
verbose = false
"#
        .to_string()
    }
}
