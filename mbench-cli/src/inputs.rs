//! Input Tables
//!
//! The table every benchmark is initialized from: either read from a file,
//! one decimal per line, or generated from a seeded RNG so runs repeat.

use crate::config::InputConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

/// Failure to produce an input table
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The input file could not be read
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A line does not look like a decimal number
    #[error("{}:{line}: {value:?} is not a decimal number", path.display())]
    Malformed {
        /// File holding the value
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Offending text
        value: String,
    },

    /// Generator bounds are empty or not finite
    #[error("invalid generator range [{min}, {max})")]
    Range {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
}

/// Load a table from `path`, skipping blank lines and `#` comments.
pub fn load_inputs(path: &Path) -> Result<Vec<String>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut values = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let value = raw.split('#').next().unwrap_or_default().trim();
        if value.is_empty() {
            continue;
        }
        if !looks_numeric(value) {
            return Err(InputError::Malformed {
                path: path.to_path_buf(),
                line: index + 1,
                value: value.to_string(),
            });
        }
        values.push(value.to_string());
    }
    Ok(values)
}

// Full parsing happens at the configured precision; this only rejects
// lines that can never be a number.
fn looks_numeric(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    let body = lower.trim_start_matches(['+', '-']);
    matches!(body, "nan" | "inf" | "infinity")
        || (body.chars().any(|c| c.is_ascii_digit())
            && body
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | '+' | '-')))
}

/// Generate `config.count` values uniform in `[min, max)`.
pub fn generate_inputs(config: &InputConfig) -> Result<Vec<String>, InputError> {
    let (min, max) = (config.min, config.max);
    if !(min.is_finite() && max.is_finite() && min < max) {
        return Err(InputError::Range { min, max });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    Ok((0..config.count)
        .map(|_| format!("{:.*}", config.digits, rng.gen_range(min..max)))
        .collect())
}

/// Table selected by `config`: the file when one is set, generated otherwise
pub fn resolve_inputs(config: &InputConfig) -> Result<Vec<String>, InputError> {
    match &config.file {
        Some(path) => load_inputs(path),
        None => generate_inputs(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_generation_is_reproducible() {
        let config = InputConfig {
            count: 5,
            digits: 6,
            ..InputConfig::default()
        };
        let first = generate_inputs(&config).unwrap();
        let second = generate_inputs(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
        for value in &first {
            let parsed: f64 = value.parse().unwrap();
            assert!((0.0..1.0).contains(&parsed));
            assert_eq!(value.split('.').nth(1).unwrap().len(), 6);
        }
    }

    #[test]
    fn test_generation_rejects_empty_range() {
        let config = InputConfig {
            min: 2.0,
            max: 2.0,
            ..InputConfig::default()
        };
        assert!(matches!(
            generate_inputs(&config),
            Err(InputError::Range { .. })
        ));
    }

    #[test]
    fn test_load_skips_blanks_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# header").unwrap();
        writeln!(file, "1.0").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  -2.5e3  # trailing").unwrap();
        writeln!(file, "nan").unwrap();

        let values = load_inputs(file.path()).unwrap();
        assert_eq!(values, ["1.0", "-2.5e3", "nan"]);
    }

    #[test]
    fn test_load_names_bad_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1.0").unwrap();
        writeln!(file, "abc").unwrap();

        match load_inputs(file.path()) {
            Err(InputError::Malformed { line, value, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("expected malformed line, got {other:?}"),
        }
    }

    #[test]
    fn test_file_takes_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "3.25").unwrap();
        let config = InputConfig {
            file: Some(file.path().to_path_buf()),
            ..InputConfig::default()
        };
        assert_eq!(resolve_inputs(&config).unwrap(), ["3.25"]);
    }

    #[test]
    fn test_missing_file() {
        let err = load_inputs(Path::new("/nonexistent/mbench-inputs.txt")).unwrap_err();
        assert!(matches!(err, InputError::Read { .. }));
    }
}
