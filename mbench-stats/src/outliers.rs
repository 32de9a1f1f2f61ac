//! Outlier Detection
//!
//! IQR rule over slot minima. A slot whose minimum sits far above its
//! neighbours usually means the input pair hit a slow path (or the pass
//! never got a clean run for it); such slots are counted, never dropped.

use crate::percentiles::compute_percentile;

/// Method for outlier detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierMethod {
    /// Outliers are outside [Q1 - k*IQR, Q3 + k*IQR]
    Iqr {
        /// Multiplier for IQR (multiplied by 0.5, so k=3 means 1.5*IQR)
        k: u32,
    },
    /// No outlier detection
    None,
}

impl Default for OutlierMethod {
    fn default() -> Self {
        OutlierMethod::Iqr { k: 3 }
    }
}

/// Result of outlier analysis
#[derive(Debug, Clone, Default)]
pub struct OutlierAnalysis {
    /// Indices of outlier samples, in input order
    pub outlier_indices: Vec<usize>,
    /// Number of samples below the lower bound
    pub low_outlier_count: usize,
    /// Number of samples above the upper bound
    pub high_outlier_count: usize,
    /// Lower bound used for detection
    pub lower_bound: f64,
    /// Upper bound used for detection
    pub upper_bound: f64,
}

impl OutlierAnalysis {
    /// Total number of outliers
    pub fn count(&self) -> usize {
        self.outlier_indices.len()
    }
}

/// Detect outliers in samples using the given method
///
/// # Examples
///
/// ```
/// # use mbench_stats::{detect_outliers, OutlierMethod};
/// let minima = vec![10.0, 11.0, 10.0, 12.0, 95.0];
/// let analysis = detect_outliers(&minima, OutlierMethod::default());
/// assert_eq!(analysis.outlier_indices, vec![4]);
/// ```
pub fn detect_outliers(samples: &[f64], method: OutlierMethod) -> OutlierAnalysis {
    let k = match method {
        OutlierMethod::Iqr { k } if !samples.is_empty() => k as f64 * 0.5,
        _ => {
            return OutlierAnalysis {
                lower_bound: f64::NEG_INFINITY,
                upper_bound: f64::INFINITY,
                ..OutlierAnalysis::default()
            };
        }
    };

    let q1 = compute_percentile(samples, 25.0);
    let q3 = compute_percentile(samples, 75.0);
    let iqr = q3 - q1;
    let lower_bound = q1 - k * iqr;
    let upper_bound = q3 + k * iqr;

    let mut analysis = OutlierAnalysis {
        lower_bound,
        upper_bound,
        ..OutlierAnalysis::default()
    };
    for (i, &sample) in samples.iter().enumerate() {
        if sample < lower_bound {
            analysis.outlier_indices.push(i);
            analysis.low_outlier_count += 1;
        } else if sample > upper_bound {
            analysis.outlier_indices.push(i);
            analysis.high_outlier_count += 1;
        }
    }
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_minima_have_no_outliers() {
        let result = detect_outliers(&[20.0, 21.0, 22.0, 23.0, 24.0], OutlierMethod::default());
        assert_eq!(result.count(), 0);
    }

    #[test]
    fn test_high_and_low_outliers() {
        let samples = vec![1.0, 50.0, 51.0, 52.0, 53.0, 54.0, 500.0];
        let result = detect_outliers(&samples, OutlierMethod::default());
        assert_eq!(result.low_outlier_count, 1);
        assert_eq!(result.high_outlier_count, 1);
        assert_eq!(result.outlier_indices, vec![0, 6]);
    }

    #[test]
    fn test_wider_fence_accepts_more() {
        let samples = vec![10.0, 11.0, 12.0, 13.0, 30.0];
        assert_eq!(detect_outliers(&samples, OutlierMethod::Iqr { k: 3 }).count(), 1);
        assert_eq!(detect_outliers(&samples, OutlierMethod::Iqr { k: 20 }).count(), 0);
    }

    #[test]
    fn test_disabled_and_empty() {
        assert_eq!(detect_outliers(&[1.0, 1000.0], OutlierMethod::None).count(), 0);
        let empty = detect_outliers(&[], OutlierMethod::default());
        assert_eq!(empty.count(), 0);
        assert_eq!(empty.upper_bound, f64::INFINITY);
    }
}
