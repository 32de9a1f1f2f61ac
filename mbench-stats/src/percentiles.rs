//! Percentile Computation
//!
//! Linear interpolation between nearest ranks, over whatever the caller
//! passes in (the aggregator hands it the slot minima).

/// Compute a single percentile (0..=100) from samples
///
/// Empty input yields 0.
///
/// # Examples
///
/// ```
/// # use mbench_stats::compute_percentile;
/// let minima = vec![12.0, 10.0, 11.0, 40.0];
/// assert_eq!(compute_percentile(&minima, 0.0), 10.0);
/// assert_eq!(compute_percentile(&minima, 100.0), 40.0);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    match samples {
        [] => 0.0,
        [only] => *only,
        _ => {
            let mut sorted = samples.to_vec();
            sorted.sort_by(f64::total_cmp);

            let last = sorted.len() - 1;
            let rank = (percentile.clamp(0.0, 100.0) / 100.0) * last as f64;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(last);
            let fraction = rank - lower as f64;

            sorted[lower] + fraction * (sorted[upper] - sorted[lower])
        }
    }
}

/// Median (50th percentile)
pub fn compute_median(samples: &[f64]) -> f64 {
    compute_percentile(samples, 50.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert!((compute_median(&[5.0, 1.0, 3.0]) - 3.0).abs() < f64::EPSILON);
        assert!((compute_median(&[4.0, 1.0, 3.0, 2.0]) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_quartiles_interpolate() {
        let samples: Vec<f64> = (1..=5).map(f64::from).collect();
        assert!((compute_percentile(&samples, 25.0) - 2.0).abs() < f64::EPSILON);
        assert!((compute_percentile(&samples, 90.0) - 4.6).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_percentile_is_clamped() {
        let samples = vec![1.0, 2.0, 3.0];
        assert_eq!(compute_percentile(&samples, 150.0), 3.0);
        assert_eq!(compute_percentile(&samples, -5.0), 1.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(compute_percentile(&[], 50.0), 0.0);
        assert_eq!(compute_percentile(&[42.0], 99.0), 42.0);
    }
}
