//! One-sided z-score test.

use crate::stats;

/// Sample z-score of every value.
///
/// When the spread is zero or undefined (a single member, identical
/// values) every score is exactly 0.0.
pub fn scores(values: &[f64]) -> Vec<f64> {
    let spread = match (stats::mean(values), stats::sample_std_dev(values), stats::min_max(values)) {
        (Some(mean), Some(std), Some((min, max))) if max > min && std > 0.0 => Some((mean, std)),
        _ => None,
    };
    match spread {
        Some((mean, std)) => values.iter().map(|v| (v - mean) / std).collect(),
        None => vec![0.0; values.len()],
    }
}

/// High-side outlier: strictly above the threshold.
pub fn is_outlier(z: f64, threshold: f64) -> bool {
    z > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_values_score_zero() {
        assert_eq!(scores(&[5.0, 5.0, 5.0]), vec![0.0, 0.0, 0.0]);
        assert_eq!(scores(&[7.0]), vec![0.0]);
    }

    #[test]
    fn test_extreme_value_flagged() {
        let values = [2.0, 5.0, 8.0, 10.0, 12.0, 15.0, 18.0, 22.0, 28.0, 50.0];
        let z = scores(&values);
        // mean 17, sample std 14
        assert!((z[9] - 33.0 / 14.0).abs() < 1e-10);
        assert!(is_outlier(z[9], 2.0));
        assert!(!is_outlier(z[8], 2.0));
    }

    #[test]
    fn test_low_side_never_flagged() {
        let values = [100.0, 100.0, 100.0, 100.0, 100.0, 1.0];
        let z = scores(&values);
        assert!(z[5] < -2.0);
        assert!(!is_outlier(z[5], 2.0));
    }
}
