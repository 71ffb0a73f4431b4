//! Descriptive statistics shared by the frequency, outlier, and ranking stages.
//!
//! Moments come from `statrs`; order statistics use linear interpolation
//! between closest ranks.

use statrs::statistics::Statistics;

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().mean())
}

/// Sample standard deviation (n - 1 denominator).
///
/// `None` when fewer than two values exist. Undefined spread stays distinct
/// from a spread of 0.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let std = values.iter().std_dev();
    std.is_finite().then_some(std)
}

/// Smallest and largest value. `None` for an empty slice.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

/// Ascending copy of `values`.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Percentile of pre-sorted data using linear interpolation (`p` in 0..=100).
pub fn percentile_of_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    match sorted.len() {
        0 => None,
        1 => Some(sorted[0]),
        n => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let frac = rank - lower as f64;
            Some(sorted[lower] * (1.0 - frac) + sorted[upper] * frac)
        }
    }
}

/// Median with interpolation between the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    percentile_of_sorted(&sorted(values), 50.0)
}

/// 1-based ranks where tied values share the mean of the positions they span.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start+1 ..= end share their average.
        let shared = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = shared;
        }
        start = end;
    }
    ranks
}

/// Min-max scale into [0, 1]. When every value is equal there is no signal
/// to scale, so every member gets `degenerate` instead. A span too wide to
/// represent is treated the same way.
pub fn min_max_normalize(values: &[f64], degenerate: f64) -> Vec<f64> {
    let Some((min, max)) = min_max(values) else {
        return Vec::new();
    };
    let span = max - min;
    if span > 0.0 && span.is_finite() {
        values.iter().map(|v| ((v - min) / span).clamp(0.0, 1.0)).collect()
    } else {
        vec![degenerate; values.len()]
    }
}
