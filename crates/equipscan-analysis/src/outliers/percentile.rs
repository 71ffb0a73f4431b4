//! Percentile-rank test.

use crate::stats;

/// Rank of every value within its group on a 0-100 scale; ties share
/// their average rank.
pub fn ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    stats::average_ranks(values)
        .into_iter()
        .map(|r| r * 100.0 / n)
        .collect()
}

/// Flag ranks strictly above `threshold`.
///
/// A lone member always ranks 100 but has no peers to stand out from,
/// so groups of fewer than two are never flagged.
pub fn detect(ranks: &[f64], threshold: f64) -> Vec<bool> {
    if ranks.len() < 2 {
        return vec![false; ranks.len()];
    }
    ranks.iter().map(|&r| r > threshold).collect()
}
