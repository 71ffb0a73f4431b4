//! Tukey upper fence (Q3 + k × IQR).
//!
//! Robust to skew: the quartiles come from the middle of the distribution,
//! so a single extreme value cannot hide itself by inflating the fence.

use crate::stats;

/// Upper fence of `values`. `None` for an empty slice.
pub fn upper_fence(values: &[f64], multiplier: f64) -> Option<f64> {
    let sorted = stats::sorted(values);
    let q1 = stats::percentile_of_sorted(&sorted, 25.0)?;
    let q3 = stats::percentile_of_sorted(&sorted, 75.0)?;
    Some(q3 + multiplier * (q3 - q1))
}

/// Flag every value strictly above the upper fence.
pub fn detect(values: &[f64], multiplier: f64) -> Vec<bool> {
    match upper_fence(values, multiplier) {
        Some(fence) => values.iter().map(|&v| v > fence).collect(),
        None => Vec::new(),
    }
}
