//! Threshold recommendations from ranked equipment.

use super::types::{RankedEquipment, Thresholds};
use crate::stats;

const NO_DATA_RATIONALE: &str =
    "No consensus outliers found - insufficient data for threshold recommendations";

/// Median rate and median cost impact of the ranked set, reported with the
/// percentile cutoff that produced it. An empty set yields zeros.
pub fn identify_thresholds(ranked: &[RankedEquipment], percentile_threshold: f64) -> Thresholds {
    let rates: Vec<f64> = ranked.iter().map(|r| r.profile.work_orders_per_month).collect();
    let costs: Vec<f64> = ranked.iter().map(|r| r.cost_impact).collect();

    match (stats::median(&rates), stats::median(&costs)) {
        (Some(frequency_threshold), Some(cost_threshold)) => Thresholds {
            frequency_threshold,
            cost_threshold,
            percentile_threshold,
            rationale: format!(
                "Equipment exceeding {frequency_threshold:.2} work orders/month or ${} cost impact in their category warrant review",
                group_thousands(cost_threshold)
            ),
        },
        _ => Thresholds {
            frequency_threshold: 0.0,
            cost_threshold: 0.0,
            percentile_threshold,
            rationale: NO_DATA_RATIONALE.to_string(),
        },
    }
}

/// Whole-number rendering with comma thousands separators.
fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1500.0), "1,500");
        assert_eq!(group_thousands(1234567.4), "1,234,567");
        assert_eq!(group_thousands(-2500.0), "-2,500");
    }

    #[test]
    fn test_empty_input_reports_zeros() {
        let t = identify_thresholds(&[], 90.0);
        assert_eq!(t.frequency_threshold, 0.0);
        assert_eq!(t.cost_threshold, 0.0);
        assert_eq!(t.percentile_threshold, 90.0);
        assert_eq!(t.rationale, NO_DATA_RATIONALE);
    }
}
