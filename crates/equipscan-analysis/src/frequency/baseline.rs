//! Category-level baselines of work-order rate.

use equipscan_core::types::BTreeMap;

use super::types::{CategoryBaseline, EquipmentFrequencyProfile};
use crate::stats;

/// One baseline per primary category, ordered by category name.
pub fn compute_category_baseline(profiles: &[EquipmentFrequencyProfile]) -> Vec<CategoryBaseline> {
    let mut groups: BTreeMap<&str, Vec<&EquipmentFrequencyProfile>> = BTreeMap::new();
    for p in profiles {
        groups.entry(p.primary_category.as_str()).or_default().push(p);
    }

    groups
        .into_iter()
        .filter_map(|(category, members)| {
            let rates: Vec<f64> = members.iter().map(|p| p.work_orders_per_month).collect();
            let (min_frequency, max_frequency) = stats::min_max(&rates)?;
            Some(CategoryBaseline {
                category: category.to_string(),
                equipment_count: members.len(),
                total_work_orders: members.iter().map(|p| p.total_work_orders).sum(),
                mean_frequency: stats::mean(&rates)?,
                median_frequency: stats::median(&rates)?,
                std_frequency: stats::sample_std_dev(&rates),
                min_frequency,
                max_frequency,
            })
        })
        .collect()
}
