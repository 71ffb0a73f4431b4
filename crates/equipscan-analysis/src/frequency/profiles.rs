//! Per-equipment rate and cost profiles.

use equipscan_core::types::{BTreeMap, EquipmentId};

use super::types::EquipmentFrequencyProfile;
use crate::categorize::AssignedRecord;
use crate::stats;

/// Build one profile per (equipment, primary category), ordered by
/// equipment identity then category.
pub fn compute_frequencies(
    records: &[AssignedRecord<'_>],
    days_per_month: f64,
) -> Vec<EquipmentFrequencyProfile> {
    let mut groups: BTreeMap<(&EquipmentId, &str), Vec<&AssignedRecord<'_>>> = BTreeMap::new();
    for r in records {
        groups
            .entry((r.equipment_id(), r.primary_category.as_str()))
            .or_default()
            .push(r);
    }

    groups
        .into_iter()
        .map(|((equipment_id, category), members)| {
            build_profile(equipment_id, category, &members, days_per_month)
        })
        .collect()
}

fn build_profile(
    equipment_id: &EquipmentId,
    category: &str,
    members: &[&AssignedRecord<'_>],
    days_per_month: f64,
) -> EquipmentFrequencyProfile {
    let total_work_orders = members.len();
    let timespan_days = timespan_days(members);
    let work_orders_per_month = total_work_orders as f64 / timespan_days as f64 * days_per_month;

    let completion: Vec<f64> = members
        .iter()
        .filter_map(|r| r.record.completion_days())
        .map(|d| d as f64)
        .collect();
    let positive_costs: Vec<f64> = members
        .iter()
        .map(|r| r.record.cost)
        .filter(|&c| c > 0.0)
        .collect();

    EquipmentFrequencyProfile {
        equipment_id: equipment_id.clone(),
        primary_category: category.to_string(),
        total_work_orders,
        timespan_days,
        work_orders_per_month,
        avg_completion_days: stats::mean(&completion),
        avg_cost: stats::mean(&positive_costs),
    }
}

/// Whole days between the earliest and latest creation, plus one, never below 1.
fn timespan_days(members: &[&AssignedRecord<'_>]) -> i64 {
    let first = members.iter().map(|r| r.record.created_at).min();
    let last = members.iter().map(|r| r.record.created_at).max();
    match (first, last) {
        (Some(first), Some(last)) => ((last - first).num_days() + 1).max(1),
        _ => 1,
    }
}
