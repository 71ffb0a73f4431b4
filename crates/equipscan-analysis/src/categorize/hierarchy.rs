//! Category volume and consistency summaries.

use equipscan_core::types::{EquipmentId, FxHashMap, FxHashSet};

use super::types::{CategorizedRecord, CategoryVolume, ConsistencyDistribution, PrimaryCategoryAssignment};

/// Distinct equipment and work-order counts per normalized category,
/// largest first. Equal volumes order by category name.
pub fn category_hierarchy(records: &[CategorizedRecord<'_>]) -> Vec<CategoryVolume> {
    let mut groups: FxHashMap<&str, (FxHashSet<&EquipmentId>, usize)> = FxHashMap::default();
    for r in records {
        let entry = groups.entry(r.category.as_str()).or_default();
        entry.0.insert(&r.record.equipment_id);
        entry.1 += 1;
    }

    let mut hierarchy: Vec<CategoryVolume> = groups
        .into_iter()
        .map(|(category, (equipment, work_orders))| CategoryVolume {
            category: category.to_string(),
            equipment_count: equipment.len(),
            work_order_count: work_orders,
        })
        .collect();
    hierarchy.sort_by(|a, b| {
        b.work_order_count
            .cmp(&a.work_order_count)
            .then_with(|| a.category.cmp(&b.category))
    });
    hierarchy
}

/// Bucket equipment by consistency score.
pub fn consistency_distribution(assignments: &[PrimaryCategoryAssignment]) -> ConsistencyDistribution {
    let mut dist = ConsistencyDistribution::default();
    for a in assignments {
        match a.consistency_score {
            s if s <= 50.0 => dist.up_to_50 += 1,
            s if s <= 80.0 => dist.up_to_80 += 1,
            s if s <= 90.0 => dist.up_to_90 += 1,
            _ => dist.up_to_100 += 1,
        }
    }
    dist
}

/// Equipment whose consistency is strictly below `threshold`, in assignment order.
pub fn low_consistency_equipment(
    assignments: &[PrimaryCategoryAssignment],
    threshold: f64,
) -> Vec<EquipmentId> {
    assignments
        .iter()
        .filter(|a| a.consistency_score < threshold)
        .map(|a| a.equipment_id.clone())
        .collect()
}
