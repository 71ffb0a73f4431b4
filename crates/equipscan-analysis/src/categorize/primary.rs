//! Primary-category assignment: one mode category per equipment.

use equipscan_core::types::{BTreeMap, EquipmentId, FxHashMap};

use super::types::{AssignedRecord, CategorizedRecord, PrimaryCategoryAssignment};

/// Records joined with their primary category, plus one assignment per equipment.
#[derive(Debug, Clone)]
pub struct PrimaryAssignment<'a> {
    pub records: Vec<AssignedRecord<'a>>,
    /// Sorted by equipment identity.
    pub assignments: Vec<PrimaryCategoryAssignment>,
}

/// Group records by equipment, pick each group's mode category, and
/// broadcast the result back onto every record of the group.
pub fn assign_primary_categories(records: Vec<CategorizedRecord<'_>>) -> PrimaryAssignment<'_> {
    let (assignments, assignment_of_record) = {
        let mut groups: BTreeMap<&EquipmentId, Vec<usize>> = BTreeMap::new();
        for (idx, r) in records.iter().enumerate() {
            groups.entry(&r.record.equipment_id).or_default().push(idx);
        }

        let mut assignments = Vec::with_capacity(groups.len());
        let mut assignment_of_record = vec![0usize; records.len()];
        for (equipment_id, members) in groups {
            let categories: Vec<&str> = members.iter().map(|&i| records[i].category.as_str()).collect();
            let tally = tally_categories(&categories);
            // `members` is non-empty, so the tally always has a head.
            let (primary, primary_count) = tally
                .first()
                .map(|t| (t.category, t.count))
                .unwrap_or(("", 0));

            for &i in &members {
                assignment_of_record[i] = assignments.len();
            }
            assignments.push(PrimaryCategoryAssignment {
                equipment_id: equipment_id.clone(),
                primary_category: primary.to_string(),
                consistency_score: primary_count as f64 / members.len() as f64 * 100.0,
                work_order_count: members.len(),
                distinct_categories: tally.len(),
            });
        }
        (assignments, assignment_of_record)
    };

    let records = records
        .into_iter()
        .zip(assignment_of_record)
        .map(|(r, a)| {
            let assignment = &assignments[a];
            AssignedRecord {
                record: r.record,
                category: r.category,
                subcategory: r.subcategory,
                primary_category: assignment.primary_category.clone(),
                consistency_score: assignment.consistency_score,
            }
        })
        .collect();

    PrimaryAssignment { records, assignments }
}

/// One candidate category within an equipment's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CategoryTally<'c> {
    category: &'c str,
    count: usize,
    first_seen: usize,
}

/// Count each category and order candidates by (count desc, first_seen asc).
///
/// Equal counts go to the category seen first in input order. That
/// tie-break is deliberate and arbitrary.
fn tally_categories<'c>(categories: &[&'c str]) -> Vec<CategoryTally<'c>> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut tally: Vec<CategoryTally<'c>> = Vec::new();
    for (pos, &category) in categories.iter().enumerate() {
        match index.get(category) {
            Some(&slot) => tally[slot].count += 1,
            None => {
                index.insert(category, tally.len());
                tally.push(CategoryTally {
                    category,
                    count: 1,
                    first_seen: pos,
                });
            }
        }
    }
    tally.sort_by(|a, b| b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen)));
    tally
}
