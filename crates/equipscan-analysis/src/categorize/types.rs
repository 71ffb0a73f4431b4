//! Core types for categorization.

use equipscan_core::types::{EquipmentId, WorkOrderRecord};
use serde::Serialize;

/// A work order with its normalized category and subcategory.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedRecord<'a> {
    pub record: &'a WorkOrderRecord,
    pub category: String,
    pub subcategory: String,
}

/// A categorized work order joined with its equipment's primary category.
///
/// Every record of one equipment carries the same `primary_category` and
/// `consistency_score`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedRecord<'a> {
    pub record: &'a WorkOrderRecord,
    pub category: String,
    pub subcategory: String,
    pub primary_category: String,
    pub consistency_score: f64,
}

impl AssignedRecord<'_> {
    pub fn equipment_id(&self) -> &EquipmentId {
        &self.record.equipment_id
    }
}

/// Primary category of one equipment and how consistently it was used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimaryCategoryAssignment {
    pub equipment_id: EquipmentId,
    pub primary_category: String,
    /// Percentage (0-100) of the equipment's work orders in `primary_category`.
    pub consistency_score: f64,
    pub work_order_count: usize,
    pub distinct_categories: usize,
}

/// Work-order volume of one normalized category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryVolume {
    pub category: String,
    pub equipment_count: usize,
    pub work_order_count: usize,
}

/// Equipment counts per consistency band. Bands are right-inclusive:
/// a score of exactly 80 lands in `up_to_80`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyDistribution {
    pub up_to_50: usize,
    pub up_to_80: usize,
    pub up_to_90: usize,
    pub up_to_100: usize,
}

impl ConsistencyDistribution {
    pub fn total(&self) -> usize {
        self.up_to_50 + self.up_to_80 + self.up_to_90 + self.up_to_100
    }
}

/// Full categorizer output.
#[derive(Debug, Clone)]
pub struct Categorization<'a> {
    pub records: Vec<AssignedRecord<'a>>,
    pub assignments: Vec<PrimaryCategoryAssignment>,
    pub hierarchy: Vec<CategoryVolume>,
    pub distribution: ConsistencyDistribution,
    /// Equipment whose consistency falls below the configured threshold.
    pub low_consistency: Vec<EquipmentId>,
    /// Work orders that resolved to the terminal "Uncategorized" label.
    pub uncategorized_records: usize,
}
