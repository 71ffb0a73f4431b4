//! Frequency profile and baseline types.

use equipscan_core::types::EquipmentId;
use serde::Serialize;

/// Work-order rate and cost metrics for one (equipment, primary category).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentFrequencyProfile {
    pub equipment_id: EquipmentId,
    pub primary_category: String,
    /// Always at least 1.
    pub total_work_orders: usize,
    /// Inclusive day count between earliest and latest creation, at least 1.
    pub timespan_days: i64,
    pub work_orders_per_month: f64,
    /// Mean whole-day turnaround over records with both timestamps.
    pub avg_completion_days: Option<f64>,
    /// Mean of strictly positive costs.
    pub avg_cost: Option<f64>,
}

/// Distribution of `work_orders_per_month` within one primary category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBaseline {
    pub category: String,
    pub equipment_count: usize,
    pub total_work_orders: usize,
    pub mean_frequency: f64,
    pub median_frequency: f64,
    /// Sample standard deviation; absent for a single-member category.
    pub std_frequency: Option<f64>,
    pub min_frequency: f64,
    pub max_frequency: f64,
}
