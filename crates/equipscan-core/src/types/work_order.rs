//! Cleaned work-order records, as handed over by the cleaning stage.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::identifiers::EquipmentId;

/// Raw classification fields from the source system. Each hierarchy is
/// independently optional; the categorizer resolves them through fallback chains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawClassification {
    /// Service type, second level of the service hierarchy.
    pub service_type_lv2: Option<String>,
    /// Service type, third (most granular) level.
    pub service_type_lv3: Option<String>,
    /// Facility-management type, an independent classification scheme.
    pub fm_type: Option<String>,
}

/// One maintenance work order after cleaning.
///
/// Equipment identity and creation timestamp are always present; the
/// cleaning stage drops or repairs rows that lack them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderRecord {
    pub equipment_id: EquipmentId,
    #[serde(default)]
    pub classification: RawClassification,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    /// Monetary cost. Zero is valid and means "no recorded spend".
    pub cost: f64,
}

impl WorkOrderRecord {
    pub fn new(equipment_id: impl Into<EquipmentId>, created_at: NaiveDateTime, cost: f64) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            classification: RawClassification::default(),
            created_at,
            completed_at: None,
            cost,
        }
    }

    pub fn with_classification(mut self, classification: RawClassification) -> Self {
        self.classification = classification;
        self
    }

    pub fn with_completed_at(mut self, completed_at: NaiveDateTime) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Whole days between creation and completion, floored like a calendar
    /// day count. `None` when the work order has no completion timestamp.
    pub fn completion_days(&self) -> Option<i64> {
        self.completed_at
            .map(|done| (done - self.created_at).num_seconds().div_euclid(86_400))
    }
}
