//! Frequency Analyzer: work-order rate and cost per equipment, and
//! per-category baselines of that rate.

pub mod baseline;
pub mod profiles;
pub mod types;

pub use baseline::compute_category_baseline;
pub use profiles::compute_frequencies;
pub use types::{CategoryBaseline, EquipmentFrequencyProfile};

use equipscan_core::config::FrequencyConfig;
use equipscan_core::constants::DEFAULT_DAYS_PER_MONTH;

use crate::categorize::AssignedRecord;

/// Turns assigned work orders into frequency profiles.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyAnalyzer {
    days_per_month: f64,
}

impl FrequencyAnalyzer {
    pub fn new(config: &FrequencyConfig) -> Self {
        Self {
            days_per_month: config.effective_days_per_month(),
        }
    }

    pub fn with_defaults() -> Self {
        Self {
            days_per_month: DEFAULT_DAYS_PER_MONTH,
        }
    }

    pub fn days_per_month(&self) -> f64 {
        self.days_per_month
    }

    pub fn compute_frequencies(&self, records: &[AssignedRecord<'_>]) -> Vec<EquipmentFrequencyProfile> {
        let profiles = compute_frequencies(records, self.days_per_month);
        tracing::info!(
            profiles = profiles.len(),
            records = records.len(),
            "frequency profiles computed"
        );
        profiles
    }

    pub fn compute_category_baseline(&self, profiles: &[EquipmentFrequencyProfile]) -> Vec<CategoryBaseline> {
        let baselines = compute_category_baseline(profiles);
        tracing::info!(categories = baselines.len(), "category baselines computed");
        baselines
    }
}

impl Default for FrequencyAnalyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}
