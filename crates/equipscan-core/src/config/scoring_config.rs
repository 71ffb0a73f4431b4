//! Priority scoring and ranking configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COST_WEIGHT, DEFAULT_FREQUENCY_WEIGHT, DEFAULT_LANDSCAPE_COST_WEIGHT,
    DEFAULT_LANDSCAPE_FREQUENCY_WEIGHT, DEFAULT_OUTLIER_WEIGHT,
};

/// Configuration for the equipment ranker.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Priority weight of the frequency score. Default: 0.4.
    pub frequency_weight: Option<f64>,
    /// Priority weight of the cost score. Default: 0.4.
    pub cost_weight: Option<f64>,
    /// Priority weight of the outlier score. Default: 0.2.
    pub outlier_weight: Option<f64>,
    /// Full-landscape weight of the frequency score. Default: 0.5.
    pub landscape_frequency_weight: Option<f64>,
    /// Full-landscape weight of the cost score. Default: 0.5.
    pub landscape_cost_weight: Option<f64>,
    /// Keep only consensus outliers in the action list. Default: true.
    pub consensus_only: Option<bool>,
    /// Categories removed before scoring. Default: none.
    pub excluded_categories: Option<Vec<String>>,
}

impl ScoringConfig {
    /// Returns the effective (frequency, cost, outlier) weights.
    pub fn effective_weights(&self) -> (f64, f64, f64) {
        (
            self.frequency_weight.unwrap_or(DEFAULT_FREQUENCY_WEIGHT),
            self.cost_weight.unwrap_or(DEFAULT_COST_WEIGHT),
            self.outlier_weight.unwrap_or(DEFAULT_OUTLIER_WEIGHT),
        )
    }

    /// Returns the effective full-landscape (frequency, cost) weights.
    pub fn effective_landscape_weights(&self) -> (f64, f64) {
        (
            self.landscape_frequency_weight
                .unwrap_or(DEFAULT_LANDSCAPE_FREQUENCY_WEIGHT),
            self.landscape_cost_weight
                .unwrap_or(DEFAULT_LANDSCAPE_COST_WEIGHT),
        )
    }

    /// Returns whether the action list is restricted to consensus outliers.
    pub fn effective_consensus_only(&self) -> bool {
        self.consensus_only.unwrap_or(true)
    }

    /// Returns the excluded categories, empty when unset.
    pub fn effective_excluded_categories(&self) -> &[String] {
        self.excluded_categories.as_deref().unwrap_or_default()
    }
}
