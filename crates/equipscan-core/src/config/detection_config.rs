//! Outlier detection configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONSENSUS_MIN_VOTES, DEFAULT_IQR_MULTIPLIER, DEFAULT_PERCENTILE_THRESHOLD,
    DEFAULT_Z_THRESHOLD, OUTLIER_METHOD_NAMES,
};

/// Configuration for the outlier detection subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectionConfig {
    /// One-sided z-score threshold. Default: 2.0.
    pub z_threshold: Option<f64>,
    /// Tukey upper-fence multiplier. Default: 1.5.
    pub iqr_multiplier: Option<f64>,
    /// Percentile-rank cutoff on a 0-100 scale. Default: 90.
    pub percentile_threshold: Option<f64>,
    /// Number of agreeing methods required for consensus. Default: 2.
    pub consensus_min_votes: Option<u8>,
    /// Enabled methods (`zscore`, `iqr`, `percentile`). Unset or empty means all.
    pub methods: Option<Vec<String>>,
    /// Categories removed before partitioning. Default: none.
    pub excluded_categories: Option<Vec<String>>,
}

impl DetectionConfig {
    /// Returns the effective z-score threshold, defaulting to 2.0.
    pub fn effective_z_threshold(&self) -> f64 {
        self.z_threshold.unwrap_or(DEFAULT_Z_THRESHOLD)
    }

    /// Returns the effective IQR multiplier, defaulting to 1.5.
    pub fn effective_iqr_multiplier(&self) -> f64 {
        self.iqr_multiplier.unwrap_or(DEFAULT_IQR_MULTIPLIER)
    }

    /// Returns the effective percentile cutoff, defaulting to 90.
    pub fn effective_percentile_threshold(&self) -> f64 {
        self.percentile_threshold
            .unwrap_or(DEFAULT_PERCENTILE_THRESHOLD)
    }

    /// Returns the effective consensus vote count, defaulting to 2.
    pub fn effective_consensus_min_votes(&self) -> u8 {
        self.consensus_min_votes
            .unwrap_or(DEFAULT_CONSENSUS_MIN_VOTES)
    }

    /// Returns the enabled method names; all three when none are listed.
    pub fn effective_methods(&self) -> Vec<String> {
        match &self.methods {
            Some(methods) if !methods.is_empty() => methods.clone(),
            _ => OUTLIER_METHOD_NAMES.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Returns the excluded categories, empty when unset.
    pub fn effective_excluded_categories(&self) -> &[String] {
        self.excluded_categories.as_deref().unwrap_or_default()
    }
}
