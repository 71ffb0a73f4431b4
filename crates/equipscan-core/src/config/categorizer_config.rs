//! Categorizer configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LOW_CONSISTENCY_THRESHOLD;

/// Configuration for category normalization and primary-category assignment.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CategorizerConfig {
    /// Consistency (%) below which equipment is reported as potentially
    /// miscategorized. Default: 80.0.
    pub low_consistency_threshold: Option<f64>,
}

impl CategorizerConfig {
    /// Returns the effective low-consistency threshold, defaulting to 80.0.
    pub fn effective_low_consistency_threshold(&self) -> f64 {
        self.low_consistency_threshold
            .unwrap_or(DEFAULT_LOW_CONSISTENCY_THRESHOLD)
    }
}
