//! Frequency analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DAYS_PER_MONTH;

/// Configuration for per-equipment rate computation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FrequencyConfig {
    /// Days per month used to turn a daily rate into a monthly one. Default: 30.44.
    pub days_per_month: Option<f64>,
}

impl FrequencyConfig {
    /// Returns the effective month length, defaulting to 30.44.
    pub fn effective_days_per_month(&self) -> f64 {
        self.days_per_month.unwrap_or(DEFAULT_DAYS_PER_MONTH)
    }
}
