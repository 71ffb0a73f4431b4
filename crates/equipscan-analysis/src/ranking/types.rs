//! Core types for equipment ranking.

use equipscan_core::config::ScoringConfig;
use equipscan_core::constants::{
    DEFAULT_COST_WEIGHT, DEFAULT_FREQUENCY_WEIGHT, DEFAULT_LANDSCAPE_COST_WEIGHT,
    DEFAULT_LANDSCAPE_FREQUENCY_WEIGHT, DEFAULT_OUTLIER_WEIGHT, DEFAULT_PERCENTILE_THRESHOLD,
    DEGENERATE_SCORE, WEIGHT_SUM_TOLERANCE,
};
use equipscan_core::errors::ConfigError;
use serde::Serialize;

use crate::frequency::EquipmentFrequencyProfile;
use crate::outliers::OutlierFlags;

/// Priority weights for the action list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriorityWeights {
    pub frequency: f64,
    pub cost: f64,
    pub outlier: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY_WEIGHT,
            cost: DEFAULT_COST_WEIGHT,
            outlier: DEFAULT_OUTLIER_WEIGHT,
        }
    }
}

/// Priority weights for the full landscape, which has no outlier term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LandscapeWeights {
    pub frequency: f64,
    pub cost: f64,
}

impl Default for LandscapeWeights {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_LANDSCAPE_FREQUENCY_WEIGHT,
            cost: DEFAULT_LANDSCAPE_COST_WEIGHT,
        }
    }
}

/// Configuration for the equipment ranker.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    pub weights: PriorityWeights,
    pub landscape_weights: LandscapeWeights,
    /// Score given to every member of a category with no spread.
    pub degenerate_score: f64,
    /// Keep only consensus outliers in the action list.
    pub consensus_only: bool,
    pub excluded_categories: Vec<String>,
    /// Percentile cutoff reported with threshold recommendations.
    pub percentile_threshold: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: PriorityWeights::default(),
            landscape_weights: LandscapeWeights::default(),
            degenerate_score: DEGENERATE_SCORE,
            consensus_only: true,
            excluded_categories: Vec::new(),
            percentile_threshold: DEFAULT_PERCENTILE_THRESHOLD,
        }
    }
}

impl RankingConfig {
    /// Each weight in [0, 1], each weight set summing to 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = self.weights;
        check_weights("ranking.weights", &[w.frequency, w.cost, w.outlier])?;
        let l = self.landscape_weights;
        check_weights("ranking.landscape_weights", &[l.frequency, l.cost])?;
        if !(0.0..=1.0).contains(&self.degenerate_score) {
            return Err(ConfigError::ValidationFailed {
                field: "ranking.degenerate_score".to_string(),
                message: "must be within [0, 1]".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_excluded_categories(mut self, categories: Vec<String>) -> Self {
        self.excluded_categories = categories;
        self
    }

    pub fn with_consensus_only(mut self, consensus_only: bool) -> Self {
        self.consensus_only = consensus_only;
        self
    }
}

fn check_weights(field: &str, weights: &[f64]) -> Result<(), ConfigError> {
    if weights.iter().any(|w| !(0.0..=1.0).contains(w)) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "each weight must be within [0, 1]".to_string(),
        });
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("weights must sum to 1, got {sum}"),
        });
    }
    Ok(())
}

impl TryFrom<&ScoringConfig> for RankingConfig {
    type Error = ConfigError;

    fn try_from(config: &ScoringConfig) -> Result<Self, Self::Error> {
        let (frequency, cost, outlier) = config.effective_weights();
        let (landscape_frequency, landscape_cost) = config.effective_landscape_weights();
        let ranking = Self {
            weights: PriorityWeights {
                frequency,
                cost,
                outlier,
            },
            landscape_weights: LandscapeWeights {
                frequency: landscape_frequency,
                cost: landscape_cost,
            },
            consensus_only: config.effective_consensus_only(),
            excluded_categories: config.effective_excluded_categories().to_vec(),
            ..Self::default()
        };
        ranking.validate()?;
        Ok(ranking)
    }
}

/// One equipment's place in a priority ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEquipment {
    #[serde(flatten)]
    pub profile: EquipmentFrequencyProfile,
    /// Absent in the full-landscape ranking.
    #[serde(flatten)]
    pub flags: Option<OutlierFlags>,
    /// `total_work_orders × avg_cost`, 0 when no positive cost exists.
    pub cost_impact: f64,
    pub freq_score: f64,
    pub cost_score: f64,
    /// Absent in the full-landscape ranking.
    pub outlier_score: Option<f64>,
    pub priority_score: f64,
    pub overall_rank: usize,
    pub category_rank: usize,
}

impl RankedEquipment {
    pub fn is_consensus_outlier(&self) -> bool {
        self.flags.as_ref().is_some_and(|f| f.is_outlier_consensus)
    }
}

/// Threshold recommendation derived from the action list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thresholds {
    pub frequency_threshold: f64,
    pub cost_threshold: f64,
    pub percentile_threshold: f64,
    pub rationale: String,
}
