//! Core types for outlier detection.

use std::fmt;

use equipscan_core::config::DetectionConfig;
use equipscan_core::constants::{
    DEFAULT_CONSENSUS_MIN_VOTES, DEFAULT_IQR_MULTIPLIER, DEFAULT_PERCENTILE_THRESHOLD,
    DEFAULT_Z_THRESHOLD,
};
use equipscan_core::errors::ConfigError;
use serde::Serialize;

use crate::frequency::EquipmentFrequencyProfile;

/// Which statistical test produced a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierMethod {
    ZScore,
    Iqr,
    Percentile,
}

impl OutlierMethod {
    pub const ALL: [OutlierMethod; 3] = [Self::ZScore, Self::Iqr, Self::Percentile];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ZScore => "zscore",
            Self::Iqr => "iqr",
            Self::Percentile => "percentile",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for the outlier detector.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierConfig {
    /// One-sided z-score threshold.
    pub z_threshold: f64,
    /// Tukey fence multiplier.
    pub iqr_multiplier: f64,
    /// Percentile-rank cutoff, 0-100.
    pub percentile_threshold: f64,
    /// Flags needed for consensus.
    pub consensus_min_votes: u8,
    /// Enabled methods.
    pub methods: Vec<OutlierMethod>,
    /// Categories removed before partitioning.
    pub excluded_categories: Vec<String>,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            z_threshold: DEFAULT_Z_THRESHOLD,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            percentile_threshold: DEFAULT_PERCENTILE_THRESHOLD,
            consensus_min_votes: DEFAULT_CONSENSUS_MIN_VOTES,
            methods: OutlierMethod::ALL.to_vec(),
            excluded_categories: Vec::new(),
        }
    }
}

impl OutlierConfig {
    /// Votes in 1..=3, z threshold finite and positive, IQR multiplier
    /// finite and non-negative, percentile cutoff in [0, 100].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=3).contains(&self.consensus_min_votes) {
            return Err(invalid("outliers.consensus_min_votes", "must be between 1 and 3"));
        }
        if !(self.z_threshold.is_finite() && self.z_threshold > 0.0) {
            return Err(invalid("outliers.z_threshold", "must be a finite number greater than 0"));
        }
        if !(self.iqr_multiplier.is_finite() && self.iqr_multiplier >= 0.0) {
            return Err(invalid("outliers.iqr_multiplier", "must be a finite, non-negative number"));
        }
        if !(0.0..=100.0).contains(&self.percentile_threshold) {
            return Err(invalid("outliers.percentile_threshold", "must be within [0, 100]"));
        }
        Ok(())
    }

    pub fn is_enabled(&self, method: OutlierMethod) -> bool {
        self.methods.contains(&method)
    }

    pub fn with_excluded_categories(mut self, categories: Vec<String>) -> Self {
        self.excluded_categories = categories;
        self
    }

    pub fn with_methods(mut self, methods: Vec<OutlierMethod>) -> Self {
        self.methods = methods;
        self
    }
}

impl TryFrom<&DetectionConfig> for OutlierConfig {
    type Error = ConfigError;

    fn try_from(config: &DetectionConfig) -> Result<Self, Self::Error> {
        let methods = config
            .effective_methods()
            .iter()
            .map(|name| {
                OutlierMethod::from_name(name).ok_or_else(|| ConfigError::InvalidValue {
                    field: "detection.methods".to_string(),
                    message: format!("unknown method '{name}'"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let outliers = Self {
            z_threshold: config.effective_z_threshold(),
            iqr_multiplier: config.effective_iqr_multiplier(),
            percentile_threshold: config.effective_percentile_threshold(),
            consensus_min_votes: config.effective_consensus_min_votes(),
            methods,
            excluded_categories: config.effective_excluded_categories().to_vec(),
        };
        outliers.validate()?;
        Ok(outliers)
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Per-equipment results of every enabled test.
///
/// Statistics of a disabled method stay `None` and its flag stays false.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutlierFlags {
    pub z_score: Option<f64>,
    pub is_zscore_outlier: bool,
    pub is_iqr_outlier: bool,
    /// Rank within the category on a 0-100 scale, ties averaged.
    pub percentile_rank: Option<f64>,
    pub is_percentile_outlier: bool,
    /// Number of flags set, 0-3.
    pub outlier_count: u8,
    pub is_outlier_consensus: bool,
}

impl OutlierFlags {
    pub fn any_flag(&self) -> bool {
        self.is_zscore_outlier || self.is_iqr_outlier || self.is_percentile_outlier
    }

    /// Count the set flags and derive consensus from them. Consensus always
    /// needs at least one flag.
    pub(crate) fn tally(&mut self, min_votes: u8) {
        self.outlier_count = [
            self.is_zscore_outlier,
            self.is_iqr_outlier,
            self.is_percentile_outlier,
        ]
        .into_iter()
        .filter(|&f| f)
        .count() as u8;
        self.is_outlier_consensus = self.outlier_count >= min_votes.max(1);
    }
}

/// A frequency profile together with its outlier flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedProfile {
    #[serde(flatten)]
    pub profile: EquipmentFrequencyProfile,
    #[serde(flatten)]
    pub flags: OutlierFlags,
}

/// Flag totals of one detection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlagCounts {
    pub zscore: usize,
    pub iqr: usize,
    pub percentile: usize,
    pub consensus: usize,
}

impl FlagCounts {
    pub fn from_flagged(flagged: &[FlaggedProfile]) -> Self {
        flagged.iter().fold(Self::default(), |mut acc, f| {
            acc.zscore += usize::from(f.flags.is_zscore_outlier);
            acc.iqr += usize::from(f.flags.is_iqr_outlier);
            acc.percentile += usize::from(f.flags.is_percentile_outlier);
            acc.consensus += usize::from(f.flags.is_outlier_consensus);
            acc
        })
    }
}
