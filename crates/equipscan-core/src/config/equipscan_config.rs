//! Top-level equipscan configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CategorizerConfig, DetectionConfig, FrequencyConfig, ScoringConfig};
use crate::constants::{OUTLIER_METHOD_NAMES, WEIGHT_SUM_TOLERANCE};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "equipscan.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`EQUIPSCAN_*`)
/// 3. Project config (`equipscan.toml` in project root)
/// 4. User config (`~/.equipscan/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EquipscanConfig {
    pub categorizer: CategorizerConfig,
    pub frequency: FrequencyConfig,
    pub detection: DetectionConfig,
    pub scoring: ScoringConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub z_threshold: Option<f64>,
    pub percentile_threshold: Option<f64>,
    pub consensus_only: Option<bool>,
    /// Applied to both detection and scoring.
    pub excluded_categories: Option<Vec<String>>,
}

impl EquipscanConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &EquipscanConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.categorizer.low_consistency_threshold {
            require_range("categorizer.low_consistency_threshold", threshold, 0.0, 100.0)?;
        }

        if let Some(days) = config.frequency.days_per_month {
            require_positive("frequency.days_per_month", days)?;
        }

        let detection = &config.detection;
        if let Some(z) = detection.z_threshold {
            require_positive("detection.z_threshold", z)?;
        }
        if let Some(k) = detection.iqr_multiplier {
            if !k.is_finite() || k < 0.0 {
                return Err(validation_failed(
                    "detection.iqr_multiplier",
                    "must be a finite, non-negative number",
                ));
            }
        }
        if let Some(p) = detection.percentile_threshold {
            require_range("detection.percentile_threshold", p, 0.0, 100.0)?;
        }
        if let Some(votes) = detection.consensus_min_votes {
            if !(1..=3).contains(&votes) {
                return Err(validation_failed(
                    "detection.consensus_min_votes",
                    "must be between 1 and 3",
                ));
            }
        }
        if let Some(unknown) = detection
            .methods
            .iter()
            .flatten()
            .find(|m| !OUTLIER_METHOD_NAMES.contains(&m.as_str()))
        {
            return Err(ConfigError::InvalidValue {
                field: "detection.methods".to_string(),
                message: format!(
                    "unknown method '{unknown}', expected one of {}",
                    OUTLIER_METHOD_NAMES.join(", ")
                ),
            });
        }

        let (freq, cost, outlier) = config.scoring.effective_weights();
        require_weights("scoring.weights", &[freq, cost, outlier])?;
        let (landscape_freq, landscape_cost) = config.scoring.effective_landscape_weights();
        require_weights("scoring.landscape_weights", &[landscape_freq, landscape_cost])?;

        Ok(())
    }

    /// Returns the user config path: `~/.equipscan/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut EquipscanConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: EquipscanConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut EquipscanConfig, other: &EquipscanConfig) {
        // Categorizer
        if other.categorizer.low_consistency_threshold.is_some() {
            base.categorizer.low_consistency_threshold =
                other.categorizer.low_consistency_threshold;
        }

        // Frequency
        if other.frequency.days_per_month.is_some() {
            base.frequency.days_per_month = other.frequency.days_per_month;
        }

        // Detection
        if other.detection.z_threshold.is_some() {
            base.detection.z_threshold = other.detection.z_threshold;
        }
        if other.detection.iqr_multiplier.is_some() {
            base.detection.iqr_multiplier = other.detection.iqr_multiplier;
        }
        if other.detection.percentile_threshold.is_some() {
            base.detection.percentile_threshold = other.detection.percentile_threshold;
        }
        if other.detection.consensus_min_votes.is_some() {
            base.detection.consensus_min_votes = other.detection.consensus_min_votes;
        }
        if other.detection.methods.is_some() {
            base.detection.methods = other.detection.methods.clone();
        }
        if other.detection.excluded_categories.is_some() {
            base.detection.excluded_categories = other.detection.excluded_categories.clone();
        }

        // Scoring
        if other.scoring.frequency_weight.is_some() {
            base.scoring.frequency_weight = other.scoring.frequency_weight;
        }
        if other.scoring.cost_weight.is_some() {
            base.scoring.cost_weight = other.scoring.cost_weight;
        }
        if other.scoring.outlier_weight.is_some() {
            base.scoring.outlier_weight = other.scoring.outlier_weight;
        }
        if other.scoring.landscape_frequency_weight.is_some() {
            base.scoring.landscape_frequency_weight = other.scoring.landscape_frequency_weight;
        }
        if other.scoring.landscape_cost_weight.is_some() {
            base.scoring.landscape_cost_weight = other.scoring.landscape_cost_weight;
        }
        if other.scoring.consensus_only.is_some() {
            base.scoring.consensus_only = other.scoring.consensus_only;
        }
        if other.scoring.excluded_categories.is_some() {
            base.scoring.excluded_categories = other.scoring.excluded_categories.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `EQUIPSCAN_DETECTION_Z_THRESHOLD`, `EQUIPSCAN_SCORING_CONSENSUS_ONLY`, etc.
    fn apply_env_overrides(config: &mut EquipscanConfig) {
        if let Some(v) = env_parse::<f64>("EQUIPSCAN_CATEGORIZER_LOW_CONSISTENCY_THRESHOLD") {
            config.categorizer.low_consistency_threshold = Some(v);
        }
        if let Some(v) = env_parse::<f64>("EQUIPSCAN_FREQUENCY_DAYS_PER_MONTH") {
            config.frequency.days_per_month = Some(v);
        }
        if let Some(v) = env_parse::<f64>("EQUIPSCAN_DETECTION_Z_THRESHOLD") {
            config.detection.z_threshold = Some(v);
        }
        if let Some(v) = env_parse::<f64>("EQUIPSCAN_DETECTION_IQR_MULTIPLIER") {
            config.detection.iqr_multiplier = Some(v);
        }
        if let Some(v) = env_parse::<f64>("EQUIPSCAN_DETECTION_PERCENTILE_THRESHOLD") {
            config.detection.percentile_threshold = Some(v);
        }
        if let Some(v) = env_parse::<u8>("EQUIPSCAN_DETECTION_CONSENSUS_MIN_VOTES") {
            config.detection.consensus_min_votes = Some(v);
        }
        if let Ok(val) = std::env::var("EQUIPSCAN_EXCLUDED_CATEGORIES") {
            let categories = split_list(&val);
            config.detection.excluded_categories = Some(categories.clone());
            config.scoring.excluded_categories = Some(categories);
        }
        if let Some(v) = env_parse::<bool>("EQUIPSCAN_SCORING_CONSENSUS_ONLY") {
            config.scoring.consensus_only = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut EquipscanConfig, cli: &CliOverrides) {
        if let Some(v) = cli.z_threshold {
            config.detection.z_threshold = Some(v);
        }
        if let Some(v) = cli.percentile_threshold {
            config.detection.percentile_threshold = Some(v);
        }
        if let Some(v) = cli.consensus_only {
            config.scoring.consensus_only = Some(v);
        }
        if let Some(ref categories) = cli.excluded_categories {
            config.detection.excluded_categories = Some(categories.clone());
            config.scoring.excluded_categories = Some(categories.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn validation_failed(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(validation_failed(field, "must be a finite number greater than 0"))
    }
}

fn require_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("must be between {min} and {max}"),
        })
    }
}

/// Each weight in [0, 1], the set summing to 1.
fn require_weights(field: &str, weights: &[f64]) -> Result<(), ConfigError> {
    if weights.iter().any(|w| !(0.0..=1.0).contains(w)) {
        return Err(validation_failed(field, "each weight must be between 0.0 and 1.0"));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("weights must sum to 1.0, got {sum}"),
        });
    }
    Ok(())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.trim().parse::<T>().ok())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the user-level config directory: `~/.equipscan/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".equipscan"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
