//! Configuration system for equipscan.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod categorizer_config;
pub mod detection_config;
pub mod equipscan_config;
pub mod frequency_config;
pub mod scoring_config;

pub use categorizer_config::CategorizerConfig;
pub use detection_config::DetectionConfig;
pub use equipscan_config::{CliOverrides, EquipscanConfig};
pub use frequency_config::FrequencyConfig;
pub use scoring_config::ScoringConfig;
