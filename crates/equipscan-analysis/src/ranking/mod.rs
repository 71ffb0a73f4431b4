//! Equipment Ranker: cost impact, category-relative priority, ranks, and
//! threshold recommendations.

pub mod ranker;
pub mod thresholds;
pub mod types;

pub use ranker::{cost_impact, outlier_score, EquipmentRanker};
pub use thresholds::identify_thresholds;
pub use types::{LandscapeWeights, PriorityWeights, RankedEquipment, RankingConfig, Thresholds};
