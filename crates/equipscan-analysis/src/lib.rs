//! equipscan-analysis: the equipment analysis engine.
//!
//! Four stages, each consuming the previous one's output:
//! - `categorize`: normalized categories and one primary category per equipment
//! - `frequency`: per-equipment work-order rate and cost, category baselines
//! - `outliers`: z-score, IQR and percentile tests with consensus voting
//! - `ranking`: category-relative priority scores, ranks, thresholds
//!
//! `pipeline::EquipmentAnalysis` runs them end to end.

pub mod categorize;
pub mod frequency;
pub mod outliers;
pub mod pipeline;
pub mod ranking;
pub mod stats;

pub use categorize::Categorizer;
pub use frequency::FrequencyAnalyzer;
pub use outliers::OutlierDetector;
pub use pipeline::{AnalysisDiagnostics, AnalysisReport, EquipmentAnalysis};
pub use ranking::EquipmentRanker;
