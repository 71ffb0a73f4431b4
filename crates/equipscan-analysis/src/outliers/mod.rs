//! Outlier Detector: three statistical tests on work-order rate within
//! each primary category, plus a vote-based consensus flag.
//!
//! - Z-score (one-sided, sample std)
//! - IQR upper fence
//! - Percentile rank

pub mod detector;
pub mod iqr;
pub mod percentile;
pub mod types;
pub mod zscore;

pub use detector::OutlierDetector;
pub use types::{FlagCounts, FlaggedProfile, OutlierConfig, OutlierFlags, OutlierMethod};
