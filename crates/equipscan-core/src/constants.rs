//! Shared constants for the equipscan analysis engine.

/// equipscan version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Categorization ----

/// Terminal fallback when no classification field is present.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Terminal fallback for the subcategory chain.
pub const GENERAL_SUBCATEGORY: &str = "General";

/// Conventional bucket for work orders without a specific target asset.
/// Callers usually pass it as an excluded category.
pub const NO_EQUIPMENT_CATEGORY: &str = "No Equipment";

/// Default consistency (%) below which equipment is reported as potentially miscategorized.
pub const DEFAULT_LOW_CONSISTENCY_THRESHOLD: f64 = 80.0;

// ---- Frequency ----

/// Mean Gregorian month length in days, used as the monthly rate normalizer.
pub const DEFAULT_DAYS_PER_MONTH: f64 = 30.44;

// ---- Outlier detection ----

/// Default one-sided z-score threshold.
pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

/// Default Tukey fence multiplier.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Default percentile-rank cutoff (0-100).
pub const DEFAULT_PERCENTILE_THRESHOLD: f64 = 90.0;

/// Default number of agreeing methods for a consensus outlier.
pub const DEFAULT_CONSENSUS_MIN_VOTES: u8 = 2;

/// Names of the statistical methods, in evaluation order.
pub const OUTLIER_METHOD_NAMES: [&str; 3] = ["zscore", "iqr", "percentile"];

// ---- Ranking ----

/// Default priority weight for the frequency score.
pub const DEFAULT_FREQUENCY_WEIGHT: f64 = 0.4;

/// Default priority weight for the cost score.
pub const DEFAULT_COST_WEIGHT: f64 = 0.4;

/// Default priority weight for the outlier score.
pub const DEFAULT_OUTLIER_WEIGHT: f64 = 0.2;

/// Full-landscape weight for the frequency score (no outlier term).
pub const DEFAULT_LANDSCAPE_FREQUENCY_WEIGHT: f64 = 0.5;

/// Full-landscape weight for the cost score (no outlier term).
pub const DEFAULT_LANDSCAPE_COST_WEIGHT: f64 = 0.5;

/// Score assigned to every member of a category when min == max.
pub const DEGENERATE_SCORE: f64 = 0.5;

/// Tolerance when checking that priority weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;
