//! Categorizer: normalized categories per work order and one primary
//! category per equipment.
//!
//! normalize → hierarchy → primary assignment → consistency summaries.

pub mod hierarchy;
pub mod normalize;
pub mod primary;
pub mod types;

pub use hierarchy::{category_hierarchy, consistency_distribution, low_consistency_equipment};
pub use normalize::{title_case, FallbackChain, FieldAccessor};
pub use primary::{assign_primary_categories, PrimaryAssignment};
pub use types::{
    AssignedRecord, Categorization, CategorizedRecord, CategoryVolume, ConsistencyDistribution,
    PrimaryCategoryAssignment,
};

use equipscan_core::config::CategorizerConfig;
use equipscan_core::constants::DEFAULT_LOW_CONSISTENCY_THRESHOLD;
use equipscan_core::types::WorkOrderRecord;

/// Number of categories echoed in the summary log line.
const TOP_CATEGORIES_LOGGED: usize = 5;

/// Normalizes raw classification fields and assigns primary categories.
#[derive(Debug, Clone)]
pub struct Categorizer {
    category_chain: FallbackChain,
    subcategory_chain: FallbackChain,
    low_consistency_threshold: f64,
}

impl Categorizer {
    pub fn new(config: &CategorizerConfig) -> Self {
        Self {
            category_chain: FallbackChain::category(),
            subcategory_chain: FallbackChain::subcategory(),
            low_consistency_threshold: config.effective_low_consistency_threshold(),
        }
    }

    pub fn with_defaults() -> Self {
        Self {
            category_chain: FallbackChain::category(),
            subcategory_chain: FallbackChain::subcategory(),
            low_consistency_threshold: DEFAULT_LOW_CONSISTENCY_THRESHOLD,
        }
    }

    /// Replace the fallback chains.
    pub fn with_chains(mut self, category: FallbackChain, subcategory: FallbackChain) -> Self {
        self.category_chain = category;
        self.subcategory_chain = subcategory;
        self
    }

    pub fn low_consistency_threshold(&self) -> f64 {
        self.low_consistency_threshold
    }

    /// Attach a normalized category and subcategory to every record. Never fails.
    pub fn normalize<'a>(&self, records: &'a [WorkOrderRecord]) -> Vec<CategorizedRecord<'a>> {
        records
            .iter()
            .map(|record| CategorizedRecord {
                record,
                category: self.category_chain.resolve(&record.classification),
                subcategory: self.subcategory_chain.resolve(&record.classification),
            })
            .collect()
    }

    /// Run the whole categorization stage.
    pub fn categorize<'a>(&self, records: &'a [WorkOrderRecord]) -> Categorization<'a> {
        let normalized = self.normalize(records);
        let uncategorized_records = normalized
            .iter()
            .filter(|r| r.category == self.category_chain.terminal())
            .count();
        let hierarchy = category_hierarchy(&normalized);

        let top: Vec<&str> = hierarchy
            .iter()
            .take(TOP_CATEGORIES_LOGGED)
            .map(|v| v.category.as_str())
            .collect();
        tracing::info!(
            records = normalized.len(),
            categories = hierarchy.len(),
            uncategorized = uncategorized_records,
            top = ?top,
            "categories normalized"
        );

        let PrimaryAssignment { records, assignments } = assign_primary_categories(normalized);
        let distribution = consistency_distribution(&assignments);
        let low_consistency = low_consistency_equipment(&assignments, self.low_consistency_threshold);

        tracing::info!(
            equipment = assignments.len(),
            low_consistency = low_consistency.len(),
            threshold = self.low_consistency_threshold,
            "primary categories assigned"
        );
        tracing::debug!(
            up_to_50 = distribution.up_to_50,
            up_to_80 = distribution.up_to_80,
            up_to_90 = distribution.up_to_90,
            up_to_100 = distribution.up_to_100,
            "consistency distribution"
        );

        Categorization {
            records,
            assignments,
            hierarchy,
            distribution,
            low_consistency,
            uncategorized_records,
        }
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}
