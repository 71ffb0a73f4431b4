//! End-to-end analysis orchestrator.
//!
//! categorize → frequencies → baselines → detect → rank → thresholds →
//! landscape → diagnostics. Every run rebuilds everything from the input.

use equipscan_core::config::EquipscanConfig;
use equipscan_core::errors::{AnalysisError, ConfigError, ContractInvariant};
use equipscan_core::types::{EquipmentId, WorkOrderRecord};
use serde::Serialize;

use crate::categorize::{Categorizer, CategoryVolume, ConsistencyDistribution, PrimaryCategoryAssignment};
use crate::frequency::{CategoryBaseline, FrequencyAnalyzer};
use crate::outliers::{FlagCounts, FlaggedProfile, OutlierConfig, OutlierDetector};
use crate::ranking::{EquipmentRanker, RankedEquipment, RankingConfig, Thresholds};

/// Runs the four analysis stages in order.
#[derive(Debug, Clone, Default)]
pub struct EquipmentAnalysis {
    categorizer: Categorizer,
    frequency: FrequencyAnalyzer,
    detector: OutlierDetector,
    ranker: EquipmentRanker,
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Priority-ordered action list.
    pub ranked: Vec<RankedEquipment>,
    /// Every non-excluded equipment, frequency and cost only.
    pub landscape: Vec<RankedEquipment>,
    pub flagged: Vec<FlaggedProfile>,
    pub baselines: Vec<CategoryBaseline>,
    pub thresholds: Thresholds,
    pub assignments: Vec<PrimaryCategoryAssignment>,
    pub hierarchy: Vec<CategoryVolume>,
    pub distribution: ConsistencyDistribution,
    pub low_consistency: Vec<EquipmentId>,
    pub diagnostics: AnalysisDiagnostics,
}

/// Run-level counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisDiagnostics {
    pub record_count: usize,
    pub equipment_count: usize,
    pub category_count: usize,
    pub uncategorized_records: usize,
    pub low_consistency_count: usize,
    /// Profiles dropped by the detection or the scoring exclusion list.
    pub excluded_profiles: usize,
    pub flag_counts: FlagCounts,
    pub ranked_count: usize,
}

impl EquipmentAnalysis {
    pub fn new(
        categorizer: Categorizer,
        frequency: FrequencyAnalyzer,
        detector: OutlierDetector,
        ranker: EquipmentRanker,
    ) -> Self {
        Self {
            categorizer,
            frequency,
            detector,
            ranker,
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Build every stage from a resolved configuration.
    pub fn from_config(config: &EquipscanConfig) -> Result<Self, ConfigError> {
        EquipscanConfig::validate(config)?;
        let outliers = OutlierConfig::try_from(&config.detection)?;
        let ranking = RankingConfig {
            percentile_threshold: outliers.percentile_threshold,
            ..RankingConfig::try_from(&config.scoring)?
        };
        Ok(Self::new(
            Categorizer::new(&config.categorizer),
            FrequencyAnalyzer::new(&config.frequency),
            OutlierDetector::new(outliers),
            EquipmentRanker::new(ranking),
        ))
    }

    /// Run the full analysis. Fails only when a record breaks the input contract.
    pub fn run(&self, records: &[WorkOrderRecord]) -> Result<AnalysisReport, AnalysisError> {
        check_contract(records)?;
        tracing::info!(records = records.len(), "equipment analysis started");

        let categorization = self.categorizer.categorize(records);
        let profiles = self.frequency.compute_frequencies(&categorization.records);
        let baselines = self.frequency.compute_category_baseline(&profiles);

        let flagged = self.detector.detect(&profiles);
        let ranked = self.ranker.rank(&flagged);
        let thresholds = self.ranker.identify_thresholds(&ranked);
        let landscape = self.ranker.rank_all(&profiles);

        let diagnostics = AnalysisDiagnostics {
            record_count: records.len(),
            equipment_count: categorization.assignments.len(),
            category_count: categorization.hierarchy.len(),
            uncategorized_records: categorization.uncategorized_records,
            low_consistency_count: categorization.low_consistency.len(),
            excluded_profiles: profiles
                .iter()
                .filter(|p| self.is_excluded(&p.primary_category))
                .count(),
            flag_counts: FlagCounts::from_flagged(&flagged),
            ranked_count: ranked.len(),
        };

        tracing::info!(
            equipment = diagnostics.equipment_count,
            consensus = diagnostics.flag_counts.consensus,
            ranked = diagnostics.ranked_count,
            frequency_threshold = thresholds.frequency_threshold,
            cost_threshold = thresholds.cost_threshold,
            "equipment analysis finished"
        );

        Ok(AnalysisReport {
            ranked,
            landscape,
            flagged,
            baselines,
            thresholds,
            assignments: categorization.assignments,
            hierarchy: categorization.hierarchy,
            distribution: categorization.distribution,
            low_consistency: categorization.low_consistency,
            diagnostics,
        })
    }

    fn is_excluded(&self, category: &str) -> bool {
        let detection = &self.detector.config().excluded_categories;
        let scoring = &self.ranker.config().excluded_categories;
        detection.iter().chain(scoring).any(|c| c == category)
    }
}

/// First record breaking an upstream guarantee, as a typed error.
fn check_contract(records: &[WorkOrderRecord]) -> Result<(), AnalysisError> {
    for (record_index, r) in records.iter().enumerate() {
        if r.equipment_id.is_blank() {
            return Err(violation(
                ContractInvariant::EquipmentIdentity,
                record_index,
                "equipment identity is empty".to_string(),
            ));
        }
        if !r.cost.is_finite() {
            return Err(violation(
                ContractInvariant::FiniteCost,
                record_index,
                format!("cost {} for equipment '{}' is not finite", r.cost, r.equipment_id),
            ));
        }
    }
    Ok(())
}

fn violation(invariant: ContractInvariant, record_index: usize, detail: String) -> AnalysisError {
    tracing::warn!(%invariant, record_index, %detail, "input contract violated");
    AnalysisError::ContractViolation {
        invariant,
        record_index,
        detail,
    }
}
