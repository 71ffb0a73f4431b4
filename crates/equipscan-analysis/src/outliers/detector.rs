//! OutlierDetector: runs the enabled tests per category and tallies votes.

use equipscan_core::types::FxHashMap;

use super::types::{FlagCounts, FlaggedProfile, OutlierConfig, OutlierFlags, OutlierMethod};
use super::{iqr, percentile, zscore};
use crate::frequency::EquipmentFrequencyProfile;

/// Flags equipment whose work-order rate stands out from its category peers.
#[derive(Debug, Clone)]
pub struct OutlierDetector {
    config: OutlierConfig,
}

impl OutlierDetector {
    pub fn new(config: OutlierConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(OutlierConfig::default())
    }

    pub fn config(&self) -> &OutlierConfig {
        &self.config
    }

    /// Flag every profile outside the excluded categories.
    ///
    /// Output keeps the input order. Categories are partitioned in one
    /// pass; each partition is tested independently.
    pub fn detect(&self, profiles: &[EquipmentFrequencyProfile]) -> Vec<FlaggedProfile> {
        let kept: Vec<&EquipmentFrequencyProfile> = profiles
            .iter()
            .filter(|p| !self.is_excluded(&p.primary_category))
            .collect();
        let excluded = profiles.len() - kept.len();
        if excluded > 0 {
            tracing::info!(excluded, categories = ?self.config.excluded_categories, "excluded profiles from outlier detection");
        }

        let mut partitions: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
        for (idx, p) in kept.iter().enumerate() {
            partitions.entry(p.primary_category.as_str()).or_default().push(idx);
        }

        let mut flags = vec![OutlierFlags::default(); kept.len()];
        for members in partitions.values() {
            let values: Vec<f64> = members.iter().map(|&i| kept[i].work_orders_per_month).collect();
            self.flag_partition(&values, members, &mut flags);
        }

        let flagged: Vec<FlaggedProfile> = kept
            .into_iter()
            .zip(flags)
            .map(|(profile, mut flags)| {
                flags.tally(self.config.consensus_min_votes);
                FlaggedProfile {
                    profile: profile.clone(),
                    flags,
                }
            })
            .collect();

        let counts = FlagCounts::from_flagged(&flagged);
        for method in &self.config.methods {
            let count = match method {
                OutlierMethod::ZScore => counts.zscore,
                OutlierMethod::Iqr => counts.iqr,
                OutlierMethod::Percentile => counts.percentile,
            };
            tracing::info!(method = %method, flagged = count, "outlier method applied");
        }
        tracing::info!(
            consensus = counts.consensus,
            min_votes = self.config.consensus_min_votes,
            profiles = flagged.len(),
            "consensus outliers identified"
        );

        flagged
    }

    fn is_excluded(&self, category: &str) -> bool {
        self.config.excluded_categories.iter().any(|c| c == category)
    }

    fn flag_partition(&self, values: &[f64], members: &[usize], flags: &mut [OutlierFlags]) {
        let cfg = &self.config;

        if cfg.is_enabled(OutlierMethod::ZScore) {
            for (&i, z) in members.iter().zip(zscore::scores(values)) {
                flags[i].z_score = Some(z);
                flags[i].is_zscore_outlier = zscore::is_outlier(z, cfg.z_threshold);
            }
        }

        if cfg.is_enabled(OutlierMethod::Iqr) {
            for (&i, hit) in members.iter().zip(iqr::detect(values, cfg.iqr_multiplier)) {
                flags[i].is_iqr_outlier = hit;
            }
        }

        if cfg.is_enabled(OutlierMethod::Percentile) {
            let ranks = percentile::ranks(values);
            let hits = percentile::detect(&ranks, cfg.percentile_threshold);
            for ((&i, rank), hit) in members.iter().zip(ranks).zip(hits) {
                flags[i].percentile_rank = Some(rank);
                flags[i].is_percentile_outlier = hit;
            }
        }
    }
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self::with_defaults()
    }
}
