//! EquipmentRanker: category-relative priority scores and ranks.

use std::cmp::Ordering;

use equipscan_core::types::FxHashMap;

use super::thresholds;
use super::types::{RankedEquipment, RankingConfig, Thresholds};
use crate::frequency::EquipmentFrequencyProfile;
use crate::outliers::{FlaggedProfile, OutlierFlags};
use crate::stats;

/// Orders equipment by how much preventive-maintenance attention it deserves.
#[derive(Debug, Clone)]
pub struct EquipmentRanker {
    config: RankingConfig,
}

impl EquipmentRanker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(RankingConfig::default())
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// The action list: scores every non-excluded profile within its
    /// category, ranks them, then (if configured) keeps only consensus
    /// outliers and ranks the survivors again.
    ///
    /// Scores always reflect the whole category; only ranks change after
    /// the consensus filter.
    pub fn rank(&self, flagged: &[FlaggedProfile]) -> Vec<RankedEquipment> {
        let w = self.config.weights;
        let candidates: Vec<(&EquipmentFrequencyProfile, Option<&OutlierFlags>)> = flagged
            .iter()
            .filter(|f| !self.is_excluded(&f.profile.primary_category))
            .map(|f| (&f.profile, Some(&f.flags)))
            .collect();

        let mut ranked = self.score(&candidates, |freq, cost, outlier| {
            freq * w.frequency + cost * w.cost + outlier.unwrap_or(0.0) * w.outlier
        });
        assign_ranks(&mut ranked);
        let scored = ranked.len();

        if self.config.consensus_only {
            ranked.retain(RankedEquipment::is_consensus_outlier);
            assign_ranks(&mut ranked);
        }

        tracing::info!(
            scored,
            ranked = ranked.len(),
            consensus_only = self.config.consensus_only,
            "equipment ranked"
        );
        ranked
    }

    /// The full landscape: every non-excluded profile, frequency and cost
    /// only, no consensus filter.
    pub fn rank_all(&self, profiles: &[EquipmentFrequencyProfile]) -> Vec<RankedEquipment> {
        let w = self.config.landscape_weights;
        let candidates: Vec<(&EquipmentFrequencyProfile, Option<&OutlierFlags>)> = profiles
            .iter()
            .filter(|p| !self.is_excluded(&p.primary_category))
            .map(|p| (p, None))
            .collect();

        let mut ranked = self.score(&candidates, |freq, cost, _| freq * w.frequency + cost * w.cost);
        assign_ranks(&mut ranked);

        tracing::info!(ranked = ranked.len(), "equipment landscape ranked");
        ranked
    }

    /// Thresholds recommended from an action list.
    pub fn identify_thresholds(&self, ranked: &[RankedEquipment]) -> Thresholds {
        thresholds::identify_thresholds(ranked, self.config.percentile_threshold)
    }

    fn is_excluded(&self, category: &str) -> bool {
        self.config.excluded_categories.iter().any(|c| c == category)
    }

    /// Normalize frequency and cost impact per category and combine them.
    /// Ranks are left at 0 for `assign_ranks`.
    fn score<F>(
        &self,
        candidates: &[(&EquipmentFrequencyProfile, Option<&OutlierFlags>)],
        priority: F,
    ) -> Vec<RankedEquipment>
    where
        F: Fn(f64, f64, Option<f64>) -> f64,
    {
        let cost_impacts: Vec<f64> = candidates.iter().map(|(p, _)| cost_impact(p)).collect();

        let mut partitions: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
        for (idx, (p, _)) in candidates.iter().enumerate() {
            partitions.entry(p.primary_category.as_str()).or_default().push(idx);
        }

        let mut freq_scores = vec![0.0; candidates.len()];
        let mut cost_scores = vec![0.0; candidates.len()];
        for members in partitions.values() {
            let rates: Vec<f64> = members.iter().map(|&i| candidates[i].0.work_orders_per_month).collect();
            let costs: Vec<f64> = members.iter().map(|&i| cost_impacts[i]).collect();
            let freq = stats::min_max_normalize(&rates, self.config.degenerate_score);
            let cost = stats::min_max_normalize(&costs, self.config.degenerate_score);
            for ((&i, f), c) in members.iter().zip(freq).zip(cost) {
                freq_scores[i] = f;
                cost_scores[i] = c;
            }
        }

        candidates
            .iter()
            .enumerate()
            .map(|(i, (profile, flags))| {
                let outlier_score = flags.map(outlier_score);
                let priority_score = priority(freq_scores[i], cost_scores[i], outlier_score);
                RankedEquipment {
                    profile: (*profile).clone(),
                    flags: flags.cloned(),
                    cost_impact: cost_impacts[i],
                    freq_score: freq_scores[i],
                    cost_score: cost_scores[i],
                    outlier_score,
                    priority_score: unit_interval(priority_score),
                    overall_rank: 0,
                    category_rank: 0,
                }
            })
            .collect()
    }
}

impl Default for EquipmentRanker {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Total maintenance spend: work orders × average positive cost,
/// saturating at `f64::MAX`.
pub fn cost_impact(profile: &EquipmentFrequencyProfile) -> f64 {
    let impact = profile.total_work_orders as f64 * profile.avg_cost.unwrap_or(0.0);
    if impact.is_finite() {
        impact
    } else {
        f64::MAX
    }
}

/// Clamp into [0, 1]; NaN maps to 0.
fn unit_interval(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// 1.0 for consensus, 0.5 for any single flag, else 0.0.
pub fn outlier_score(flags: &OutlierFlags) -> f64 {
    if flags.is_outlier_consensus {
        1.0
    } else if flags.any_flag() {
        0.5
    } else {
        0.0
    }
}

/// Sort by priority descending (equipment identity breaks ties) and
/// number both ranks contiguously from 1.
fn assign_ranks(ranked: &mut [RankedEquipment]) {
    ranked.sort_by(priority_order);
    let mut per_category: FxHashMap<String, usize> = FxHashMap::default();
    for (pos, r) in ranked.iter_mut().enumerate() {
        r.overall_rank = pos + 1;
        let counter = per_category.entry(r.profile.primary_category.clone()).or_insert(0);
        *counter += 1;
        r.category_rank = *counter;
    }
}

fn priority_order(a: &RankedEquipment, b: &RankedEquipment) -> Ordering {
    b.priority_score
        .total_cmp(&a.priority_score)
        .then_with(|| a.profile.equipment_id.cmp(&b.profile.equipment_id))
        .then_with(|| a.profile.primary_category.cmp(&b.profile.primary_category))
}
