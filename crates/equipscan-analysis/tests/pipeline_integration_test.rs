//! End-to-end tests: work orders in, analysis report out.

use chrono::{NaiveDate, NaiveDateTime};
use equipscan_analysis::EquipmentAnalysis;
use equipscan_core::config::{DetectionConfig, EquipscanConfig, ScoringConfig};
use equipscan_core::errors::{AnalysisError, ContractInvariant, ErrorCode};
use equipscan_core::types::{RawClassification, WorkOrderRecord};

/// Work-order counts per pump; all orders of one pump fall on one day so
/// the monthly rate is proportional to the count.
const PUMP_COUNTS: [usize; 10] = [2, 5, 8, 10, 12, 15, 18, 22, 28, 50];

fn day(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, d)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .unwrap()
}

fn order(id: &str, category: &str, d: u32, cost: f64) -> WorkOrderRecord {
    WorkOrderRecord::new(id, day(d), cost).with_classification(RawClassification {
        service_type_lv2: Some(category.to_string()),
        ..RawClassification::default()
    })
}

/// A facility with one noisy pump and three identical air handlers.
fn facility() -> Vec<WorkOrderRecord> {
    let mut records = Vec::new();
    for (i, &count) in PUMP_COUNTS.iter().enumerate() {
        for _ in 0..count {
            records.push(order(&format!("PUMP-{i:02}"), "pumps", 1, 150.0));
        }
    }
    for ahu in ["AHU-1", "AHU-2", "AHU-3"] {
        for d in 1..=5 {
            records.push(order(ahu, "hvac", d, 80.0));
        }
    }
    records.push(order("LOBBY", "No Equipment", 3, 0.0));
    records
}

#[test]
fn full_run_surfaces_the_noisy_pump() {
    let report = EquipmentAnalysis::with_defaults().run(&facility()).unwrap();

    assert_eq!(report.ranked.len(), 1);
    let top = &report.ranked[0];
    assert_eq!(top.profile.equipment_id.as_str(), "PUMP-09");
    assert_eq!(top.profile.primary_category, "Pumps");
    assert_eq!(top.overall_rank, 1);
    assert_eq!(top.category_rank, 1);
    assert_eq!(top.cost_impact, 50.0 * 150.0);
    assert!((top.priority_score - 1.0).abs() < 1e-12);

    let flags = top.flags.as_ref().unwrap();
    assert!(flags.is_zscore_outlier && flags.is_iqr_outlier && flags.is_percentile_outlier);
}

#[test]
fn full_run_hvac_is_unremarkable() {
    let report = EquipmentAnalysis::with_defaults().run(&facility()).unwrap();
    let hvac: Vec<_> = report
        .landscape
        .iter()
        .filter(|r| r.profile.primary_category == "Hvac")
        .collect();
    assert_eq!(hvac.len(), 3);
    for r in hvac {
        assert_eq!(r.freq_score, 0.5);
        assert_eq!(r.cost_score, 0.5);
    }
    for f in report.flagged.iter().filter(|f| f.profile.primary_category == "Hvac") {
        assert_eq!(f.flags.outlier_count, 0);
    }
}

#[test]
fn report_carries_every_stage() {
    let records = facility();
    let report = EquipmentAnalysis::with_defaults().run(&records).unwrap();

    assert_eq!(report.baselines.len(), 3);
    assert_eq!(report.assignments.len(), 14);
    assert_eq!(report.hierarchy[0].category, "Pumps");
    assert_eq!(report.distribution.up_to_100, 14);
    assert!(report.low_consistency.is_empty());
    assert_eq!(report.thresholds.cost_threshold, 7500.0);

    let d = &report.diagnostics;
    assert_eq!(d.record_count, records.len());
    assert_eq!(d.equipment_count, 14);
    assert_eq!(d.category_count, 3);
    assert_eq!(d.uncategorized_records, 0);
    assert_eq!(d.excluded_profiles, 0);
    assert_eq!(d.flag_counts.consensus, 1);
    assert_eq!(d.ranked_count, 1);
}

#[test]
fn excluded_categories_from_config() {
    let config = EquipscanConfig {
        detection: DetectionConfig {
            excluded_categories: Some(vec!["No Equipment".to_string()]),
            ..DetectionConfig::default()
        },
        scoring: ScoringConfig {
            excluded_categories: Some(vec!["No Equipment".to_string()]),
            ..ScoringConfig::default()
        },
        ..EquipscanConfig::default()
    };
    let report = EquipmentAnalysis::from_config(&config).unwrap().run(&facility()).unwrap();
    assert_eq!(report.diagnostics.excluded_profiles, 1);
    assert!(report.landscape.iter().all(|r| r.profile.primary_category != "No Equipment"));
    // Baselines still describe every category.
    assert_eq!(report.baselines.len(), 3);
}

#[test]
fn scoring_only_exclusion_is_counted() {
    let config = EquipscanConfig {
        scoring: ScoringConfig {
            excluded_categories: Some(vec!["No Equipment".to_string()]),
            ..ScoringConfig::default()
        },
        ..EquipscanConfig::default()
    };
    let report = EquipmentAnalysis::from_config(&config).unwrap().run(&facility()).unwrap();
    assert_eq!(report.diagnostics.excluded_profiles, 1);
    assert!(report.flagged.iter().any(|f| f.profile.primary_category == "No Equipment"));
    assert!(report.landscape.iter().all(|r| r.profile.primary_category != "No Equipment"));
}

#[test]
fn from_config_rejects_invalid_settings() {
    let config = EquipscanConfig {
        detection: DetectionConfig {
            consensus_min_votes: Some(5),
            ..DetectionConfig::default()
        },
        ..EquipscanConfig::default()
    };
    let err = EquipmentAnalysis::from_config(&config).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn blank_equipment_identity_is_a_contract_violation() {
    let mut records = facility();
    records.insert(2, order("   ", "pumps", 1, 10.0));
    let err = EquipmentAnalysis::with_defaults().run(&records).unwrap_err();
    match &err {
        AnalysisError::ContractViolation {
            invariant,
            record_index,
            ..
        } => {
            assert_eq!(*invariant, ContractInvariant::EquipmentIdentity);
            assert_eq!(*record_index, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.error_code(), "CONTRACT_VIOLATION");
}

#[test]
fn non_finite_cost_is_a_contract_violation() {
    let records = vec![order("P-1", "pumps", 1, f64::NAN)];
    let err = EquipmentAnalysis::with_defaults().run(&records).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::ContractViolation {
            invariant: ContractInvariant::FiniteCost,
            record_index: 0,
            ..
        }
    ));
}

#[test]
fn near_max_costs_rank_within_unit_interval() {
    let records = vec![
        order("A", "pumps", 1, 1e308),
        order("A", "pumps", 2, 1e308),
        order("B", "pumps", 1, 1.0),
    ];
    let report = EquipmentAnalysis::with_defaults().run(&records).unwrap();

    assert_eq!(report.landscape[0].profile.equipment_id.as_str(), "A");
    assert_eq!(report.landscape[0].cost_impact, f64::MAX);
    for r in &report.landscape {
        assert!((0.0..=1.0).contains(&r.priority_score), "{}: {}", r.profile.equipment_id, r.priority_score);
        assert!((0.0..=1.0).contains(&r.cost_score));
    }
}

#[test]
fn empty_input_yields_empty_report() {
    let report = EquipmentAnalysis::with_defaults().run(&[]).unwrap();
    assert!(report.ranked.is_empty());
    assert!(report.landscape.is_empty());
    assert!(report.baselines.is_empty());
    assert_eq!(report.thresholds.frequency_threshold, 0.0);
    assert_eq!(report.thresholds.percentile_threshold, 90.0);
}

#[test]
fn runs_are_idempotent() {
    let records = facility();
    let analysis = EquipmentAnalysis::with_defaults();
    let first = analysis.run(&records).unwrap();
    let second = analysis.run(&records).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn report_serializes_undefined_values_as_null() {
    let records = vec![order("P-1", "pumps", 1, 0.0)];
    let report = EquipmentAnalysis::with_defaults().run(&records).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["landscape"][0]["avg_cost"].is_null());
    assert_eq!(json["landscape"][0]["cost_impact"], 0.0);
    assert!(json["baselines"][0]["std_frequency"].is_null());
}
