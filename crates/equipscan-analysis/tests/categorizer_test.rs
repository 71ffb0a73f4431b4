//! Categorizer tests: normalization, primary assignment, summaries.

use chrono::{NaiveDate, NaiveDateTime};
use equipscan_analysis::categorize::{Categorizer, FallbackChain, FieldAccessor};
use equipscan_core::config::CategorizerConfig;
use equipscan_core::types::{RawClassification, WorkOrderRecord};

fn day(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, d)
        .and_then(|date| date.and_hms_opt(8, 30, 0))
        .unwrap()
}

fn order(id: &str, d: u32, lv2: Option<&str>, lv3: Option<&str>, fm: Option<&str>) -> WorkOrderRecord {
    WorkOrderRecord::new(id, day(d), 100.0).with_classification(RawClassification {
        service_type_lv2: lv2.map(str::to_string),
        service_type_lv3: lv3.map(str::to_string),
        fm_type: fm.map(str::to_string),
    })
}

#[test]
fn normalize_applies_fallback_chains() {
    let records = vec![
        order("AHU-1", 1, Some(" hvac "), Some("chiller service"), None),
        order("AHU-2", 2, None, None, Some("MECHANICAL")),
        order("AHU-3", 3, None, None, None),
        order("AHU-4", 4, Some(""), None, Some("   ")),
    ];
    let normalized = Categorizer::with_defaults().normalize(&records);

    assert_eq!(normalized[0].category, "Hvac");
    assert_eq!(normalized[0].subcategory, "Chiller Service");
    assert_eq!(normalized[1].category, "Mechanical");
    assert_eq!(normalized[1].subcategory, "General");
    assert_eq!(normalized[2].category, "Uncategorized");
    assert_eq!(normalized[3].category, "Uncategorized");
    assert_eq!(normalized[3].subcategory, "General");
}

#[test]
fn normalize_preserves_record_order_and_count() {
    let records: Vec<_> = (1..=6).map(|d| order(&format!("E-{d}"), d, Some("plumbing"), None, None)).collect();
    let normalized = Categorizer::with_defaults().normalize(&records);
    assert_eq!(normalized.len(), records.len());
    for (r, n) in records.iter().zip(&normalized) {
        assert!(std::ptr::eq(r, n.record));
    }
}

#[test]
fn primary_category_is_mode_with_first_seen_tie_break() {
    let records = vec![
        order("P-1", 1, Some("Electrical"), None, None),
        order("P-1", 2, Some("Plumbing"), None, None),
        order("P-1", 3, Some("Plumbing"), None, None),
        order("P-1", 4, Some("Electrical"), None, None),
        order("P-2", 1, Some("Hvac"), None, None),
        order("P-2", 2, Some("Hvac"), None, None),
        order("P-2", 3, Some("Hvac"), None, None),
        order("P-2", 4, Some("Electrical"), None, None),
    ];
    let result = Categorizer::with_defaults().categorize(&records);

    let p1 = &result.assignments[0];
    assert_eq!(p1.equipment_id.as_str(), "P-1");
    assert_eq!(p1.primary_category, "Electrical");
    assert_eq!(p1.consistency_score, 50.0);
    assert_eq!(p1.distinct_categories, 2);

    let p2 = &result.assignments[1];
    assert_eq!(p2.primary_category, "Hvac");
    assert_eq!(p2.consistency_score, 75.0);
}

#[test]
fn primary_category_broadcast_to_every_record() {
    let records = vec![
        order("P-1", 1, Some("Hvac"), None, None),
        order("P-2", 1, Some("Electrical"), None, None),
        order("P-1", 2, Some("Plumbing"), None, None),
        order("P-1", 3, Some("Hvac"), None, None),
    ];
    let result = Categorizer::with_defaults().categorize(&records);
    assert_eq!(result.records.len(), 4);
    for r in result.records.iter().filter(|r| r.equipment_id().as_str() == "P-1") {
        assert_eq!(r.primary_category, "Hvac");
        assert!((r.consistency_score - 200.0 / 3.0).abs() < 1e-10);
    }
    // Records keep their own category alongside the primary.
    assert_eq!(result.records[2].category, "Plumbing");
}

#[test]
fn consistency_is_100_only_for_single_category() {
    let records = vec![
        order("A", 1, Some("Hvac"), None, None),
        order("A", 2, Some("hvac"), None, None),
        order("B", 1, Some("Hvac"), None, None),
        order("B", 2, Some("Electrical"), None, None),
    ];
    let result = Categorizer::with_defaults().categorize(&records);
    let a = result.assignments.iter().find(|a| a.equipment_id.as_str() == "A").unwrap();
    let b = result.assignments.iter().find(|a| a.equipment_id.as_str() == "B").unwrap();
    assert_eq!(a.consistency_score, 100.0);
    assert_eq!(a.distinct_categories, 1);
    assert!(b.consistency_score < 100.0);
}

#[test]
fn hierarchy_counts_and_orders_by_volume() {
    let records = vec![
        order("A", 1, Some("Hvac"), None, None),
        order("A", 2, Some("Hvac"), None, None),
        order("B", 1, Some("Hvac"), None, None),
        order("C", 1, Some("Plumbing"), None, None),
        order("D", 1, Some("Electrical"), None, None),
    ];
    let result = Categorizer::with_defaults().categorize(&records);
    let names: Vec<_> = result.hierarchy.iter().map(|v| v.category.as_str()).collect();
    assert_eq!(names, vec!["Hvac", "Electrical", "Plumbing"]);
    assert_eq!(result.hierarchy[0].equipment_count, 2);
    assert_eq!(result.hierarchy[0].work_order_count, 3);
}

#[test]
fn low_consistency_uses_configured_threshold() {
    let records = vec![
        order("A", 1, Some("Hvac"), None, None),
        order("A", 2, Some("Hvac"), None, None),
        order("A", 3, Some("Hvac"), None, None),
        order("A", 4, Some("Electrical"), None, None),
        order("B", 1, Some("Hvac"), None, None),
    ];
    let default_result = Categorizer::with_defaults().categorize(&records);
    assert_eq!(default_result.low_consistency.len(), 1);
    assert_eq!(default_result.low_consistency[0].as_str(), "A");

    let lenient = Categorizer::new(&CategorizerConfig {
        low_consistency_threshold: Some(70.0),
    });
    assert!(lenient.categorize(&records).low_consistency.is_empty());
    assert_eq!(default_result.distribution.up_to_80, 1);
    assert_eq!(default_result.distribution.up_to_100, 1);
}

#[test]
fn uncategorized_records_are_counted() {
    let records = vec![
        order("A", 1, None, None, None),
        order("B", 1, Some("Hvac"), None, None),
    ];
    let result = Categorizer::with_defaults().categorize(&records);
    assert_eq!(result.uncategorized_records, 1);
}

#[test]
fn empty_input_yields_empty_outputs() {
    let result = Categorizer::with_defaults().categorize(&[]);
    assert!(result.records.is_empty());
    assert!(result.assignments.is_empty());
    assert!(result.hierarchy.is_empty());
    assert_eq!(result.distribution.total(), 0);
}

#[test]
fn custom_chain_replaces_defaults() {
    fn fm(raw: &RawClassification) -> Option<&str> {
        raw.fm_type.as_deref()
    }
    let fields: Vec<FieldAccessor> = vec![fm as FieldAccessor];
    let categorizer = Categorizer::with_defaults()
        .with_chains(FallbackChain::new(fields, "Unknown"), FallbackChain::subcategory());
    let records = vec![
        order("A", 1, Some("Hvac"), None, Some("soft services")),
        order("B", 1, Some("Hvac"), None, None),
    ];
    let normalized = categorizer.normalize(&records);
    assert_eq!(normalized[0].category, "Soft Services");
    assert_eq!(normalized[1].category, "Unknown");
}
