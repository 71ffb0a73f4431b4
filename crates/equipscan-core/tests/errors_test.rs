//! Tests for the equipscan error handling system.

use equipscan_core::errors::error_code::{CONFIG_ERROR, CONTRACT_VIOLATION};
use equipscan_core::errors::*;

#[test]
fn test_all_errors_have_error_code() {
    let config = ConfigError::FileNotFound {
        path: "/tmp/equipscan.toml".into(),
    };
    assert_eq!(config.error_code(), CONFIG_ERROR);

    let violation = AnalysisError::ContractViolation {
        invariant: ContractInvariant::FiniteCost,
        record_index: 3,
        detail: "cost is NaN".into(),
    };
    assert_eq!(violation.error_code(), CONTRACT_VIOLATION);
}

#[test]
fn test_config_error_converts_into_analysis_error() {
    let config = ConfigError::ValidationFailed {
        field: "detection.z_threshold".into(),
        message: "must be a finite number greater than 0".into(),
    };
    let analysis: AnalysisError = config.into();
    assert!(matches!(analysis, AnalysisError::Config(_)));
    // The wrapped error keeps its own code.
    assert_eq!(analysis.error_code(), CONFIG_ERROR);
}

#[test]
fn test_coded_string_format() {
    let violation = AnalysisError::ContractViolation {
        invariant: ContractInvariant::EquipmentIdentity,
        record_index: 0,
        detail: "equipment identity is blank".into(),
    };
    assert_eq!(
        violation.coded_string(),
        "[CONTRACT_VIOLATION] Input contract violated (equipment_identity) at record 0: \
         equipment identity is blank"
    );
}

#[test]
fn test_display_human_readable() {
    let errors: Vec<Box<dyn std::fmt::Display>> = vec![
        Box::new(ConfigError::ParseError {
            path: "equipscan.toml".into(),
            message: "expected a table".into(),
        }),
        Box::new(ConfigError::InvalidValue {
            field: "detection.methods".into(),
            message: "unknown method 'grubbs'".into(),
        }),
        Box::new(AnalysisError::ContractViolation {
            invariant: ContractInvariant::FiniteCost,
            record_index: 7,
            detail: "cost is inf".into(),
        }),
    ];

    for err in errors {
        let msg = err.to_string();
        assert!(!msg.is_empty());
        assert!(!msg.contains("Error {"), "Display should not leak Debug output: {msg}");
    }
}
