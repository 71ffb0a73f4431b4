//! Analysis run errors.

use std::fmt;

use super::error_code::{self, ErrorCode};
use super::ConfigError;

/// Upstream guarantees the engine relies on. A record that breaks one of
/// these never came out of the cleaning stage intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractInvariant {
    /// Every record carries a non-empty equipment identity.
    EquipmentIdentity,
    /// Every cost is a finite number.
    FiniteCost,
}

impl ContractInvariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EquipmentIdentity => "equipment_identity",
            Self::FiniteCost => "finite_cost",
        }
    }
}

impl fmt::Display for ContractInvariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors surfaced by a full analysis run.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Input contract violated ({invariant}) at record {record_index}: {detail}")]
    ContractViolation {
        invariant: ContractInvariant,
        record_index: usize,
        detail: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ContractViolation { .. } => error_code::CONTRACT_VIOLATION,
            Self::Config(e) => e.error_code(),
        }
    }
}
