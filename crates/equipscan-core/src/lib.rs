//! equipscan-core: shared foundation for the equipment analysis engine.
//!
//! - Types: cleaned work-order records, equipment identifiers, collections
//! - Errors: one `thiserror` enum per concern, each with a stable error code
//! - Config: TOML-based layered configuration
//! - Tracing: `EQUIPSCAN_LOG`-driven subscriber setup
//! - Constants: engine defaults

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::EquipscanConfig;
pub use errors::{AnalysisError, ConfigError, ErrorCode};
pub use types::{EquipmentId, RawClassification, WorkOrderRecord};
