//! Error handling for equipscan.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod config_error;
pub mod error_code;

pub use analysis_error::{AnalysisError, ContractInvariant};
pub use config_error::ConfigError;
pub use error_code::ErrorCode;
