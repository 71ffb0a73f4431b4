//! ErrorCode trait for structured error reporting.

/// Every error enum implements this to provide a stable, machine-readable
/// code alongside its human-readable `Display` message.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted coded string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONTRACT_VIOLATION: &str = "CONTRACT_VIOLATION";
