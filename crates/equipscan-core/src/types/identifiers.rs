//! Equipment identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable key shared by every work order of one physical asset.
///
/// Opaque to the engine: grouping is exact match only, no normalization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentId(String);

impl EquipmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identity is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EquipmentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EquipmentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for EquipmentId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for EquipmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
