//! Re-exports of collection types used across the engine.
//!
//! `FxHashMap`/`FxHashSet` for lookups where order is irrelevant,
//! `BTreeMap` wherever output order must be deterministic.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use std::collections::BTreeMap;
