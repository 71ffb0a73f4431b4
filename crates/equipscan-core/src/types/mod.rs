//! Data structures shared across the engine.
//! Cleaned work-order records, equipment identifiers, collection aliases.

pub mod collections;
pub mod identifiers;
pub mod work_order;

pub use collections::{BTreeMap, FxHashMap, FxHashSet};
pub use identifiers::EquipmentId;
pub use work_order::{RawClassification, WorkOrderRecord};
