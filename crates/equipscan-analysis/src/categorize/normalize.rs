//! Category and subcategory normalization via fallback chains.

use std::fmt;

use equipscan_core::constants::{GENERAL_SUBCATEGORY, UNCATEGORIZED};
use equipscan_core::types::RawClassification;

/// Reads one raw classification field.
pub type FieldAccessor = fn(&RawClassification) -> Option<&str>;

fn service_type_lv2(raw: &RawClassification) -> Option<&str> {
    raw.service_type_lv2.as_deref()
}

fn service_type_lv3(raw: &RawClassification) -> Option<&str> {
    raw.service_type_lv3.as_deref()
}

fn fm_type(raw: &RawClassification) -> Option<&str> {
    raw.fm_type.as_deref()
}

/// Ordered list of raw fields; the first present, non-blank value wins.
#[derive(Clone)]
pub struct FallbackChain {
    fields: Vec<FieldAccessor>,
    terminal: &'static str,
}

impl fmt::Debug for FallbackChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackChain")
            .field("fields", &self.fields.len())
            .field("terminal", &self.terminal)
            .finish()
    }
}

impl FallbackChain {
    pub fn new(fields: Vec<FieldAccessor>, terminal: &'static str) -> Self {
        Self { fields, terminal }
    }

    /// Service type level 2, then facility-management type, then "Uncategorized".
    pub fn category() -> Self {
        Self::new(vec![service_type_lv2, fm_type], UNCATEGORIZED)
    }

    /// Service type level 3, then level 2, then "General".
    pub fn subcategory() -> Self {
        Self::new(vec![service_type_lv3, service_type_lv2], GENERAL_SUBCATEGORY)
    }

    pub fn terminal(&self) -> &'static str {
        self.terminal
    }

    /// Resolve a display label: trimmed and title-cased. Blank values count as absent.
    pub fn resolve(&self, raw: &RawClassification) -> String {
        self.fields
            .iter()
            .find_map(|field| field(raw).map(str::trim).filter(|v| !v.is_empty()))
            .map(title_case)
            .unwrap_or_else(|| self.terminal.to_string())
    }
}

/// Title-case a label: a cased letter is upper-cased when it follows a
/// non-cased character and lower-cased otherwise. Characters without case
/// (digits, punctuation, CJK) pass through untouched.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_cased = false;
    for ch in value.chars() {
        let cased = ch.is_uppercase() || ch.is_lowercase();
        if cased {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
        } else {
            out.push(ch);
        }
        prev_cased = cased;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(lv2: Option<&str>, lv3: Option<&str>, fm: Option<&str>) -> RawClassification {
        RawClassification {
            service_type_lv2: lv2.map(str::to_string),
            service_type_lv3: lv3.map(str::to_string),
            fm_type: fm.map(str::to_string),
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hvac system"), "Hvac System");
        assert_eq!(title_case("AIR-CONDITIONING"), "Air-Conditioning");
        assert_eq!(title_case("o'brien"), "O'Brien");
        assert_eq!(title_case("3rd floor"), "3Rd Floor");
        assert_eq!(title_case("空调 hvac"), "空调 Hvac");
    }

    #[test]
    fn test_category_prefers_service_type() {
        let chain = FallbackChain::category();
        assert_eq!(chain.resolve(&raw(Some("  plumbing "), None, Some("MEP"))), "Plumbing");
        assert_eq!(chain.resolve(&raw(None, Some("Pumps"), Some("mep works"))), "Mep Works");
        assert_eq!(chain.resolve(&raw(None, None, None)), "Uncategorized");
    }

    #[test]
    fn test_blank_value_falls_through() {
        let chain = FallbackChain::category();
        assert_eq!(chain.resolve(&raw(Some("   "), None, Some("Electrical"))), "Electrical");
    }

    #[test]
    fn test_subcategory_chain() {
        let chain = FallbackChain::subcategory();
        assert_eq!(chain.resolve(&raw(Some("HVAC"), Some("chiller"), None)), "Chiller");
        assert_eq!(chain.resolve(&raw(Some("HVAC"), None, None)), "Hvac");
        assert_eq!(chain.resolve(&raw(None, None, Some("MEP"))), "General");
    }
}
