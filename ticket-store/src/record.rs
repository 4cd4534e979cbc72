//! Core data models used by the library.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Canonical unit of retrieval: one normalized support ticket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TicketDocument {
    /// Fixed six-line rendering of the ticket fields.
    pub content: String,
    /// Flat metadata map; values are strings, string arrays, or scalars.
    pub metadata: BTreeMap<String, Value>,
}

/// A single retrieval hit with its similarity score.
#[derive(Clone, Debug)]
pub struct SearchHit {
    pub content: String,
    pub metadata: BTreeMap<String, Value>,
    /// `1 - distance`, higher is more relevant.
    pub similarity: f32,
}

/// Normalizes a raw support-type label into a canonical category key.
///
/// Recognized markers map to `technical` / `product` / `customer`; any
/// other label is lowercased with spaces removed.
pub fn normalize_category(label: &str) -> String {
    let lower = label.to_lowercase();
    if lower.contains("technical") {
        "technical".to_string()
    } else if lower.contains("product") {
        "product".to_string()
    } else if lower.contains("customer") {
        "customer".to_string()
    } else {
        lower.replace(' ', "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_markers_map_to_canonical_names() {
        assert_eq!(normalize_category("Technical Support"), "technical");
        assert_eq!(normalize_category("Product"), "product");
        assert_eq!(normalize_category("customer service"), "customer");
    }

    #[test]
    fn unknown_labels_are_lowercased_and_space_stripped() {
        assert_eq!(normalize_category("Billing Team"), "billingteam");
        assert_eq!(normalize_category("HR"), "hr");
    }
}
