//! Raw per-format ticket records.
//!
//! JSON and XML corpora share one normalizer; this tagged union keeps the
//! format-specific surface down to field lookup and the ticket-id suffix.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One raw ticket record, before normalization.
#[derive(Clone, Debug)]
pub enum RawTicket {
    /// One element of a JSON ticket array.
    Json(Map<String, Value>),
    /// One `<Ticket>` element: child element name → text.
    Xml(BTreeMap<String, String>),
}

impl RawTicket {
    /// Looks up a field as text. Missing fields and JSON `null` yield `None`.
    pub fn field(&self, name: &str) -> Option<String> {
        match self {
            RawTicket::Json(map) => map.get(name).and_then(json_text),
            RawTicket::Xml(map) => map.get(name).cloned(),
        }
    }

    /// Source-native ticket id, coerced to string.
    ///
    /// JSON dumps carry a `"Ticket ID"` key; XML writers map the space to
    /// an underscore (`Ticket_ID`), with `TicketID` seen in older exports.
    pub fn native_id(&self) -> Option<String> {
        match self {
            RawTicket::Json(_) => self.field("Ticket ID"),
            RawTicket::Xml(_) => self.field("Ticket_ID").or_else(|| self.field("TicketID")),
        }
    }

    /// Source format identifier stored in the metadata.
    pub fn source(&self) -> &'static str {
        match self {
            RawTicket::Json(_) => "json",
            RawTicket::Xml(_) => "xml",
        }
    }
}

/// Renders a scalar JSON value as text; nulls are absent, not `"null"`.
fn json_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn json_ticket(v: Value) -> RawTicket {
        match v {
            Value::Object(map) => RawTicket::Json(map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn json_null_fields_are_absent() {
        let raw = json_ticket(json!({"subject": null, "queue": "Tech"}));
        assert_eq!(raw.field("subject"), None);
        assert_eq!(raw.field("queue"), Some("Tech".to_string()));
    }

    #[test]
    fn numeric_native_id_is_coerced_to_string() {
        let raw = json_ticket(json!({"Ticket ID": 42}));
        assert_eq!(raw.native_id(), Some("42".to_string()));
    }

    #[test]
    fn xml_native_id_accepts_both_element_names() {
        let mut with_underscore = BTreeMap::new();
        with_underscore.insert("Ticket_ID".to_string(), "a-1".to_string());
        assert_eq!(RawTicket::Xml(with_underscore).native_id(), Some("a-1".to_string()));

        let mut legacy = BTreeMap::new();
        legacy.insert("TicketID".to_string(), "a-2".to_string());
        assert_eq!(RawTicket::Xml(legacy).native_id(), Some("a-2".to_string()));
    }
}
