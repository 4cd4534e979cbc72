//! Ticket Normalizer: one raw record + category label → one canonical
//! document.

use crate::errors::StoreError;
use crate::raw::RawTicket;
use crate::record::TicketDocument;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::trace;

/// Number of ordinal tag slots scanned on every record.
const TAG_SLOTS: usize = 8;

/// Normalizes one raw record into exactly one [`TicketDocument`].
///
/// Content formatting never fails; missing fields render as empty strings.
/// The category label is mandatory and is never inferred from the record.
///
/// # Errors
/// [`StoreError::MissingCategory`] when the label is empty or blank.
pub fn normalize_ticket(raw: &RawTicket, support_type: &str) -> Result<TicketDocument, StoreError> {
    if support_type.trim().is_empty() {
        return Err(StoreError::MissingCategory);
    }

    let content = format_content(raw);
    let metadata = extract_metadata(raw, support_type);
    trace!("normalized ticket {}", metadata["ticket_id"]);
    Ok(TicketDocument { content, metadata })
}

/// Fixed six-line content layout, identical across source formats for
/// identical field values.
fn format_content(raw: &RawTicket) -> String {
    let get = |name: &str| raw.field(name).unwrap_or_default();
    format!(
        "Subject: {}\nDescription: {}\nResolution: {}\nType: {}\nQueue: {}\nPriority: {}",
        get("subject"),
        get("body"),
        get("answer"),
        get("type"),
        get("queue"),
        get("priority"),
    )
}

fn extract_metadata(raw: &RawTicket, support_type: &str) -> BTreeMap<String, Value> {
    let original_id = raw.native_id().unwrap_or_default();
    let ticket_id = match raw {
        RawTicket::Json(_) => format!("{support_type}_{original_id}"),
        RawTicket::Xml(_) => format!("{support_type}_xml_{original_id}"),
    };

    let text = |name: &str| Value::String(raw.field(name).unwrap_or_default());

    let mut metadata = BTreeMap::new();
    metadata.insert("ticket_id".to_string(), Value::String(ticket_id));
    metadata.insert("original_ticket_id".to_string(), Value::String(original_id));
    metadata.insert(
        "support_type".to_string(),
        Value::String(support_type.to_string()),
    );
    metadata.insert("type".to_string(), text("type"));
    metadata.insert("queue".to_string(), text("queue"));
    metadata.insert("priority".to_string(), text("priority"));
    metadata.insert("language".to_string(), text("language"));
    metadata.insert(
        "tags".to_string(),
        Value::Array(extract_tags(raw).into_iter().map(Value::String).collect()),
    );
    metadata.insert("source".to_string(), Value::String(raw.source().to_string()));

    // JSON records keep the raw content fields for downstream reuse.
    if matches!(raw, RawTicket::Json(_)) {
        metadata.insert("subject".to_string(), text("subject"));
        metadata.insert("body".to_string(), text("body"));
        metadata.insert("answer".to_string(), text("answer"));
    }

    metadata
}

/// Scans `tag_1..tag_8` in slot order. A slot contributes iff it is
/// present, non-empty, and not the literal `"nan"` (case-insensitive).
/// Duplicates are preserved.
fn extract_tags(raw: &RawTicket) -> Vec<String> {
    let mut tags = Vec::new();
    for slot in 1..=TAG_SLOTS {
        let Some(value) = raw.field(&format!("tag_{slot}")) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("nan") {
            continue;
        }
        tags.push(value.to_string());
    }
    tags
}
