//! Metadata coercion between document metadata and the scalar-only
//! payload shape of the backing collections.
//!
//! Outbound flattens structured values to scalars; inbound restores the
//! known fields. The pair is lossless for every metadata map the
//! normalizer produces.

use serde_json::Value;
use std::collections::BTreeMap;

/// Fields restored to booleans on read. Kept as an explicit list; other
/// boolean-shaped strings pass through untouched.
const BOOL_FIELDS: &[&str] = &["is_resolved"];

/// Flattens metadata into scalar-only payload values.
///
/// - `null` → empty string
/// - array → comma-joined string
/// - scalar string/number/bool → unchanged
/// - any other structured value → its generic string rendering
pub fn prepare_metadata(metadata: &BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    metadata
        .iter()
        .map(|(k, v)| (k.clone(), flatten_value(v)))
        .collect()
}

fn flatten_value(v: &Value) -> Value {
    match v {
        Value::Null => Value::String(String::new()),
        Value::Array(items) => Value::String(
            items
                .iter()
                .map(render_scalar)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::String(_) | Value::Number(_) | Value::Bool(_) => v.clone(),
        Value::Object(_) => Value::String(v.to_string()),
    }
}

fn render_scalar(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Restores known fields from their flattened payload form.
///
/// - `tags`: comma-split, trimmed, non-empty parts; empty string → `[]`
/// - `priority`: integer parse on success, original string otherwise
/// - boolean fields: case-insensitive `"true"` → `true`, anything else → `false`
/// - everything else passes through unchanged
pub fn restore_metadata(payload: &BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    payload
        .iter()
        .map(|(k, v)| (k.clone(), restore_value(k, v)))
        .collect()
}

fn restore_value(key: &str, v: &Value) -> Value {
    match key {
        "tags" => match v {
            Value::String(s) => Value::Array(
                s.split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(|part| Value::String(part.to_string()))
                    .collect(),
            ),
            other => other.clone(),
        },
        "priority" => match v {
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| v.clone()),
            other => other.clone(),
        },
        key if BOOL_FIELDS.contains(&key) => match v {
            Value::String(s) => Value::Bool(s.eq_ignore_ascii_case("true")),
            other => other.clone(),
        },
        _ => v.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn outbound_flattens_structured_values() {
        let out = prepare_metadata(&meta(&[
            ("tags", json!(["test", "metadata", "processing"])),
            ("resolved_by", Value::Null),
            ("complex_data", json!({"key": "value"})),
            ("queue", json!("Tech Support")),
        ]));
        assert_eq!(out["tags"], json!("test,metadata,processing"));
        assert_eq!(out["resolved_by"], json!(""));
        assert_eq!(out["complex_data"], json!(r#"{"key":"value"}"#));
        assert_eq!(out["queue"], json!("Tech Support"));
    }

    #[test]
    fn round_trip_is_lossless_for_normalizer_metadata() {
        let original = meta(&[
            ("tags", json!(["test", "metadata", "processing"])),
            ("priority", json!(1)),
            ("is_resolved", json!(true)),
            ("resolved_by", json!("")),
            ("queue", json!("Tech Support")),
        ]);
        let restored = restore_metadata(&prepare_metadata(&original));
        assert_eq!(restored, original);
    }

    #[test]
    fn null_restores_as_empty_string() {
        let restored = restore_metadata(&prepare_metadata(&meta(&[("resolved_by", Value::Null)])));
        assert_eq!(restored["resolved_by"], json!(""));
    }

    #[test]
    fn stringified_priority_restores_to_integer() {
        let restored = restore_metadata(&meta(&[("priority", json!("3"))]));
        assert_eq!(restored["priority"], json!(3));
    }

    #[test]
    fn non_numeric_priority_stays_a_string() {
        let restored = restore_metadata(&meta(&[("priority", json!("high"))]));
        assert_eq!(restored["priority"], json!("high"));
    }

    #[test]
    fn stringified_booleans_restore_case_insensitively() {
        let restored = restore_metadata(&meta(&[("is_resolved", json!("TRUE"))]));
        assert_eq!(restored["is_resolved"], json!(true));
        let restored = restore_metadata(&meta(&[("is_resolved", json!("no"))]));
        assert_eq!(restored["is_resolved"], json!(false));
    }

    #[test]
    fn boolean_coercion_stays_on_the_explicit_field_list() {
        let restored = restore_metadata(&meta(&[("verified", json!("true"))]));
        assert_eq!(restored["verified"], json!("true"));
    }

    #[test]
    fn empty_tags_restore_to_empty_array() {
        let restored = restore_metadata(&meta(&[("tags", json!(""))]));
        assert_eq!(restored["tags"], json!([]));
    }

    #[test]
    fn tag_parts_are_trimmed() {
        let restored = restore_metadata(&meta(&[("tags", json!("a, b ,c"))]));
        assert_eq!(restored["tags"], json!(["a", "b", "c"]));
    }
}
