//! Brief normalizer.
//!
//! Coerces whatever the upstream model produced into the canonical brief:
//! every registered field present, list fields as lists of trimmed non-empty
//! strings, text fields as strings. `normalize` is idempotent for a fixed
//! clock.

use serde_json::Value;
use std::collections::BTreeMap;

use super::document::Brief;
use super::field::{lookup, FieldKind, FieldValue};
use super::registry::BRIEF_FIELDS;
use super::title::derive_title;
use crate::domain::foundation::Timestamp;

/// Normalizes `raw` using the current time for `updatedAt`.
pub fn normalize(raw: &Value) -> Brief {
    normalize_at(raw, Timestamp::now())
}

/// Normalizes `raw`, stamping `updatedAt` (and a missing `createdAt`) with `now`.
pub fn normalize_at(raw: &Value, now: Timestamp) -> Brief {
    let mut values = BTreeMap::new();

    for descriptor in BRIEF_FIELDS {
        let found = lookup(raw, &descriptor.path());
        let value = match descriptor.kind() {
            FieldKind::Text => FieldValue::Text(found.map(coerce_text).unwrap_or_default()),
            FieldKind::List => FieldValue::List(found.map(coerce_list).unwrap_or_default()),
        };
        values.insert(descriptor.key.to_string(), value);
    }

    let title_missing = values.get("projectTitle").map_or(true, FieldValue::is_blank);
    if title_missing {
        values.insert(
            "projectTitle".to_string(),
            FieldValue::Text(derive_title(raw, now)),
        );
    }

    let created_at = raw
        .get("createdAt")
        .and_then(Value::as_str)
        .and_then(Timestamp::parse_rfc3339)
        .unwrap_or(now);

    Brief::from_parts(values, created_at, now)
}

/// Text coercion: strings pass through, other scalars are printed, non-empty
/// containers become JSON text, null and empty containers become "".
pub(crate) fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if items.is_empty() => String::new(),
        Value::Object(map) if map.is_empty() => String::new(),
        container => container.to_string(),
    }
}

/// List coercion: arrays keep their stringified elements, strings are split
/// on commas, semicolons and newlines, objects contribute their values, and
/// anything else yields an empty list. Blank entries are dropped.
pub(crate) fn coerce_list(value: &Value) -> Vec<String> {
    let entries: Vec<String> = match value {
        Value::Array(items) => items.iter().map(coerce_text).collect(),
        Value::String(s) => split_entries(s),
        Value::Object(map) => map.values().map(coerce_text).collect(),
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Splits free text into list entries on `,`, `;` and line breaks.
pub fn split_entries(text: &str) -> Vec<String> {
    text.split([',', ';', '\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixed_now() -> Timestamp {
        Timestamp::parse_rfc3339("2025-03-01T12:00:00Z").unwrap()
    }

    #[test]
    fn non_object_input_yields_empty_canonical_brief() {
        let brief = normalize_at(&json!("garbage"), fixed_now());
        for f in BRIEF_FIELDS {
            assert_eq!(brief.get(f.key).unwrap().kind(), f.kind());
        }
        assert_eq!(brief.title(), "Brief 2025-03-01 12:00");
    }

    #[test]
    fn scalar_fields_stringify_non_strings() {
        let raw = json!({
            "briefSummary": 42,
            "businessChallenge": { "core": "Baja recordación" },
            "brandPositioning": null,
            "problemStatement": true,
        });
        let brief = normalize_at(&raw, fixed_now());

        assert_eq!(brief.get("briefSummary"), Some(&FieldValue::text("42")));
        assert_eq!(
            brief.get("businessChallenge"),
            Some(&FieldValue::text(r#"{"core":"Baja recordación"}"#))
        );
        assert_eq!(brief.get("brandPositioning"), Some(&FieldValue::text("")));
        assert_eq!(brief.get("problemStatement"), Some(&FieldValue::text("true")));
    }

    #[test]
    fn empty_containers_at_scalar_fields_become_empty_text() {
        let raw = json!({ "briefSummary": {}, "businessChallenge": [] });
        let brief = normalize_at(&raw, fixed_now());
        assert_eq!(brief.get("briefSummary"), Some(&FieldValue::text("")));
        assert_eq!(brief.get("businessChallenge"), Some(&FieldValue::text("")));
    }

    #[test]
    fn list_fields_split_strings_and_flatten_objects() {
        let raw = json!({
            "strategicObjectives": "Subir ventas 10%, Ganar awareness; Fidelizar\nCrecer",
            "nextSteps": { "a": "Aprobar brief", "b": " ", "c": 3 },
            "targetAudience": { "insights": ["  Buscan precio ", "", 7] },
            "appendix": { "references": 12 },
        });
        let brief = normalize_at(&raw, fixed_now());

        assert_eq!(
            brief.get("strategicObjectives"),
            Some(&FieldValue::list(["Subir ventas 10%", "Ganar awareness", "Fidelizar", "Crecer"]))
        );
        assert_eq!(brief.get("nextSteps"), Some(&FieldValue::list(["Aprobar brief", "3"])));
        assert_eq!(
            brief.get("targetAudience.insights"),
            Some(&FieldValue::list(["Buscan precio", "7"]))
        );
        assert_eq!(brief.get("appendix.references"), Some(&FieldValue::List(vec![])));
    }

    #[test]
    fn created_at_is_preserved_and_updated_at_is_stamped() {
        let raw = json!({ "createdAt": "2024-01-15T10:30:00Z", "updatedAt": "2024-01-16T10:30:00Z" });
        let brief = normalize_at(&raw, fixed_now());

        assert_eq!(brief.created_at(), Timestamp::parse_rfc3339("2024-01-15T10:30:00Z").unwrap());
        assert_eq!(brief.updated_at(), fixed_now());
    }

    #[test]
    fn missing_created_at_is_stamped_with_now() {
        let brief = normalize_at(&json!({}), fixed_now());
        assert_eq!(brief.created_at(), fixed_now());
    }

    #[test]
    fn title_falls_back_to_summary() {
        let raw = json!({ "briefSummary": "Lanzamiento de la bebida Sol. Detalles después." });
        let brief = normalize_at(&raw, fixed_now());
        assert_eq!(brief.title(), "Lanzamiento de la bebida Sol");
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let raw = json!({ "overallScore": 80, "projectTitle": "Campaña" });
        let json = normalize_at(&raw, fixed_now()).to_json();
        assert!(json.get("overallScore").is_none());
    }

    #[test]
    fn normalize_is_idempotent_on_messy_input() {
        let raw = json!({
            "title": "  Campaña Otoño ",
            "strategicObjectives": "uno, dos",
            "targetAudience": "no es un objeto",
            "successMetrics": { "primary": { "x": "CTR 2%" }, "secondary": [null, "NPS"] },
            "createdAt": "not a date",
        });
        let once = normalize_at(&raw, fixed_now());
        let twice = normalize_at(&once.to_json(), fixed_now());
        assert_eq!(once, twice);
    }

    #[test]
    fn split_entries_drops_blank_segments() {
        assert_eq!(split_entries("a,, b ;\n\nc"), vec!["a", "b", "c"]);
        assert!(split_entries(" , ; ").is_empty());
    }
}
