//! The canonical brief document and its field accessor.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::field::{FieldPath, FieldValue};
use super::registry::{self, BRIEF_FIELDS};
use crate::domain::foundation::Timestamp;

/// A marketing brief in canonical shape.
///
/// Values are keyed by dotted path. A normalized brief holds every registered
/// field with the shape its path dictates; nested parents are implicit and
/// always rendered as objects by [`Brief::to_json`].
#[derive(Debug, Clone, PartialEq)]
pub struct Brief {
    values: BTreeMap<String, FieldValue>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Brief {
    /// A brief with every registered field present and empty.
    pub fn empty(now: Timestamp) -> Self {
        let values = BRIEF_FIELDS
            .iter()
            .map(|f| (f.key.to_string(), f.kind().empty_value()))
            .collect();
        Self {
            values,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn from_parts(
        values: BTreeMap<String, FieldValue>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            values,
            created_at,
            updated_at,
        }
    }

    /// Value at `key`, or `None` when nothing was ever written there.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Returns a copy with `value` written at `path`; `self` is untouched.
    pub fn set(&self, path: &FieldPath, value: FieldValue) -> Brief {
        let mut next = self.clone();
        next.values.insert(path.as_str().to_string(), value);
        next
    }

    /// Trimmed project title, empty when unset.
    pub fn title(&self) -> &str {
        self.get("projectTitle")
            .and_then(FieldValue::as_text)
            .map(str::trim)
            .unwrap_or("")
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Nested JSON rendering with camelCase keys.
    ///
    /// Registered fields come first in declaration order; parents of nested
    /// fields are created on demand.
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();

        let mut keys: Vec<&str> = BRIEF_FIELDS.iter().map(|f| f.key).collect();
        keys.extend(
            self.values
                .keys()
                .map(String::as_str)
                .filter(|k| registry::field(k).is_none()),
        );

        for key in keys {
            let Some(value) = self.values.get(key) else {
                continue;
            };
            match key.split_once('.') {
                Some((parent, child)) => {
                    let slot = root
                        .entry(parent.to_string())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if !slot.is_object() {
                        *slot = Value::Object(Map::new());
                    }
                    if let Value::Object(obj) = slot {
                        obj.insert(child.to_string(), value.to_json());
                    }
                }
                None => {
                    root.insert(key.to_string(), value.to_json());
                }
            }
        }

        root.insert("createdAt".to_string(), Value::String(self.created_at.to_rfc3339()));
        root.insert("updatedAt".to_string(), Value::String(self.updated_at.to_rfc3339()));
        Value::Object(root)
    }
}

impl Serialize for Brief {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(key: &str) -> FieldPath {
        FieldPath::new(key).unwrap()
    }

    #[test]
    fn empty_brief_holds_every_registered_field() {
        let brief = Brief::empty(Timestamp::now());
        for f in BRIEF_FIELDS {
            let value = brief.get(f.key).unwrap();
            assert_eq!(value.kind(), f.kind());
            assert!(value.is_blank());
        }
    }

    #[test]
    fn get_returns_none_for_unknown_paths() {
        let brief = Brief::empty(Timestamp::now());
        assert!(brief.get("does.notExist").is_none());
    }

    #[test]
    fn set_returns_copy_and_leaves_original() {
        let original = Brief::empty(Timestamp::now());
        let updated = original.set(&path("targetAudience.primary"), FieldValue::text("Pymes"));

        assert_eq!(updated.get("targetAudience.primary"), Some(&FieldValue::text("Pymes")));
        assert_eq!(original.get("targetAudience.primary"), Some(&FieldValue::text("")));
    }

    #[test]
    fn set_creates_parent_for_unregistered_nested_key() {
        let brief = Brief::empty(Timestamp::now())
            .set(&path("extras.note"), FieldValue::text("hola"));
        let json = brief.to_json();
        assert_eq!(json["extras"]["note"], json!("hola"));
    }

    #[test]
    fn to_json_always_renders_sections_as_objects() {
        let json = Brief::empty(Timestamp::now()).to_json();
        for section in ["targetAudience", "creativeStrategy", "appendix"] {
            assert!(json[section].is_object(), "{} should be an object", section);
        }
        assert_eq!(json["strategicObjectives"], json!([]));
        assert_eq!(json["briefSummary"], json!(""));
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn title_is_trimmed() {
        let brief = Brief::empty(Timestamp::now())
            .set(&path("projectTitle"), FieldValue::text("  Campaña Verano  "));
        assert_eq!(brief.title(), "Campaña Verano");
    }
}
