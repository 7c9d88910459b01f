//! Field paths and the tagged field value.
//!
//! A brief field is addressed by a dotted path with at most one level of
//! nesting (`targetAudience.primary`). Its value is either free text or a
//! list of strings; which one is decided by the path alone.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Fields that must always serialize as lists of strings.
pub const ARRAY_FIELDS: &[&str] = &[
    "strategicObjectives",
    "targetAudience.insights",
    "creativeStrategy.messageHierarchy",
    "creativeStrategy.creativeMandatories",
    "successMetrics.primary",
    "successMetrics.secondary",
    "budgetConsiderations.keyInvestments",
    "budgetConsiderations.costOptimization",
    "riskAssessment.risks",
    "nextSteps",
    "appendix.assumptions",
    "appendix.references",
];

/// Dotted locator into the brief (`field` or `parent.child`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(String);

impl FieldPath {
    /// Parses a dotted path, rejecting empty segments and deeper nesting.
    pub fn new(path: impl Into<String>) -> Result<Self, ValidationError> {
        let path = path.into();
        let segments: Vec<&str> = path.split('.').collect();

        if path.trim().is_empty() {
            return Err(ValidationError::empty_field("field_path"));
        }
        if segments.len() > 2 {
            return Err(ValidationError::invalid_format(
                "field_path",
                format!("'{}' nests deeper than parent.child", path),
            ));
        }
        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(ValidationError::invalid_format(
                "field_path",
                format!("'{}' has an empty segment", path),
            ));
        }

        Ok(Self(path))
    }

    pub(crate) fn from_static(path: &'static str) -> Self {
        Self(path.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `(parent, Some(child))` for nested paths, `(field, None)` otherwise.
    pub fn segments(&self) -> (&str, Option<&str>) {
        match self.0.split_once('.') {
            Some((parent, child)) => (parent, Some(child)),
            None => (self.0.as_str(), None),
        }
    }

    pub fn is_nested(&self) -> bool {
        self.0.contains('.')
    }

    /// The value shape this path must hold.
    pub fn kind(&self) -> FieldKind {
        FieldKind::for_path(&self.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.0
    }
}

/// Shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    List,
}

impl FieldKind {
    /// List for the array allow-list, text for everything else.
    pub fn for_path(path: &str) -> Self {
        if ARRAY_FIELDS.contains(&path) {
            FieldKind::List
        } else {
            FieldKind::Text
        }
    }

    /// The empty value of this shape.
    pub fn empty_value(&self) -> FieldValue {
        match self {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::List => FieldValue::List(Vec::new()),
        }
    }
}

/// A brief field value: free text or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::List(_) => FieldKind::List,
        }
    }

    /// True for whitespace-only text and lists without a non-blank item.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.iter().all(|i| i.trim().is_empty()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            FieldValue::Text(_) => None,
        }
    }

    /// First non-blank item of a list, or the trimmed text.
    pub fn first_entry(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.trim()).filter(|s| !s.is_empty()),
            FieldValue::List(items) => items.iter().map(|i| i.trim()).find(|i| !i.is_empty()),
        }
    }

    /// Single-line rendering used when quoting a value back to the user.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.trim().to_string(),
            FieldValue::List(items) => items
                .iter()
                .map(|i| i.trim())
                .filter(|i| !i.is_empty())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// Reads `path` out of an arbitrary JSON document.
///
/// Missing parents, missing children and non-object parents all read as `None`.
pub fn lookup<'a>(doc: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    match path.segments() {
        (field, None) => doc.get(field),
        (parent, Some(child)) => doc.get(parent).and_then(|p| p.get(child)),
    }
}
