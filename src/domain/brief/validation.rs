//! Structural validation of a brief before it is shown or exported.

use serde::Serialize;

use super::document::Brief;
use super::field::FieldValue;
use super::registry::{self, fields_in_section};

/// Fields whose absence makes a brief invalid.
const MANDATORY_FIELDS: &[&str] = &["projectTitle", "briefSummary", "strategicObjectives"];

/// Sections that should carry at least one filled field.
const RECOMMENDED_SECTIONS: &[&str] = &[
    "targetAudience",
    "creativeStrategy",
    "channelStrategy",
    "successMetrics",
];

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Checks mandatory fields (errors) and recommended sections (warnings).
pub fn validate(brief: &Brief) -> BriefValidation {
    let errors: Vec<String> = MANDATORY_FIELDS
        .iter()
        .filter(|key| is_blank(brief, key))
        .map(|key| format!("Falta el campo obligatorio: {}", registry::label_for(key)))
        .collect();

    let warnings = RECOMMENDED_SECTIONS
        .iter()
        .filter(|section| fields_in_section(section).all(|f| is_blank(brief, f.key)))
        .map(|section| format!("Se recomienda agregar: {}", registry::label_for(section)))
        .collect();

    BriefValidation {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn is_blank(brief: &Brief, key: &str) -> bool {
    brief.get(key).map_or(true, FieldValue::is_blank)
}
