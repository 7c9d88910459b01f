//! JSON extraction and shape checks.

use serde_json::{Map, Value};
use thiserror::Error;

use super::sanitizer::{ResponseSanitizer, SanitizationError};
use crate::domain::evaluation::QualityAssessment;

/// Maximum length of a single string value after extraction.
pub const MAX_FIELD_LENGTH: usize = 10_000;

/// Top-level keys a generated brief must carry.
pub const REQUIRED_BRIEF_KEYS: &[&str] = &["strategicObjectives", "targetAudience"];

/// Keys that mark a quality analysis returned where a brief was expected.
pub const ANALYSIS_SHAPE_KEYS: &[&str] = &["overallScore", "strengths", "weaknesses"];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Sanitization failed: {0}")]
    Sanitization(#[from] SanitizationError),

    #[error("No JSON object found in response")]
    NoJson,

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Expected a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Response is an analysis, not a brief")]
    AnalysisShape,
}

/// Payload returned by the brief update capability.
#[derive(Debug, Clone, PartialEq)]
pub struct BriefUpdatePayload {
    pub updated_brief: Value,
    /// Confirmation to show the user; `None` when blank or absent.
    pub message: Option<String>,
}

/// Extracts structured data from model responses.
#[derive(Debug, Clone, Default)]
pub struct JsonExtractor {
    sanitizer: ResponseSanitizer,
}

impl JsonExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the outermost JSON object of `response`.
    pub fn extract_object(&self, response: &str) -> Result<Map<String, Value>, ExtractionError> {
        let sanitized = self.sanitizer.sanitize(response)?;
        let candidate = locate_json(&sanitized).ok_or(ExtractionError::NoJson)?;
        let value: Value = serde_json::from_str(candidate)
            .map_err(|e| ExtractionError::ParseError(e.to_string()))?;
        match clean_strings(value) {
            Value::Object(map) => Ok(map),
            _ => Err(ExtractionError::NotAnObject),
        }
    }

    /// Extracts a freshly generated brief.
    pub fn extract_generated_brief(&self, response: &str) -> Result<Value, ExtractionError> {
        let map = self.extract_object(response)?;
        check_brief_shape(&map)?;
        Ok(Value::Object(map))
    }

    /// Extracts `{ updatedBrief, message }`.
    ///
    /// `updatedBrief` goes through the same shape checks as a generated
    /// brief; a partial or analysis-shaped body is refused.
    pub fn extract_brief_update(&self, response: &str) -> Result<BriefUpdatePayload, ExtractionError> {
        let mut map = self.extract_object(response)?;
        let updated_brief = match map.remove("updatedBrief") {
            Some(Value::Object(brief)) => {
                check_brief_shape(&brief)?;
                Value::Object(brief)
            }
            Some(_) => return Err(ExtractionError::NotAnObject),
            None => return Err(ExtractionError::MissingField("updatedBrief".to_string())),
        };
        let message = map
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        Ok(BriefUpdatePayload {
            updated_brief,
            message,
        })
    }

    /// Extracts a quality assessment.
    pub fn extract_assessment(&self, response: &str) -> Result<QualityAssessment, ExtractionError> {
        let map = self.extract_object(response)?;
        if !map.contains_key("overallScore") {
            return Err(ExtractionError::MissingField("overallScore".to_string()));
        }
        serde_json::from_value(Value::Object(map))
            .map_err(|e| ExtractionError::ParseError(e.to_string()))
    }
}

/// Analysis shape first, so an analysis that happens to carry the required
/// keys is still refused.
fn check_brief_shape(map: &Map<String, Value>) -> Result<(), ExtractionError> {
    if ANALYSIS_SHAPE_KEYS.iter().any(|key| map.contains_key(*key)) {
        return Err(ExtractionError::AnalysisShape);
    }
    for key in REQUIRED_BRIEF_KEYS {
        if !map.contains_key(*key) {
            return Err(ExtractionError::MissingField((*key).to_string()));
        }
    }
    Ok(())
}

/// Finds the JSON text inside a response: a fenced block when present,
/// otherwise the outermost balanced object.
fn locate_json(response: &str) -> Option<&str> {
    let text = strip_code_fence(response.trim());
    let start = text.find('{')?;
    match balanced_end(text, start) {
        Some(end) => Some(&text[start..end]),
        None => {
            // Unbalanced: fall back to the last closing brace.
            let end = text.rfind('}')?;
            (end > start).then(|| &text[start..=end])
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    const FENCES: &[&str] = &["```json", "```JSON", "```"];
    for fence in FENCES {
        if let Some(open) = text.find(fence) {
            let body = &text[open + fence.len()..];
            let body = match body.find("```") {
                Some(close) => &body[..close],
                None => body,
            };
            if body.contains('{') {
                return body.trim();
            }
        }
    }
    text
}

/// Byte offset just past the brace matching the one at `start`.
fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(start + offset + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

fn clean_strings(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(clean_string(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(clean_strings).collect()),
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k, clean_strings(v))).collect())
        }
        other => other,
    }
}

/// Strips HTML-like tags and caps the length.
fn clean_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '<' if chars.peek().map_or(false, |n| n.is_ascii_alphabetic() || *n == '/') => {
                in_tag = true
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    if result.chars().count() > MAX_FIELD_LENGTH {
        let cut: String = result.chars().take(MAX_FIELD_LENGTH).collect();
        format!("{}...[truncated]", cut)
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extractor() -> JsonExtractor {
        JsonExtractor::new()
    }

    mod locating {
        use super::*;

        #[test]
        fn parses_plain_object() {
            let map = extractor().extract_object(r#"{"a": 1}"#).unwrap();
            assert_eq!(map["a"], 1);
        }

        #[test]
        fn unwraps_json_code_fence() {
            let response = "Aquí está el brief:\n```json\n{\"projectTitle\": \"Café\"}\n```\nSaludos";
            let map = extractor().extract_object(response).unwrap();
            assert_eq!(map["projectTitle"], "Café");
        }

        #[test]
        fn unwraps_unlabeled_fence() {
            let map = extractor().extract_object("```\n{\"x\": true}\n```").unwrap();
            assert_eq!(map["x"], true);
        }

        #[test]
        fn finds_outermost_object_after_preamble() {
            let response = "Claro. {\"a\": {\"b\": \"}\"}, \"c\": \"ñandú\"} y nada más {\"d\": 2}";
            let map = extractor().extract_object(response).unwrap();
            assert_eq!(map["a"]["b"], "}");
            assert_eq!(map["c"], "ñandú");
            assert!(!map.contains_key("d"));
        }

        #[test]
        fn handles_escaped_quotes_inside_strings() {
            let map = extractor()
                .extract_object(r#"{"quote": "dijo \"hola {\" y se fue"}"#)
                .unwrap();
            assert_eq!(map["quote"], "dijo \"hola {\" y se fue");
        }

        #[test]
        fn rejects_text_without_json() {
            assert_eq!(extractor().extract_object("not a json"), Err(ExtractionError::NoJson));
        }

        #[test]
        fn reports_parse_errors() {
            assert!(matches!(
                extractor().extract_object("{\"a\": }"),
                Err(ExtractionError::ParseError(_))
            ));
        }

        #[test]
        fn strips_html_tags_but_keeps_comparisons() {
            let map = extractor()
                .extract_object(r#"{"a": "<b>negrita</b> con CPA < 5"}"#)
                .unwrap();
            assert_eq!(map["a"], "negrita con CPA < 5");
        }
    }

    mod shapes {
        use super::*;

        #[test]
        fn accepts_generated_brief_with_required_keys() {
            let response = json!({
                "projectTitle": "Lanzamiento",
                "strategicObjectives": ["Crecer 10%"],
                "targetAudience": { "primary": "Jóvenes" }
            })
            .to_string();
            let brief = extractor().extract_generated_brief(&response).unwrap();
            assert_eq!(brief["projectTitle"], "Lanzamiento");
        }

        #[test]
        fn rejects_brief_missing_required_key() {
            let response = json!({ "strategicObjectives": [] }).to_string();
            assert_eq!(
                extractor().extract_generated_brief(&response),
                Err(ExtractionError::MissingField("targetAudience".into()))
            );
        }

        #[test]
        fn rejects_analysis_shape_even_with_required_keys() {
            let response = json!({
                "overallScore": 80,
                "strengths": ["claro"],
                "strategicObjectives": [],
                "targetAudience": {}
            })
            .to_string();
            assert_eq!(
                extractor().extract_generated_brief(&response),
                Err(ExtractionError::AnalysisShape)
            );
        }

        #[test]
        fn extracts_update_payload() {
            let response = json!({
                "updatedBrief": {
                    "projectTitle": "Nuevo",
                    "strategicObjectives": [],
                    "targetAudience": {}
                },
                "message": "  Listo, actualizado.  "
            })
            .to_string();
            let payload = extractor().extract_brief_update(&response).unwrap();
            assert_eq!(payload.updated_brief["projectTitle"], "Nuevo");
            assert_eq!(payload.message.as_deref(), Some("Listo, actualizado."));
        }

        #[test]
        fn update_without_updated_brief_is_rejected() {
            assert_eq!(
                extractor().extract_brief_update(r#"{"message": "ok"}"#),
                Err(ExtractionError::MissingField("updatedBrief".into()))
            );
        }

        #[test]
        fn blank_update_message_is_none() {
            let payload = extractor()
                .extract_brief_update(
                    r#"{"updatedBrief": {"strategicObjectives": [], "targetAudience": {}}, "message": " "}"#,
                )
                .unwrap();
            assert_eq!(payload.message, None);
        }

        #[test]
        fn partial_updated_brief_is_rejected() {
            assert_eq!(
                extractor().extract_brief_update(r#"{"updatedBrief": {"nextSteps": ["Llamar"]}}"#),
                Err(ExtractionError::MissingField("strategicObjectives".into()))
            );
        }

        #[test]
        fn analysis_shaped_updated_brief_is_rejected() {
            let response = json!({
                "updatedBrief": {
                    "overallScore": 80,
                    "strengths": ["Claro"],
                    "weaknesses": ["Corto"],
                    "strategicObjectives": [],
                    "targetAudience": {}
                },
                "message": "Listo"
            })
            .to_string();
            assert_eq!(
                extractor().extract_brief_update(&response),
                Err(ExtractionError::AnalysisShape)
            );
        }

        #[test]
        fn extracts_assessment() {
            let response = "```json\n{\"overallScore\": 88, \"isExcellent\": false, \"readyForProduction\": true, \"strengths\": [], \"remainingGaps\": [\"Riesgos\"], \"recommendation\": \"Añadir riesgos\"}\n```";
            let assessment = extractor().extract_assessment(response).unwrap();
            assert_eq!(assessment.overall_score.value(), 88);
            assert_eq!(assessment.remaining_gaps, vec!["Riesgos"]);
        }

        #[test]
        fn assessment_without_score_is_rejected() {
            assert_eq!(
                extractor().extract_assessment(r#"{"isExcellent": true}"#),
                Err(ExtractionError::MissingField("overallScore".into()))
            );
        }
    }
}
