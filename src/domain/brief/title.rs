//! Brief title derivation.

use serde_json::Value;

use super::normalizer::{coerce_list, coerce_text};
use crate::domain::foundation::Timestamp;

const MAX_DERIVED_TITLE_CHARS: usize = 60;

/// Picks a display title for a raw brief document.
///
/// Order: `projectTitle`, `title`, first sentence of the summary, first
/// strategic objective, first key message, then a dated default.
pub fn generate_brief_title(raw: &Value) -> String {
    derive_title(raw, Timestamp::now())
}

pub(crate) fn derive_title(raw: &Value, now: Timestamp) -> String {
    for key in ["projectTitle", "title"] {
        if let Some(title) = raw.get(key).map(coerce_text) {
            let title = title.trim();
            if !title.is_empty() {
                return title.to_string();
            }
        }
    }

    for key in ["briefSummary", "summary"] {
        if let Some(summary) = raw.get(key).map(coerce_text) {
            if let Some(sentence) = first_sentence(&summary) {
                return shorten(sentence);
            }
        }
    }

    let first_objective = raw
        .get("strategicObjectives")
        .map(coerce_list)
        .and_then(|items| items.into_iter().next());
    if let Some(objective) = first_objective {
        return shorten(&objective);
    }

    let key_message = raw
        .get("creativeStrategy")
        .and_then(|c| c.get("messageHierarchy"))
        .or_else(|| raw.get("keyMessages"))
        .map(coerce_list)
        .and_then(|items| items.into_iter().next());
    if let Some(message) = key_message {
        return shorten(&message);
    }

    format!("Brief {}", now.short_label())
}

fn first_sentence(text: &str) -> Option<&str> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn shorten(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= MAX_DERIVED_TITLE_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_DERIVED_TITLE_CHARS - 1).collect();
    format!("{}…", cut.trim_end())
}
