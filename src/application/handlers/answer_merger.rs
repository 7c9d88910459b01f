//! Answer merge with local fallback.
//!
//! `merge` is total: when the model path fails for any reason the answer is
//! written locally, and the result is always a normalized brief.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::brief::{
    normalize, registry, split_entries, Brief, FieldKind, FieldPath, FieldValue,
};
use crate::ports::BriefUpdater;

/// Which path produced a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeSource {
    Model,
    Local,
}

/// Outcome of merging one answer.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub brief: Brief,
    /// Confirmation shown to the user.
    pub message: String,
    pub source: MergeSource,
}

/// Writes user answers into a brief.
#[derive(Clone)]
pub struct AnswerMerger {
    updater: Option<Arc<dyn BriefUpdater>>,
}

impl AnswerMerger {
    pub fn new(updater: Arc<dyn BriefUpdater>) -> Self {
        Self {
            updater: Some(updater),
        }
    }

    /// A merger that never calls a model.
    pub fn local_only() -> Self {
        Self { updater: None }
    }

    pub async fn merge(&self, brief: &Brief, field: &FieldPath, answer: &str) -> MergeOutcome {
        let Some(updater) = &self.updater else {
            return local_outcome(brief, field, answer);
        };

        match updater.update(brief, field, answer).await {
            Ok(payload) => {
                debug!(field = %field, "answer merged by model");
                let message = payload
                    .message
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| default_confirmation(field));
                MergeOutcome {
                    brief: normalize(&with_created_at(payload.updated_brief, brief)),
                    message,
                    source: MergeSource::Model,
                }
            }
            Err(err) => {
                warn!(field = %field, error = %err, "model merge failed, merging locally");
                local_outcome(brief, field, answer)
            }
        }
    }
}

/// Writes `answer` at `field` without a model: list fields get the answer
/// split into entries, text fields get it trimmed.
pub fn local_merge(brief: &Brief, field: &FieldPath, answer: &str) -> Brief {
    let value = match field.kind() {
        FieldKind::List => FieldValue::List(split_entries(answer)),
        FieldKind::Text => FieldValue::Text(answer.trim().to_string()),
    };
    normalize(&brief.set(field, value).to_json())
}

fn local_outcome(brief: &Brief, field: &FieldPath, answer: &str) -> MergeOutcome {
    MergeOutcome {
        brief: local_merge(brief, field, answer),
        message: default_confirmation(field),
        source: MergeSource::Local,
    }
}

fn default_confirmation(field: &FieldPath) -> String {
    format!("¡Gracias! He actualizado {}.", registry::label_for(field.as_str()))
}

/// Models tend to drop `createdAt`; keep the original one.
fn with_created_at(mut raw: Value, current: &Brief) -> Value {
    if let Value::Object(map) = &mut raw {
        map.entry("createdAt")
            .or_insert_with(|| Value::String(current.created_at().to_rfc3339()));
    }
    raw
}
