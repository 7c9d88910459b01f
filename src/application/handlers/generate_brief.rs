//! GenerateBrief command handler.
//!
//! Turns a meeting transcription into a normalized, locally completed brief.
//! Malformed model output never reaches the caller as an error: it becomes a
//! placeholder brief that carries the failure text.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::brief::{complete_brief, normalize, Brief};
use crate::ports::{AIError, BriefGenerator, CapabilityError};

/// Title of the brief produced when the model output cannot be used.
pub const PLACEHOLDER_TITLE: &str = "⚠️ Error al generar el brief";

/// Upper bound for the whole generation flow.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(15);

/// Command to generate a brief.
#[derive(Debug, Clone)]
pub struct GenerateBriefCommand {
    pub transcription: String,
}

impl GenerateBriefCommand {
    pub fn new(transcription: impl Into<String>) -> Self {
        Self {
            transcription: transcription.into(),
        }
    }
}

/// Terminal failures of the generation flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateBriefError {
    #[error("Validation error: transcription cannot be empty")]
    EmptyTranscription,

    /// No model has credentials. Retrying will not help.
    #[error("No AI model is configured")]
    NotConfigured,

    #[error("All models failed: {0}")]
    AllModelsFailed(String),

    /// The provider refused the request for a reason other than transport.
    #[error("AI provider error: {0}")]
    Provider(String),
}

/// Result of a generation.
#[derive(Debug, Clone)]
pub struct GenerateBriefResult {
    pub brief: Brief,
    /// True when `brief` is the error placeholder.
    pub is_placeholder: bool,
}

/// Handler for brief generation.
pub struct GenerateBriefHandler {
    generator: Option<Arc<dyn BriefGenerator>>,
    timeout: Duration,
}

impl GenerateBriefHandler {
    pub fn new(generator: Arc<dyn BriefGenerator>) -> Self {
        Self {
            generator: Some(generator),
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// A handler with no model behind it. Every call fails with
    /// `NotConfigured`.
    pub fn unconfigured() -> Self {
        Self {
            generator: None,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn handle(
        &self,
        cmd: GenerateBriefCommand,
    ) -> Result<GenerateBriefResult, GenerateBriefError> {
        let transcription = cmd.transcription.trim();
        if transcription.is_empty() {
            return Err(GenerateBriefError::EmptyTranscription);
        }

        let generator = self
            .generator
            .as_ref()
            .ok_or(GenerateBriefError::NotConfigured)?;

        debug!(chars = transcription.len(), "generating brief");
        let outcome = tokio::time::timeout(self.timeout, generator.generate(transcription)).await;

        let raw = match outcome {
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "brief generation timed out");
                return Err(GenerateBriefError::AllModelsFailed(format!(
                    "timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
            Ok(Ok(raw)) => raw,
            Ok(Err(CapabilityError::MalformedOutput(err))) => {
                warn!(error = %err, "model returned an unusable brief, using placeholder");
                return Ok(GenerateBriefResult {
                    brief: placeholder_brief(&err.to_string()),
                    is_placeholder: true,
                });
            }
            Ok(Err(CapabilityError::Provider(err))) => return Err(err.into()),
        };

        let brief = complete_brief(&normalize(&raw));
        info!(title = brief.title(), "brief generated");
        Ok(GenerateBriefResult {
            brief,
            is_placeholder: false,
        })
    }
}

impl From<AIError> for GenerateBriefError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::NotConfigured => GenerateBriefError::NotConfigured,
            AIError::AllProvidersFailed { last_error, .. } => {
                GenerateBriefError::AllModelsFailed(last_error)
            }
            err if err.is_transport() => GenerateBriefError::AllModelsFailed(err.to_string()),
            err => GenerateBriefError::Provider(err.to_string()),
        }
    }
}

/// A brief that makes the failure visible instead of hiding it.
pub fn placeholder_brief(error: &str) -> Brief {
    normalize(&json!({
        "projectTitle": PLACEHOLDER_TITLE,
        "briefSummary": format!(
            "Error al procesar la respuesta del modelo: {}. Intenta generar el brief nuevamente.",
            error
        ),
    }))
}
