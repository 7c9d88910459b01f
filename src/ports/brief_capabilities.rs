//! Brief capability ports.
//!
//! The three model-backed operations the engine relies on. Each is a plain
//! request/response call; callers decide how to fall back when one fails.

use async_trait::async_trait;
use serde_json::Value;

use super::ai_provider::AIError;
use crate::domain::brief::{Brief, FieldPath};
use crate::domain::evaluation::QualityAssessment;
use crate::domain::extraction::{BriefUpdatePayload, ExtractionError};

/// Failure of a capability call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CapabilityError {
    /// The provider chain could not produce a response.
    #[error(transparent)]
    Provider(#[from] AIError),

    /// A response arrived but had the wrong shape.
    #[error("malformed model output: {0}")]
    MalformedOutput(#[from] ExtractionError),
}

/// Creates a brief from a meeting transcription.
#[async_trait]
pub trait BriefGenerator: Send + Sync {
    /// Returns the raw brief document as the model produced it; callers
    /// normalize it.
    async fn generate(&self, transcription: &str) -> Result<Value, CapabilityError>;
}

/// Writes a user answer into a brief.
#[async_trait]
pub trait BriefUpdater: Send + Sync {
    async fn update(
        &self,
        brief: &Brief,
        field: &FieldPath,
        answer: &str,
    ) -> Result<BriefUpdatePayload, CapabilityError>;
}

/// Judges the overall quality of a brief.
#[async_trait]
pub trait QualityAssessor: Send + Sync {
    async fn assess(&self, brief: &Brief) -> Result<QualityAssessment, CapabilityError>;
}
