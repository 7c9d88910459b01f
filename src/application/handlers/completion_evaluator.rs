//! Completion evaluation with an optional external assessment.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::brief::Brief;
use crate::domain::evaluation::{score_locally, CompletionResult};
use crate::ports::QualityAssessor;

/// Scores a brief. Never fails: every assessment problem degrades to the
/// local result.
#[derive(Clone)]
pub struct CompletionEvaluator {
    assessor: Option<Arc<dyn QualityAssessor>>,
}

impl CompletionEvaluator {
    pub fn new(assessor: Arc<dyn QualityAssessor>) -> Self {
        Self {
            assessor: Some(assessor),
        }
    }

    pub fn local_only() -> Self {
        Self { assessor: None }
    }

    pub async fn evaluate(&self, brief: &Brief) -> CompletionResult {
        let local = score_locally(brief);

        let Some(assessor) = &self.assessor else {
            return local;
        };
        if !local.warrants_assessment() {
            debug!(score = %local.completion_score, "score too low for external assessment");
            return local;
        }

        match assessor.assess(brief).await {
            Ok(assessment) => local.with_assessment(&assessment),
            Err(err) => {
                warn!(error = %err, "quality assessment failed, keeping local score");
                local
            }
        }
    }
}
