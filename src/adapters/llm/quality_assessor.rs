//! LLM-backed quality assessment.

use async_trait::async_trait;
use std::sync::Arc;

use super::prompts::{assessment_user_prompt, ASSESSMENT_SYSTEM_PROMPT};
use crate::domain::brief::Brief;
use crate::domain::evaluation::QualityAssessment;
use crate::domain::extraction::JsonExtractor;
use crate::ports::{
    AIProvider, CapabilityError, CompletionRequest, MessageRole, QualityAssessor, RequestMetadata,
};

const MAX_TOKENS: u32 = 1500;
const TEMPERATURE: f32 = 0.0;

pub struct LlmQualityAssessor {
    provider: Arc<dyn AIProvider>,
    extractor: JsonExtractor,
}

impl LlmQualityAssessor {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            extractor: JsonExtractor::new(),
        }
    }
}

#[async_trait]
impl QualityAssessor for LlmQualityAssessor {
    async fn assess(&self, brief: &Brief) -> Result<QualityAssessment, CapabilityError> {
        let request = CompletionRequest::new(RequestMetadata::new("assess_brief"))
            .with_system_prompt(ASSESSMENT_SYSTEM_PROMPT)
            .with_message(MessageRole::User, assessment_user_prompt(&brief.to_json()))
            .with_max_tokens(MAX_TOKENS)
            .with_temperature(TEMPERATURE)
            .with_json_output();

        let response = self.provider.complete(request).await?;
        Ok(self.extractor.extract_assessment(&response.content)?)
    }
}
