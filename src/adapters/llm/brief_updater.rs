//! LLM-backed answer merge.

use async_trait::async_trait;
use std::sync::Arc;

use super::prompts::{update_user_prompt, UPDATE_SYSTEM_PROMPT};
use crate::domain::brief::{registry, Brief, FieldPath};
use crate::domain::extraction::{BriefUpdatePayload, JsonExtractor};
use crate::ports::{
    AIProvider, BriefUpdater, CapabilityError, CompletionRequest, MessageRole, RequestMetadata,
};

const MAX_TOKENS: u32 = 4000;
const TEMPERATURE: f32 = 0.2;

pub struct LlmBriefUpdater {
    provider: Arc<dyn AIProvider>,
    extractor: JsonExtractor,
}

impl LlmBriefUpdater {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            extractor: JsonExtractor::new(),
        }
    }
}

#[async_trait]
impl BriefUpdater for LlmBriefUpdater {
    async fn update(
        &self,
        brief: &Brief,
        field: &FieldPath,
        answer: &str,
    ) -> Result<BriefUpdatePayload, CapabilityError> {
        let prompt = update_user_prompt(
            &brief.to_json(),
            field,
            registry::label_for(field.as_str()),
            answer,
        );
        let request = CompletionRequest::new(RequestMetadata::new("update_brief"))
            .with_system_prompt(UPDATE_SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt)
            .with_max_tokens(MAX_TOKENS)
            .with_temperature(TEMPERATURE)
            .with_json_output();

        let response = self.provider.complete(request).await?;
        Ok(self.extractor.extract_brief_update(&response.content)?)
    }
}
