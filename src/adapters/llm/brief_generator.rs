//! LLM-backed brief generation.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::prompts::{generation_user_prompt, GENERATION_SYSTEM_PROMPT};
use crate::domain::extraction::JsonExtractor;
use crate::ports::{
    AIProvider, BriefGenerator, CapabilityError, CompletionRequest, MessageRole, RequestMetadata,
};

const MAX_TOKENS: u32 = 4000;
const TEMPERATURE: f32 = 0.3;

pub struct LlmBriefGenerator {
    provider: Arc<dyn AIProvider>,
    extractor: JsonExtractor,
}

impl LlmBriefGenerator {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            extractor: JsonExtractor::new(),
        }
    }
}

#[async_trait]
impl BriefGenerator for LlmBriefGenerator {
    async fn generate(&self, transcription: &str) -> Result<Value, CapabilityError> {
        let request = CompletionRequest::new(RequestMetadata::new("generate_brief"))
            .with_system_prompt(GENERATION_SYSTEM_PROMPT)
            .with_message(MessageRole::User, generation_user_prompt(transcription))
            .with_max_tokens(MAX_TOKENS)
            .with_temperature(TEMPERATURE)
            .with_json_output();

        let response = self.provider.complete(request).await?;
        debug!(model = %response.model, chars = response.content.len(), "brief generated");

        Ok(self.extractor.extract_generated_brief(&response.content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::extraction::ExtractionError;
    use crate::ports::AIError;
    use serde_json::json;

    #[tokio::test]
    async fn returns_extracted_brief() {
        let body = json!({
            "projectTitle": "Relanzamiento",
            "strategicObjectives": ["Crecer 10%"],
            "targetAudience": { "primary": "Familias" }
        });
        let mock = MockAIProvider::new().with_response(format!("```json\n{}\n```", body));
        let generator = LlmBriefGenerator::new(Arc::new(mock.clone()));

        let brief = generator.generate("transcripción").await.unwrap();

        assert_eq!(brief["projectTitle"], "Relanzamiento");
        let call = &mock.get_calls()[0];
        assert!(call.json_output);
        assert_eq!(call.metadata.purpose, "generate_brief");
        assert!(call.messages[0].content.contains("transcripción"));
    }

    #[tokio::test]
    async fn malformed_output_is_reported() {
        let mock = MockAIProvider::new().with_response("not a json");
        let generator = LlmBriefGenerator::new(Arc::new(mock));

        let err = generator.generate("x").await.unwrap_err();
        assert_eq!(err, CapabilityError::MalformedOutput(ExtractionError::NoJson));
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let mock = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let generator = LlmBriefGenerator::new(Arc::new(mock));

        let err = generator.generate("x").await.unwrap_err();
        assert_eq!(err, CapabilityError::Provider(AIError::AuthenticationFailed));
    }
}
