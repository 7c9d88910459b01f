//! Builds the provider chain from configuration.
//!
//! Order: OpenAI primary model, Anthropic, OpenAI fallback model. Providers
//! without a key are left out.

use secrecy::Secret;
use std::sync::Arc;
use tracing::info;

use super::{AnthropicConfig, AnthropicProvider, FailoverAIProvider, OpenAIConfig, OpenAIProvider};
use crate::config::AiConfig;
use crate::ports::{AIError, AIProvider};

/// # Errors
///
/// `AIError::NotConfigured` when no provider has a key.
pub fn build_provider_chain(config: &AiConfig) -> Result<FailoverAIProvider, AIError> {
    let mut chain: Vec<Arc<dyn AIProvider>> = Vec::new();

    let openai = |model: &str, key: &str| {
        OpenAIProvider::new(
            OpenAIConfig::from_secret(Secret::new(key.to_string()))
                .with_model(model)
                .with_base_url(&config.openai_base_url)
                .with_timeout(config.request_timeout())
                .with_max_retries(config.max_retries),
        )
    };

    let openai_key = config.openai_api_key.as_deref().filter(|_| config.has_openai());
    let anthropic_key = config
        .anthropic_api_key
        .as_deref()
        .filter(|_| config.has_anthropic());

    if let Some(key) = openai_key {
        chain.push(Arc::new(openai(&config.openai_model, key)?));
    }
    if let Some(key) = anthropic_key {
        chain.push(Arc::new(AnthropicProvider::new(
            AnthropicConfig::from_secret(Secret::new(key.to_string()))
                .with_model(&config.anthropic_model)
                .with_base_url(&config.anthropic_base_url)
                .with_timeout(config.request_timeout())
                .with_max_retries(config.max_retries),
        )?));
    }
    if let Some(key) = openai_key {
        if config.openai_fallback_model != config.openai_model {
            chain.push(Arc::new(openai(&config.openai_fallback_model, key)?));
        }
    }

    if chain.is_empty() {
        return Err(AIError::NotConfigured);
    }

    let provider = FailoverAIProvider::new(chain);
    info!(chain = %provider.provider_info().model, "AI provider chain ready");
    Ok(provider)
}
