//! AI provider configuration

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
///
/// Keys are optional: without any key the generation flow reports a
/// configuration error instead of refusing to start.
#[derive(Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// First model tried
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Last model tried, after Anthropic
    #[serde(default = "default_openai_fallback_model")]
    pub openai_fallback_model: String,

    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,

    /// Per-request HTTP timeout in seconds. Must stay below the generation
    /// budget so later links of the chain still get a turn.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Upper bound for the whole generation flow in seconds
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,

    /// Retries per provider on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl AiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn has_any_provider(&self) -> bool {
        self.has_openai() || self.has_anthropic()
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_timeout_secs == 0 || self.generation_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.request_timeout_secs >= self.generation_timeout_secs {
            return Err(ValidationError::RequestTimeoutExceedsBudget {
                request_secs: self.request_timeout_secs,
                generation_secs: self.generation_timeout_secs,
            });
        }
        if !is_http_url(&self.openai_base_url) {
            return Err(ValidationError::InvalidBaseUrl("openai"));
        }
        if !is_http_url(&self.anthropic_base_url) {
            return Err(ValidationError::InvalidBaseUrl("anthropic"));
        }
        if self.openai_model.trim().is_empty() || self.openai_fallback_model.trim().is_empty() {
            return Err(ValidationError::EmptyModel("openai"));
        }
        if self.anthropic_model.trim().is_empty() {
            return Err(ValidationError::EmptyModel("anthropic"));
        }
        Ok(())
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("AiConfig")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("anthropic_api_key", &redact(&self.anthropic_api_key))
            .field("openai_model", &self.openai_model)
            .field("openai_fallback_model", &self.openai_fallback_model)
            .field("anthropic_model", &self.anthropic_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("generation_timeout_secs", &self.generation_timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            openai_model: default_openai_model(),
            openai_fallback_model: default_openai_fallback_model(),
            anthropic_model: default_anthropic_model(),
            openai_base_url: default_openai_base_url(),
            anthropic_base_url: default_anthropic_base_url(),
            request_timeout_secs: default_request_timeout(),
            generation_timeout_secs: default_generation_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_openai_fallback_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_request_timeout() -> u64 {
    4
}

fn default_generation_timeout() -> u64 {
    15
}

fn default_retries() -> u32 {
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.openai_fallback_model, "gpt-4o-mini");
        assert_eq!(config.generation_timeout(), Duration::from_secs(15));
        assert_eq!(config.max_retries, 0);
        assert!(!config.has_any_provider());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_chain_fits_generation_budget() {
        let config = AiConfig::default();
        // Three links, each one attempt.
        assert!(config.request_timeout() * 3 < config.generation_timeout());
    }

    #[test]
    fn test_validation_request_timeout_within_budget() {
        let config = AiConfig {
            request_timeout_secs: 30,
            generation_timeout_secs: 15,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::RequestTimeoutExceedsBudget {
                request_secs: 30,
                generation_secs: 15,
            })
        );

        let equal = AiConfig {
            request_timeout_secs: 15,
            ..Default::default()
        };
        assert!(equal.validate().is_err());
    }

    #[test]
    fn test_has_provider_checks() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            anthropic_api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.has_openai());
        assert!(!config.has_anthropic());
        assert!(config.has_any_provider());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = AiConfig {
            generation_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validation_bad_base_url() {
        let config = AiConfig {
            anthropic_base_url: "api.anthropic.com".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidBaseUrl("anthropic"))
        );
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = AiConfig {
            openai_api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("[REDACTED]"));
    }
}
