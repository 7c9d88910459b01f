//! AI Provider Adapters.
//!
//! - `OpenAIProvider` - OpenAI chat completions
//! - `AnthropicProvider` - Anthropic Messages API
//! - `FailoverAIProvider` - ordered chain with failover on transport errors
//! - `MockAIProvider` - queued responses for tests and offline runs
//! - `build_provider_chain` - chain assembly from `AiConfig`

mod anthropic_provider;
mod failover_provider;
mod mock_provider;
mod openai_provider;
mod provider_chain;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use failover_provider::{events as ai_events, AIEventCallback, FailoverAIProvider, NoOpEventCallback};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
pub use provider_chain::build_provider_chain;
