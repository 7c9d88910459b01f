//! Failover AI Provider - walks an ordered chain of providers.
//!
//! Transport failures (network errors, non-2xx statuses, timeouts) move on
//! to the next provider. Any other error, such as a filtered response, is
//! returned as is. When every provider fails the caller gets
//! `AIError::AllProvidersFailed`.
//!
//! # Example
//!
//! ```ignore
//! let provider = FailoverAIProvider::new(vec![
//!     Arc::new(OpenAIProvider::new(primary)?),
//!     Arc::new(AnthropicProvider::new(anthropic)?),
//!     Arc::new(OpenAIProvider::new(fallback)?),
//! ]);
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// Failover monitoring events.
pub mod events {
    use serde::{Deserialize, Serialize};

    use crate::domain::foundation::Timestamp;

    /// Emitted when a provider fails and the next one is tried.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ProviderFallback {
        pub failed_provider: String,
        pub next_provider: String,
        pub reason: String,
        pub trace_id: String,
        pub occurred_at: Timestamp,
    }

    impl ProviderFallback {
        pub fn new(
            failed: impl Into<String>,
            next: impl Into<String>,
            reason: impl Into<String>,
            trace_id: impl Into<String>,
        ) -> Self {
            Self {
                failed_provider: failed.into(),
                next_provider: next.into(),
                reason: reason.into(),
                trace_id: trace_id.into(),
                occurred_at: Timestamp::now(),
            }
        }
    }
}

/// Receives failover events.
pub trait AIEventCallback: Send + Sync {
    fn on_fallback(&self, event: events::ProviderFallback);
}

#[derive(Debug, Clone, Copy)]
pub struct NoOpEventCallback;

impl AIEventCallback for NoOpEventCallback {
    fn on_fallback(&self, _event: events::ProviderFallback) {}
}

/// AI provider that tries each provider of a chain in order.
pub struct FailoverAIProvider {
    chain: Vec<Arc<dyn AIProvider>>,
    event_callback: Arc<dyn AIEventCallback>,
}

impl FailoverAIProvider {
    pub fn new(chain: Vec<Arc<dyn AIProvider>>) -> Self {
        Self {
            chain,
            event_callback: Arc::new(NoOpEventCallback),
        }
    }

    pub fn with_event_callback(mut self, callback: Arc<dyn AIEventCallback>) -> Self {
        self.event_callback = callback;
        self
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

#[async_trait]
impl AIProvider for FailoverAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        if self.chain.is_empty() {
            return Err(AIError::NotConfigured);
        }

        let mut last_error = None;
        for (index, provider) in self.chain.iter().enumerate() {
            match provider.complete(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_transport() => {
                    let failed = provider.provider_info();
                    match self.chain.get(index + 1) {
                        Some(next) => {
                            let next = next.provider_info();
                            warn!(
                                failed = %failed,
                                next = %next,
                                error = %err,
                                trace_id = %request.metadata.trace_id,
                                "AI provider failed, trying next"
                            );
                            self.event_callback.on_fallback(events::ProviderFallback::new(
                                failed.to_string(),
                                next.to_string(),
                                err.to_string(),
                                request.metadata.trace_id.clone(),
                            ));
                        }
                        None => warn!(
                            failed = %failed,
                            error = %err,
                            trace_id = %request.metadata.trace_id,
                            "last AI provider failed"
                        ),
                    }
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(AIError::AllProvidersFailed {
            attempts: self.chain.len(),
            last_error: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        let models: Vec<String> = self.chain.iter().map(|p| p.provider_info().to_string()).collect();
        ProviderInfo::new("failover", models.join(" -> "))
    }
}
