//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - text completion against an LLM vendor
//! - `BriefGenerator`, `BriefUpdater`, `QualityAssessor` - the model-backed
//!   brief operations

mod ai_provider;
mod brief_capabilities;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata,
};
pub use brief_capabilities::{BriefGenerator, BriefUpdater, CapabilityError, QualityAssessor};
