//! Application layer - Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AnswerMerger, BriefChatHandler, CancelHandle, ChatError, ChatTurn, CompletionEvaluator,
    GenerateBriefCommand, GenerateBriefError, GenerateBriefHandler, GenerateBriefResult,
    MergeOutcome, MergeSource, QualityMonitor, QualityState,
};
