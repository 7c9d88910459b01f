//! Application handlers.
//!
//! Orchestrate domain rules and capability ports. Every handler degrades
//! gracefully: generation falls back to a placeholder brief, merge to a
//! local write, evaluation to local scoring.

mod answer_merger;
mod brief_chat;
mod completion_evaluator;
mod generate_brief;
mod quality_monitor;

pub use answer_merger::{local_merge, AnswerMerger, MergeOutcome, MergeSource};
pub use brief_chat::{BriefChatHandler, CancelHandle, ChatError, ChatTurn};
pub use completion_evaluator::CompletionEvaluator;
pub use generate_brief::{
    placeholder_brief, GenerateBriefCommand, GenerateBriefError, GenerateBriefHandler,
    GenerateBriefResult, DEFAULT_GENERATION_TIMEOUT, PLACEHOLDER_TITLE,
};
pub use quality_monitor::{QualityMonitor, QualityState};
