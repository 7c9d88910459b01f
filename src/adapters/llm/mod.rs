//! LLM-backed implementations of the brief capability ports.

mod brief_generator;
mod brief_updater;
pub mod prompts;
mod quality_assessor;

pub use brief_generator::LlmBriefGenerator;
pub use brief_updater::LlmBriefUpdater;
pub use quality_assessor::LlmQualityAssessor;
