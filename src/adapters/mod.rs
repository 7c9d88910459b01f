//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - LLM provider clients and the failover chain
//! - `llm` - brief capabilities built on top of an `AIProvider`

pub mod ai;
pub mod llm;
