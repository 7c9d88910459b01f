//! Brief Assistant - marketing brief generation and completion.
//!
//! Turns a meeting transcription into a structured marketing brief, then
//! completes it through a question-driven chat backed by LLM providers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
