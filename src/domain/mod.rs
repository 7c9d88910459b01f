//! Domain layer: the brief completion engine.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (timestamps, ids, percentages, errors)
//! - `brief` - Field registry, brief document, classifier, normalizer
//! - `questions` - Question phrasing, generation and scheduling
//! - `evaluation` - Completion scoring and external quality verdicts
//! - `extraction` - Defensive parsing of model output
//! - `conversation` - Chat transcript and session state

pub mod brief;
pub mod conversation;
pub mod evaluation;
pub mod extraction;
pub mod foundation;
pub mod questions;
