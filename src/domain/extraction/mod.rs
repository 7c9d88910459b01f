//! Defensive parsing of model output.
//!
//! Models are not guaranteed to return clean JSON. Responses are sanitized,
//! unwrapped from code fences, cut down to the outermost balanced object and
//! then checked against the shape each capability expects.

mod extractor;
mod sanitizer;

pub use extractor::{
    BriefUpdatePayload, ExtractionError, JsonExtractor, ANALYSIS_SHAPE_KEYS,
    REQUIRED_BRIEF_KEYS,
};
pub use sanitizer::{ResponseSanitizer, SanitizationError, MAX_RESPONSE_LENGTH};
