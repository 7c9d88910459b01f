//! Response sanitization.

use thiserror::Error;

/// Maximum accepted response length (100KB).
pub const MAX_RESPONSE_LENGTH: usize = 100_000;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanitizationError {
    #[error("Response too long: {actual} bytes exceeds maximum of {max} bytes")]
    TooLong { max: usize, actual: usize },

    #[error("Invalid UTF-8 encoding at character {position}")]
    InvalidUtf8 { position: usize },
}

/// Cleans raw model text before it is parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSanitizer;

impl ResponseSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Checks length, drops control characters (keeping newlines and tabs),
    /// strips chat-template markers and rejects replacement characters.
    pub fn sanitize(&self, response: &str) -> Result<String, SanitizationError> {
        if response.len() > MAX_RESPONSE_LENGTH {
            return Err(SanitizationError::TooLong {
                max: MAX_RESPONSE_LENGTH,
                actual: response.len(),
            });
        }

        let cleaned: String = response
            .chars()
            .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
            .collect();

        let stripped = strip_markers(cleaned);

        if let Some(position) = stripped.chars().position(|c| c == '\u{FFFD}') {
            return Err(SanitizationError::InvalidUtf8 { position });
        }
        Ok(stripped)
    }

}

fn strip_markers(mut text: String) -> String {
    const MARKERS: &[&str] = &[
        "```system",
        "```assistant",
        "[INST]",
        "[/INST]",
        "<|system|>",
        "<|assistant|>",
        "<|user|>",
        "<|im_start|>",
        "<|im_end|>",
        "<<SYS>>",
        "<</SYS>>",
    ];
    for marker in MARKERS {
        text = text.replace(marker, "");
    }
    text
}
