//! Chat transcript messages.
//!
//! Messages are append-only: once created they are never edited.

use serde::{Deserialize, Serialize};

use crate::domain::brief::FieldPath;
use crate::domain::foundation::{MessageId, Timestamp, ValidationError};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the visible transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    id: MessageId,
    role: Role,
    content: String,
    timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    question_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    brief_field: Option<FieldPath>,
}

impl ChatMessage {
    /// # Errors
    ///
    /// `EmptyField` if `content` is blank.
    pub fn new(role: Role, content: impl Into<String>) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(Self {
            id: MessageId::new(),
            role,
            content,
            timestamp: Timestamp::now(),
            question_id: None,
            brief_field: None,
        })
    }

    pub fn user(content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Role::Assistant, content)
    }

    /// Links the message to the question it asks or answers.
    pub fn about(mut self, question_id: impl Into<String>, field: FieldPath) -> Self {
        self.question_id = Some(question_id.into());
        self.brief_field = Some(field);
        self
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn question_id(&self) -> Option<&str> {
        self.question_id.as_deref()
    }

    pub fn brief_field(&self) -> Option<&FieldPath> {
        self.brief_field.as_ref()
    }
}
