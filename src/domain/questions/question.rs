//! Structured questions asked to complete the brief.

use serde::{Deserialize, Serialize};

use crate::domain::brief::FieldPath;
use crate::domain::foundation::{StateMachine, ValidationError};

/// Ordering weight of a question. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Lifecycle of a question: `Pending -> Completed`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Pending,
    Completed,
}

impl StateMachine for QuestionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (QuestionStatus::Pending, QuestionStatus::Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            QuestionStatus::Pending => vec![QuestionStatus::Completed],
            QuestionStatus::Completed => vec![],
        }
    }
}

/// A question targeting one brief field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuestion {
    /// `field-<key>`; stable across regenerations of the same field.
    pub id: String,
    pub field: FieldPath,
    pub question: String,
    pub priority: Priority,
    pub completed: bool,
}

impl StructuredQuestion {
    pub fn new(field: FieldPath, question: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: Self::id_for(&field),
            field,
            question: question.into(),
            priority,
            completed: false,
        }
    }

    /// Deterministic id for questions about `field`.
    pub fn id_for(field: &FieldPath) -> String {
        format!("field-{}", field)
    }

    pub fn status(&self) -> QuestionStatus {
        if self.completed {
            QuestionStatus::Completed
        } else {
            QuestionStatus::Pending
        }
    }

    /// Returns the completed copy of this question.
    pub fn complete(&self) -> Result<Self, ValidationError> {
        self.status().transition_to(QuestionStatus::Completed)?;
        Ok(Self {
            completed: true,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> StructuredQuestion {
        StructuredQuestion::new(
            FieldPath::new("targetAudience.primary").unwrap(),
            "¿Quién es tu audiencia?",
            Priority::High,
        )
    }

    #[test]
    fn id_is_derived_from_field_key() {
        assert_eq!(question().id, "field-targetAudience.primary");
    }

    #[test]
    fn priorities_sort_high_first() {
        let mut priorities = vec![Priority::Low, Priority::High, Priority::Medium];
        priorities.sort();
        assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn complete_marks_question_once() {
        let done = question().complete().unwrap();
        assert!(done.completed);
        assert_eq!(done.status(), QuestionStatus::Completed);
        assert!(done.complete().is_err());
    }

    #[test]
    fn serializes_with_camel_case_and_lowercase_priority() {
        let json = serde_json::to_value(question()).unwrap();
        assert_eq!(json["field"], "targetAudience.primary");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["completed"], false);
    }
}
