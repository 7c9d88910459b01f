//! Question generator: turns field classifications into questions.

use std::collections::HashSet;

use tracing::debug;

use super::question::{Priority, StructuredQuestion};
use super::templates::{improve_field_question, missing_field_question};
use crate::domain::brief::{classify, Brief, Completeness, FieldDescriptor, BRIEF_FIELDS};

/// Questions for one field: empty when the field is sufficient.
pub fn generate(descriptor: &FieldDescriptor, brief: &Brief) -> Vec<StructuredQuestion> {
    let value = brief.get(descriptor.key);
    let text = match classify(descriptor.key, value) {
        Completeness::Sufficient => return Vec::new(),
        Completeness::Empty => missing_field_question(descriptor.key, descriptor.label),
        Completeness::Weak => {
            let current = value.map(|v| v.display()).unwrap_or_default();
            improve_field_question(descriptor.key, descriptor.label, &current)
        }
    };

    vec![StructuredQuestion::new(
        descriptor.path(),
        text,
        priority_for(descriptor),
    )]
}

/// Questions for every registered field whose id is not in `completed`,
/// ordered by priority. Ties keep field declaration order.
pub fn generate_all(brief: &Brief, completed: &HashSet<String>) -> Vec<StructuredQuestion> {
    let mut questions: Vec<StructuredQuestion> = BRIEF_FIELDS
        .iter()
        .flat_map(|descriptor| generate(descriptor, brief))
        .filter(|q| !completed.contains(&q.id))
        .collect();
    // sort_by_key is stable
    questions.sort_by_key(|q| q.priority);
    debug!(count = questions.len(), skipped = completed.len(), "generated questions");
    questions
}

fn priority_for(descriptor: &FieldDescriptor) -> Priority {
    if descriptor.required {
        Priority::High
    } else {
        Priority::Medium
    }
}
