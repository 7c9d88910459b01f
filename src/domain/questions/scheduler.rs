//! Question scheduler.
//!
//! Holds the ordered question list, a cursor and the set of completed ids.
//! A completed id is never asked again, even if a later edit leaves its
//! field weak.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::generator::generate_all;
use super::question::StructuredQuestion;
use crate::domain::brief::Brief;

/// Outcome of [`QuestionScheduler::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Another question from the current list.
    Next(StructuredQuestion),
    /// The list ran out; a fresh scan over every field produced more.
    Regenerated(StructuredQuestion),
    /// Nothing left to ask. The caller should evaluate completion.
    Exhausted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionScheduler {
    questions: Vec<StructuredQuestion>,
    current_index: usize,
    completed: HashSet<String>,
}

impl QuestionScheduler {
    /// Schedules questions for every field of `brief` that needs one.
    pub fn from_brief(brief: &Brief) -> Self {
        let completed = HashSet::new();
        Self {
            questions: generate_all(brief, &completed),
            current_index: 0,
            completed,
        }
    }

    pub fn questions(&self) -> &[StructuredQuestion] {
        &self.questions
    }

    pub fn completed_ids(&self) -> &HashSet<String> {
        &self.completed
    }

    /// First non-completed question at or after the cursor.
    pub fn current_question(&self) -> Option<&StructuredQuestion> {
        self.questions
            .iter()
            .skip(self.current_index)
            .find(|q| !q.completed)
    }

    pub fn pending_count(&self) -> usize {
        self.questions.iter().filter(|q| !q.completed).count()
    }

    /// Marks the current question completed and moves to the next one.
    ///
    /// When the list is used up, every field of `brief` is scanned again and
    /// questions whose ids are already completed are dropped.
    pub fn advance(&mut self, brief: &Brief) -> Advance {
        if let Some(index) = self.current_position() {
            let question = &mut self.questions[index];
            if let Ok(done) = question.complete() {
                *question = done;
            }
            self.completed.insert(question.id.clone());
            self.current_index = index + 1;
        }

        if let Some(index) = self.current_position() {
            self.current_index = index;
            return Advance::Next(self.questions[index].clone());
        }

        let fresh = generate_all(brief, &self.completed);
        match fresh.first().cloned() {
            Some(first) => {
                debug!(count = fresh.len(), "question list regenerated");
                self.questions = fresh;
                self.current_index = 0;
                Advance::Regenerated(first)
            }
            None => {
                debug!(completed = self.completed.len(), "no questions left");
                self.current_index = self.questions.len();
                Advance::Exhausted
            }
        }
    }

    /// Back to the initial empty state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn current_position(&self) -> Option<usize> {
        self.questions
            .iter()
            .enumerate()
            .skip(self.current_index)
            .find(|(_, q)| !q.completed)
            .map(|(i, _)| i)
    }
}
