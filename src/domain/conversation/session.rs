//! Brief completion session state.
//!
//! The session is an explicit value owned by one controller. Every
//! transition consumes the current session and returns the next one; nothing
//! is patched in place.

use serde::Serialize;

use super::message::ChatMessage;
use super::state::SessionPhase;
use crate::domain::brief::Brief;
use crate::domain::evaluation::CompletionResult;
use crate::domain::foundation::{StateMachine, ValidationError};
use crate::domain::questions::{QuestionScheduler, StructuredQuestion};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefSession {
    brief: Option<Brief>,
    scheduler: QuestionScheduler,
    messages: Vec<ChatMessage>,
    phase: SessionPhase,
    is_typing: bool,
    completion: Option<CompletionResult>,
}

impl BriefSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brief(&self) -> Option<&Brief> {
        self.brief.as_ref()
    }

    pub fn scheduler(&self) -> &QuestionScheduler {
        &self.scheduler
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn completion(&self) -> Option<&CompletionResult> {
        self.completion.as_ref()
    }

    pub fn current_question(&self) -> Option<&StructuredQuestion> {
        self.scheduler.current_question()
    }

    /// Loads the brief and its questions: `Idle -> Asking`.
    pub fn started(self, brief: Brief, scheduler: QuestionScheduler) -> Result<Self, ValidationError> {
        let phase = self.phase.transition_to(SessionPhase::Asking)?;
        Ok(Self {
            brief: Some(brief),
            scheduler,
            phase,
            completion: None,
            ..self
        })
    }

    /// Records the final evaluation: `-> Completed`.
    pub fn completed(self, result: CompletionResult) -> Result<Self, ValidationError> {
        let phase = self.phase.transition_to(SessionPhase::Completed)?;
        Ok(Self {
            phase,
            completion: Some(result),
            ..self
        })
    }

    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_brief(self, brief: Brief) -> Self {
        Self {
            brief: Some(brief),
            ..self
        }
    }

    pub fn with_scheduler(self, scheduler: QuestionScheduler) -> Self {
        Self { scheduler, ..self }
    }

    pub fn typing(self, is_typing: bool) -> Self {
        Self { is_typing, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::brief::normalize;
    use crate::domain::evaluation::score_locally;
    use serde_json::json;

    fn started() -> BriefSession {
        let brief = normalize(&json!({ "projectTitle": "Campaña" }));
        let scheduler = QuestionScheduler::from_brief(&brief);
        BriefSession::new().started(brief, scheduler).unwrap()
    }

    #[test]
    fn new_session_is_idle_and_empty() {
        let session = BriefSession::new();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.brief().is_none());
        assert!(session.messages().is_empty());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn starting_loads_brief_and_first_question() {
        let session = started();
        assert_eq!(session.phase(), SessionPhase::Asking);
        assert!(session.current_question().is_some());
    }

    #[test]
    fn cannot_start_twice() {
        let brief = normalize(&json!({}));
        let scheduler = QuestionScheduler::from_brief(&brief);
        assert!(started().started(brief, scheduler).is_err());
    }

    #[test]
    fn messages_are_appended_in_order() {
        let session = started()
            .with_message(ChatMessage::user("uno").unwrap())
            .with_message(ChatMessage::assistant("dos").unwrap());
        let contents: Vec<&str> = session.messages().iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["uno", "dos"]);
    }

    #[test]
    fn completion_is_recorded_once() {
        let session = started();
        let result = score_locally(session.brief().unwrap());
        let done = session.completed(result.clone()).unwrap();
        assert_eq!(done.phase(), SessionPhase::Completed);
        assert_eq!(done.completion(), Some(&result));
        assert!(done.completed(result).is_err());
    }
}
