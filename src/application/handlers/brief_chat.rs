//! Brief chat session controller.
//!
//! Owns the session state and drives the question flow: post the current
//! question, merge the answer, advance, and post either the next question or
//! the completion summary. Session updates are full replacements of the
//! `BriefSession` value; the lock is never held across an await.
//!
//! Every flow records the session epoch it started under. `reset` bumps the
//! epoch, so a flow still awaiting the model cannot write into the new session.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};

use super::answer_merger::AnswerMerger;
use super::completion_evaluator::CompletionEvaluator;
use crate::domain::brief::{normalize, Brief};
use crate::domain::conversation::{BriefSession, ChatMessage};
use crate::domain::evaluation::CompletionResult;
use crate::domain::foundation::ValidationError;
use crate::domain::questions::{Advance, QuestionScheduler, StructuredQuestion};

/// Errors surfaced to the chat view.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChatError {
    #[error("Validation error: message cannot be empty")]
    EmptyMessage,

    /// A previous message is still being processed.
    #[error("Still processing the previous message")]
    Busy,

    /// No question is open: the session was never started or is complete.
    #[error("The session is not asking questions")]
    NotAsking,

    /// The consumer went away or the session was reset; results were discarded.
    #[error("Session was cancelled")]
    Cancelled,

    #[error("Invalid session state: {0}")]
    InvalidState(#[from] ValidationError),
}

/// Flag that suppresses session writes once the consumer is gone.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// What one answer produced.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub brief: Brief,
    /// Next question, `None` once the session is complete.
    pub next_question: Option<StructuredQuestion>,
    /// Set when the flow ran out of questions.
    pub completion: Option<CompletionResult>,
}

#[derive(Clone)]
pub struct BriefChatHandler {
    merger: AnswerMerger,
    evaluator: CompletionEvaluator,
    session: Arc<Mutex<BriefSession>>,
    /// Bumped by `reset`; only read or written while `session` is locked.
    epoch: Arc<AtomicU64>,
    cancel: CancelHandle,
}

impl BriefChatHandler {
    pub fn new(merger: AnswerMerger, evaluator: CompletionEvaluator) -> Self {
        Self {
            merger,
            evaluator,
            session: Arc::new(Mutex::new(BriefSession::new())),
            epoch: Arc::new(AtomicU64::new(0)),
            cancel: CancelHandle::default(),
        }
    }

    /// Current session state.
    pub fn session(&self) -> BriefSession {
        self.lock().clone()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Loads `brief`, posts a welcome and the first question.
    ///
    /// A brief with nothing left to ask goes straight to evaluation.
    pub async fn start(&self, brief: &Brief) -> Result<Option<StructuredQuestion>, ChatError> {
        let epoch = self.current_epoch();
        let brief = normalize(&brief.to_json());
        let scheduler = QuestionScheduler::from_brief(&brief);
        let first = scheduler.current_question().cloned();
        info!(questions = scheduler.questions().len(), "brief chat started");

        let welcome = ChatMessage::assistant(welcome_text(&brief, scheduler.questions().len()))?;
        self.replace(epoch, |session| {
            let session = session.started(brief.clone(), scheduler)?.with_message(welcome);
            Ok(match &first {
                Some(question) => session.with_message(question_message(question)?),
                None => session,
            })
        })?;

        if first.is_none() {
            self.finish(epoch, &brief).await?;
        }
        Ok(first)
    }

    /// Handles one user answer to the current question.
    pub async fn send_message(&self, text: &str) -> Result<ChatTurn, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let (brief, question, epoch) = {
            let mut guard = self.lock();
            if guard.is_typing() {
                return Err(ChatError::Busy);
            }
            if !guard.phase().accepts_answers() {
                return Err(ChatError::NotAsking);
            }
            let (Some(brief), Some(question)) =
                (guard.brief().cloned(), guard.current_question().cloned())
            else {
                return Err(ChatError::NotAsking);
            };
            let answer = ChatMessage::user(text)?.about(&question.id, question.field.clone());
            let session = std::mem::take(&mut *guard);
            *guard = session.with_message(answer).typing(true);
            (brief, question, self.epoch.load(Ordering::SeqCst))
        };

        let merged = self.merger.merge(&brief, &question.field, text).await;

        let mut scheduler = {
            let guard = self.lock();
            if !self.is_current(epoch) {
                debug!("chat cancelled or reset, discarding merge");
                return Err(ChatError::Cancelled);
            }
            guard.scheduler().clone()
        };
        let advance = scheduler.advance(&merged.brief);
        let next_question = match advance {
            Advance::Next(question) | Advance::Regenerated(question) => Some(question),
            Advance::Exhausted => None,
        };

        let confirmation = ChatMessage::assistant(merged.message)?
            .about(&question.id, question.field.clone());
        let merged_brief = merged.brief;
        self.replace(epoch, |session| {
            let session = session
                .with_brief(merged_brief.clone())
                .with_scheduler(scheduler)
                .with_message(confirmation);
            Ok(match &next_question {
                Some(next) => session.with_message(question_message(next)?).typing(false),
                None => session,
            })
        })?;

        let completion = match next_question {
            Some(_) => None,
            None => Some(self.finish(epoch, &merged_brief).await?),
        };

        Ok(ChatTurn {
            brief: merged_brief,
            next_question,
            completion,
        })
    }

    /// Clears messages, questions and the completed set, and lifts a
    /// cancellation. A message still in flight is discarded when it returns.
    pub fn reset(&self) {
        let mut guard = self.lock();
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.cancel.clear();
        *guard = BriefSession::new();
        debug!("brief chat reset");
    }

    /// Evaluates `brief`, posts the summary and closes the session.
    async fn finish(&self, epoch: u64, brief: &Brief) -> Result<CompletionResult, ChatError> {
        let result = self.evaluator.evaluate(brief).await;

        let summary = ChatMessage::assistant(summary_text(&result))?;
        let outcome = result.clone();
        self.replace(epoch, |session| {
            Ok(session.with_message(summary).completed(outcome)?.typing(false))
        })?;
        info!(
            score = %result.completion_score,
            complete = result.is_complete,
            "brief chat finished"
        );
        Ok(result)
    }

    /// Applies a transition unless the session was cancelled or reset since
    /// `epoch`. On error the previous session is kept.
    fn replace<F>(&self, epoch: u64, transition: F) -> Result<(), ChatError>
    where
        F: FnOnce(BriefSession) -> Result<BriefSession, ChatError>,
    {
        let mut guard = self.lock();
        if !self.is_current(epoch) {
            return Err(ChatError::Cancelled);
        }
        let current = guard.clone();
        *guard = transition(current)?;
        Ok(())
    }

    fn current_epoch(&self) -> u64 {
        let _guard = self.lock();
        self.epoch.load(Ordering::SeqCst)
    }

    /// Call with the session lock held.
    fn is_current(&self, epoch: u64) -> bool {
        !self.cancel.is_cancelled() && self.epoch.load(Ordering::SeqCst) == epoch
    }

    fn lock(&self) -> MutexGuard<'_, BriefSession> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn question_message(question: &StructuredQuestion) -> Result<ChatMessage, ValidationError> {
    Ok(ChatMessage::assistant(question.question.clone())?
        .about(&question.id, question.field.clone()))
}

fn welcome_text(brief: &Brief, pending: usize) -> String {
    if pending == 0 {
        return format!(
            "¡Hola! Revisé el brief \"{}\" y no encontré campos pendientes.",
            brief.title()
        );
    }
    format!(
        "¡Hola! Revisé el brief \"{}\". Tengo {} pregunta(s) para completarlo. Empecemos.",
        brief.title(),
        pending
    )
}

fn summary_text(result: &CompletionResult) -> String {
    if result.is_complete {
        return format!(
            "🎉 ¡El brief está completo! Puntuación de completitud: {}.",
            result.completion_score
        );
    }
    let mut text = format!(
        "He terminado con las preguntas. Puntuación de completitud: {}.",
        result.completion_score
    );
    for recommendation in &result.recommendations {
        text.push_str("\n- ");
        text.push_str(recommendation);
    }
    text
}
