//! Question generation and scheduling.

mod generator;
mod question;
mod scheduler;
mod templates;

pub use generator::{generate, generate_all};
pub use question::{Priority, QuestionStatus, StructuredQuestion};
pub use scheduler::{Advance, QuestionScheduler};
pub use templates::{improve_field_question, missing_field_question};
