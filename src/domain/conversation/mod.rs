//! Chat transcript and completion session.

mod message;
mod session;
mod state;

pub use message::{ChatMessage, Role};
pub use session::BriefSession;
pub use state::SessionPhase;
