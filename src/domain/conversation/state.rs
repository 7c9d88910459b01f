//! Session phase state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a brief completion session stands.
///
/// - `Idle`: no brief loaded yet
/// - `Asking`: questions are being asked
/// - `Completed`: nothing left to ask; a completion summary was posted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    Asking,
    Completed,
}

impl SessionPhase {
    pub fn accepts_answers(&self) -> bool {
        matches!(self, Self::Asking)
    }
}

impl StateMachine for SessionPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionPhase::*;
        matches!(
            (self, target),
            (Idle, Asking) | (Idle, Completed) | (Asking, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionPhase::*;
        match self {
            Idle => vec![Asking, Completed],
            Asking => vec![Completed],
            Completed => vec![],
        }
    }
}
