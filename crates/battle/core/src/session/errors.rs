//! Errors surfaced by session operations.
//!
//! Every error is returned before the session is touched: a rejected call
//! leaves the session exactly as it was.

use crate::action::QueueError;
use crate::error::{BattleError, ErrorSeverity};
use crate::status::IncapacitateCause;

use super::setup::BattleState;

/// A submitted queue entry that cannot be performed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("queue entry {index} rejected: {reason}")]
pub struct InvalidAction {
    /// Position of the first rejected entry in the submitted queue.
    pub index: usize,
    pub reason: QueueError,
}

/// Errors returned by [`super::BattleEngine`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    /// The encounter already reached a terminal state.
    #[error("encounter already ended ({state})")]
    IllegalTransition { state: BattleState },

    #[error(transparent)]
    InvalidAction(#[from] InvalidAction),

    /// The player cannot attempt to flee while incapacitated.
    #[error("player is incapacitated ({cause})")]
    Incapacitated { cause: IncapacitateCause },
}

impl BattleError for InvalidAction {
    fn severity(&self) -> ErrorSeverity {
        self.reason.severity()
    }

    fn error_code(&self) -> &'static str {
        self.reason.error_code()
    }
}

impl BattleError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::IllegalTransition { .. } => ErrorSeverity::Validation,
            SessionError::InvalidAction(inner) => inner.severity(),
            SessionError::Incapacitated { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SessionError::IllegalTransition { .. } => "SESSION_ILLEGAL_TRANSITION",
            SessionError::InvalidAction(inner) => inner.error_code(),
            SessionError::Incapacitated { .. } => "SESSION_INCAPACITATED",
        }
    }
}
