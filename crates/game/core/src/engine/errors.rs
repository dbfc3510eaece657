//! Error types surfaced by [`GameSession`](super::GameSession) operations.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Errors from [`GameSession::advance`](super::GameSession::advance).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("the roster is empty")]
    EmptyRoster,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TurnError::EmptyRoster => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::EmptyRoster => "TURN_EMPTY_ROSTER",
        }
    }
}

/// Errors from damage and death resolution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("actor {0} is not in the roster")]
    ActorNotFound(EntityId),
}

impl GameError for LifecycleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            LifecycleError::ActorNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            LifecycleError::ActorNotFound(_) => "LIFECYCLE_ACTOR_NOT_FOUND",
        }
    }
}

/// Errors from roster management.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("actor {actor} placed outside the map at {position}")]
    OutOfBounds { actor: EntityId, position: Position },

    #[error("actor {0} is already in the roster")]
    DuplicateId(EntityId),
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::OutOfBounds { .. } | SessionError::DuplicateId(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SessionError::OutOfBounds { .. } => "SESSION_OUT_OF_BOUNDS",
            SessionError::DuplicateId(_) => "SESSION_DUPLICATE_ID",
        }
    }
}

/// Errors reading or writing session state through a save stream.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("save stream ended early")]
    UnexpectedEnd,

    #[error("invalid round counter {0} in save stream")]
    InvalidRound(i64),
}

impl GameError for SaveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SaveError::UnexpectedEnd => ErrorSeverity::Fatal,
            SaveError::InvalidRound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SaveError::UnexpectedEnd => "SAVE_UNEXPECTED_END",
            SaveError::InvalidRound(_) => "SAVE_INVALID_ROUND",
        }
    }
}
