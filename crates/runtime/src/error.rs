//! Errors surfaced by the runtime.
//!
//! Gameplay failures (full inventory, missing portals, refused trades) never
//! reach these types: they become toasts. What remains are illegal mode
//! switches and failures while assembling a session.
use std::path::PathBuf;

use game_core::{ErrorSeverity, GameError};
use thiserror::Error;

use crate::state_manager::GameMode;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Rejected game-mode transition. The mode is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("cannot switch from {from} to {to}")]
    InvalidTransition { from: GameMode, to: GameMode },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "STATE_INVALID_TRANSITION",
        }
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to load game content from {}", path.display())]
    Content {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("dungeon {id} is not loaded")]
    UnknownDungeon { id: String },
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Content { .. } => ErrorSeverity::Fatal,
            Self::UnknownDungeon { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Content { .. } => "RUNTIME_CONTENT",
            Self::UnknownDungeon { .. } => "RUNTIME_UNKNOWN_DUNGEON",
        }
    }
}
