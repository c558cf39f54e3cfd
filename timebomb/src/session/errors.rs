//! Session error types.

use thiserror::Error;

use crate::game::GameError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The engine rejected the operation
    #[error(transparent)]
    Game(#[from] GameError),

    /// A caller-supplied join code isn't well formed
    #[error("invalid join code: {0}")]
    InvalidCode(String),

    /// The game actor has shut down
    #[error("game is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, SessionError>;
