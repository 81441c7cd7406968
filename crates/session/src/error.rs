//! Error types for session setup and opponent turns.
//!
//! Illegal user moves are not errors: they are reported as `false` by
//! [`GameSession::make_user_move`](crate::GameSession::make_user_move).

use std::path::PathBuf;

use chess_core::RulesError;

/// Errors raised by a game session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The initial board could not be loaded
    #[error("invalid initial board state: {0}")]
    InvalidInitialState(#[from] RulesError),

    /// The opponent was asked to move on the player's turn
    #[error("it is not the opponent's turn")]
    NotOpponentTurn,

    /// The rules engine refused a move it had itself listed as legal
    #[error("rules engine rejected its own legal move '{notation}'")]
    RulesDesync { notation: String },
}

/// Errors raised while loading a session configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
