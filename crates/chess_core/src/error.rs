//! Errors raised by the rules adapter.

/// Errors that can occur while setting up a rules engine
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// The initial board could not be parsed
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },
}
