//! Error types for the chat engine.
//!
//! Blank input and unmatched text are not errors: the first is ignored and
//! the second falls back to the general response.

/// Errors from a conversation session.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat session has shut down")]
    SessionClosed,
    #[error("session state lock poisoned: {0}")]
    StatePoisoned(String),
}
