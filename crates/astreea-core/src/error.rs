use thiserror::Error;

/// Top-level error type for the Astreea assistant.
///
/// Covers the ambient concerns shared by every crate (configuration files,
/// I/O, serialization). Chat-engine failures live in `astreea_chat::ChatError`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AstreeaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for AstreeaError {
    fn from(err: toml::de::Error) -> Self {
        AstreeaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AstreeaError {
    fn from(err: toml::ser::Error) -> Self {
        AstreeaError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AstreeaError {
    fn from(err: serde_json::Error) -> Self {
        AstreeaError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Astreea operations.
pub type Result<T> = std::result::Result<T, AstreeaError>;
