//! Error types for the Gale assistant

use thiserror::Error;

/// Result type alias for Gale operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Gale assistant
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Voice transport error (recognition failure is not an error;
    /// it is signalled by an empty transcript)
    #[error("voice error: {0}")]
    Voice(String),

    /// Weather data fetch error
    #[error("weather error: {0}")]
    Weather(String),

    /// Persistent store error
    #[error("store error: {0}")]
    Store(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
