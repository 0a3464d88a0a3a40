//! Application layer errors

use thiserror::Error;

/// Top-level relay errors; anything reaching `main` ends the process
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IRC error: {0}")]
    Irc(#[from] IrcError),

    #[error("Webhook error: {0}")]
    Webhook(#[from] SendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Outbound webhook errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed post to slack ({0}): {1}")]
    Rejected(u16, String),

    #[error("Encoding error: {0}")]
    Encode(String),
}

/// IRC session errors
#[derive(Error, Debug)]
pub enum IrcError {
    #[error("Failed to connect to {0}: {1}")]
    Connect(String, String),

    #[error("IRC client error: {0}")]
    Client(#[from] irc::error::Error),

    #[error("Connection closed by server")]
    Closed,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Failed to read config {0}: {1}")]
    Read(String, String),

    #[error("Parse error: {0}")]
    Parse(String),
}
