//! Error types for the daemon layer.

use thiserror::Error;

/// Errors produced while loading configuration or parsing feed lines.
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration could not be read, parsed, or validated.
    #[error("config error: {0}")]
    Config(String),

    /// A feed line could not be parsed into a command.
    #[error("feed error: {0}")]
    Feed(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================================== //
