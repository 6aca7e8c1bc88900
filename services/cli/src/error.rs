//! services/cli/src/error.rs
//!
//! Defines the primary error type for the command-line shell.

use crate::config::ConfigError;

/// The primary error type for the `cinematcher` binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A request that could not be completed; carries the user-facing message.
    #[error("{0}")]
    Request(String),

    /// The command refers to something that does not exist (e.g. a history position).
    #[error("{0}")]
    Usage(String),

    /// Represents a standard Input/Output error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
