//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by a render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The cancellation token was observed in the cancelled state.
    #[error("Render cancelled")]
    Cancelled,
}

/// Result alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}
