//! Error types for host operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while the host serves a request.
#[derive(Error, Debug)]
pub enum HostError {
    /// The command text was empty after stripping the slash.
    #[error("invalid command")]
    InvalidCommand,

    /// No tool is registered under this name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The command is missing required arguments.
    #[error("command '{command}' requires {usage}")]
    MissingArguments { command: String, usage: &'static str },

    /// The tool rejected its input.
    #[error("{0}")]
    Tool(String),

    /// The path resolves outside the workspace root.
    #[error("path '{0}' is outside the workspace")]
    OutsideWorkspace(String),

    /// Filesystem error for a specific path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tool input could not be encoded or decoded.
    #[error("invalid tool input: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for host operations.
pub type Result<T> = std::result::Result<T, HostError>;
