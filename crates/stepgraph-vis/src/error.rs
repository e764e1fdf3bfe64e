//! Error types for stepgraph-vis.

use stepgraph_algo::RunError;
use thiserror::Error;

/// Result type for stepgraph-vis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a session or the server.
#[derive(Debug, Error)]
pub enum Error {
    /// A run request was rejected.
    #[error(transparent)]
    Run(#[from] RunError),

    /// A graph description used an empty node label.
    #[error("node labels must not be empty")]
    EmptyLabel,

    /// No built-in sample has this name.
    #[error("unknown sample: {0}")]
    UnknownSample(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
