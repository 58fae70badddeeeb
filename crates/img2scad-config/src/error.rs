//! Configuration error types.

use std::io;
use std::path::PathBuf;

/// Errors raised while reading or writing a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ReadError {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The config file (or its parent directory) could not be written.
    #[error("failed to write config {}: {source}", .path.display())]
    WriteError {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The config file is not valid RON for [`crate::Config`].
    #[error("failed to parse config {}: {source}", .path.display())]
    ParseError {
        /// Config file path.
        path: PathBuf,
        /// RON error with line/column.
        #[source]
        source: ron::error::SpannedError,
    },

    /// The config could not be rendered as RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}
