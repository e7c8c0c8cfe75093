//! Error types for the interactive shell.
//!
//! [`ShellError`] wraps every failure mode between startup and the end of
//! the input loop so `main` can propagate with `?`. Out-of-range
//! coordinates are not errors at this level: the loop reports them and
//! keeps going.

use crate::config::ConfigError;

/// Top-level error for the shell binary.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// World construction or search failed for a reason other than bad
    /// coordinates.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: eventgrid_world::WorldError,
    },

    /// Reading input or writing output failed.
    #[error("terminal I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// JSON rendering failed.
    #[error("JSON output error: {source}")]
    Json {
        /// The underlying serializer error.
        #[from]
        source: serde_json::Error,
    },
}
