//! Errors raised by the host-side adapters.
//!
//! The animation core itself never fails: unusable configuration only
//! disables playback. Loading and saving configuration files can fail, and
//! those failures are reported with [`ConfigError`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The INI file could not be read or parsed.
    #[error("failed to load config file {path:?}: {message}")]
    Load { path: PathBuf, message: String },

    /// INI text handed in directly could not be parsed.
    #[error("failed to parse config: {message}")]
    Parse { message: String },

    /// A key holds a value of the wrong type.
    #[error("invalid value for [{section}] {key}: {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    #[error("failed to save config file {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}
