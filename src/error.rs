//! Error types for persistence, configuration and startup.

use std::path::PathBuf;

use thiserror::Error;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,
}

/// Errors reading the runtime configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Faults that stop the program before the first frame
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not prepare save directory '{path}': {source}")]
    SaveDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
