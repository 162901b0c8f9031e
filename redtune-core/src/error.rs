//! Error types for trial execution
//!
//! Each phase has its own error enum. `TrialError` wraps the config and
//! process errors raised once a trial has been validated.

use std::path::PathBuf;

/// Invalid command-line arguments
#[derive(Debug, thiserror::Error)]
pub enum ArgError {
    #[error("Too few arguments: expected <seed> followed by name/value pairs, got {count} argument(s) after the processor id")]
    TooFewArguments { count: usize },

    #[error("invalid seed value: {0}")]
    InvalidSeed(String),
}

/// Baseline config could not be loaded or an override could not be applied
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read baseline config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse baseline config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("override path is empty")]
    EmptyPath,

    #[error("override path `{path}`: key `{key}` not found in baseline config")]
    MissingKey { path: String, key: String },

    #[error("override path `{path}`: cannot set `{key}` because its parent is not a mapping")]
    NotAMapping { path: String, key: String },

    #[error("failed to serialize config")]
    Serialize(#[source] serde_json::Error),
}

/// Engine process could not be launched or exited unsuccessfully
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("failed to launch `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to execute command: {command} ({status})")]
    Failed { command: String, status: String },
}

/// Any failure while running a validated trial
#[derive(Debug, thiserror::Error)]
pub enum TrialError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Invoke(#[from] InvokeError),
}
