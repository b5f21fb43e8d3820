//! Core error types for questlayer-core.
//!
//! Engine operations never fail: an unmet precondition is a no-op. The types
//! here cover configuration I/O, validation, and the two side channels
//! (audio output and link opening) whose failures the engine swallows after
//! logging.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for questlayer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Audio output errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// Link opening errors
    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Could not locate or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty required field
    #[error("'{0}' must not be empty")]
    Empty(String),

    /// Accent color is not a hex color
    #[error("Invalid accent color '{0}': expected #rgb or #rrggbb")]
    InvalidColor(String),

    /// Two tasks share an id
    #[error("Duplicate task id: {0}")]
    DuplicateTaskId(String),

    /// Task reward must be positive
    #[error("Task '{0}' must reward at least 1 XP")]
    ZeroXp(String),

    /// Task link is neither the share hub nor an absolute URL
    #[error("Task '{id}' has an invalid link '{link}'")]
    InvalidLink { id: String, link: String },

    /// Unknown enumerated value
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Audio output errors. Never surfaced to the user by the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No output device could be opened
    #[error("No audio output available: {0}")]
    Unavailable(String),

    /// The output refused to resume from suspension
    #[error("Failed to resume audio output: {0}")]
    ResumeFailed(String),

    /// Submitting rendered samples failed
    #[error("Failed to play cue: {0}")]
    PlaybackFailed(String),
}

/// Link opening errors. Never surfaced to the user by the engine.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The platform opener failed (no browser, popup blocked, ...)
    #[error("Failed to open {url}: {source}")]
    OpenFailed {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
