//! Core error types for calendme-core.
//!
//! This module defines the error hierarchy using thiserror. Each variant of
//! [`CoreError`] maps to one class of failure the caller may want to report
//! differently: bad input, a failing backend service, or storage trouble.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for calendme-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected before any state changed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A backend service failed or rejected the request
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Key-value storage failures
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An event with this id is already stored
    #[error("An event with id '{0}' already exists")]
    DuplicateId(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Input validation errors. These never leave partial state behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Natural-language description was blank
    #[error("Please enter an event description")]
    EmptyInput,

    /// Event title was blank
    #[error("Event title must not be empty")]
    EmptyTitle,

    /// Operation needs at least one event
    #[error("No events to export")]
    NoEvents,

    /// Not a `HH:MM` time of day
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    /// Not a `YYYY-MM-DD` date
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Imported schedule file was not a JSON array of events
    #[error("Invalid schedule file: {0}")]
    InvalidScheduleFile(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors from the backend parsing and export services.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Request never produced a response
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Service answered with a failure
    #[error("{endpoint} rejected the request ({status}): {message}")]
    Rejected {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    /// Base URL could not be joined with the endpoint path
    #[error("Invalid service URL '{0}'")]
    InvalidUrl(String),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read a key
    #[error("Failed to read '{key}' from {path}: {source}")]
    ReadFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a key
    #[error("Failed to write '{key}' to {path}: {source}")]
    WriteFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot be used as a file name
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
