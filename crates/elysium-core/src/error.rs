//! Core error types for elysium-core.
//!
//! Mutators that can refuse an input do not use these types; they return a
//! [`Mutation`](crate::journey::Mutation) instead. The errors here cover
//! persistence, configuration, catalog validation and journey integrity.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for elysium-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// State persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Journey integrity violations
    #[error("Integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// State store errors.
///
/// Only writes surface here. Reads fail soft to the default state.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to serialize the state
    #[error("Failed to serialize journey state: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to write the state file
    #[error("Failed to write journey state to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data directory could not be resolved or created
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

    /// Unknown dot-path key
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A catalog lists the same id twice
    #[error("Duplicate {collection} id {id} in catalog")]
    DuplicateId { collection: &'static str, id: u32 },

    /// A spin history entry is not `<WIN|REASON>:<id>`
    #[error("Malformed spin entry '{0}'")]
    MalformedEntry(String),

    /// Catalog file could not be parsed
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// A persisted journey that breaks one of its invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    /// More spins recorded than the vault holds
    #[error("Spin history holds {len} entries, vault capacity is {capacity}")]
    HistoryOverflow { len: usize, capacity: usize },

    /// History references a prize the catalog does not know
    #[error("History entry {index} references unknown prize {id}")]
    UnknownPrize { index: usize, id: u32 },

    /// History references a reason the catalog does not know
    #[error("History entry {index} references unknown reason {id}")]
    UnknownReason { index: usize, id: u32 },
}

impl From<toml::de::Error> for ValidationError {
    fn from(err: toml::de::Error) -> Self {
        ValidationError::InvalidCatalog(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
