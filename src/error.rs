//! Error types for PillarKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StorageError
pub type Result<T> = std::result::Result<T, StorageError>;

/// Unified error type for PillarKV operations
#[derive(Debug, Error)]
pub enum StorageError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Remote Store Errors
    // -------------------------------------------------------------------------
    #[error("Store rejected request: {0}")]
    Remote(String),

    #[error("Unknown keyspace: {0}")]
    UnknownKeyspace(String),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
