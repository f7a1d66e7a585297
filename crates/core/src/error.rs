//! Error types for the helpdesk system.
//!
//! This module defines a unified error enum covering every error
//! category in the workspace: configuration, I/O, the embedding
//! service, knowledge-base integrity, session storage, and ticket
//! operations.

use thiserror::Error;

/// Unified error type for the helpdesk system.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Empty or malformed document input (caller error, not retryable)
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Transient remote embedding failure (retryable at the caller's
    /// discretion; never retried internally)
    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    /// Embedding dimension disagrees with the live index
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// On-disk knowledge-base artifacts are inconsistent at load
    #[error("Corrupt knowledge base: {0}")]
    CorruptKnowledgeBase(String),

    /// Session store errors
    #[error("Session error: {0}")]
    Session(String),

    /// Ticket operation errors
    #[error("Ticket error: {0}")]
    Ticket(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
