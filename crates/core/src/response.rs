//! Structured tool responses.
//!
//! Tool operations exposed to calling agents never raise in normal
//! operation; they return a value with a `status` field so callers can
//! branch on the outcome programmatically.

use serde::{Deserialize, Serialize};

/// Outcome of a tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

/// Generic envelope for tool results carrying a data payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse<T> {
    pub status: ToolStatus,

    /// Payload, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Human-readable outcome description
    pub message: String,
}

impl<T> ToolResponse<T> {
    /// Build a success response with a payload.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Success,
            data: Some(data),
            message: message.into(),
        }
    }

    /// Build an error response with an explanation.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            data: None,
            message: message.into(),
        }
    }

    /// Whether the invocation succeeded.
    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }
}
