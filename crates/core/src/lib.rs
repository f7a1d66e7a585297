//! Helpdesk Core Library
//!
//! This crate provides the foundational utilities for the helpdesk
//! workspace:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management
//! - Structured tool responses

pub mod config;
pub mod error;
pub mod logging;
pub mod response;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use response::{ToolResponse, ToolStatus};
