//! Embedding provider implementations.

pub mod gemini;
pub mod mock;
