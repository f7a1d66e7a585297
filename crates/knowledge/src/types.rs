//! Knowledge base type definitions.

use helpdesk_core::ToolStatus;
use serde::{Deserialize, Serialize};

/// Result of an `add_document` call.
///
/// Never raised as an error: failures are reported through `status`
/// so calling agents can branch on the outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddResponse {
    pub status: ToolStatus,

    /// Total document count after the call (unchanged on error)
    pub count: usize,

    /// Human-readable outcome description
    pub message: String,
}

impl AddResponse {
    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }
}

/// A single search result joined from the index and the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Document text
    pub text: String,

    /// Document metadata as stored
    #[serde(default)]
    pub metadata: serde_json::Value,

    /// Squared L2 distance to the query (lower is more similar)
    pub score: f32,
}

/// Result of a `search` call.
///
/// An empty `results` list with `status: success` means the knowledge
/// base sincerely had nothing to return; retrieval failures use
/// `status: error` so the two cases stay distinguishable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub status: ToolStatus,

    /// Hits ordered by ascending distance
    pub results: Vec<SearchHit>,

    /// Human-readable outcome description
    pub message: String,
}

impl SearchResponse {
    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }
}

/// Statistics for a knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbStats {
    /// Number of stored documents
    pub documents: usize,

    /// Live index dimension, `None` while uninitialized
    pub dimension: Option<usize>,
}
