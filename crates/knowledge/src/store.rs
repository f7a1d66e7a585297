//! Ordered document store.
//!
//! Holds `(text, metadata)` records positionally aligned 1:1 with the
//! vector index: the record at position `i` belongs to the `i`-th
//! inserted vector.

use serde::{Deserialize, Serialize};

/// A stored knowledge document.
///
/// The document's position in the store is implicit (its index), not a
/// stored field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document text
    pub text: String,

    /// Schema-less metadata (string keys, scalar/sequence/mapping values)
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Append-only ordered sequence of documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    /// Append a document; its position is the previous count.
    pub fn push(&mut self, document: Document) {
        self.documents.push(document);
    }

    /// Fetch the document at `position`, if in range.
    pub fn get(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
