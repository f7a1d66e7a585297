//! Local vector knowledge base.
//!
//! Embeds text, maintains a flat L2 similarity index positionally
//! aligned with a document store, persists both as one atomic snapshot,
//! and serves nearest-neighbor search.

pub mod embeddings;
pub mod index;
pub mod kb;
pub mod snapshot;
pub mod store;
pub mod types;


// Re-export commonly used types
pub use embeddings::{create_provider, EmbeddingProvider};
pub use index::FlatIndex;
pub use kb::{KnowledgeBase, DEFAULT_TOP_K};
pub use store::{Document, DocumentStore};
pub use types::{AddResponse, KbStats, SearchHit, SearchResponse};
