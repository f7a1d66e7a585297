//! Knowledge base facade.
//!
//! Composes the embedding provider, the flat vector index, and the
//! document store behind two operations: `add_document` and `search`.
//! Both return structured responses instead of raising, so calling
//! agents can branch on the outcome.
//!
//! The index and the store are mutated in lock-step and persisted as
//! one snapshot; the in-memory state is replaced only after the
//! snapshot write succeeds, so a failed add leaves the knowledge base
//! exactly as it was.

use crate::embeddings::EmbeddingProvider;
use crate::index::FlatIndex;
use crate::snapshot::{self, Snapshot};
use crate::store::{Document, DocumentStore};
use crate::types::{AddResponse, KbStats, SearchHit, SearchResponse};
use helpdesk_core::{AppError, AppResult, ToolStatus};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Default number of neighbors returned by `search`.
pub const DEFAULT_TOP_K: usize = 3;

/// A persistent, embedding-backed knowledge base.
///
/// Single-writer: `add_document` holds the write lock across the
/// in-memory mutation and the snapshot write. Embedding calls happen
/// before any lock is taken, so unrelated embeddings are never
/// serialized behind a mutation.
pub struct KnowledgeBase {
    provider: Arc<dyn EmbeddingProvider>,
    snapshot_path: PathBuf,
    state: RwLock<Snapshot>,
}

impl KnowledgeBase {
    /// Open a knowledge base, restoring any snapshot at `path`.
    ///
    /// A missing snapshot starts the base empty; a corrupt or
    /// inconsistent one fails loudly with `CorruptKnowledgeBase`.
    pub fn open(path: &Path, provider: Arc<dyn EmbeddingProvider>) -> AppResult<Self> {
        let state = snapshot::load(path)?;

        info!(
            "Opened knowledge base at {:?}: {} documents, provider '{}'",
            path,
            state.documents.len(),
            provider.provider_name()
        );

        Ok(Self {
            provider,
            snapshot_path: path.to_path_buf(),
            state: RwLock::new(state),
        })
    }

    /// Embed `text` and store it with `metadata`.
    ///
    /// Returns a structured response; on error the knowledge base is
    /// left exactly as it was before the call.
    pub async fn add_document(&self, text: &str, metadata: serde_json::Value) -> AddResponse {
        match self.try_add(text, metadata).await {
            Ok(outcome) => {
                info!("Document added, knowledge base now holds {}", outcome.count);
                AddResponse {
                    status: ToolStatus::Success,
                    count: outcome.count,
                    message: if outcome.reset {
                        "Document added after index reset (embedding dimension changed)"
                            .to_string()
                    } else {
                        "Document added".to_string()
                    },
                }
            }
            Err(e) => {
                warn!("add_document failed: {}", e);
                AddResponse {
                    status: ToolStatus::Error,
                    count: self.count().await,
                    message: e.to_string(),
                }
            }
        }
    }

    async fn try_add(&self, text: &str, metadata: serde_json::Value) -> AppResult<AddOutcome> {
        if text.trim().is_empty() {
            return Err(AppError::InvalidDocument(
                "document text must not be empty".to_string(),
            ));
        }

        // Embed before taking any lock; this is the only slow I/O
        let embedding = self.provider.embed(text).await?;
        if embedding.is_empty() {
            return Err(AppError::EmbeddingService(
                "provider returned an empty embedding".to_string(),
            ));
        }
        let dim = embedding.len();

        let mut state = self.state.write().await;

        // Build the next generation from a copy of the current one; the
        // live state changes only after the snapshot hits disk.
        let (mut index, mut documents, reset) = match state.index.clone() {
            None => (FlatIndex::new(dim), DocumentStore::default(), false),
            Some(existing) if existing.dim() != dim => {
                warn!(
                    "Embedding dimension changed from {} to {}; discarding {} documents and resetting index",
                    existing.dim(),
                    dim,
                    state.documents.len()
                );
                (FlatIndex::new(dim), DocumentStore::default(), true)
            }
            Some(existing) => (existing, state.documents.clone(), false),
        };

        index.push(&embedding)?;
        documents.push(Document {
            text: text.to_string(),
            metadata,
        });

        let next = Snapshot {
            index: Some(index),
            documents,
        };

        snapshot::save(&next, &self.snapshot_path)?;

        let count = next.documents.len();
        *state = next;

        Ok(AddOutcome { count, reset })
    }

    /// Find the `top_k` most similar documents to `query`.
    ///
    /// An empty knowledge base yields a success with no results; a
    /// failed retrieval yields an error response so callers can tell
    /// the two apart.
    pub async fn search(&self, query: &str, top_k: usize) -> SearchResponse {
        {
            let state = self.state.read().await;
            if state.index.is_none() || state.documents.is_empty() {
                return SearchResponse {
                    status: ToolStatus::Success,
                    results: Vec::new(),
                    message: "Knowledge base is empty".to_string(),
                };
            }
        }

        match self.try_search(query, top_k).await {
            Ok(results) => {
                info!("Search returned {} results", results.len());
                SearchResponse {
                    status: ToolStatus::Success,
                    results,
                    message: "Search completed".to_string(),
                }
            }
            Err(e) => {
                warn!("search failed: {}", e);
                SearchResponse {
                    status: ToolStatus::Error,
                    results: Vec::new(),
                    message: e.to_string(),
                }
            }
        }
    }

    async fn try_search(&self, query: &str, top_k: usize) -> AppResult<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidDocument(
                "query must not be empty".to_string(),
            ));
        }

        let embedding = self.provider.embed(query).await?;

        let state = self.state.read().await;
        let index = match state.index.as_ref() {
            Some(index) => index,
            None => return Ok(Vec::new()),
        };

        // Fail closed on embedding-model drift rather than returning
        // meaningless distances
        if embedding.len() != index.dim() {
            return Err(AppError::DimensionMismatch(format!(
                "query embedding has dimension {} but the index was built with {}; \
                 the embedding model likely changed since the last add",
                embedding.len(),
                index.dim()
            )));
        }

        let neighbors = index.search(&embedding, top_k)?;

        // Positions outside the store cannot occur while index and
        // store move in lock-step; discard rather than trust them.
        let hits = neighbors
            .into_iter()
            .filter_map(|(distance, position)| {
                state.documents.get(position).map(|document| SearchHit {
                    text: document.text.clone(),
                    metadata: document.metadata.clone(),
                    score: distance,
                })
            })
            .collect();

        Ok(hits)
    }

    /// Current document count.
    pub async fn count(&self) -> usize {
        self.state.read().await.documents.len()
    }

    /// Statistics for the knowledge base.
    pub async fn stats(&self) -> KbStats {
        let state = self.state.read().await;
        KbStats {
            documents: state.documents.len(),
            dimension: state.index.as_ref().map(|index| index.dim()),
        }
    }
}

struct AddOutcome {
    count: usize,
    reset: bool,
}
