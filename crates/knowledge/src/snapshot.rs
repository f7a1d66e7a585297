//! Snapshot persistence for the knowledge base.
//!
//! The index and the document store are written together as one
//! combined JSON artifact, via a temp-file + rename so a crash can
//! never leave the two halves diverged on disk. The snapshot is read
//! once at startup and rewritten after every successful mutation.

use crate::index::FlatIndex;
use crate::store::DocumentStore;
use helpdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Combined on-disk state of a knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Vector index, `None` until the first document fixes a dimension
    pub index: Option<FlatIndex>,

    /// Documents, positionally aligned with the index
    pub documents: DocumentStore,
}

impl Snapshot {
    /// Check the index/store alignment invariant.
    ///
    /// The vector count and the document count must agree at all times;
    /// a snapshot violating this was corrupted outside the process.
    pub fn validate(&self) -> AppResult<()> {
        let vector_count = self.index.as_ref().map_or(0, |index| index.len());
        if vector_count != self.documents.len() {
            return Err(AppError::CorruptKnowledgeBase(format!(
                "index holds {} vectors but store holds {} documents",
                vector_count,
                self.documents.len()
            )));
        }
        Ok(())
    }
}

/// Load a snapshot from disk.
///
/// A missing file yields an empty snapshot (fresh knowledge base). A
/// file that fails to parse, or whose index and store counts disagree,
/// is `CorruptKnowledgeBase` — the caller must intervene or rebuild
/// rather than silently operate on mismatched data.
pub fn load(path: &Path) -> AppResult<Snapshot> {
    if !path.exists() {
        tracing::debug!("No snapshot at {:?}, starting empty", path);
        return Ok(Snapshot::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::CorruptKnowledgeBase(format!("failed to read {:?}: {}", path, e)))?;

    let snapshot: Snapshot = serde_json::from_str(&contents).map_err(|e| {
        AppError::CorruptKnowledgeBase(format!("failed to parse {:?}: {}", path, e))
    })?;

    snapshot.validate()?;

    tracing::debug!(
        "Loaded snapshot from {:?}: {} documents",
        path,
        snapshot.documents.len()
    );

    Ok(snapshot)
}

/// Write a snapshot to disk atomically.
///
/// Serializes to a sibling temp file and renames it over the target, so
/// readers only ever observe a complete snapshot.
pub fn save(snapshot: &Snapshot, path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string(snapshot)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, path)?;

    tracing::debug!(
        "Persisted snapshot to {:?}: {} documents",
        path,
        snapshot.documents.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Document;
    use tempfile::TempDir;

    fn sample_snapshot() -> Snapshot {
        let mut index = FlatIndex::new(3);
        index.push(&[1.0, 0.0, 0.0]).unwrap();
        index.push(&[0.0, 1.0, 0.0]).unwrap();

        let mut documents = DocumentStore::default();
        documents.push(Document {
            text: "VPN fails after update".to_string(),
            metadata: serde_json::json!({"category": "Network"}),
        });
        documents.push(Document {
            text: "printer offline".to_string(),
            metadata: serde_json::json!({"category": "Hardware"}),
        });

        Snapshot {
            index: Some(index),
            documents,
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let snapshot = load(&temp.path().join("knowledge.json")).unwrap();

        assert!(snapshot.index.is_none());
        assert!(snapshot.documents.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("knowledge.json");

        let snapshot = sample_snapshot();
        save(&snapshot, &path).unwrap();

        let restored = load(&path).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".helpdesk").join("knowledge.json");

        save(&sample_snapshot(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("knowledge.json");

        save(&sample_snapshot(), &path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("knowledge.json");
        std::fs::write(&path, "{not valid json").unwrap();

        let result = load(&path);
        assert!(matches!(
            result,
            Err(AppError::CorruptKnowledgeBase(_))
        ));
    }

    #[test]
    fn test_load_rejects_count_mismatch() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("knowledge.json");

        // Snapshot with two vectors but only one document
        let mut snapshot = sample_snapshot();
        snapshot.documents = DocumentStore::default();
        snapshot.documents.push(Document {
            text: "lonely".to_string(),
            metadata: serde_json::json!({}),
        });
        let json = serde_json::to_string(&snapshot).unwrap();
        std::fs::write(&path, json).unwrap();

        let result = load(&path);
        assert!(matches!(
            result,
            Err(AppError::CorruptKnowledgeBase(_))
        ));
    }
}
