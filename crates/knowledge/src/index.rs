//! Flat L2 vector index.
//!
//! Brute-force exact nearest-neighbor search over fixed-dimension
//! vectors. All vectors live in one contiguous buffer; a query scans
//! every stored vector and ranks by squared Euclidean distance (the
//! usual flat-L2 convention — ordering is identical to true L2).

use helpdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// In-memory flat vector index.
///
/// The dimension is fixed at construction for the lifetime of an index
/// generation; replacing the index wholesale is how callers change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatIndex {
    /// Vector dimension, fixed per generation
    dim: usize,

    /// Row-major vector storage, `len == dim * count`
    vectors: Vec<f32>,
}

impl FlatIndex {
    /// Create an empty index with the given dimension.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: Vec::new(),
        }
    }

    /// Vector dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.vectors.len() / self.dim
        }
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append a vector to the index.
    ///
    /// The vector's position is the current count; positions are stable
    /// because the index is append-only within a generation.
    pub fn push(&mut self, vector: &[f32]) -> AppResult<()> {
        if vector.len() != self.dim {
            return Err(AppError::DimensionMismatch(format!(
                "cannot insert {}-dimensional vector into {}-dimensional index",
                vector.len(),
                self.dim
            )));
        }

        self.vectors.extend_from_slice(vector);
        Ok(())
    }

    /// Find the `top_k` nearest neighbors of `query` by ascending
    /// squared L2 distance.
    ///
    /// Returns `(distance, position)` pairs; ties are broken by
    /// ascending insertion position. `top_k` is clamped to the stored
    /// count.
    pub fn search(&self, query: &[f32], top_k: usize) -> AppResult<Vec<(f32, usize)>> {
        if query.len() != self.dim {
            return Err(AppError::DimensionMismatch(format!(
                "query has dimension {}, index has dimension {}",
                query.len(),
                self.dim
            )));
        }

        if self.vectors.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f32, usize)> = self
            .vectors
            .chunks_exact(self.dim)
            .enumerate()
            .map(|(position, vector)| (l2_squared(query, vector), position))
            .collect();

        scored.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        scored.truncate(top_k);

        Ok(scored)
    }
}

/// Squared Euclidean distance between two equal-length vectors.
fn l2_squared(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index = FlatIndex::new(4);
        assert_eq!(index.dim(), 4);
        assert_eq!(index.len(), 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_push_and_len() {
        let mut index = FlatIndex::new(3);
        index.push(&[1.0, 0.0, 0.0]).unwrap();
        index.push(&[0.0, 1.0, 0.0]).unwrap();

        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_push_wrong_dimension() {
        let mut index = FlatIndex::new(3);
        let result = index.push(&[1.0, 0.0]);

        assert!(matches!(result, Err(AppError::DimensionMismatch(_))));
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_search_orders_by_ascending_distance() {
        let mut index = FlatIndex::new(2);
        index.push(&[10.0, 0.0]).unwrap();
        index.push(&[1.0, 0.0]).unwrap();
        index.push(&[5.0, 0.0]).unwrap();

        let results = index.search(&[0.0, 0.0], 3).unwrap();

        let positions: Vec<usize> = results.iter().map(|(_, p)| *p).collect();
        assert_eq!(positions, vec![1, 2, 0]);

        // Distances are non-decreasing
        for pair in results.windows(2) {
            assert!(pair[0].0 <= pair[1].0);
        }
    }

    #[test]
    fn test_search_tie_break_by_position() {
        let mut index = FlatIndex::new(2);
        index.push(&[1.0, 0.0]).unwrap();
        index.push(&[1.0, 0.0]).unwrap();
        index.push(&[0.0, 1.0]).unwrap();

        let results = index.search(&[1.0, 0.0], 3).unwrap();

        // Equal distances preserve insertion order
        assert_eq!(results[0].1, 0);
        assert_eq!(results[1].1, 1);
        assert_eq!(results[2].1, 2);
    }

    #[test]
    fn test_search_clamps_top_k() {
        let mut index = FlatIndex::new(2);
        index.push(&[1.0, 0.0]).unwrap();
        index.push(&[0.0, 1.0]).unwrap();

        let results = index.search(&[0.5, 0.5], 100).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_search_wrong_dimension_fails_closed() {
        let mut index = FlatIndex::new(3);
        index.push(&[1.0, 0.0, 0.0]).unwrap();

        let result = index.search(&[1.0, 0.0], 1);
        assert!(matches!(result, Err(AppError::DimensionMismatch(_))));
    }

    #[test]
    fn test_search_empty_index() {
        let index = FlatIndex::new(3);
        let results = index.search(&[1.0, 0.0, 0.0], 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut index = FlatIndex::new(2);
        index.push(&[0.25, -1.5]).unwrap();
        index.push(&[3.0, 0.125]).unwrap();

        let json = serde_json::to_string(&index).unwrap();
        let restored: FlatIndex = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, index);
        assert_eq!(
            restored.search(&[0.25, -1.5], 1).unwrap(),
            index.search(&[0.25, -1.5], 1).unwrap()
        );
    }
}
