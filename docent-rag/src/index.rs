//! Flat (brute-force) nearest-neighbour index over squared Euclidean distance.
//!
//! Vectors are stored contiguously in insertion order. Search scans every
//! vector, which is exact and fast enough for curated collections of a few
//! thousand documents.

use crate::error::{RagError, Result};

/// One hit of a [`FlatIndex::search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Insertion position of the matched vector.
    pub position: usize,
    /// Squared Euclidean distance to the query.
    pub distance: f32,
}

/// An exact k-nearest-neighbour index using squared L2 distance.
///
/// Read-only after [`build`](FlatIndex::build); share it freely across
/// concurrent searches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatIndex {
    dimensions: Option<usize>,
    data: Vec<f32>,
    len: usize,
}

/// Squared Euclidean distance between two equally sized vectors.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl FlatIndex {
    /// Build an index from vectors in insertion order.
    ///
    /// An empty input yields an empty index that never matches.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if the vectors do not all share
    /// the first vector's length, and [`RagError::ConfigError`] if that length
    /// is zero.
    pub fn build<V: AsRef<[f32]>>(vectors: &[V]) -> Result<Self> {
        let Some(first) = vectors.first() else {
            return Ok(Self::default());
        };

        let dimensions = first.as_ref().len();
        if dimensions == 0 {
            return Err(RagError::ConfigError("embedding vectors must not be empty".to_string()));
        }

        let mut data = Vec::with_capacity(dimensions * vectors.len());
        for vector in vectors {
            let vector = vector.as_ref();
            if vector.len() != dimensions {
                return Err(RagError::DimensionMismatch {
                    expected: dimensions,
                    actual: vector.len(),
                });
            }
            data.extend_from_slice(vector);
        }

        Ok(Self { dimensions: Some(dimensions), data, len: vectors.len() })
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Dimensionality of the indexed vectors, `None` for an empty index.
    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    /// The vector stored at `position`.
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        let dims = self.dimensions?;
        self.data.get(position * dims..(position + 1) * dims)
    }

    /// Return up to `min(k, len)` nearest neighbours, ascending by distance.
    ///
    /// Equal distances keep insertion order. An empty index, or `k == 0`,
    /// returns no results.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if the query's length differs
    /// from the indexed vectors'.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        let Some(dims) = self.dimensions else {
            return Ok(Vec::new());
        };
        if query.len() != dims {
            return Err(RagError::DimensionMismatch { expected: dims, actual: query.len() });
        }
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut neighbors: Vec<Neighbor> = self
            .data
            .chunks_exact(dims)
            .enumerate()
            .map(|(position, vector)| Neighbor { position, distance: squared_l2(vector, query) })
            .collect();

        // Stable sort: ties stay in insertion order.
        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        neighbors.truncate(k);
        Ok(neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_l2() {
        assert_eq!(squared_l2(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(squared_l2(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_empty_index_never_matches() {
        let index = FlatIndex::build::<Vec<f32>>(&[]).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.dimensions(), None);
        // Any query length is accepted by an empty index.
        assert!(index.search(&[1.0, 2.0, 3.0], 5).unwrap().is_empty());
    }

    #[test]
    fn test_build_rejects_mixed_dimensions() {
        let err = FlatIndex::build(&[vec![1.0, 0.0], vec![1.0, 0.0, 0.0]]).unwrap_err();
        assert!(matches!(err, RagError::DimensionMismatch { expected: 2, actual: 3 }));
    }

    #[test]
    fn test_build_rejects_zero_length_vectors() {
        let err = FlatIndex::build(&[Vec::<f32>::new()]).unwrap_err();
        assert!(matches!(err, RagError::ConfigError(_)));
    }

    #[test]
    fn test_search_rejects_wrong_query_length() {
        let index = FlatIndex::build(&[vec![1.0, 0.0]]).unwrap();
        let err = index.search(&[1.0], 1).unwrap_err();
        assert!(matches!(err, RagError::DimensionMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_search_orders_by_distance() {
        let index = FlatIndex::build(&[vec![5.0, 0.0], vec![1.0, 0.0], vec![3.0, 0.0]]).unwrap();
        let hits = index.search(&[0.0, 0.0], 3).unwrap();

        let positions: Vec<usize> = hits.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![1, 2, 0]);
        assert_eq!(hits[0].distance, 1.0);
        assert_eq!(hits[2].distance, 25.0);
    }

    #[test]
    fn test_search_ties_keep_insertion_order() {
        let index =
            FlatIndex::build(&[vec![0.0, 1.0], vec![1.0, 0.0], vec![0.0, -1.0], vec![-1.0, 0.0]])
                .unwrap();
        let hits = index.search(&[0.0, 0.0], 4).unwrap();

        let positions: Vec<usize> = hits.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_search_caps_at_len() {
        let index = FlatIndex::build(&[vec![1.0], vec![2.0]]).unwrap();
        assert_eq!(index.search(&[0.0], 10).unwrap().len(), 2);
        assert_eq!(index.search(&[0.0], 1).unwrap().len(), 1);
        assert!(index.search(&[0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_vector_lookup() {
        let index = FlatIndex::build(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(index.vector(1), Some(&[3.0, 4.0][..]));
        assert_eq!(index.vector(2), None);
    }
}
