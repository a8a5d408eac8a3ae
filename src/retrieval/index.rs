//! HNSW index over chunk embeddings
//!
//! The index is built once from the full chunk set of an upload and replaced
//! wholesale when the file set changes; there is no incremental update or
//! deletion path.

use hnsw_rs::prelude::*;

use crate::config::RetrievalConfig;
use crate::error::{Error, Result};
use crate::types::Chunk;

/// Search result with chunk and similarity
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity (0.0-1.0, higher is better)
    pub similarity: f32,
}

/// Similarity-searchable index over the chunks of one upload set
pub struct ChunkIndex {
    hnsw: Hnsw<'static, f32, DistCosine>,
    chunks: Vec<Chunk>,
    dimensions: usize,
}

impl ChunkIndex {
    /// Build an index from embedded chunks.
    ///
    /// Every chunk must carry an embedding of the expected dimensions with
    /// finite components.
    pub fn build(chunks: Vec<Chunk>, dimensions: usize, config: &RetrievalConfig) -> Result<Self> {
        for (i, chunk) in chunks.iter().enumerate() {
            if chunk.embedding.len() != dimensions {
                return Err(Error::index(format!(
                    "Chunk {} has wrong embedding dimensions: expected {}, got {}",
                    i,
                    dimensions,
                    chunk.embedding.len()
                )));
            }
            if chunk.embedding.iter().any(|v| !v.is_finite()) {
                return Err(Error::index(format!(
                    "Chunk {} embedding contains NaN or Infinity",
                    i
                )));
            }
        }

        let nb_layer = if chunks.len() > 1 {
            ((chunks.len() as f32).log2().ceil() as usize).clamp(4, 16)
        } else {
            4
        };

        let mut hnsw: Hnsw<f32, DistCosine> = Hnsw::new(
            config.hnsw_m,
            chunks.len().max(1),
            nb_layer,
            config.hnsw_ef_construction,
            DistCosine,
        );

        for (id, chunk) in chunks.iter().enumerate() {
            let normalized = normalize_vector(&chunk.embedding);
            hnsw.insert((&normalized, id));
        }

        hnsw.set_searching_mode(true);

        Ok(Self {
            hnsw,
            chunks,
            dimensions,
        })
    }

    /// Search for the k nearest chunks, returned in the library's result
    /// order. No deduplication or score threshold is applied.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        if query.len() != self.dimensions {
            return Err(Error::index(format!(
                "Query has wrong dimensions: expected {}, got {}",
                self.dimensions,
                query.len()
            )));
        }
        if query.iter().any(|v| !v.is_finite()) {
            return Err(Error::index("Query contains NaN or Infinity"));
        }
        if self.chunks.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let normalized = normalize_vector(query);
        let ef_search = (k * 2).max(50);
        let neighbours = self.hnsw.search(&normalized, k, ef_search);

        Ok(neighbours
            .into_iter()
            .filter_map(|n| {
                self.chunks.get(n.d_id).map(|chunk| ScoredChunk {
                    chunk: chunk.clone(),
                    similarity: 1.0 - n.distance,
                })
            })
            .collect())
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl std::fmt::Debug for ChunkIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkIndex")
            .field("chunks", &self.chunks.len())
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

/// Normalize a vector to unit length for cosine similarity
fn normalize_vector(v: &[f32]) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter().map(|x| x / norm).collect()
    } else {
        v.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chunk, ChunkSource};
    use uuid::Uuid;

    fn chunk_with_embedding(content: &str, embedding: Vec<f32>) -> Chunk {
        let mut chunk = Chunk::new(
            Uuid::new_v4(),
            content.to_string(),
            ChunkSource {
                filename: "visit.pdf".to_string(),
                page_count: Some(1),
            },
            0,
            content.len(),
            0,
        );
        chunk.embedding = embedding;
        chunk
    }

    #[test]
    fn nearest_chunk_is_found_first() {
        let chunks = vec![
            chunk_with_embedding("vitals", vec![1.0, 0.0, 0.0]),
            chunk_with_embedding("labs", vec![0.0, 1.0, 0.0]),
            chunk_with_embedding("meds", vec![0.0, 0.0, 1.0]),
        ];
        let index = ChunkIndex::build(chunks, 3, &RetrievalConfig::default()).unwrap();

        let results = index.search(&[0.9, 0.1, 0.0], 1).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.content, "vitals");
        assert!(results[0].similarity > 0.9);
    }

    #[test]
    fn k_larger_than_index_returns_all() {
        let chunks = vec![
            chunk_with_embedding("a", vec![1.0, 0.0]),
            chunk_with_embedding("b", vec![0.0, 1.0]),
        ];
        let index = ChunkIndex::build(chunks, 2, &RetrievalConfig::default()).unwrap();

        let results = index.search(&[1.0, 0.0], 5).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let chunks = vec![chunk_with_embedding("a", vec![1.0, 0.0, 0.0])];
        let err = ChunkIndex::build(chunks, 2, &RetrievalConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Index(_)));
    }

    #[test]
    fn empty_index_yields_no_results() {
        let index = ChunkIndex::build(Vec::new(), 3, &RetrievalConfig::default()).unwrap();
        assert!(index.is_empty());
        assert!(index.search(&[1.0, 0.0, 0.0], 3).unwrap().is_empty());
    }
}
