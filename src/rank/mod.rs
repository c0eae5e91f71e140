//! Embedding-based relevance ranking of outline sections.
//!
//! The [`Embedder`] trait is the seam to the encoding model: anything that
//! turns texts into fixed-dimension vectors can drive an [`EmbeddingRanker`].
//! Two implementations ship with the crate:
//!
//! - [`HashingEmbedder`]: deterministic feature hashing, always available
//! - `FastEmbedder`: ONNX sentence-transformers, behind the `fastembed` feature

mod hashing;
#[cfg(feature = "fastembed")]
mod onnx;

#[cfg(feature = "fastembed")]
pub use onnx::{FastEmbedder, MINILM_MODEL_ID};
pub use hashing::{HashingEmbedder, DEFAULT_DIMENSION, HASHING_MODEL_ID};

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::model::{RankedSection, Section};

/// Number of sections kept when no other limit is configured.
pub const DEFAULT_TOP_K: usize = 10;

/// Model used when none is configured.
#[cfg(feature = "fastembed")]
pub const DEFAULT_EMBEDDING_MODEL: &str = MINILM_MODEL_ID;
/// Model used when none is configured.
#[cfg(not(feature = "fastembed"))]
pub const DEFAULT_EMBEDDING_MODEL: &str = HASHING_MODEL_ID;

/// A text encoder producing one dense vector per input text.
///
/// Implementations are loaded once and used read-only.
pub trait Embedder {
    /// Identifier of the underlying model.
    fn model_id(&self) -> &str;

    /// Encode every text; the result has one vector per input, in order.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn model_id(&self) -> &str {
        (**self).model_id()
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        (**self).embed(texts)
    }
}

/// Resolve a model identifier to an embedder.
pub fn load_embedder(model_id: &str) -> Result<Box<dyn Embedder>> {
    if model_id == HASHING_MODEL_ID {
        return Ok(Box::new(HashingEmbedder::new()));
    }
    load_model(model_id)
}

#[cfg(feature = "fastembed")]
fn load_model(model_id: &str) -> Result<Box<dyn Embedder>> {
    Ok(Box::new(FastEmbedder::try_new(model_id)?))
}

#[cfg(not(feature = "fastembed"))]
fn load_model(model_id: &str) -> Result<Box<dyn Embedder>> {
    Err(Error::Embedding(format!(
        "model '{}' requires the `fastembed` feature (available without it: '{}')",
        model_id, HASHING_MODEL_ID
    )))
}

/// Cosine similarity of two vectors; 0.0 if either has zero length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Indices of the `k` highest scores, best first.
///
/// Equal scores keep their input order, so the result is fully determined
/// by the scores.
pub fn top_k_indices(scores: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&i, &j| match scores[j].total_cmp(&scores[i]) {
        Ordering::Equal => i.cmp(&j),
        other => other,
    });
    order.truncate(k);
    order
}

/// Scores sections against a query and keeps the best `top_k`.
pub struct EmbeddingRanker<E: Embedder = Box<dyn Embedder>> {
    embedder: E,
    top_k: usize,
}

impl<E: Embedder> EmbeddingRanker<E> {
    /// Create a ranker keeping `top_k` sections.
    pub fn new(embedder: E, top_k: usize) -> Self {
        Self { embedder, top_k }
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Cosine similarity of every section to the query, in section order.
    pub fn score(&self, query: &str, sections: &[Section]) -> Result<Vec<f64>> {
        if query.trim().is_empty() {
            return Err(Error::Ranking("query is empty".to_string()));
        }
        if sections.is_empty() {
            return Ok(Vec::new());
        }

        let query_vec = self
            .embedder
            .embed(&[query])?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Ranking("embedder returned no query vector".to_string()))?;

        let texts: Vec<&str> = sections.iter().map(|s| s.text.as_str()).collect();
        let section_vecs = self.embedder.embed(&texts)?;
        if section_vecs.len() != sections.len() {
            return Err(Error::Ranking(format!(
                "embedder returned {} vectors for {} sections",
                section_vecs.len(),
                sections.len()
            )));
        }

        section_vecs
            .iter()
            .map(|v| {
                if v.len() != query_vec.len() {
                    return Err(Error::Ranking(format!(
                        "dimension mismatch: query has {}, section has {}",
                        query_vec.len(),
                        v.len()
                    )));
                }
                Ok(cosine_similarity(&query_vec, v))
            })
            .collect()
    }

    /// Rank sections by relevance to the query and keep the top K.
    pub fn rank(&self, query: &str, sections: &[Section]) -> Result<Vec<RankedSection>> {
        let scores = self.score(query, sections)?;
        log::debug!(
            "scored {} sections with {}",
            scores.len(),
            self.embedder.model_id()
        );

        Ok(top_k_indices(&scores, self.top_k)
            .into_iter()
            .enumerate()
            .map(|(position, idx)| {
                let section = &sections[idx];
                RankedSection {
                    document: section.document.clone(),
                    page: section.page,
                    section_title: section.text.clone(),
                    importance_score: scores[idx],
                    rank: position + 1,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Returns fixed vectors looked up by text; unknown texts map to zero.
    struct TableEmbedder {
        vectors: HashMap<&'static str, Vec<f32>>,
    }

    impl TableEmbedder {
        fn new(entries: &[(&'static str, [f32; 2])]) -> Self {
            Self {
                vectors: entries.iter().map(|(t, v)| (*t, v.to_vec())).collect(),
            }
        }
    }

    impl Embedder for TableEmbedder {
        fn model_id(&self) -> &str {
            "table"
        }

        fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| self.vectors.get(t).cloned().unwrap_or_else(|| vec![0.0, 0.0]))
                .collect())
        }
    }

    fn section(text: &str) -> Section {
        Section {
            document: "doc.pdf".to_string(),
            page: 1,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 0.0], &[-2.0, 0.0]) + 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_top_k_ties_keep_input_order() {
        let scores = [0.5, 0.9, 0.5, 0.9, 0.1];
        assert_eq!(top_k_indices(&scores, 10), vec![1, 3, 0, 2, 4]);
        assert_eq!(top_k_indices(&scores, 3), vec![1, 3, 0]);
        assert!(top_k_indices(&[], 3).is_empty());
    }

    #[test]
    fn test_rank_orders_and_numbers() {
        let embedder = TableEmbedder::new(&[
            ("q", [1.0, 0.0]),
            ("best", [1.0, 0.1]),
            ("middle", [1.0, 1.0]),
            ("worst", [0.0, 1.0]),
        ]);
        let ranker = EmbeddingRanker::new(embedder, 2);
        let sections = vec![section("worst"), section("middle"), section("best")];

        let ranked = ranker.rank("q", &sections).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].section_title, "best");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].section_title, "middle");
        assert_eq!(ranked[1].rank, 2);
        assert!(ranked[0].importance_score >= ranked[1].importance_score);
    }

    #[test]
    fn test_rank_fewer_sections_than_k() {
        let ranker = EmbeddingRanker::new(HashingEmbedder::new(), DEFAULT_TOP_K);
        let sections = vec![section("Introduction"), section("Results")];
        let ranked = ranker.rank("Summarize key points", &sections).unwrap();
        let ranks: Vec<_> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn test_empty_query_is_an_error() {
        let ranker = EmbeddingRanker::new(HashingEmbedder::new(), 5);
        let result = ranker.rank("  ", &[section("Intro")]);
        assert!(matches!(result, Err(Error::Ranking(_))));
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        struct Ragged;
        impl Embedder for Ragged {
            fn model_id(&self) -> &str {
                "ragged"
            }
            fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
                Ok(texts.iter().map(|t| vec![1.0; t.len()]).collect())
            }
        }

        let ranker = EmbeddingRanker::new(Ragged, 5);
        let result = ranker.rank("query", &[section("a much longer section")]);
        assert!(matches!(result, Err(Error::Ranking(_))));
    }

    #[test]
    fn test_load_embedder() {
        let embedder = load_embedder(HASHING_MODEL_ID).unwrap();
        assert_eq!(embedder.model_id(), "hashing");

        #[cfg(not(feature = "fastembed"))]
        assert!(matches!(
            load_embedder("sentence-transformers/all-MiniLM-L6-v2"),
            Err(Error::Embedding(_))
        ));
    }
}
