use serde::{Deserialize, Serialize};

use crate::lda::LdaModel;
use crate::SparseVector;

/// Cosine-similarity index over per-document topic distributions. Rows are
/// position-aligned with the corpus, so a hit's position can be mapped back
/// to an external document id through the document map.
#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarityIndex {
    rows: Vec<Vec<f64>>, // L2-normalized topic vectors
}

impl SimilarityIndex {
    /// Transform every corpus document through the fitted model and store its
    /// normalized topic vector.
    pub fn build(model: &LdaModel, vectors: &[SparseVector]) -> Self {
        let rows = vectors.iter().map(|v| normalize(model.infer(v))).collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Top-k corpus positions most similar to the given topic distribution,
    /// as (position, cosine score) pairs in descending score order.
    pub fn query(&self, topics: &[f64], k: usize) -> Vec<(usize, f64)> {
        let q = normalize(topics.to_vec());
        let mut scored: Vec<(usize, f64)> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i, dot(row, &q)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn normalize(mut v: Vec<f64>) -> Vec<f64> {
    let mut norm = dot(&v, &v).sqrt();
    if norm == 0.0 {
        norm = 1.0;
    }
    for x in &mut v {
        *x /= norm;
    }
    v
}
