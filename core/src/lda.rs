use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{SparseVector, TermId};

/// Fold-in passes used when inferring a topic distribution for one document.
const INFER_PASSES: usize = 20;

#[derive(Debug, Clone)]
pub struct LdaParams {
    pub num_topics: usize,
    pub iterations: usize,
    /// Document-topic concentration.
    pub alpha: f64,
    /// Topic-word concentration.
    pub beta: f64,
    pub seed: u64,
}

impl Default for LdaParams {
    fn default() -> Self {
        Self {
            num_topics: 500,
            iterations: 50,
            alpha: 0.1,
            beta: 0.01,
            seed: 42,
        }
    }
}

/// Latent Dirichlet allocation fitted over a sparse bag-of-words corpus by
/// collapsed Gibbs sampling. The sampler is seeded, so a run is reproducible
/// for the same corpus and parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LdaModel {
    pub num_topics: usize,
    pub vocab_size: usize,
    pub alpha: f64,
    pub beta: f64,
    /// topic -> per-term probabilities, each row summing to one.
    topic_word: Vec<Vec<f64>>,
}

impl LdaModel {
    pub fn fit(vectors: &[SparseVector], vocab_size: usize, params: &LdaParams) -> Self {
        let t = params.num_topics.max(1);
        let v = vocab_size.max(1) as f64;

        // Expand each bag into a flat token stream for per-token assignments.
        let docs: Vec<Vec<TermId>> = vectors
            .iter()
            .map(|vector| {
                let mut words = Vec::new();
                for &(id, count) in vector {
                    for _ in 0..count {
                        words.push(id);
                    }
                }
                words
            })
            .collect();

        let mut word_topic = vec![vec![0u32; t]; vocab_size];
        let mut doc_topic = vec![vec![0u32; t]; docs.len()];
        let mut topic_totals = vec![0u32; t];
        let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(docs.len());

        let mut rng = StdRng::seed_from_u64(params.seed);
        for (d, words) in docs.iter().enumerate() {
            let mut zs = Vec::with_capacity(words.len());
            for &w in words {
                let z = rng.gen_range(0..t);
                word_topic[w as usize][z] += 1;
                doc_topic[d][z] += 1;
                topic_totals[z] += 1;
                zs.push(z);
            }
            assignments.push(zs);
        }

        let mut cumulative = vec![0f64; t];
        for _ in 0..params.iterations {
            for (d, words) in docs.iter().enumerate() {
                for (i, &w) in words.iter().enumerate() {
                    let w = w as usize;
                    let z = assignments[d][i];
                    word_topic[w][z] -= 1;
                    doc_topic[d][z] -= 1;
                    topic_totals[z] -= 1;

                    let mut total = 0.0;
                    for (k, slot) in cumulative.iter_mut().enumerate() {
                        let p_word = (word_topic[w][k] as f64 + params.beta)
                            / (topic_totals[k] as f64 + v * params.beta);
                        let p_doc = doc_topic[d][k] as f64 + params.alpha;
                        total += p_word * p_doc;
                        *slot = total;
                    }
                    let draw = rng.gen::<f64>() * total;
                    let new_z = cumulative
                        .iter()
                        .position(|&c| draw < c)
                        .unwrap_or(t - 1);

                    word_topic[w][new_z] += 1;
                    doc_topic[d][new_z] += 1;
                    topic_totals[new_z] += 1;
                    assignments[d][i] = new_z;
                }
            }
        }

        let topic_word = (0..t)
            .map(|k| {
                let denom = topic_totals[k] as f64 + v * params.beta;
                (0..vocab_size)
                    .map(|w| (word_topic[w][k] as f64 + params.beta) / denom)
                    .collect()
            })
            .collect();

        Self {
            num_topics: t,
            vocab_size,
            alpha: params.alpha,
            beta: params.beta,
            topic_word,
        }
    }

    /// Topic distribution for one bag-of-words, via deterministic fixed-point
    /// fold-in against the fitted topic-word table. An empty vector gets the
    /// uniform distribution.
    pub fn infer(&self, vector: &SparseVector) -> Vec<f64> {
        let t = self.num_topics;
        let mut theta = vec![1.0 / t as f64; t];
        if vector.is_empty() {
            return theta;
        }
        let mut resp = vec![0f64; t];
        for _ in 0..INFER_PASSES {
            let mut next = vec![self.alpha; t];
            for &(w, count) in vector {
                let w = w as usize;
                if w >= self.vocab_size {
                    continue;
                }
                let mut norm = 0.0;
                for k in 0..t {
                    resp[k] = theta[k] * self.topic_word[k][w];
                    norm += resp[k];
                }
                if norm <= 0.0 {
                    continue;
                }
                for k in 0..t {
                    next[k] += count as f64 * resp[k] / norm;
                }
            }
            let denom: f64 = next.iter().sum();
            for x in &mut next {
                *x /= denom;
            }
            theta = next;
        }
        theta
    }

    /// Highest-probability terms for one topic, descending.
    pub fn top_terms(&self, topic: usize, n: usize) -> Vec<(TermId, f64)> {
        let Some(row) = self.topic_word.get(topic) else {
            return Vec::new();
        };
        let mut scored: Vec<(TermId, f64)> = row
            .iter()
            .enumerate()
            .map(|(w, &p)| (w as TermId, p))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(n);
        scored
    }
}
