use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{IndexError, SparseVector, TermId};

/// Token -> integer id table, assigned in first-seen order across documents.
/// An id, once assigned, is stable for the rest of the run and never reused.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    ids: HashMap<String, TermId>,
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_or_insert(&mut self, token: &str) -> TermId {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }
        let id = self.terms.len() as TermId;
        self.ids.insert(token.to_string(), id);
        self.terms.push(token.to_string());
        id
    }

    pub fn id(&self, token: &str) -> Option<TermId> {
        self.ids.get(token).copied()
    }

    pub fn term(&self, id: TermId) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Corpus {
    pub vocabulary: Vocabulary,
    /// Position -> external document id. Dense, zero-based, bijective over
    /// the processed documents.
    pub doc_map: Vec<String>,
    /// Bag-of-words vectors, position-aligned with `doc_map`.
    pub vectors: Vec<SparseVector>,
}

impl Corpus {
    /// Assemble vocabulary, document mapping, and sparse vectors from ordered
    /// `(document id, token sequence)` pairs. Position `i` in `vectors` is
    /// always the bag-of-words of `doc_map[i]`.
    ///
    /// A document with an empty token sequence still occupies a position (its
    /// vector is empty). Fails if there are no documents at all, or if no
    /// document produced a single token.
    pub fn assemble(docs: Vec<(String, Vec<String>)>) -> Result<Self, IndexError> {
        if docs.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }
        let mut vocabulary = Vocabulary::new();
        let mut doc_map = Vec::with_capacity(docs.len());
        let mut vectors = Vec::with_capacity(docs.len());

        for (doc_id, tokens) in docs {
            let mut counts: HashMap<TermId, u32> = HashMap::new();
            for token in &tokens {
                *counts.entry(vocabulary.id_or_insert(token)).or_insert(0) += 1;
            }
            let mut vector: SparseVector = counts.into_iter().collect();
            vector.sort_by_key(|&(id, _)| id); // entries sorted by term id
            doc_map.push(doc_id);
            vectors.push(vector);
        }

        if vocabulary.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }
        Ok(Self {
            vocabulary,
            doc_map,
            vectors,
        })
    }

    pub fn num_docs(&self) -> usize {
        self.doc_map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, tokens: &[&str]) -> (String, Vec<String>) {
        (id.into(), tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn positions_are_dense_and_bijective() {
        let corpus = Corpus::assemble(vec![
            doc("US001", &["wrench", "jaw"]),
            doc("US002", &["valve"]),
            doc("US003", &["wrench"]),
        ])
        .unwrap();
        assert_eq!(corpus.doc_map, vec!["US001", "US002", "US003"]);
        assert_eq!(corpus.vectors.len(), 3);
    }

    #[test]
    fn term_ids_are_stable_across_documents() {
        let corpus = Corpus::assemble(vec![
            doc("US001", &["wrench", "jaw"]),
            doc("US002", &["jaw", "wrench", "valve"]),
        ])
        .unwrap();
        let wrench = corpus.vocabulary.id("wrench").unwrap();
        let jaw = corpus.vocabulary.id("jaw").unwrap();
        let valve = corpus.vocabulary.id("valve").unwrap();
        // First-seen order across documents in position order.
        assert_eq!((wrench, jaw, valve), (0, 1, 2));
        assert_eq!(corpus.vocabulary.term(wrench), Some("wrench"));
    }

    #[test]
    fn vectors_align_with_their_own_documents() {
        let corpus = Corpus::assemble(vec![
            doc("US001", &["wrench", "wrench", "jaw"]),
            doc("US002", &["valve"]),
        ])
        .unwrap();
        let wrench = corpus.vocabulary.id("wrench").unwrap();
        let valve = corpus.vocabulary.id("valve").unwrap();
        assert!(corpus.vectors[0].contains(&(wrench, 2)));
        assert_eq!(corpus.vectors[1], vec![(valve, 1)]);
    }

    #[test]
    fn round_trip_through_vocabulary_matches_token_multiset() {
        let tokens = ["wrench", "jaw", "wrench", "H04L"];
        let corpus = Corpus::assemble(vec![doc("US001", &tokens)]).unwrap();

        let mut decoded = Vec::new();
        for &(id, count) in &corpus.vectors[0] {
            for _ in 0..count {
                decoded.push(corpus.vocabulary.term(id).unwrap().to_string());
            }
        }
        let mut expected: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        decoded.sort();
        expected.sort();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn empty_token_sequences_keep_their_position() {
        let corpus =
            Corpus::assemble(vec![doc("US001", &[]), doc("US002", &["valve"])]).unwrap();
        assert_eq!(corpus.doc_map.len(), 2);
        assert!(corpus.vectors[0].is_empty());
    }

    #[test]
    fn empty_corpus_is_fatal() {
        assert!(matches!(
            Corpus::assemble(Vec::new()),
            Err(IndexError::EmptyCorpus)
        ));
        // Documents exist but none yielded a token.
        assert!(matches!(
            Corpus::assemble(vec![doc("US001", &[])]),
            Err(IndexError::EmptyCorpus)
        ));
    }
}
