pub mod corpus;
pub mod lda;
pub mod parser;
pub mod persist;
pub mod similarity;
pub mod stopwords;
pub mod tokenizer;

mod error;

pub use error::IndexError;

use std::collections::HashMap;

pub type TermId = u32;

/// Field name -> extracted text, one per document, discarded after tokenization.
pub type FieldMap = HashMap<String, String>;

/// Bag-of-words vector: (term id, count) pairs sorted by term id, counts positive.
pub type SparseVector = Vec<(TermId, u32)>;
