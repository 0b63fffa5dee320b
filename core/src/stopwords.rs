use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::IndexError;

const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Immutable set of excluded tokens: every ASCII punctuation character plus
/// the whitespace-delimited entries of two stopword list files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Load the domain and custom stopword lists. Either file being missing
    /// or unreadable is fatal; no corpus can be filtered without them.
    pub fn load(domain: &Path, custom: &Path) -> Result<Self, IndexError> {
        let mut words: HashSet<String> = PUNCTUATION.chars().map(String::from).collect();
        for path in [domain, custom] {
            let text = fs::read_to_string(path).map_err(|source| IndexError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;
            words.extend(text.split_whitespace().map(str::to_owned));
        }
        Ok(Self { words })
    }

    /// Build a set from in-memory words plus the punctuation base.
    pub fn from_words<I>(extra: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut words: HashSet<String> = PUNCTUATION.chars().map(String::from).collect();
        words.extend(extra.into_iter().map(Into::into));
        Self { words }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
