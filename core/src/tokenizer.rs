use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;

use crate::stopwords::StopwordSet;
use crate::FieldMap;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Text fields, in output order. Tokenized, stemmed, stopword-filtered.
const TEXT_FIELDS: [&str; 3] = ["Title", "Abstract", "Assignee(s)"];

/// Classification codes, in output order. Appended verbatim after text tokens.
const CODE_FIELDS: [&str; 3] = ["IPC Class", "IPC Subclass", "IPC Group"];

/// Tokenize one field's text into stemmed lowercase terms using NFKC
/// normalization. The stopword check runs on the stemmed form.
pub fn normalize(text: &str, stopwords: &StopwordSet, out: &mut Vec<String>) {
    let lowered = text.nfkc().collect::<String>().to_lowercase();
    for mat in WORD_RE.find_iter(&lowered) {
        let stem = STEMMER.stem(mat.as_str()).to_string();
        if !stopwords.contains(&stem) {
            out.push(stem);
        }
    }
}

/// Build the token sequence for one document: text fields first, then IPC
/// codes trimmed but otherwise untouched. A map with none of the recognized
/// fields yields an empty sequence.
pub fn token_sequence(fields: &FieldMap, stopwords: &StopwordSet) -> Vec<String> {
    let mut tokens = Vec::new();
    for name in TEXT_FIELDS {
        if let Some(text) = fields.get(name) {
            normalize(text, stopwords, &mut tokens);
        }
    }
    for name in CODE_FIELDS {
        if let Some(code) = fields.get(name) {
            let code = code.trim();
            if !code.is_empty() {
                tokens.push(code.to_string());
            }
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize() {
        let stopwords = StopwordSet::from_words(["the"]);
        let mut out = Vec::new();
        normalize("Running, runner's run!", &stopwords, &mut out);
        assert!(out.iter().any(|w| w == "run"));
    }

    #[test]
    fn unrecognized_fields_yield_empty_sequence() {
        let stopwords = StopwordSet::from_words(Vec::<String>::new());
        let mut fields = FieldMap::new();
        fields.insert("Inventor".into(), "Ada Lovelace".into());
        assert!(token_sequence(&fields, &stopwords).is_empty());
    }

    #[test]
    fn stopwords_filter_stemmed_forms() {
        let stopwords = StopwordSet::from_words(["patent"]);
        let mut fields = FieldMap::new();
        fields.insert("Title".into(), "A Patent System".into());
        let tokens = token_sequence(&fields, &stopwords);
        assert!(!tokens.contains(&"patent".to_string()));
        assert!(tokens.contains(&"system".to_string()));
    }

    #[test]
    fn ipc_codes_are_verbatim_and_last() {
        let stopwords = StopwordSet::from_words(Vec::<String>::new());
        let mut fields = FieldMap::new();
        fields.insert("Title".into(), "Signal multiplexer".into());
        fields.insert("IPC Class".into(), " H04L ".into());
        let tokens = token_sequence(&fields, &stopwords);
        assert_eq!(tokens.last().map(String::as_str), Some("H04L"));
        // Codes bypass lowercasing and stemming.
        assert!(!tokens.contains(&"h04l".to_string()));
    }

    #[test]
    fn deterministic_over_identical_input() {
        let stopwords = StopwordSet::from_words(["a", "for"]);
        let mut fields = FieldMap::new();
        fields.insert("Title".into(), "Apparatus for widget alignment".into());
        fields.insert("Abstract".into(), "A widget is aligned by the apparatus.".into());
        let first = token_sequence(&fields, &stopwords);
        let second = token_sequence(&fields, &stopwords);
        assert_eq!(first, second);
    }
}
