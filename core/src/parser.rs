use std::fs;
use std::path::{Path, PathBuf};

use crate::stopwords::StopwordSet;
use crate::tokenizer::token_sequence;
use crate::{FieldMap, IndexError};

/// Attribute key reserved for document wrappers; never treated as a field name.
const DOC_ATTR: &str = "doc";

/// Derive the external document id from a filename: the prefix before a
/// single `.` separator. Zero or multiple separators make the split ambiguous.
pub fn document_id(file_name: &str) -> Result<String, IndexError> {
    let mut parts = file_name.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(id), Some(_ext), None) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(IndexError::MalformedFilename(file_name.to_string())),
    }
}

/// Extract the field map from one XML document.
///
/// Field names are not hardcoded into the XML shape: every attribute value
/// (for attribute keys other than `doc`) on an element with text becomes a
/// field key, mapped to the element's trimmed text. Later elements overwrite
/// earlier ones on key collision.
pub fn parse_fields(path: &Path, xml: &str) -> Result<FieldMap, IndexError> {
    let doc = roxmltree::Document::parse(xml).map_err(|source| IndexError::XmlParse {
        path: path.to_path_buf(),
        source,
    })?;
    let mut fields = FieldMap::new();
    for node in doc.descendants().filter(|n| n.is_element()) {
        let Some(text) = node.text() else { continue };
        for attr in node.attributes() {
            if attr.name() == DOC_ATTR {
                continue;
            }
            fields.insert(attr.value().to_string(), text.trim().to_string());
        }
    }
    Ok(fields)
}

/// List the document files in `dir`, sorted lexicographically by path.
/// Filesystem enumeration order is platform-dependent; sorting keeps
/// position assignment reproducible across runs.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, IndexError> {
    let read = fs::read_dir(dir).map_err(|source| IndexError::FileAccess {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut entries = Vec::new();
    for entry in read {
        let entry = entry.map_err(|source| IndexError::FileAccess {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() {
            entries.push(path);
        }
    }
    entries.sort();
    Ok(entries)
}

/// Read at most `limit` documents from `dir` in sorted order, producing one
/// `(document id, token sequence)` pair per document.
///
/// Per-document failures (bad filename, unreadable file, malformed XML) are
/// skipped with a warning rather than aborting the run; the directory itself
/// must be readable.
pub fn ingest_directory(
    dir: &Path,
    limit: usize,
    stopwords: &StopwordSet,
) -> Result<Vec<(String, Vec<String>)>, IndexError> {
    let mut docs = Vec::new();
    let mut skipped = 0usize;

    for path in list_documents(dir)?.into_iter().take(limit) {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            skipped += 1;
            tracing::warn!(path = %path.display(), "skipping non-UTF-8 filename");
            continue;
        };
        let id = match document_id(file_name) {
            Ok(id) => id,
            Err(err) => {
                skipped += 1;
                tracing::warn!(%err, "skipping document");
                continue;
            }
        };
        let xml = match fs::read_to_string(&path) {
            Ok(xml) => xml,
            Err(err) => {
                skipped += 1;
                tracing::warn!(path = %path.display(), %err, "skipping unreadable document");
                continue;
            }
        };
        let fields = match parse_fields(&path, &xml) {
            Ok(fields) => fields,
            Err(err) => {
                skipped += 1;
                tracing::warn!(%err, "skipping malformed document");
                continue;
            }
        };
        docs.push((id, token_sequence(&fields, stopwords)));
    }

    if skipped > 0 {
        tracing::warn!(skipped, ingested = docs.len(), "some documents were skipped");
    }
    Ok(docs)
}
