use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("cannot read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("filename {0:?} must have exactly one extension separator")]
    MalformedFilename(String),
    #[error("malformed XML in {path}: {source}")]
    XmlParse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
    #[error("no documents yielded any recognized field; cannot build a corpus")]
    EmptyCorpus,
}
