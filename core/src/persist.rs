use crate::corpus::Vocabulary;
use crate::lda::LdaModel;
use crate::similarity::SimilarityIndex;
use crate::stopwords::StopwordSet;
use crate::SparseVector;
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub num_topics: u32,
    pub created_at: String,
    pub version: u32,
}

/// Root directory for the auxiliary artifacts of one indexing run. The
/// vocabulary and model go to caller-chosen paths; everything else lives at
/// fixed names under this root.
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
    fn doc_map(&self) -> PathBuf {
        self.root.join("doc_map.bin")
    }
    fn stopwords(&self) -> PathBuf {
        self.root.join("stopwords.bin")
    }
    fn corpus(&self) -> PathBuf {
        self.root.join("corpus.bin")
    }
    fn similarity(&self) -> PathBuf {
        self.root.join("similarity.bin")
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

fn write_bincode<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let mut f = File::create(path)?;
    let bytes = bincode::serialize(value)?;
    f.write_all(&bytes)?;
    Ok(())
}

fn read_bincode<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let mut f = File::open(path)?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    Ok(bincode::deserialize(&buf)?)
}

pub fn save_vocabulary(path: &Path, vocabulary: &Vocabulary) -> Result<()> {
    write_bincode(path, vocabulary)
}

pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    read_bincode(path)
}

pub fn save_model(path: &Path, model: &LdaModel) -> Result<()> {
    write_bincode(path, model)
}

pub fn load_model(path: &Path) -> Result<LdaModel> {
    read_bincode(path)
}

pub fn save_doc_map(paths: &IndexPaths, doc_map: &[String]) -> Result<()> {
    write_bincode(&paths.doc_map(), &doc_map)
}

pub fn load_doc_map(paths: &IndexPaths) -> Result<Vec<String>> {
    read_bincode(&paths.doc_map())
}

pub fn save_stopwords(paths: &IndexPaths, stopwords: &StopwordSet) -> Result<()> {
    write_bincode(&paths.stopwords(), stopwords)
}

pub fn load_stopwords(paths: &IndexPaths) -> Result<StopwordSet> {
    read_bincode(&paths.stopwords())
}

pub fn save_corpus(paths: &IndexPaths, vectors: &[SparseVector]) -> Result<()> {
    write_bincode(&paths.corpus(), &vectors)
}

pub fn load_corpus(paths: &IndexPaths) -> Result<Vec<SparseVector>> {
    read_bincode(&paths.corpus())
}

pub fn save_similarity(paths: &IndexPaths, index: &SimilarityIndex) -> Result<()> {
    write_bincode(&paths.similarity(), index)
}

pub fn load_similarity(paths: &IndexPaths) -> Result<SimilarityIndex> {
    read_bincode(&paths.similarity())
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}
