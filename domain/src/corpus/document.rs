//! Source documents fed to the index builder.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// A loaded document (Entity)
///
/// `hash` is the hex SHA-256 of `content` and identifies duplicate documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: String,
    source_path: PathBuf,
    content: String,
    hash: String,
}

impl Document {
    pub fn new(id: impl Into<String>, source_path: impl Into<PathBuf>, content: String) -> Self {
        let hash = Self::compute_hash(&content);
        Self {
            id: id.into(),
            source_path: source_path.into(),
            content,
            hash,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    fn compute_hash(content: &str) -> String {
        hex::encode(Sha256::digest(content.as_bytes()))
    }
}

/// Where the corpus lives on disk: a single file or a directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSource {
    path: PathBuf,
}

impl DocumentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
