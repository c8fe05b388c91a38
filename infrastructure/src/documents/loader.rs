//! Local file system document loader

use docchat_application::IndexError;
use docchat_domain::{Document, DocumentSource};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File extensions read as plain text.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["md", "markdown", "txt", "tex", "rst", "html", "htm"];

/// Loads documents from a single file or a directory tree.
///
/// Directories are walked recursively; only files with a supported
/// extension are read. Empty files are skipped. The result is sorted by
/// path so that document ids are stable between runs.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentLoader;

impl FsDocumentLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load every supported document under `source`.
    ///
    /// Returns [`IndexError::Unreadable`] when the source (or a file in it)
    /// cannot be read, and [`IndexError::NoDocuments`] when nothing usable
    /// was found.
    pub fn load(&self, source: &DocumentSource) -> Result<Vec<Document>, IndexError> {
        let root = source.path();
        let metadata = fs::metadata(root).map_err(|e| unreadable(root, e))?;

        let files = if metadata.is_file() {
            vec![root.to_path_buf()]
        } else {
            self.discover(root)?
        };
        debug!("Discovered {} candidate files under {}", files.len(), source);

        let mut documents = Vec::with_capacity(files.len());
        for path in files {
            let content = fs::read_to_string(&path).map_err(|e| unreadable(&path, e))?;
            if content.trim().is_empty() {
                warn!("Skipping empty document {}", path.display());
                continue;
            }
            let id = path
                .strip_prefix(root)
                .ok()
                .filter(|rel| !rel.as_os_str().is_empty())
                .unwrap_or(path.as_path())
                .display()
                .to_string();
            documents.push(Document::new(id, path, content));
        }

        if documents.is_empty() {
            return Err(IndexError::NoDocuments(source.to_string()));
        }
        Ok(documents)
    }

    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, IndexError> {
        let pattern = format!(
            "{}/**/*",
            glob::Pattern::escape(&root.display().to_string())
        );
        let entries = glob::glob(&pattern).map_err(|e| IndexError::Unreadable {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file() && is_supported(path))
            .collect();
        files.sort();
        Ok(files)
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn unreadable(path: &Path, error: std::io::Error) -> IndexError {
    IndexError::Unreadable {
        path: path.display().to_string(),
        reason: error.to_string(),
    }
}
