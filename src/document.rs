//! Documentation files and their stable identifiers.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{DocsError, DocsResult};

/// Number of hex characters kept from the path hash.
const SHORT_HASH_LEN: usize = 8;

/// A Markdown file registered for viewing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFile {
    title: String,
    path: PathBuf,
    id: String,
}

impl DocFile {
    /// Creates a document for an existing file.
    ///
    /// When `id` is missing or empty, the identifier is a short hash of the
    /// path, which stays the same for as long as the path does. Pass an
    /// explicit id to keep URLs stable across machines.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::DocumentNotFound`] if `path` is not a file.
    pub fn new(title: impl Into<String>, path: impl AsRef<Path>, id: Option<&str>) -> DocsResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DocsError::DocumentNotFound(path.to_path_buf()));
        }

        let id = match id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => short_hash(path),
        };

        Ok(Self {
            title: title.into(),
            path: path.to_path_buf(),
            id,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identifier used in `?doc=<id>` URLs.
    pub fn id(&self) -> &str {
        &self.id
    }
}

fn short_hash(path: &Path) -> String {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    let mut hash = hex::encode(digest);
    hash.truncate(SHORT_HASH_LEN);
    hash
}
