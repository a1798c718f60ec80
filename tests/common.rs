//! Shared test utilities for integration tests.
//!
//! Provides helpers for building temporary documentation trees with
//! documents and include files.

#![allow(dead_code)]

use anyhow::Result;
use mdviewer::{DocFile, DocsConfig};
use std::path::Path;
use tempfile::TempDir;

/// Folder inside a fixture tree that holds include files.
pub const SNIPPETS: &str = "snippets";

/// Creates a temporary tree with `docs/` and `snippets/` folders.
///
/// # Errors
///
/// Returns error if directory creation fails
pub fn create_docs_tree() -> Result<TempDir> {
    let dir = TempDir::new()?;
    std::fs::create_dir_all(dir.path().join("docs"))?;
    std::fs::create_dir_all(dir.path().join(SNIPPETS))?;
    Ok(dir)
}

/// Writes file to the tree, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(root: &Path, path: &str, content: &str) -> Result<()> {
    let file_path = root.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Writes `docs/<id>.md` and registers it as a document.
///
/// # Errors
///
/// Returns error if the file cannot be written
pub fn write_doc(root: &Path, id: &str, markdown: &str) -> Result<DocFile> {
    let relative = format!("docs/{id}.md");
    write_file(root, &relative, markdown)?;
    Ok(DocFile::new(id, root.join(relative), Some(id))?)
}

/// Include configuration searching the tree's `snippets/` folder.
///
/// # Errors
///
/// Returns error if the snippets folder does not exist
pub fn snippets_config(root: &Path) -> Result<DocsConfig> {
    let mut config = DocsConfig::new();
    config.add_include_path(root.join(SNIPPETS))?;
    Ok(config)
}
