//! The collection of documents a viewer can show.

use std::cmp::Ordering;
use std::path::Path;

use walkdir::WalkDir;

use crate::document::DocFile;
use crate::error::{DocsError, DocsResult};

/// Documentation files in registration order.
#[derive(Debug, Default, Clone)]
pub struct DocsManager {
    files: Vec<DocFile>,
}

impl DocsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file.
    ///
    /// # Arguments
    ///
    /// * `title`: Title shown in navigation
    /// * `path`: Path to an existing Markdown file
    /// * `id`: Optional explicit identifier, see [`DocFile::new`]
    ///
    /// # Errors
    ///
    /// Returns error if the file does not exist.
    pub fn add_file(
        &mut self,
        title: impl Into<String>,
        path: impl AsRef<Path>,
        id: Option<&str>,
    ) -> DocsResult<&mut Self> {
        let file = DocFile::new(title, path, id)?;
        log::debug!("Registered {} as {}", file.path().display(), file.id());
        self.files.push(file);
        Ok(self)
    }

    /// Registers every file with the given extension found in a folder.
    ///
    /// Titles are the file names without extension. Subfolders are only
    /// searched when `recursive` is set.
    ///
    /// # Errors
    ///
    /// Returns error if the folder does not exist or cannot be read.
    pub fn add_folder(
        &mut self,
        path: impl AsRef<Path>,
        recursive: bool,
        extension: &str,
    ) -> DocsResult<&mut Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(DocsError::FolderNotFound(path.to_path_buf()));
        }

        let extension = extension.trim_start_matches('.');
        let mut walker = WalkDir::new(path).sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }

        for entry in walker {
            let entry = entry?;
            let file_path = entry.path();

            let matches_extension = file_path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension));

            if !entry.file_type().is_file() || !matches_extension {
                continue;
            }

            let title = file_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            self.add_file(title, file_path, None)?;
        }

        Ok(self)
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn id_exists(&self, id: &str) -> bool {
        self.files.iter().any(|f| f.id() == id)
    }

    /// Looks up a document by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::UnknownDocumentId`] if no document has this id.
    pub fn get_by_id(&self, id: &str) -> DocsResult<&DocFile> {
        self.files
            .iter()
            .find(|f| f.id() == id)
            .ok_or_else(|| DocsError::UnknownDocumentId(id.to_string()))
    }

    /// The first registered document.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::NoFirstDocument`] if the collection is empty.
    pub fn first_file(&self) -> DocsResult<&DocFile> {
        self.files.first().ok_or(DocsError::NoFirstDocument)
    }

    /// All documents sorted by title in natural, case insensitive order.
    pub fn files(&self) -> Vec<&DocFile> {
        let mut files: Vec<&DocFile> = self.files.iter().collect();
        files.sort_by(|a, b| natural_cmp(a.title(), b.title()));
        files
    }
}

/// Compares strings case insensitively, treating digit runs as numbers so
/// `Part 2` sorts before `Part 10`.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();

    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let left = take_number(&mut a);
                let right = take_number(&mut b);
                let ordering = left
                    .trim_start_matches('0')
                    .len()
                    .cmp(&right.trim_start_matches('0').len())
                    .then_with(|| left.trim_start_matches('0').cmp(right.trim_start_matches('0')));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                let ordering = x.to_lowercase().cmp(y.to_lowercase());
                if ordering != Ordering::Equal {
                    return ordering;
                }
                a.next();
                b.next();
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut number = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        number.push(c);
    }
    number
}
