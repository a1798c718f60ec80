//! Include search configuration shared by every render.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{DocsError, DocsResult};
use crate::include::IncludeFilter;

/// Extensions allowed for include files unless more are added.
const DEFAULT_INCLUDE_EXTENSIONS: &[&str] = &["md", "txt"];

/// Largest include file accepted by default, in bytes.
pub const DEFAULT_MAX_INCLUDE_SIZE: u64 = 6000;

/// Where include files are searched and how their content is processed.
///
/// # Examples
///
/// ```no_run
/// use mdviewer::DocsConfig;
///
/// let mut config = DocsConfig::new();
/// config
///     .add_include_path("docs/includes")?
///     .add_include_extension("php")
///     .set_max_include_size(20_000);
/// # Ok::<(), mdviewer::DocsError>(())
/// ```
#[derive(Clone)]
pub struct DocsConfig {
    include_paths: Vec<PathBuf>,
    include_extensions: Vec<String>,
    max_include_size: u64,
    filters: HashMap<String, Vec<Arc<dyn IncludeFilter>>>,
}

impl DocsConfig {
    pub fn new() -> Self {
        Self {
            include_paths: Vec::new(),
            include_extensions: DEFAULT_INCLUDE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            max_include_size: DEFAULT_MAX_INCLUDE_SIZE,
            filters: HashMap::new(),
        }
    }

    /// Adds a search root for include files.
    ///
    /// Roots are searched in the order they were added. Adding the same
    /// directory twice has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::FolderNotFound`] if the path is not an existing
    /// directory.
    pub fn add_include_path(&mut self, path: impl AsRef<Path>) -> DocsResult<&mut Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(DocsError::FolderNotFound(path.to_path_buf()));
        }

        let normalized = path
            .canonicalize()
            .map_err(|e| DocsError::io(path, e))?;

        if !self.include_paths.contains(&normalized) {
            self.include_paths.push(normalized);
        }

        Ok(self)
    }

    pub fn include_paths(&self) -> &[PathBuf] {
        &self.include_paths
    }

    /// Allows an additional include file extension.
    ///
    /// Case and a leading dot are ignored: `.PHP` and `php` are the same.
    pub fn add_include_extension(&mut self, extension: &str) -> &mut Self {
        let extension = normalize_extension(extension);

        if !extension.is_empty() && !self.include_extensions.contains(&extension) {
            self.include_extensions.push(extension);
        }

        self
    }

    /// Allows several include file extensions at once.
    pub fn add_include_extensions<I, S>(&mut self, extensions: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for extension in extensions {
            self.add_include_extension(extension.as_ref());
        }
        self
    }

    pub fn include_extensions(&self) -> &[String] {
        &self.include_extensions
    }

    /// Whether files with this extension (lowercase, no dot) may be included.
    pub fn allows_extension(&self, extension: &str) -> bool {
        self.include_extensions.iter().any(|e| e == extension)
    }

    pub fn set_max_include_size(&mut self, bytes: u64) -> &mut Self {
        self.max_include_size = bytes;
        self
    }

    pub fn max_include_size(&self) -> u64 {
        self.max_include_size
    }

    /// Registers a filter for every extension it declares.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::FilterWithoutExtensions`] if the filter declares
    /// no extensions.
    pub fn add_include_filter(&mut self, filter: Arc<dyn IncludeFilter>) -> DocsResult<&mut Self> {
        let extensions: Vec<String> = filter
            .extensions()
            .iter()
            .map(|e| normalize_extension(e))
            .filter(|e| !e.is_empty())
            .collect();

        if extensions.is_empty() {
            return Err(DocsError::FilterWithoutExtensions(filter.name().to_string()));
        }

        for extension in extensions {
            self.filters
                .entry(extension)
                .or_default()
                .push(Arc::clone(&filter));
        }

        Ok(self)
    }

    /// Filters registered for an extension, in registration order.
    pub fn include_filters(&self, extension: &str) -> &[Arc<dyn IncludeFilter>] {
        self.filters
            .get(extension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DocsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filters: HashMap<&str, Vec<&str>> = self
            .filters
            .iter()
            .map(|(ext, list)| (ext.as_str(), list.iter().map(|f| f.name()).collect()))
            .collect();

        f.debug_struct("DocsConfig")
            .field("include_paths", &self.include_paths)
            .field("include_extensions", &self.include_extensions)
            .field("max_include_size", &self.max_include_size)
            .field("filters", &filters)
            .finish()
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::include::FilterContext;
    use tempfile::TempDir;

    struct NoExtensions;

    impl IncludeFilter for NoExtensions {
        fn extensions(&self) -> &[&str] {
            &[]
        }

        fn filter(&self, content: String, _context: &FilterContext<'_>) -> String {
            content
        }
    }

    struct Upper;

    impl IncludeFilter for Upper {
        fn extensions(&self) -> &[&str] {
            &["PHP", ".inc"]
        }

        fn filter(&self, content: String, _context: &FilterContext<'_>) -> String {
            content.to_uppercase()
        }
    }

    #[test]
    fn test_defaults() {
        // Arrange & Act
        let config = DocsConfig::default();

        // Assert
        assert_eq!(config.include_extensions(), ["md", "txt"]);
        assert_eq!(config.max_include_size(), 6000);
        assert!(config.include_paths().is_empty());
    }

    #[test]
    fn test_add_include_extension_normalizes() {
        // Arrange
        let mut config = DocsConfig::new();
        assert!(!config.allows_extension("json"));
        assert!(!config.allows_extension("rtf"));

        // Act
        config.add_include_extension("json").add_include_extension(".RTF");

        // Assert
        assert!(config.allows_extension("json"));
        assert!(config.allows_extension("rtf"));
    }

    #[test]
    fn test_add_include_extensions_deduplicates() {
        // Arrange
        let mut config = DocsConfig::new();

        // Act
        config.add_include_extensions(["php", ".php", "md", "PHP"]);

        // Assert
        assert_eq!(config.include_extensions(), ["md", "txt", "php"]);
    }

    #[test]
    fn test_add_include_path_requires_directory() {
        // Arrange
        let mut config = DocsConfig::new();

        // Act
        let result = config.add_include_path("/definitely/not/here");

        // Assert
        assert!(matches!(result, Err(DocsError::FolderNotFound(_))));
    }

    #[test]
    fn test_add_include_path_deduplicates() {
        // Arrange
        let dir = TempDir::new().expect("Should create temp dir");
        let mut config = DocsConfig::new();

        // Act
        config
            .add_include_path(dir.path())
            .and_then(|c| c.add_include_path(dir.path().join(".")))
            .expect("Directory exists");

        // Assert
        assert_eq!(config.include_paths().len(), 1);
    }

    #[test]
    fn test_filter_without_extensions_is_rejected() {
        // Arrange
        let mut config = DocsConfig::new();

        // Act
        let error = config.add_include_filter(Arc::new(NoExtensions)).unwrap_err();

        // Assert
        assert_eq!(error.code(), Some(DocsError::FILTER_WITHOUT_EXTENSIONS));
        assert!(error.to_string().contains("NoExtensions"));
    }

    #[test]
    fn test_filter_is_registered_per_extension() {
        // Arrange
        let mut config = DocsConfig::new();

        // Act
        config
            .add_include_filter(Arc::new(Upper))
            .expect("Filter has extensions");

        // Assert
        assert_eq!(config.include_filters("php").len(), 1);
        assert_eq!(config.include_filters("inc").len(), 1);
        assert!(config.include_filters("md").is_empty());
    }
}
