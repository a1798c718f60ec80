//! Resolution of include paths against the configured search roots.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::document::DocFile;
use crate::error::IncludeError;
use crate::options::DocsConfig;

use super::FilterContext;

/// An include file located on one of the search roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeFile {
    /// Path argument as written in the directive.
    pub relative_path: String,
    /// Location on disk: the search root joined with the relative path.
    pub path: PathBuf,
    /// Lowercase extension without dot.
    pub extension: String,
    /// Size in bytes.
    pub size: u64,
}

/// Loads include files on behalf of one document.
pub struct IncludeResolver<'a> {
    source: &'a DocFile,
    config: &'a DocsConfig,
}

impl<'a> IncludeResolver<'a> {
    pub fn new(source: &'a DocFile, config: &'a DocsConfig) -> Self {
        Self { source, config }
    }

    /// Resolves a directive's path argument to filtered file content.
    ///
    /// Search roots are tried in registration order and the first root that
    /// contains the path wins, even when that entry turns out to be invalid.
    ///
    /// # Errors
    ///
    /// - [`IncludeError::NavigatingUp`] if the path contains `..` or is absolute
    /// - [`IncludeError::InvalidExtension`] if the extension is not allowed
    /// - [`IncludeError::NotAFile`] if the path names a directory
    /// - [`IncludeError::TooBig`] if the file exceeds the maximum include size
    /// - [`IncludeError::NotFound`] if no search root contains the path
    pub fn resolve(&self, relative_path: &str) -> Result<String, IncludeError> {
        if relative_path.contains("..") || escapes_root(Path::new(relative_path)) {
            return Err(IncludeError::NavigatingUp(relative_path.to_string()));
        }

        let extension = Path::new(relative_path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if !self.config.allows_extension(&extension) {
            return Err(IncludeError::InvalidExtension {
                path: relative_path.to_string(),
                allowed: self.config.include_extensions().join(", "),
            });
        }

        for root in self.config.include_paths() {
            let candidate = root.join(relative_path);
            if !candidate.exists() {
                continue;
            }

            return self.load(relative_path, candidate, extension);
        }

        Err(IncludeError::NotFound(relative_path.to_string()))
    }

    fn load(
        &self,
        relative_path: &str,
        path: PathBuf,
        extension: String,
    ) -> Result<String, IncludeError> {
        let read_error = |source| IncludeError::Read {
            path: relative_path.to_string(),
            source,
        };

        let metadata = fs::metadata(&path).map_err(read_error)?;
        if !metadata.is_file() {
            return Err(IncludeError::NotAFile(relative_path.to_string()));
        }

        let max = self.config.max_include_size();
        if metadata.len() > max {
            return Err(IncludeError::TooBig {
                path: relative_path.to_string(),
                size: metadata.len(),
                max,
            });
        }

        let content = fs::read_to_string(&path).map_err(read_error)?;

        let include = IncludeFile {
            relative_path: relative_path.to_string(),
            path,
            extension,
            size: metadata.len(),
        };

        Ok(self.apply_filters(content, &include))
    }

    /// Runs the filter chain registered for the include's extension.
    fn apply_filters(&self, content: String, include: &IncludeFile) -> String {
        let context = FilterContext {
            source: self.source,
            config: self.config,
            include,
        };

        self.config
            .include_filters(&include.extension)
            .iter()
            .filter(|filter| filter.is_valid_for(&context))
            .fold(content, |content, filter| {
                log::debug!("Applying include filter {} to {}", filter.name(), include.relative_path);
                filter.filter(content, &context)
            })
    }
}

/// Absolute paths and drive prefixes would replace the search root when
/// joined, so they are treated like upward navigation.
fn escapes_root(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_) | Component::ParentDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::include::IncludeFilter;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        document: DocFile,
        root: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().expect("Should create temp dir");
        let root = dir.path().join("includes");
        fs::create_dir_all(root.join("folder.md")).expect("Should create dirs");
        fs::write(root.join("snippet.md"), "Included *text*").expect("Should write");
        fs::write(root.join("code.php"), "<?php echo 'sample PHP file';").expect("Should write");
        fs::write(root.join("binary.exe"), "MZ").expect("Should write");

        let doc_path = dir.path().join("doc.md");
        fs::write(&doc_path, "# Doc").expect("Should write");
        let document = DocFile::new("Doc", &doc_path, None).expect("Document exists");

        Fixture {
            _dir: dir,
            document,
            root,
        }
    }

    fn config_for(fixture: &Fixture) -> DocsConfig {
        let mut config = DocsConfig::new();
        config
            .add_include_path(&fixture.root)
            .expect("Include root exists");
        config
    }

    struct Replace(&'static str);

    impl IncludeFilter for Replace {
        fn extensions(&self) -> &[&str] {
            &["php"]
        }

        fn filter(&self, _content: String, _context: &FilterContext<'_>) -> String {
            self.0.to_string()
        }
    }

    struct Append(&'static str);

    impl IncludeFilter for Append {
        fn extensions(&self) -> &[&str] {
            &["php"]
        }

        fn filter(&self, content: String, _context: &FilterContext<'_>) -> String {
            format!("{}{}", content, self.0)
        }
    }

    struct Never;

    impl IncludeFilter for Never {
        fn extensions(&self) -> &[&str] {
            &["php"]
        }

        fn is_valid_for(&self, _context: &FilterContext<'_>) -> bool {
            false
        }

        fn filter(&self, _content: String, _context: &FilterContext<'_>) -> String {
            "(never)".to_string()
        }
    }

    #[test]
    fn test_resolve_existing_file() {
        // Arrange
        let fixture = fixture();
        let config = config_for(&fixture);
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let content = resolver.resolve("snippet.md").expect("Should resolve");

        // Assert
        assert_eq!(content, "Included *text*");
    }

    #[test]
    fn test_resolve_rejects_upward_navigation() {
        // Arrange
        let fixture = fixture();
        let config = config_for(&fixture);
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let error = resolver.resolve("../secret.md").unwrap_err();

        // Assert
        assert_eq!(error.code(), IncludeError::NAVIGATING_UP);
    }

    #[test]
    fn test_resolve_rejects_upward_navigation_without_roots() {
        // Arrange
        let fixture = fixture();
        let config = DocsConfig::new();
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let error = resolver.resolve("docs/../../secret.md").unwrap_err();

        // Assert
        assert_eq!(error.code(), IncludeError::NAVIGATING_UP);
    }

    #[test]
    fn test_resolve_rejects_absolute_path() {
        // Arrange
        let fixture = fixture();
        let config = config_for(&fixture);
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let error = resolver.resolve("/etc/hosts.txt").unwrap_err();

        // Assert
        assert_eq!(error.code(), IncludeError::NAVIGATING_UP);
    }

    #[test]
    fn test_resolve_rejects_disallowed_extension() {
        // Arrange
        let fixture = fixture();
        let config = config_for(&fixture);
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let error = resolver.resolve("binary.exe").unwrap_err();

        // Assert
        assert_eq!(error.code(), IncludeError::INVALID_EXTENSION);
    }

    #[test]
    fn test_resolve_directory_is_not_a_file() {
        // Arrange
        let fixture = fixture();
        let config = config_for(&fixture);
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let error = resolver.resolve("folder.md").unwrap_err();

        // Assert
        assert_eq!(error.code(), IncludeError::NOT_A_FILE);
    }

    #[test]
    fn test_resolve_too_big() {
        // Arrange
        let fixture = fixture();
        let mut config = config_for(&fixture);
        config.set_max_include_size(5);
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let error = resolver.resolve("snippet.md").unwrap_err();

        // Assert
        assert_eq!(error.code(), IncludeError::FILE_TOO_BIG);
    }

    #[test]
    fn test_resolve_size_limit_is_inclusive() {
        // Arrange
        let fixture = fixture();
        let size = fs::metadata(fixture.root.join("snippet.md"))
            .expect("Snippet exists")
            .len();
        let mut config = config_for(&fixture);

        // Act
        config.set_max_include_size(size);
        let at_limit = IncludeResolver::new(&fixture.document, &config).resolve("snippet.md");
        config.set_max_include_size(size - 1);
        let over_limit = IncludeResolver::new(&fixture.document, &config).resolve("snippet.md");

        // Assert
        assert_eq!(at_limit.ok().as_deref(), Some("Included *text*"));
        assert_eq!(
            over_limit.err().map(|e| e.code()),
            Some(IncludeError::FILE_TOO_BIG)
        );
    }

    #[test]
    fn test_resolve_not_found() {
        // Arrange
        let fixture = fixture();
        let config = config_for(&fixture);
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let error = resolver.resolve("missing.md").unwrap_err();

        // Assert
        assert_eq!(error.code(), IncludeError::FILE_NOT_FOUND);
    }

    #[test]
    fn test_resolve_searches_roots_in_order() {
        // Arrange
        let fixture = fixture();
        let second = fixture.root.join("second");
        fs::create_dir_all(&second).expect("Should create dir");
        fs::write(second.join("only-here.txt"), "from second root").expect("Should write");
        fs::write(second.join("snippet.md"), "shadowed").expect("Should write");

        let mut config = config_for(&fixture);
        config.add_include_path(&second).expect("Root exists");
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let first_match = resolver.resolve("snippet.md").expect("Should resolve");
        let fallback = resolver.resolve("only-here.txt").expect("Should resolve");

        // Assert
        assert_eq!(first_match, "Included *text*");
        assert_eq!(fallback, "from second root");
    }

    #[test]
    fn test_filter_replaces_content() {
        // Arrange
        let fixture = fixture();
        let mut config = config_for(&fixture);
        config.add_include_extension("php");
        config
            .add_include_filter(Arc::new(Replace("(replaced content)")))
            .expect("Filter has extensions");
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let content = resolver.resolve("code.php").expect("Should resolve");

        // Assert
        assert_eq!(content, "(replaced content)");
    }

    #[test]
    fn test_filters_chain_in_registration_order() {
        // Arrange
        let fixture = fixture();
        let mut config = config_for(&fixture);
        config.add_include_extension("php");
        config
            .add_include_filter(Arc::new(Replace("base")))
            .and_then(|c| c.add_include_filter(Arc::new(Never)))
            .and_then(|c| c.add_include_filter(Arc::new(Append("+suffix"))))
            .expect("Filters have extensions");
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let content = resolver.resolve("code.php").expect("Should resolve");

        // Assert
        assert_eq!(content, "base+suffix");
    }

    #[test]
    fn test_inapplicable_filter_leaves_content_untouched() {
        // Arrange
        let fixture = fixture();
        let mut config = config_for(&fixture);
        config.add_include_extension("php");
        config
            .add_include_filter(Arc::new(Never))
            .expect("Filter has extensions");
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let content = resolver.resolve("code.php").expect("Should resolve");

        // Assert
        assert_eq!(content, "<?php echo 'sample PHP file';");
    }

    #[test]
    fn test_filters_only_see_their_extension() {
        // Arrange
        let fixture = fixture();
        let mut config = config_for(&fixture);
        config.add_include_extension("php");
        config
            .add_include_filter(Arc::new(Replace("php only")))
            .expect("Filter has extensions");
        let resolver = IncludeResolver::new(&fixture.document, &config);

        // Act
        let content = resolver.resolve("snippet.md").expect("Should resolve");

        // Assert
        assert_eq!(content, "Included *text*");
    }
}
