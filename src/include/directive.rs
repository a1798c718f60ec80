//! Detection of include directives in raw Markdown.

use std::sync::LazyLock;

use regex::Regex;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{include-file:(.*?)\}").expect("include directive pattern is valid")
});

/// All occurrences of directives that share one path argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    path: String,
    occurrences: Vec<String>,
}

impl IncludeDirective {
    /// Path argument as written in the document, surrounding whitespace
    /// removed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Distinct literal directive texts referring to this path, in order of
    /// first appearance.
    pub fn occurrences(&self) -> &[String] {
        &self.occurrences
    }
}

/// Scans `text` for `{include-file:<path>}` directives.
///
/// Matching is case insensitive and stops at the first closing brace.
/// Directives are grouped by path in order of first appearance; identical
/// directive texts are recorded once.
pub fn find_directives(text: &str) -> Vec<IncludeDirective> {
    let mut directives: Vec<IncludeDirective> = Vec::new();

    for caps in DIRECTIVE.captures_iter(text) {
        let (Some(matched), Some(path)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let path = path.as_str().trim();
        let matched = matched.as_str();

        match directives.iter_mut().find(|d| d.path == path) {
            Some(directive) => {
                if !directive.occurrences.iter().any(|o| o == matched) {
                    directive.occurrences.push(matched.to_string());
                }
            }
            None => directives.push(IncludeDirective {
                path: path.to_string(),
                occurrences: vec![matched.to_string()],
            }),
        }
    }

    directives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_single_directive() {
        // Arrange
        let text = "Before\n\n{include-file:snippet.md}\n\nAfter";

        // Act
        let directives = find_directives(text);

        // Assert
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].path(), "snippet.md");
        assert_eq!(directives[0].occurrences(), ["{include-file:snippet.md}"]);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        // Arrange
        let text = "{INCLUDE-FILE:a.md} and {Include-File:a.md}";

        // Act
        let directives = find_directives(text);

        // Assert
        assert_eq!(directives.len(), 1, "Both spellings share one path");
        assert_eq!(
            directives[0].occurrences(),
            ["{INCLUDE-FILE:a.md}", "{Include-File:a.md}"]
        );
    }

    #[test]
    fn test_find_deduplicates_identical_occurrences() {
        // Arrange
        let text = "{include-file:a.md}\n{include-file:b.txt}\n{include-file:a.md}";

        // Act
        let directives = find_directives(text);

        // Assert
        let paths: Vec<&str> = directives.iter().map(|d| d.path()).collect();
        assert_eq!(paths, vec!["a.md", "b.txt"]);
        assert_eq!(directives[0].occurrences().len(), 1);
    }

    #[test]
    fn test_find_is_not_greedy() {
        // Arrange
        let text = "{include-file:a.md} text {include-file:b.md}";

        // Act
        let directives = find_directives(text);

        // Assert
        let paths: Vec<&str> = directives.iter().map(|d| d.path()).collect();
        assert_eq!(paths, vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_find_trims_path_whitespace() {
        // Act
        let directives = find_directives("{include-file: spaced.md }");

        // Assert
        assert_eq!(directives[0].path(), "spaced.md");
        assert_eq!(directives[0].occurrences(), ["{include-file: spaced.md }"]);
    }

    #[test]
    fn test_find_nothing() {
        assert!(find_directives("No {directives} here").is_empty());
    }
}
