//! Syntax highlighting for fenced code blocks.

use std::sync::LazyLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// CSS class prefix of highlighted spans.
const CLASS_PREFIX: &str = "hljs-";

/// Errors raised by a highlighting backend.
#[derive(Debug, thiserror::Error)]
#[error("Failed to highlight {language} code: {message}")]
pub struct HighlightError {
    pub language: String,
    pub message: String,
}

/// A syntax highlighter keyed by language name.
///
/// Implementations return the markup that goes inside the `<code>` element.
/// A wrapping `<pre>` in the output is removed by the parser.
pub trait SyntaxHighlighter: Send + Sync {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError>;
}

/// Maps fence language tags to the grammar name used for highlighting.
///
/// Unknown tags are used as is.
///
/// # Examples
///
/// ```
/// use mdviewer::resolve_language;
///
/// assert_eq!(resolve_language("js"), "javascript");
/// assert_eq!(resolve_language("rust"), "rust");
/// ```
pub fn resolve_language(tag: &str) -> &str {
    match tag {
        "js" | "json" => "javascript",
        "html" => "html5",
        other => other,
    }
}

/// Highlighter backed by syntect's default grammars.
///
/// Emits CSS classes (prefixed with `hljs-`) instead of inline styles, so
/// the stylesheet decides on colors.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntectHighlighter;

impl SyntectHighlighter {
    /// Finds a grammar by token or name, retrying without a trailing
    /// version number (`html5` finds the HTML grammar).
    fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
        let lookup = |name: &str| {
            SYNTAX_SET.find_syntax_by_token(name).or_else(|| {
                SYNTAX_SET
                    .syntaxes()
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(name))
            })
        };

        lookup(language).or_else(|| {
            let unversioned = language.trim_end_matches(|c: char| c.is_ascii_digit());
            (unversioned.len() < language.len() && !unversioned.is_empty())
                .then(|| lookup(unversioned))
                .flatten()
        })
    }
}

impl SyntaxHighlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        if code.is_empty() {
            return Ok(String::new());
        }

        let Some(syntax) = Self::find_syntax(language) else {
            log::debug!("No grammar for {language}, emitting plain text");
            return Ok(html_escape::encode_text(code).into_owned());
        };

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &SYNTAX_SET,
            ClassStyle::SpacedPrefixed {
                prefix: CLASS_PREFIX,
            },
        );

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| HighlightError {
                    language: language.to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(generator.finalize())
    }
}
