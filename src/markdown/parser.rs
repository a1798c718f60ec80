//! Document parsing pipeline.

use std::fs;

use log::{debug, warn};

use crate::anchor::AnchorRegistry;
use crate::document::DocFile;
use crate::error::{DocsError, DocsResult};
use crate::header::Header;
use crate::highlight::{SyntaxHighlighter, SyntectHighlighter, resolve_language};
use crate::include::{IncludeDirective, IncludeResolver, find_directives};
use crate::markup;
use crate::options::DocsConfig;

use super::MarkdownRenderer;
use super::preprocess::{normalize_list_styles, protect_escaped_braces, restore_braces};

static DEFAULT_HIGHLIGHTER: SyntectHighlighter = SyntectHighlighter;

/// Deepest heading level the outline tracks.
const MAX_LEVEL: usize = 6;

/// Output of one pipeline run.
#[derive(Debug)]
struct ParsedDocument {
    html: String,
    headers: Vec<Header>,
    includes: Vec<IncludeDirective>,
}

/// Renders one document to HTML and derives its heading outline.
///
/// The pipeline runs once, on first access through [`headers`],
/// [`includes`] or [`render`]; later calls reuse the result. Create one
/// parser per render: each owns the anchor registry of its pass.
///
/// [`headers`]: DocParser::headers
/// [`includes`]: DocParser::includes
/// [`render`]: DocParser::render
///
/// # Examples
///
/// ```no_run
/// use mdviewer::{DocFile, DocParser, DocsConfig};
///
/// let file = DocFile::new("Readme", "README.md", None)?;
/// let config = DocsConfig::new();
///
/// let mut parser = DocParser::new(&file, &config);
/// let html = parser.render()?.to_string();
/// let outline = parser.headers()?.len();
/// # Ok::<(), mdviewer::DocsError>(())
/// ```
pub struct DocParser<'a> {
    file: &'a DocFile,
    config: &'a DocsConfig,
    highlighter: &'a dyn SyntaxHighlighter,
    /// Pipeline output, stored on first access.
    parsed: Option<ParsedDocument>,
}

impl<'a> DocParser<'a> {
    pub fn new(file: &'a DocFile, config: &'a DocsConfig) -> Self {
        Self {
            file,
            config,
            highlighter: &DEFAULT_HIGHLIGHTER,
            parsed: None,
        }
    }

    /// Uses another highlighting backend for fenced code blocks.
    pub fn with_highlighter(mut self, highlighter: &'a dyn SyntaxHighlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    pub fn file(&self) -> &DocFile {
        self.file
    }

    pub fn config(&self) -> &DocsConfig {
        self.config
    }

    /// Level 1 headings (and promoted orphans) with their subheadings.
    ///
    /// # Errors
    ///
    /// Returns error if the document cannot be read or highlighting fails.
    pub fn headers(&mut self) -> DocsResult<&[Header]> {
        Ok(&self.parsed()?.headers)
    }

    /// Include directives found in the document, grouped by path.
    ///
    /// # Errors
    ///
    /// Returns error if the document cannot be read or highlighting fails.
    pub fn includes(&mut self) -> DocsResult<&[IncludeDirective]> {
        Ok(&self.parsed()?.includes)
    }

    /// Final HTML body of the document.
    ///
    /// # Errors
    ///
    /// Returns error if the document cannot be read or highlighting fails.
    pub fn render(&mut self) -> DocsResult<&str> {
        Ok(&self.parsed()?.html)
    }

    fn parsed(&mut self) -> DocsResult<&ParsedDocument> {
        let parsed = match self.parsed.take() {
            Some(parsed) => parsed,
            None => self.parse()?,
        };

        let parsed: &ParsedDocument = self.parsed.insert(parsed);
        Ok(parsed)
    }

    fn parse(&self) -> DocsResult<ParsedDocument> {
        let path = self.file.path();
        debug!("Parsing {}", path.display());

        let text = fs::read_to_string(path).map_err(|e| DocsError::io(path, e))?;
        let text = normalize_list_styles(&text);
        let text = protect_escaped_braces(&text);

        let includes = find_directives(&text);
        let text = self.inject_includes(text, &includes);
        let text = restore_braces(&text);

        let html = MarkdownRenderer::new().render(&text);
        let (headers, html) = build_outline(&html, self.file.id());
        let html = self.highlight_code(&html)?;

        debug!(
            "Parsed {}: {} top level headers, {} include paths",
            path.display(),
            headers.len(),
            includes.len()
        );

        Ok(ParsedDocument {
            html,
            headers,
            includes,
        })
    }

    /// Replaces every directive occurrence with the resolved content, or
    /// with an inline error message when resolution fails.
    fn inject_includes(&self, mut text: String, includes: &[IncludeDirective]) -> String {
        let resolver = IncludeResolver::new(self.file, self.config);

        for include in includes {
            let replacement = match resolver.resolve(include.path()) {
                Ok(content) => protect_escaped_braces(&content),
                Err(error) => {
                    warn!(
                        "Include {} in {} failed: {}",
                        include.path(),
                        self.file.path().display(),
                        error
                    );
                    error.inline_message()
                }
            };

            for occurrence in include.occurrences() {
                text = text.replace(occurrence.as_str(), &replacement);
            }
        }

        text
    }

    fn highlight_code(&self, html: &str) -> DocsResult<String> {
        markup::replace_code_blocks(html, |tag, code| {
            let language = resolve_language(tag);
            let highlighted = self.highlighter.highlight(code, language)?;
            Ok(markup::strip_pre_tags(&highlighted))
        })
    }
}

/// Builds the heading tree and rewrites headings with anchors.
///
/// Runs in two passes: every heading is constructed and linked to its
/// parent first, then the HTML is rewritten heading by heading in document
/// order. A heading whose parent level has not been seen since the last
/// shallower heading is promoted to a root.
fn build_outline(html: &str, document_id: &str) -> (Vec<Header>, String) {
    let mut anchors = AnchorRegistry::new();
    let mut headers = Vec::new();
    let mut parents = Vec::new();
    let mut last_seen: [Option<usize>; MAX_LEVEL + 1] = [None; MAX_LEVEL + 1];

    for heading in markup::find_headings(html) {
        let level = usize::from(heading.level);
        let index = headers.len();

        let parent = if level > 1 { last_seen[level - 1] } else { None };
        last_seen[level] = Some(index);
        last_seen[level + 1..].fill(None);

        headers.push(Header::new(heading.inner, heading.level, heading.raw, &mut anchors));
        parents.push(parent);
    }

    let mut rewritten = html.to_string();
    for header in &headers {
        rewritten = header.rewrite(&rewritten, document_id);
    }

    (assemble(headers, &parents), rewritten)
}

/// Moves flat headings into their parents, keeping document order.
fn assemble(headers: Vec<Header>, parents: &[Option<usize>]) -> Vec<Header> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); headers.len()];
    let mut roots = Vec::new();

    for (index, parent) in parents.iter().enumerate() {
        match parent {
            Some(parent) => children[*parent].push(index),
            None => roots.push(index),
        }
    }

    let mut slots: Vec<Option<Header>> = headers.into_iter().map(Some).collect();
    roots
        .into_iter()
        .filter_map(|index| take_subtree(index, &mut slots, &children))
        .collect()
}

fn take_subtree(
    index: usize,
    slots: &mut [Option<Header>],
    children: &[Vec<usize>],
) -> Option<Header> {
    let mut header = slots[index].take()?;
    for &child in &children[index] {
        if let Some(subtree) = take_subtree(child, slots, children) {
            header.add_child(subtree);
        }
    }
    Some(header)
}
