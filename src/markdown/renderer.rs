//! Markdown conversion with comrak.

use comrak::Options;

/// Converts Markdown to HTML with the extensions documentation relies on.
///
/// Enables tables, footnotes, description lists and strikethrough on top of
/// CommonMark, plus autolinks and task lists. Raw HTML passes through since
/// documents and includes are trusted content.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new() -> Self {
        let mut options = Options::default();

        options.extension.table = true;
        options.extension.footnotes = true;
        options.extension.description_lists = true;
        options.extension.strikethrough = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;

        options.render.unsafe_ = true;

        Self { options }
    }

    /// Renders Markdown text to an HTML fragment.
    pub fn render(&self, content: &str) -> String {
        comrak::markdown_to_html(content, &self.options)
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}
