//! Document headings and the outline tree they form.

use maud::{Markup, PreEscaped, html};

use crate::anchor::{AnchorRegistry, slugify};
use crate::markup;

/// One heading of a rendered document.
///
/// Holds the heading's inner HTML as title, the exact markup the Markdown
/// converter produced for it, and the subheadings that follow it in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    title: String,
    level: u8,
    raw: String,
    id: String,
    anchor: String,
    children: Vec<Header>,
}

impl Header {
    /// Creates a heading and reserves its anchor in `anchors`.
    ///
    /// # Arguments
    ///
    /// * `title`: Inner HTML of the heading tag
    /// * `level`: Heading level, 1 to 6
    /// * `raw`: Complete heading tag as found in the converted HTML
    /// * `anchors`: Registry of the render pass this heading belongs to
    pub fn new(
        title: impl Into<String>,
        level: u8,
        raw: impl Into<String>,
        anchors: &mut AnchorRegistry,
    ) -> Self {
        let title = title.into();
        let id = slugify(&markup::plain_text(&title));
        let anchor = anchors.reserve(&id);

        Self {
            title,
            level,
            raw: raw.into(),
            id,
            anchor,
            children: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Heading markup as produced by the Markdown converter.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Slug derived from the title, before disambiguation.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Render-unique fragment identifier.
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn children(&self) -> &[Header] {
        &self.children
    }

    /// Appends a subheading.
    pub fn add_child(&mut self, header: Header) {
        self.children.push(header);
    }

    /// Replaces the first occurrence of this heading's raw markup in `html`
    /// with a heading carrying a permalink and a jump target.
    ///
    /// Only the first remaining occurrence is touched, so calling this for
    /// each heading in document order consumes identical headings one by
    /// one. Returns `html` unchanged when the markup is no longer present.
    pub fn rewrite(&self, html: &str, document_id: &str) -> String {
        let Some(start) = html.find(&self.raw) else {
            log::debug!("Heading markup for #{} not found, skipping", self.anchor);
            return html.to_string();
        };

        let mut result = String::with_capacity(html.len() + 128);
        result.push_str(&html[..start]);
        result.push_str(&self.permalinked(document_id));
        result.push_str(&html[start + self.raw.len()..]);
        result
    }

    /// Heading markup with the permalink and anchor inserted after the
    /// opening tag.
    fn permalinked(&self, document_id: &str) -> String {
        let open_end = self.raw.find('>').map_or(0, |pos| pos + 1);
        let (open_tag, rest) = self.raw.split_at(open_end);

        let links = html! {
            a class="permalink" href=(format!("?doc={}#{}", document_id, self.anchor)) {
                span { "§" }
            }
            a class="anchor" id=(self.anchor) {}
        };

        format!("{}{}{}", open_tag, links.into_string(), rest)
    }

    /// Outline list item linking to this heading, with nested subheadings.
    pub fn render_outline_entry(&self) -> Markup {
        html! {
            li {
                a href=(format!("#{}", self.anchor)) { (PreEscaped(&self.title)) }
                @if !self.children.is_empty() {
                    ul class=(format!("nav-level-{}", self.level)) {
                        @for child in &self.children {
                            (child.render_outline_entry())
                        }
                    }
                }
            }
        }
    }
}
