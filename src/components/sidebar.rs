//! Heading outline sidebar component

use maud::{Markup, html};

use crate::header::Header;

/// Renders the outline of a document as nested lists
///
/// The outermost list has the `nav-level-0` class; each heading renders its
/// own subheadings, see [`Header::render_outline_entry`].
pub fn outline(headers: &[Header]) -> Markup {
    html! {
        ul class="nav-level-0" {
            @for header in headers {
                (header.render_outline_entry())
            }
        }
    }
}
