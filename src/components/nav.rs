//! Navigation bar component

use maud::{Markup, html};

use crate::document::DocFile;

/// Renders the navigation bar with a menu of all documents
///
/// The menu is a `details` disclosure so it works without scripts. The
/// active document is marked so the stylesheet can highlight it.
///
/// # Arguments
///
/// * `title`: Site title shown as brand
/// * `files`: Documents in display order
/// * `active_id`: Identifier of the document being viewed
/// * `link`: Builds the URL of a document from its identifier
pub fn navbar(
    title: &str,
    files: &[&DocFile],
    active_id: &str,
    link: impl Fn(&str) -> String,
) -> Markup {
    html! {
        nav class="navbar" {
            a class="navbar-brand" href="#" { (title) }
            details class="nav-dropdown" {
                summary { "Documentation files" }
                div class="dropdown-menu" {
                    @for file in files {
                        @if file.id() == active_id {
                            a class="dropdown-item active" href=(link(file.id())) { (file.title()) }
                        } @else {
                            a class="dropdown-item" href=(link(file.id())) { (file.title()) }
                        }
                    }
                }
            }
        }
    }
}
