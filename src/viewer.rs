//! Documentation viewer page.

use maud::{Markup, PreEscaped, html};

use crate::components::layout::page_wrapper;
use crate::components::nav::navbar;
use crate::components::sidebar::outline;
use crate::document::DocFile;
use crate::error::{DocsError, DocsResult};
use crate::manager::DocsManager;
use crate::markdown::DocParser;
use crate::options::DocsConfig;

/// Default site title.
const DEFAULT_TITLE: &str = "Documentation";

/// Stylesheet path relative to generated pages.
pub const STYLESHEET: &str = "assets/viewer.css";

/// How links between documents are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocLinks {
    /// `?doc=<id>`, for pages served by something that reads the query.
    #[default]
    Query,
    /// `<id>.html`, for one static page per document.
    Pages,
}

impl DocLinks {
    pub fn href(self, id: &str) -> String {
        match self {
            DocLinks::Query => format!("?doc={id}"),
            DocLinks::Pages => format!("{id}.html"),
        }
    }
}

/// Renders complete pages for the documents of a collection.
///
/// Every call to [`render`](DocsViewer::render) parses the requested
/// document with a fresh [`DocParser`], so pages never share anchor state.
#[derive(Debug)]
pub struct DocsViewer<'a> {
    manager: &'a DocsManager,
    config: &'a DocsConfig,
    title: String,
    links: DocLinks,
}

impl<'a> DocsViewer<'a> {
    /// Creates a viewer for a collection.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::NoDocumentsAvailable`] if the collection is empty.
    pub fn new(manager: &'a DocsManager, config: &'a DocsConfig) -> DocsResult<Self> {
        if !manager.has_files() {
            return Err(DocsError::NoDocumentsAvailable);
        }

        Ok(Self {
            manager,
            config,
            title: DEFAULT_TITLE.to_string(),
            links: DocLinks::default(),
        })
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_links(&mut self, links: DocLinks) -> &mut Self {
        self.links = links;
        self
    }

    /// Identifier of the document to show.
    ///
    /// A requested id that does not exist falls back to the first document.
    ///
    /// # Errors
    ///
    /// Returns error if there is no first document.
    pub fn active_file_id(&self, requested: Option<&str>) -> DocsResult<&'a str> {
        if let Some(id) = requested {
            if let Ok(file) = self.manager.get_by_id(id) {
                return Ok(file.id());
            }
            log::warn!("Unknown document id {id}, showing the first document");
        }

        Ok(self.manager.first_file()?.id())
    }

    /// The document to show for a requested id.
    ///
    /// # Errors
    ///
    /// Returns error if there is no first document.
    pub fn active_file(&self, requested: Option<&str>) -> DocsResult<&'a DocFile> {
        let id = self.active_file_id(requested)?;
        self.manager.get_by_id(id)
    }

    /// Renders the full page for the requested document.
    ///
    /// # Errors
    ///
    /// Returns error if the document cannot be read or rendered.
    pub fn render(&self, requested: Option<&str>) -> DocsResult<Markup> {
        let file = self.active_file(requested)?;

        let mut parser = DocParser::new(file, self.config);
        let content = parser.render()?.to_string();
        let sidebar = outline(parser.headers()?);

        let files = self.manager.files();
        let links = self.links;

        let body = html! {
            (navbar(&self.title, &files, file.id(), |id| links.href(id)))
            table class="layout" {
                tbody {
                    tr {
                        td id="sidebar" { (sidebar) }
                        td id="content" {
                            div class="content-wrapper" { (PreEscaped(content)) }
                        }
                    }
                }
            }
        };

        let page_title = format!("{} - {}", file.title(), self.title);
        Ok(page_wrapper(&page_title, &[STYLESHEET], body))
    }
}
