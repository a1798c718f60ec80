//! Markdown documentation viewer.
//!
//! Documents are rendered through a fixed pipeline: list style
//! normalization, escaped brace protection, include directive expansion,
//! Markdown conversion, heading anchor and outline rewriting, and code
//! highlighting. [`DocParser`] runs the pipeline for one document and
//! [`DocsViewer`] wraps the result in a navigable page.

mod anchor;
mod assets;
pub mod components;
mod config;
mod document;
mod error;
mod header;
mod highlight;
mod include;
mod manager;
mod markdown;
mod markup;
mod options;
mod viewer;

pub use anchor::{AnchorRegistry, slugify};
pub use assets::{VIEWER_CSS, write_css_assets};
pub use config::Config;
pub use document::DocFile;
pub use error::{DocsError, DocsResult, IncludeError};
pub use header::Header;
pub use highlight::{HighlightError, SyntaxHighlighter, SyntectHighlighter, resolve_language};
pub use include::{
    FilterContext, IncludeDirective, IncludeFile, IncludeFilter, IncludeResolver, find_directives,
};
pub use manager::DocsManager;
pub use markdown::{DocParser, MarkdownRenderer};
pub use options::{DEFAULT_MAX_INCLUDE_SIZE, DocsConfig};
pub use viewer::{DocLinks, DocsViewer, STYLESHEET};
