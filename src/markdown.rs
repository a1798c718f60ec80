//! Markdown to HTML pipeline.
//!
//! [`DocParser`] runs the full transform over one document: list style
//! normalization, include injection, conversion with comrak, heading
//! anchors and code highlighting.

mod parser;
mod preprocess;
mod renderer;

pub use parser::DocParser;
pub use renderer::MarkdownRenderer;
