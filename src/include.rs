//! Include directives: `{include-file:<path>}` markers that splice the
//! content of another file into a document before it is converted.
//!
//! Directives are found with [`find_directives`], resolved against the
//! search roots of a [`DocsConfig`](crate::DocsConfig) by
//! [`IncludeResolver`], and passed through the [`IncludeFilter`] chain
//! registered for the file's extension.

mod directive;
mod filter;
mod resolver;

pub use directive::{IncludeDirective, find_directives};
pub use filter::{FilterContext, IncludeFilter};
pub use resolver::{IncludeFile, IncludeResolver};
