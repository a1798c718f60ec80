//! Content filters applied to resolved include files.

use crate::document::DocFile;
use crate::options::DocsConfig;

use super::IncludeFile;

/// Everything a filter may look at to decide whether it applies.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    /// Document containing the include directive.
    pub source: &'a DocFile,
    /// Configuration the include was resolved with.
    pub config: &'a DocsConfig,
    /// The resolved include file.
    pub include: &'a IncludeFile,
}

/// Transforms the content of included files with given extensions.
///
/// Filters are registered on a [`DocsConfig`] and run in registration order.
/// Each filter whose [`is_valid_for`](IncludeFilter::is_valid_for) accepts
/// the context receives the output of the previous one.
///
/// # Examples
///
/// ```
/// use mdviewer::{FilterContext, IncludeFilter};
///
/// struct StripPhpTags;
///
/// impl IncludeFilter for StripPhpTags {
///     fn extensions(&self) -> &[&str] {
///         &["php"]
///     }
///
///     fn filter(&self, content: String, _context: &FilterContext<'_>) -> String {
///         content.replace("<?php", "").replace("?>", "")
///     }
/// }
/// ```
pub trait IncludeFilter: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Lowercase extensions, without dot, this filter is registered for.
    fn extensions(&self) -> &[&str];

    /// Whether the filter applies to this include.
    fn is_valid_for(&self, _context: &FilterContext<'_>) -> bool {
        true
    }

    /// Returns the transformed content.
    fn filter(&self, content: String, context: &FilterContext<'_>) -> String;
}
