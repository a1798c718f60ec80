//! Error types with stable numeric codes.

use std::path::PathBuf;

/// Errors raised by the document collection, viewer and configuration.
///
/// Variants that map to a documented condition carry a stable numeric code
/// (see [`DocsError::code`]) so callers can identify them across versions.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("No documents available to view")]
    NoDocumentsAvailable,

    #[error("No first document found: the collection is empty")]
    NoFirstDocument,

    #[error("No such documentation file: tried accessing document by id [{0}]")]
    UnknownDocumentId(String),

    #[error("The include filter [{0}] has no extensions configured")]
    FilterWithoutExtensions(String),

    #[error("Document file does not exist: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("Folder does not exist: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk folder: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Highlight(#[from] crate::highlight::HighlightError),
}

impl DocsError {
    pub const NO_DOCUMENTS_AVAILABLE: u32 = 82001;
    pub const NO_FIRST_DOCUMENT: u32 = 82101;
    pub const UNKNOWN_DOCUMENT_ID: u32 = 82102;
    pub const FILTER_WITHOUT_EXTENSIONS: u32 = 141001;

    /// Stable numeric code, when the condition has one.
    pub fn code(&self) -> Option<u32> {
        match self {
            DocsError::NoDocumentsAvailable => Some(Self::NO_DOCUMENTS_AVAILABLE),
            DocsError::NoFirstDocument => Some(Self::NO_FIRST_DOCUMENT),
            DocsError::UnknownDocumentId(_) => Some(Self::UNKNOWN_DOCUMENT_ID),
            DocsError::FilterWithoutExtensions(_) => Some(Self::FILTER_WITHOUT_EXTENSIONS),
            DocsError::DocumentNotFound(_)
            | DocsError::FolderNotFound(_)
            | DocsError::Io { .. }
            | DocsError::Walk(_)
            | DocsError::Highlight(_) => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocsError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for library operations.
pub type DocsResult<T> = Result<T, DocsError>;

/// Reasons an include directive could not be resolved.
///
/// These never abort a render: the parser substitutes
/// [`IncludeError::inline_message`] at the directive's location.
#[derive(Debug, thiserror::Error)]
pub enum IncludeError {
    #[error("The include file [{0}] could not be found in any of the include paths.")]
    NotFound(String),

    #[error("The include path [{0}] is not a file.")]
    NotAFile(String),

    #[error("The include file [{path}] is too big ({size} bytes, maximum is {max} bytes).")]
    TooBig { path: String, size: u64, max: u64 },

    #[error("The include path [{0}] may not navigate upwards.")]
    NavigatingUp(String),

    #[error("The include file [{path}] has an extension that is not allowed. Allowed: {allowed}.")]
    InvalidExtension { path: String, allowed: String },

    #[error("The include file [{path}] could not be read: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl IncludeError {
    pub const FILE_NOT_FOUND: u32 = 140801;
    pub const NOT_A_FILE: u32 = 140802;
    pub const FILE_TOO_BIG: u32 = 140803;
    pub const NAVIGATING_UP: u32 = 140804;
    pub const INVALID_EXTENSION: u32 = 140805;

    /// Stable numeric code of the condition.
    ///
    /// An unreadable file that exists is reported as not found, since the
    /// caller cannot act on it any differently.
    pub fn code(&self) -> u32 {
        match self {
            IncludeError::NotFound(_) | IncludeError::Read { .. } => Self::FILE_NOT_FOUND,
            IncludeError::NotAFile(_) => Self::NOT_A_FILE,
            IncludeError::TooBig { .. } => Self::FILE_TOO_BIG,
            IncludeError::NavigatingUp(_) => Self::NAVIGATING_UP,
            IncludeError::InvalidExtension { .. } => Self::INVALID_EXTENSION,
        }
    }

    /// Markdown text substituted in place of a failed directive.
    pub fn inline_message(&self) -> String {
        format!("**Error #{}:** {}\n", self.code(), self)
    }
}
