//! Content lifecycle error types.

/// Specific error conditions for content lifecycle operations.
///
/// Statuses and platforms appear as plain strings so this foundation crate
/// stays free of domain-type dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ContentErrorKind {
    /// Content item does not exist
    #[display("Content {} not found", _0)]
    NotFound(String),
    /// Brand profile does not exist
    #[display("Brand {} not found", _0)]
    BrandNotFound(String),
    /// Requested status transition is not legal
    #[display("Cannot move content from '{}' to '{}'", from, to)]
    InvalidTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },
    /// Content has already been published and is immutable
    #[display("Content already posted")]
    AlreadyPosted,
    /// Body edits require pending or approved status
    #[display("Cannot edit content with status '{}'", _0)]
    NotEditable(String),
    /// Regeneration requires pending, approved, or rejected status
    #[display("Cannot regenerate content with status '{}'", _0)]
    NotRegenerable(String),
    /// Publishing requires approved (or scheduled) status
    #[display("Content must be approved before posting (current status: '{}')", _0)]
    NotApproved(String),
    /// More media attached than the platform allows
    #[display("{} posts allow a maximum of {} media items (got {})", platform, limit, count)]
    MediaLimitExceeded {
        /// Target platform
        platform: String,
        /// Platform attachment limit
        limit: usize,
        /// Number of attachments requested
        count: usize,
    },
    /// Platform mandates media and none was provided
    #[display("{} posts require at least one media item", _0)]
    MediaRequired(String),
}

/// Error type for content lifecycle operations.
///
/// # Examples
///
/// ```
/// use herald_error::{ContentError, ContentErrorKind};
///
/// let err = ContentError::new(ContentErrorKind::AlreadyPosted);
/// assert!(format!("{}", err).contains("already posted"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Content Error: {} at line {} in {}", kind, line, file)]
pub struct ContentError {
    /// The specific error condition
    pub kind: ContentErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ContentError {
    /// Create a new ContentError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ContentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
