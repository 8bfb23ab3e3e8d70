//! Publishing adapter error types.

/// Specific error conditions for platform publishing.
///
/// Precondition kinds (`MissingCredentials`, `MediaRequired`,
/// `MediaNotPublic`) are raised before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PublishErrorKind {
    /// No stored credentials for the platform
    #[display("{} credentials not configured", _0)]
    MissingCredentials(String),
    /// No publishing adapter registered for the platform
    #[display("No publisher registered for {}", _0)]
    AdapterNotConfigured(String),
    /// Platform mandates media and the item carries none
    #[display("{} posts require media", _0)]
    MediaRequired(String),
    /// Media ref resolved to something other than a public http(s) URL
    #[display("Media must be a public URL for the platform API (got: {})", _0)]
    MediaNotPublic(String),
    /// Remote media container reached a terminal error state
    #[display("Media container processing failed: {}", _0)]
    ContainerFailed(String),
    /// Remote media container never became ready within the retry budget
    #[display("Media container processing timed out after {} attempts", _0)]
    ContainerTimedOut(u32),
    /// Platform API returned a non-success status
    #[display("Platform API error ({}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error description
        message: String,
    },
    /// Transport-level failure
    #[display("Request failed: {}", _0)]
    Request(String),
}

/// Error type for platform publishing.
///
/// # Examples
///
/// ```
/// use herald_error::{PublishError, PublishErrorKind};
///
/// let err = PublishError::new(PublishErrorKind::MediaRequired("instagram".into()));
/// assert!(format!("{}", err).contains("require media"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    /// The specific error condition
    pub kind: PublishErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PublishError {
    /// Create a new PublishError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
