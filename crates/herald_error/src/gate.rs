//! System control gate error types.
//!
//! A `GateError` means the system's operational mode refused the action.
//! It is a distinct class from validation errors so callers can tell
//! "system unavailable" from "fix your input".

/// Specific blocking conditions raised by the system control gate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GateErrorKind {
    /// Crisis mode hard-stops the action
    #[display("System in crisis mode - {} blocked", _0)]
    Crisis(String),
    /// Paused mode suspends automated actions
    #[display("System paused - {} disabled", _0)]
    Paused(String),
}

/// Error type for actions refused by the system control gate.
///
/// # Examples
///
/// ```
/// use herald_error::{GateError, GateErrorKind};
///
/// let err = GateError::new(GateErrorKind::Crisis("posting".into()));
/// assert!(format!("{}", err).contains("crisis"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gate Error: {} at line {} in {}", kind, line, file)]
pub struct GateError {
    /// The specific blocking condition
    pub kind: GateErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GateError {
    /// Create a new GateError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GateErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
