//! Media reference parsing errors.

/// Kinds of media reference errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ReferenceErrorKind {
    /// The raw string does not match `scheme:authority[#fragment]`
    #[display("Malformed media reference: {}", _0)]
    Malformed(String),
}

/// Media reference error with location tracking.
///
/// # Examples
///
/// ```
/// use mediaref_error::{ReferenceError, ReferenceErrorKind};
///
/// let err = ReferenceError::new(ReferenceErrorKind::Malformed("http:x".to_string()));
/// assert!(format!("{}", err).contains("Malformed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Reference Error: {} at line {} in {}", kind, line, file)]
pub struct ReferenceError {
    /// The kind of error that occurred
    pub kind: ReferenceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ReferenceError {
    /// Create a new reference error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ReferenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a [`ReferenceErrorKind::Malformed`] error.
    #[track_caller]
    pub fn malformed(raw: impl Into<String>) -> Self {
        Self::new(ReferenceErrorKind::Malformed(raw.into()))
    }
}
