//! Metadata fetch errors.

/// Ways a metadata source can fail.
///
/// Every kind surfaces to callers as "metadata fetch failed"; nothing is
/// cached, so a later request for the same key fetches again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum FetchErrorKind {
    /// The source has no record for the key
    #[display("Metadata not found: {}", _0)]
    NotFound(String),
    /// The source could not be reached or answered with an error status
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// The source answered but the record could not be decoded
    #[display("Malformed metadata payload: {}", _0)]
    MalformedPayload(String),
}

/// Metadata fetch error with location tracking.
///
/// # Examples
///
/// ```
/// use mediaref_error::{FetchError, FetchErrorKind};
///
/// let err = FetchError::new(FetchErrorKind::NotFound("ref:Missing".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Metadata Fetch Failed: {} at line {} in {}", kind, line, file)]
pub struct FetchError {
    /// The kind of error that occurred
    pub kind: FetchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FetchError {
    /// Create a new fetch error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FetchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FetchErrorKind {
        &self.kind
    }
}
