//! Sample lookup errors.

/// Kinds of sample errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SampleErrorKind {
    /// The fragment names no sample of an otherwise resolved asset
    #[display("Sample not found: {}", _0)]
    NotFound(String),
}

/// Sample error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Sample Error: {} at line {} in {}", kind, line, file)]
pub struct SampleError {
    /// The kind of error that occurred
    pub kind: SampleErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SampleError {
    /// Create a new sample error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SampleErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
