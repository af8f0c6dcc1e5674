//! Time specification errors.

/// Specific error conditions for sample time windows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TimeSpecErrorKind {
    /// Both `duration` and `endTime` were supplied
    #[display("Specify duration or endTime, not both: {}", _0)]
    ConflictingTimeSpec(String),
    /// A time value could not be converted to seconds
    #[display("Invalid time value: {}", _0)]
    InvalidTimeValue(String),
    /// The window is empty or starts before zero
    #[display("Invalid time window: {}", _0)]
    InvalidTimeWindow(String),
}

/// Time specification error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Time Spec Error: {} at line {} in {}", kind, line, file)]
pub struct TimeSpecError {
    /// The kind of error that occurred
    pub kind: TimeSpecErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TimeSpecError {
    /// Create a new time spec error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TimeSpecErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TimeSpecErrorKind {
        &self.kind
    }
}
