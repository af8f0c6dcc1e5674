//! Asset construction errors.

/// Kinds of asset errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AssetErrorKind {
    /// The file extension does not map to a known mime class
    #[display("Unsupported mime type for extension: {}", _0)]
    UnsupportedMimeType(String),
    /// Neither `extension`, `filename` nor `path` yield an extension
    #[display("Asset has no file extension: {}", _0)]
    MissingExtension(String),
    /// The complete sample is defined both at the root and in `samples`
    #[display("Duplicate definition of the complete sample: {}", _0)]
    DuplicateCompleteSample(String),
    /// A multi-part number outside `1..=count` was requested
    #[display("Asset {} has {} parts, not {}", reference, count, requested)]
    PartOutOfRange {
        /// Canonical key of the asset
        reference: String,
        /// Number of parts the asset has
        count: u32,
        /// Part number that was asked for
        requested: u32,
    },
}

/// Asset error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Asset Error: {} at line {} in {}", kind, line, file)]
pub struct AssetError {
    /// The kind of error that occurred
    pub kind: AssetErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AssetError {
    /// Create a new asset error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AssetErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AssetErrorKind {
        &self.kind
    }
}
