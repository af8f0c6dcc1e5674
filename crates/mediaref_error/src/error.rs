//! Top-level error wrapper types.

use crate::{
    AssetError, AssetErrorKind, ConfigError, FetchError, ReferenceError, SampleError,
    TimeSpecError, TimeSpecErrorKind,
};

/// Every error condition a mediaref crate can report.
///
/// # Examples
///
/// ```
/// use mediaref_error::{MediaRefErrorKind, SampleError, SampleErrorKind};
///
/// let err = SampleError::new(SampleErrorKind::NotFound("ref:A#intro".to_string()));
/// let kind: MediaRefErrorKind = err.into();
/// assert!(format!("{}", kind).contains("Sample Error"));
/// ```
#[derive(Debug, Clone, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MediaRefErrorKind {
    /// Malformed media reference
    #[from(ReferenceError)]
    Reference(ReferenceError),
    /// Conflicting or unparseable time specification
    #[from(TimeSpecError)]
    TimeSpec(TimeSpecError),
    /// Asset could not be constructed from its metadata
    #[from(AssetError)]
    Asset(AssetError),
    /// Metadata source reported a failure
    #[from(FetchError)]
    Fetch(FetchError),
    /// Fragment names no known sample
    #[from(SampleError)]
    Sample(SampleError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// mediaref error with kind discrimination.
///
/// # Examples
///
/// ```
/// use mediaref_error::{ConfigError, ConfigErrorKind, MediaRefResult};
///
/// fn might_fail() -> MediaRefResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Invalid("missing field".into())))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("MediaRef Error: {}", _0)]
pub struct MediaRefError(Box<MediaRefErrorKind>);

impl MediaRefError {
    /// Create a new error from a kind.
    pub fn new(kind: MediaRefErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MediaRefErrorKind {
        &self.0
    }

    /// The raw string did not match the reference grammar.
    pub fn is_malformed_reference(&self) -> bool {
        matches!(self.kind(), MediaRefErrorKind::Reference(_))
    }

    /// A sample supplied both `duration` and `endTime`.
    pub fn is_conflicting_time_spec(&self) -> bool {
        matches!(
            self.kind(),
            MediaRefErrorKind::TimeSpec(TimeSpecError {
                kind: TimeSpecErrorKind::ConflictingTimeSpec(_),
                ..
            })
        )
    }

    /// The asset's file extension maps to no mime class.
    pub fn is_unsupported_mime_type(&self) -> bool {
        matches!(
            self.kind(),
            MediaRefErrorKind::Asset(AssetError {
                kind: AssetErrorKind::UnsupportedMimeType(_),
                ..
            })
        )
    }

    /// The metadata source failed for any reason.
    pub fn is_fetch_failed(&self) -> bool {
        matches!(self.kind(), MediaRefErrorKind::Fetch(_))
    }

    /// The fragment named no sample of the resolved asset.
    pub fn is_sample_not_found(&self) -> bool {
        matches!(self.kind(), MediaRefErrorKind::Sample(_))
    }
}

// Generic From implementation for any type that converts to MediaRefErrorKind
impl<T> From<T> for MediaRefError
where
    T: Into<MediaRefErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for mediaref operations.
pub type MediaRefResult<T> = std::result::Result<T, MediaRefError>;
