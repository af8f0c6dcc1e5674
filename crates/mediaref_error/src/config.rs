//! Resolver configuration errors.

/// Kinds of configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A configuration source could not be read
    #[display("Cannot read resolver configuration: {}", _0)]
    Unreadable(String),
    /// The merged configuration does not describe a resolver
    #[display("Invalid resolver configuration: {}", _0)]
    Invalid(String),
    /// No backend to fetch metadata from was selected
    #[display("No metadata source configured")]
    NoMetadataSource,
}

/// Configuration error with location tracking.
///
/// # Examples
///
/// ```
/// use mediaref_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Invalid("missing field `base_url`".into()));
/// assert!(format!("{}", err).starts_with("Config Error: Invalid resolver configuration"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Config Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
