//! Error types for the mediaref workspace.
//!
//! This crate provides the error types shared by every mediaref crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The top-level [`MediaRefError`] is `Clone`, so one failed fetch can be
//! handed to every caller waiting on it.
//!
//! # Examples
//!
//! ```
//! use mediaref_error::{MediaRefResult, ReferenceError, ReferenceErrorKind};
//!
//! fn parse_it() -> MediaRefResult<()> {
//!     Err(ReferenceError::new(ReferenceErrorKind::Malformed("id:x".to_string())))?
//! }
//!
//! let err = parse_it().unwrap_err();
//! assert!(err.is_malformed_reference());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod config;
mod error;
mod fetch;
mod reference;
mod sample;
mod time_spec;

pub use asset::{AssetError, AssetErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{MediaRefError, MediaRefErrorKind, MediaRefResult};
pub use fetch::{FetchError, FetchErrorKind};
pub use reference::{ReferenceError, ReferenceErrorKind};
pub use sample::{SampleError, SampleErrorKind};
pub use time_spec::{TimeSpecError, TimeSpecErrorKind};
