//! Trait definitions for the mediaref resolver.
//!
//! The resolver never talks to a media server directly; it asks a
//! [`MetadataSource`] for the record behind a reference.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod source;

pub use source::MetadataSource;
