//! Core data types for the mediaref media-reference resolver.
//!
//! Everything in this crate is pure and synchronous: parsing media
//! references, normalising time windows, mapping file extensions to mime
//! classes and describing the raw metadata records served by a metadata
//! source.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filename;
mod links;
mod metadata;
mod mime;
mod reference;
mod time;

pub use filename::{extension_of, multi_part_file_name};
pub use links::{LINK_FIELDS, LinkField, LinkKind, link_values};
pub use metadata::{
    COMPLETE_SAMPLE, DEFAULT_FADE_IN_SEC, DEFAULT_FADE_OUT_SEC, MetadataRecord, SampleSpec,
};
pub use mime::MimeClass;
pub use reference::{MediaReference, Scheme};
pub use time::{TimeValue, TimeWindow};
