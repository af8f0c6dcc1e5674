//! Insertion-ordered caching of resolved media objects.
//!
//! The resolver keeps one [`ReferenceCache`] for assets and one for samples.
//! Entries are never overwritten, so the first object stored under a key
//! stays the canonical one for the whole session.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;

pub use cache::{CacheEntry, ReferenceCache};
