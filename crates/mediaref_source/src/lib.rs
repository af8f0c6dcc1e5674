//! Metadata source backends.
//!
//! - [`InMemoryMetadataSource`]: records held in memory, with fetch counting
//! - [`FileSystemMetadataSource`]: one JSON file per reference on disk
//! - [`HttpMetadataSource`]: the media server's REST API

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod http;
mod memory;

pub use filesystem::FileSystemMetadataSource;
pub use http::HttpMetadataSource;
pub use memory::InMemoryMetadataSource;
