//! mediaref - media reference resolution
//!
//! Turns `ref:` and `uuid:` media URIs into assets with ready-made URLs and
//! time-sliced samples, following links such as cover images along the way.
//!
//! # Quick Start
//!
//! ```
//! use mediaref::{InMemoryMetadataSource, MetadataRecord, Resolver};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = InMemoryMetadataSource::new().with_record(
//!     MetadataRecord::default()
//!         .with_reference("Fuer-Elise")
//!         .with_path("Klavier/Fuer-Elise.mp3"),
//! );
//! let resolver = Resolver::new(Arc::new(source));
//!
//! let sample = resolver.resolve_sample("ref:Fuer-Elise").await?;
//! assert_eq!(sample.uri(), "ref:Fuer-Elise#complete");
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `mediaref_error` - Error types
//! - `mediaref_core` - References, time windows, metadata records
//! - `mediaref_cache` - Insertion-ordered reference cache
//! - `mediaref_interface` - `MetadataSource` trait
//! - `mediaref_source` - In-memory, filesystem and HTTP sources
//! - `mediaref_resolver` - Assets, samples and the resolver
//!
//! This crate re-exports everything for convenience.

pub use mediaref_cache::*;
pub use mediaref_core::*;
pub use mediaref_error::*;
pub use mediaref_interface::*;
pub use mediaref_resolver::*;
pub use mediaref_source::*;

mod report;
mod telemetry;

pub use report::{asset_line, assets_json, sample_line};
pub use telemetry::init_tracing;
