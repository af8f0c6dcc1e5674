//! Resolution of media references into assets and samples.
//!
//! A [`Resolver`] owns one session: it fetches metadata through a
//! [`MetadataSource`](mediaref_interface::MetadataSource), builds
//! [`Asset`]s, follows their links, hands out keyboard shortcuts and keeps
//! everything it resolved in insertion order.
//!
//! # Example
//!
//! ```no_run
//! use mediaref_resolver::{Resolver, ResolverConfig};
//! use mediaref_source::HttpMetadataSource;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ResolverConfig::load()?;
//! let source = HttpMetadataSource::new("http://localhost/api");
//! let resolver = Resolver::with_config(Arc::new(source), config);
//!
//! for asset in resolver.resolve(["ref:Beethoven_Fuer-Elise", "uuid:c262fe9b"]).await? {
//!     println!("{} -> {}", asset.reference(), asset.http_url());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod config;
mod resolver;
mod sample;
mod shortcut;

pub use asset::{Asset, RejectedSample, SampleCollection};
pub use config::{ResolverConfig, ResolverConfigBuilder};
pub use resolver::Resolver;
pub use sample::Sample;
pub use shortcut::{ShortcutCounter, ShortcutManager};
