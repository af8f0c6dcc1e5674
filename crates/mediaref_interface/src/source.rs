//! Metadata source trait definition.

use mediaref_core::{MediaReference, MetadataRecord};
use mediaref_error::MediaRefResult;
use std::sync::Arc;

/// Something that can look up the metadata record behind a media reference.
///
/// Implementations are free to fail; the resolver does not cache failures
/// and asks again on the next request for the same key.
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch the record for `reference`.
    ///
    /// The fragment is irrelevant here; implementations look up the
    /// reference's scheme and authority.
    ///
    /// # Errors
    ///
    /// Returns a metadata fetch error if the record is unknown, the backend
    /// is unreachable, or the payload cannot be decoded.
    async fn fetch(&self, reference: &MediaReference) -> MediaRefResult<MetadataRecord>;

    /// Short name of the backend, used in logs.
    fn name(&self) -> &str;
}

#[async_trait::async_trait]
impl<S> MetadataSource for Arc<S>
where
    S: MetadataSource + ?Sized,
{
    async fn fetch(&self, reference: &MediaReference) -> MediaRefResult<MetadataRecord> {
        (**self).fetch(reference).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
