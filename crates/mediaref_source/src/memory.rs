//! In-memory metadata source.

use mediaref_core::{MediaReference, MetadataRecord, Scheme};
use mediaref_error::{FetchError, FetchErrorKind, MediaRefResult};
use mediaref_interface::MetadataSource;
use std::collections::HashMap;
use std::path::Path;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Metadata source backed by a map of canonical keys to records.
///
/// Counts every fetch, which makes it the backend of choice for tests and
/// offline fixtures. An optional latency keeps fetches pending long enough
/// for concurrent callers to overlap.
///
/// # Example
///
/// ```
/// use mediaref_core::{MediaReference, MetadataRecord};
/// use mediaref_interface::MetadataSource;
/// use mediaref_source::InMemoryMetadataSource;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = InMemoryMetadataSource::new().with_record(
///     MetadataRecord::default()
///         .with_reference("Yesterday")
///         .with_uuid("c262fe9b")
///         .with_path("Lieder/Yesterday.mp3"),
/// );
///
/// let by_uuid = MediaReference::parse("uuid:c262fe9b").unwrap();
/// let record = source.fetch(&by_uuid).await.unwrap();
/// assert_eq!(record.reference.as_deref(), Some("Yesterday"));
/// assert_eq!(source.fetch_count(), 1);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryMetadataSource {
    records: RwLock<HashMap<String, MetadataRecord>>,
    fetches: AtomicUsize,
    fetches_by_key: Mutex<HashMap<String, usize>>,
    latency: Option<Duration>,
}

impl InMemoryMetadataSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `record` under its `ref:` and `uuid:` keys.
    pub fn with_record(self, record: MetadataRecord) -> Self {
        self.insert(record);
        self
    }

    /// Add `record` under an explicit key.
    pub fn with_record_at(self, key: &str, record: MetadataRecord) -> Self {
        self.insert_at(key, record);
        self
    }

    /// Delay every fetch by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add `record` under its `ref:` and `uuid:` keys.
    ///
    /// Returns the keys it was stored under; a record with neither field is
    /// not stored.
    pub fn insert(&self, record: MetadataRecord) -> Vec<String> {
        let keys = record_keys(&record);
        if keys.is_empty() {
            tracing::warn!(title = ?record.title, "Record has neither ref nor uuid, skipping");
        }
        for key in &keys {
            self.insert_at(key, record.clone());
        }
        keys
    }

    /// Add `record` under an explicit canonical key.
    pub fn insert_at(&self, key: &str, record: MetadataRecord) {
        let mut records = self.records.write();
        records.insert(key.to_string(), record);
        tracing::debug!(key, size = records.len(), "Stored metadata record");
    }

    /// Load a JSON array of records, indexing each under its `ref:` and
    /// `uuid:` keys.
    ///
    /// # Errors
    ///
    /// Returns a fetch error if the file cannot be read or is not an array
    /// of records.
    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn from_json_file(path: impl AsRef<Path>) -> MediaRefResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            FetchError::new(FetchErrorKind::Transport(format!("{}: {}", path.display(), e)))
        })?;
        let records: Vec<MetadataRecord> = serde_json::from_str(&content).map_err(|e| {
            FetchError::new(FetchErrorKind::MalformedPayload(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        let source = Self::new();
        for record in records {
            source.insert(record);
        }
        tracing::info!(records = source.len(), "Loaded metadata fixtures");
        Ok(source)
    }

    /// Number of keys with a record.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the source holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of fetches, successful or not.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of fetches for one canonical key.
    pub fn fetch_count_for(&self, key: &str) -> usize {
        self.fetches_by_key
            .lock()
            .get(key)
            .copied()
            .unwrap_or(0)
    }
}

fn record_keys(record: &MetadataRecord) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(reference) = &record.reference {
        keys.push(format!("{}:{}", Scheme::Ref, reference));
    }
    if let Some(uuid) = &record.uuid {
        keys.push(format!("{}:{}", Scheme::Uuid, uuid));
    }
    keys
}

#[async_trait::async_trait]
impl MetadataSource for InMemoryMetadataSource {
    #[tracing::instrument(skip(self, reference), fields(key = %reference.canonical_key()))]
    async fn fetch(&self, reference: &MediaReference) -> MediaRefResult<MetadataRecord> {
        let key = reference.canonical_key();
        self.fetches.fetch_add(1, Ordering::SeqCst);
        *self
            .fetches_by_key
            .lock()
            .entry(key.to_string())
            .or_insert(0) += 1;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let record = self
            .records
            .read()
            .get(key)
            .cloned();
        match record {
            Some(record) => {
                tracing::debug!("Found metadata record");
                Ok(record)
            }
            None => {
                tracing::debug!("No metadata record");
                Err(FetchError::new(FetchErrorKind::NotFound(key.to_string())).into())
            }
        }
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_identifiers_is_skipped() {
        let source = InMemoryMetadataSource::new();
        let keys = source.insert(MetadataRecord::default().with_title("Anonymous"));
        assert!(keys.is_empty());
        assert!(source.is_empty());
    }

    #[tokio::test]
    async fn test_counts_failed_fetches() {
        let source = InMemoryMetadataSource::new();
        let reference = MediaReference::parse("ref:Missing#intro").unwrap();
        let err = source.fetch(&reference).await.unwrap_err();
        assert!(err.is_fetch_failed());
        assert_eq!(source.fetch_count(), 1);
        assert_eq!(source.fetch_count_for("ref:Missing"), 1);
    }
}
