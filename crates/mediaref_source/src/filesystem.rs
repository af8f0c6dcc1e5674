//! Metadata records stored as JSON files on disk.

use mediaref_core::{MediaReference, MetadataRecord};
use mediaref_error::{FetchError, FetchErrorKind, MediaRefResult};
use mediaref_interface::MetadataSource;
use std::path::{Path, PathBuf};

/// Metadata source reading one JSON file per reference.
///
/// Layout: `{root}/{scheme}/{authority}.json`
///
/// ```text
/// metadata/
/// ├── ref/
/// │   └── Yesterday.json
/// └── uuid/
///     └── c262fe9b-c705-43fd-a5d4-4bb38178d9e7.json
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemMetadataSource {
    root: PathBuf,
}

impl FileSystemMetadataSource {
    /// Create a source rooted at `root`.
    #[tracing::instrument(skip(root))]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        tracing::debug!(root = %root.display(), "Created filesystem metadata source");
        Self { root }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the record for `reference`.
    pub fn record_path(&self, reference: &MediaReference) -> PathBuf {
        self.root
            .join(reference.scheme().as_str())
            .join(format!("{}.json", reference.authority()))
    }
}

#[async_trait::async_trait]
impl MetadataSource for FileSystemMetadataSource {
    #[tracing::instrument(skip(self, reference), fields(key = %reference.canonical_key()))]
    async fn fetch(&self, reference: &MediaReference) -> MediaRefResult<MetadataRecord> {
        let path = self.record_path(reference);

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FetchError::new(FetchErrorKind::NotFound(format!(
                    "{} ({})",
                    reference.canonical_key(),
                    path.display()
                )))
            } else {
                FetchError::new(FetchErrorKind::Transport(format!("{}: {}", path.display(), e)))
            }
        })?;

        let record = serde_json::from_str(&content).map_err(|e| {
            FetchError::new(FetchErrorKind::MalformedPayload(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %path.display(), "Read metadata record");
        Ok(record)
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}
