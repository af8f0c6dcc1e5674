//! Metadata from the media server's REST API.

use mediaref_core::{MediaReference, MetadataRecord};
use mediaref_error::{FetchError, FetchErrorKind, MediaRefResult};
use mediaref_interface::MetadataSource;

/// Metadata source querying `GET {base}/media/get/asset?{scheme}={authority}`.
#[derive(Debug, Clone)]
pub struct HttpMetadataSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpMetadataSource {
    /// Create a source for the API at `base_url`, e.g. `http://localhost/api`.
    #[tracing::instrument(skip(base_url))]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a source sharing an existing HTTP client.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!(base_url = %base_url, "Creating HTTP metadata source");
        Self { base_url, client }
    }

    /// API base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request fetching the record for `reference`.
    pub fn request(&self, reference: &MediaReference) -> reqwest::RequestBuilder {
        let url = format!("{}/media/get/asset", self.base_url);
        self.client
            .get(url)
            .query(&[(reference.scheme().as_str(), reference.authority())])
    }
}

#[async_trait::async_trait]
impl MetadataSource for HttpMetadataSource {
    #[tracing::instrument(skip(self, reference), fields(key = %reference.canonical_key(), base_url = %self.base_url))]
    async fn fetch(&self, reference: &MediaReference) -> MediaRefResult<MetadataRecord> {
        let response = self.request(reference).send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            FetchError::new(FetchErrorKind::Transport(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::new(FetchErrorKind::NotFound(
                reference.canonical_key().to_string(),
            ))
            .into());
        }
        if !status.is_success() {
            tracing::error!("Media server returned error: {}", status);
            return Err(FetchError::new(FetchErrorKind::Transport(format!(
                "Media server returned: {}",
                status
            )))
            .into());
        }

        let record = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            FetchError::new(FetchErrorKind::MalformedPayload(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        tracing::debug!("Fetched metadata record");
        Ok(record)
    }

    fn name(&self) -> &str {
        "http"
    }
}
