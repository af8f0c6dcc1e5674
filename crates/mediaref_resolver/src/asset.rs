//! Assets built from metadata records.

use crate::sample::{Sample, SampleDraft};
use derive_getters::Getters;
use mediaref_cache::ReferenceCache;
use mediaref_core::{
    COMPLETE_SAMPLE, MediaReference, MetadataRecord, MimeClass, SampleSpec, Scheme, link_values,
    multi_part_file_name,
};
use mediaref_error::{AssetError, AssetErrorKind, MediaRefError, MediaRefResult};
use std::sync::{Arc, OnceLock, Weak};

/// A sample spec that failed to normalise.
#[derive(Debug, Clone, Getters)]
pub struct RejectedSample {
    reference: String,
    error: MediaRefError,
}

/// Samples of one asset, the complete sample first.
#[derive(Debug)]
pub struct SampleCollection {
    complete: Arc<Sample>,
    samples: ReferenceCache<Arc<Sample>>,
    rejected: Vec<RejectedSample>,
}

impl SampleCollection {
    /// The sample spanning the whole asset.
    pub fn complete(&self) -> &Arc<Sample> {
        &self.complete
    }

    /// Sample named by `fragment`.
    pub fn get(&self, fragment: &str) -> Option<&Arc<Sample>> {
        self.samples.get(fragment)
    }

    /// Error of the rejected spec named `fragment`, if any.
    pub fn rejection(&self, fragment: &str) -> Option<&MediaRefError> {
        self.rejected
            .iter()
            .find(|rejected| rejected.reference == fragment)
            .map(|rejected| &rejected.error)
    }

    /// Specs that could not be turned into samples.
    pub fn rejected(&self) -> &[RejectedSample] {
        &self.rejected
    }

    /// Samples in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Sample>> {
        self.samples.values()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; the complete sample is always there.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// A media file described by one metadata record.
///
/// Created once per canonical key by the resolver and shared as
/// `Arc<Asset>`. Only the shortcut and the lazily built samples change
/// after construction.
#[derive(Debug)]
pub struct Asset {
    reference: MediaReference,
    metadata: MetadataRecord,
    mime_class: MimeClass,
    http_url: String,
    preview_url: Option<String>,
    waveform_url: Option<String>,
    complete: SampleDraft,
    shortcut: OnceLock<String>,
    samples: OnceLock<SampleCollection>,
    this: Weak<Asset>,
}

impl Asset {
    /// Build an asset from its metadata. Pure, no I/O.
    ///
    /// `media_base_url` is the URL prefix of all media files, including
    /// the fill-in segment (e.g. `http://localhost/media`).
    ///
    /// # Errors
    ///
    /// - Missing extension if neither `extension`, `filename` nor `path` has one
    /// - Unsupported mime type for unknown extensions
    /// - Duplicate complete sample if both the root fields and a `samples`
    ///   entry named `complete` describe it
    /// - Time spec errors if the complete sample's window is invalid
    ///
    /// # Example
    ///
    /// ```
    /// use mediaref_core::{MediaReference, MetadataRecord, MimeClass};
    /// use mediaref_resolver::Asset;
    ///
    /// let reference = MediaReference::parse("ref:Yesterday").unwrap();
    /// let metadata = MetadataRecord::default()
    ///     .with_path("Lieder/Yesterday.mp3")
    ///     .with_preview_image(true);
    /// let asset = Asset::construct(&reference, metadata, "http://localhost/media").unwrap();
    ///
    /// assert_eq!(asset.mime_class(), MimeClass::Audio);
    /// assert_eq!(asset.http_url(), "http://localhost/media/Lieder/Yesterday.mp3");
    /// assert_eq!(
    ///     asset.preview_url(),
    ///     Some("http://localhost/media/Lieder/Yesterday.mp3_preview.jpg")
    /// );
    /// assert_eq!(asset.samples().len(), 1);
    /// ```
    pub fn construct(
        reference: &MediaReference,
        metadata: MetadataRecord,
        media_base_url: &str,
    ) -> MediaRefResult<Arc<Self>> {
        let reference = reference.without_fragment();
        let key = reference.canonical_key();

        let extension = metadata
            .file_extension()
            .ok_or_else(|| AssetError::new(AssetErrorKind::MissingExtension(key.to_string())))?;
        let mime_class = MimeClass::from_extension(&extension).ok_or_else(|| {
            AssetError::new(AssetErrorKind::UnsupportedMimeType(format!(
                "{} ({})",
                extension, key
            )))
        })?;

        let complete = SampleDraft::complete(&complete_spec(key, &metadata)?)?;

        let relative = metadata
            .path
            .as_deref()
            .or(metadata.filename.as_deref())
            .unwrap_or(reference.authority())
            .trim_start_matches('/');
        let http_url = format!("{}/{}", media_base_url.trim_end_matches('/'), relative);
        let preview_url = metadata
            .preview_image
            .unwrap_or(false)
            .then(|| format!("{}_preview.jpg", http_url));
        let waveform_url = metadata
            .has_waveform
            .unwrap_or(false)
            .then(|| format!("{}_waveform.png", http_url));

        tracing::debug!(key, mime = %mime_class, url = %http_url, "Constructed asset");

        Ok(Arc::new_cyclic(|this| Self {
            reference,
            metadata,
            mime_class,
            http_url,
            preview_url,
            waveform_url,
            complete,
            shortcut: OnceLock::new(),
            samples: OnceLock::new(),
            this: this.clone(),
        }))
    }

    /// Canonical reference (no fragment).
    pub fn reference(&self) -> &MediaReference {
        &self.reference
    }

    /// Raw metadata record.
    pub fn metadata(&self) -> &MetadataRecord {
        &self.metadata
    }

    /// Media category.
    pub fn mime_class(&self) -> MimeClass {
        self.mime_class
    }

    /// Audio or video.
    pub fn is_playable(&self) -> bool {
        self.mime_class.is_playable()
    }

    /// Image or video.
    pub fn is_visible(&self) -> bool {
        self.mime_class.is_visible()
    }

    /// URL of the media file.
    pub fn http_url(&self) -> &str {
        &self.http_url
    }

    /// URL of the preview image, if the asset has one.
    pub fn preview_url(&self) -> Option<&str> {
        self.preview_url.as_deref()
    }

    /// URL of the waveform image, if the asset has one.
    pub fn waveform_url(&self) -> Option<&str> {
        self.waveform_url.as_deref()
    }

    /// Number of parts; 1 for ordinary assets.
    pub fn multi_part_count(&self) -> u32 {
        self.metadata.multi_part_count.unwrap_or(1).max(1)
    }

    /// Keyboard shortcut assigned by the resolver.
    pub fn shortcut(&self) -> Option<&str> {
        self.shortcut.get().map(String::as_str)
    }

    /// Set the shortcut unless one is already present.
    pub fn assign_shortcut(&self, shortcut: impl Into<String>) -> bool {
        self.shortcut.set(shortcut.into()).is_ok()
    }

    /// Title, else file name, else the reference.
    pub fn title_safe(&self) -> &str {
        self.metadata
            .title
            .as_deref()
            .or(self.metadata.filename.as_deref())
            .unwrap_or(self.reference.raw())
    }

    /// Canonical keys the metadata itself claims (`ref:..`, `uuid:..`).
    pub fn aliases(&self) -> Vec<String> {
        [
            (Scheme::Ref, self.metadata.reference.as_deref()),
            (Scheme::Uuid, self.metadata.uuid.as_deref()),
        ]
        .into_iter()
        .filter_map(|(scheme, authority)| {
            let reference = MediaReference::compose(scheme, authority?, None).ok()?;
            Some(reference.canonical_key().to_string())
        })
        .collect()
    }

    /// Samples, built on first access.
    pub fn samples(&self) -> &SampleCollection {
        self.samples.get_or_init(|| self.build_samples())
    }

    /// References found in link fields, fragments stripped.
    ///
    /// Values that are not media references are skipped.
    pub fn linked_references(&self) -> Vec<MediaReference> {
        link_values(&self.metadata)
            .into_iter()
            .filter_map(|(field, raw)| match MediaReference::parse(raw) {
                Ok(reference) => Some(reference.without_fragment()),
                Err(e) => {
                    tracing::warn!(
                        asset = %self.reference,
                        field,
                        value = raw,
                        error = %e,
                        "Skipping unparseable link"
                    );
                    None
                }
            })
            .collect()
    }

    /// URL of part `no` (1-based) of a multi-part asset.
    ///
    /// # Errors
    ///
    /// Returns a part out of range error for 0 or numbers above the part count.
    pub fn multi_part_http_url(&self, no: u32) -> MediaRefResult<String> {
        let count = self.multi_part_count();
        let out_of_range = || {
            AssetError::new(AssetErrorKind::PartOutOfRange {
                reference: self.reference.canonical_key().to_string(),
                count,
                requested: no,
            })
        };
        if no == 0 || no > count {
            return Err(out_of_range().into());
        }
        multi_part_file_name(&self.http_url, no).ok_or_else(|| out_of_range().into())
    }

    /// URL selected by a fragment: numeric fragments pick a part, anything
    /// else the file itself.
    ///
    /// # Errors
    ///
    /// See [`multi_part_http_url`](Self::multi_part_http_url).
    pub fn part_url(&self, fragment: Option<&str>) -> MediaRefResult<String> {
        match fragment.and_then(|f| f.parse::<u32>().ok()) {
            Some(no) => self.multi_part_http_url(no),
            None => Ok(self.http_url.clone()),
        }
    }

    fn build_samples(&self) -> SampleCollection {
        let key = self.reference.canonical_key();
        let complete = Arc::new(self.complete.clone().into_sample(self.this.clone(), key));
        let mut samples = ReferenceCache::new("samples");
        samples.add(COMPLETE_SAMPLE, complete.clone());
        let mut rejected: Vec<RejectedSample> = Vec::new();

        // Refs and default titles are numbered separately: only specs with
        // neither a ref nor a title count towards "Ausschnitt N".
        let mut unreferenced = 0;
        let mut untitled = 0;
        for spec in self.metadata.samples.iter().filter(|spec| !spec.is_complete()) {
            let (reference, title) = match (&spec.reference, &spec.title) {
                (Some(reference), Some(title)) => (reference.clone(), title.clone()),
                (Some(reference), None) => (reference.clone(), reference.clone()),
                (None, Some(title)) => {
                    unreferenced += 1;
                    (format!("sample{}", unreferenced), title.clone())
                }
                (None, None) => {
                    unreferenced += 1;
                    untitled += 1;
                    (
                        format!("sample{}", unreferenced),
                        format!("Ausschnitt {}", untitled),
                    )
                }
            };

            if samples.contains(&reference) || rejected.iter().any(|r| r.reference == reference) {
                tracing::warn!(asset = key, sample = %reference, "Duplicate sample ref, keeping first");
                continue;
            }

            match SampleDraft::from_spec(spec, reference.clone(), title) {
                Ok(draft) => {
                    let sample = draft.into_sample(self.this.clone(), key);
                    samples.add(reference, Arc::new(sample));
                }
                Err(error) => {
                    tracing::warn!(asset = key, sample = %reference, error = %error, "Rejected sample");
                    rejected.push(RejectedSample { reference, error });
                }
            }
        }

        tracing::debug!(asset = key, samples = samples.len(), rejected = rejected.len(), "Built samples");
        SampleCollection {
            complete,
            samples,
            rejected,
        }
    }
}

fn complete_spec(key: &str, metadata: &MetadataRecord) -> MediaRefResult<SampleSpec> {
    let from_samples = metadata.samples.iter().find(|spec| spec.is_complete());
    match (from_samples, metadata.root_sample_spec()) {
        (Some(_), Some(_)) => {
            Err(AssetError::new(AssetErrorKind::DuplicateCompleteSample(key.to_string())).into())
        }
        (Some(spec), None) => Ok(spec.clone()),
        (None, Some(spec)) => Ok(spec),
        (None, None) => Ok(SampleSpec::default().with_reference(COMPLETE_SAMPLE)),
    }
}
