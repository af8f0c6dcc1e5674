//! Raw metadata records as served by a metadata source.

use crate::{TimeValue, TimeWindow, extension_of};
use mediaref_error::{MediaRefResult, TimeSpecError, TimeSpecErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fade-in applied when a sample does not specify one (seconds).
pub const DEFAULT_FADE_IN_SEC: f64 = 0.3;

/// Fade-out applied when a sample does not specify one (seconds).
pub const DEFAULT_FADE_OUT_SEC: f64 = 1.0;

/// Fragment of the sample covering the whole asset.
pub const COMPLETE_SAMPLE: &str = "complete";

/// Metadata describing one media asset.
///
/// Well-known fields are typed; anything else the source sends is kept in
/// [`extra`](Self::extra). The root-level time fields describe the asset's
/// complete sample.
///
/// # Examples
///
/// ```
/// use mediaref_core::MetadataRecord;
///
/// let record: MetadataRecord = serde_json::from_str(
///     r#"{"ref": "Yesterday", "path": "Lieder/Yesterday.mp3", "cover": "uuid:c0ver", "license": "CC0"}"#,
/// ).unwrap();
///
/// assert_eq!(record.reference.as_deref(), Some("Yesterday"));
/// assert_eq!(record.cover.as_deref(), Some("uuid:c0ver"));
/// assert_eq!(record.extra["license"], "CC0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[serde(default, rename_all = "camelCase")]
#[setters(prefix = "with_", strip_option, into)]
pub struct MetadataRecord {
    /// Human readable identifier (without the `ref:` scheme)
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Unique identifier (without the `uuid:` scheme)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Display title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Performing artist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Composer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composer: Option<String>,
    /// Free-form creation date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    /// Year, as a number or a string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
    /// Path relative to the media server root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// File name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// File extension without the dot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Media URI of a cover image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Number of files a multi-part asset consists of
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_part_count: Option<u32>,
    /// Whether a `_preview.jpg` exists next to the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<bool>,
    /// Whether a `_waveform.png` exists next to the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_waveform: Option<bool>,
    /// Named time slices
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<SampleSpec>,
    /// Start of the complete sample
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<TimeValue>,
    /// Length of the complete sample
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<TimeValue>,
    /// End of the complete sample
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<TimeValue>,
    /// Fade-in of the complete sample
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_in: Option<TimeValue>,
    /// Fade-out of the complete sample
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_out: Option<TimeValue>,
    /// Explicit shortcut of the complete sample
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    /// Fields without a dedicated slot
    #[serde(flatten)]
    #[setters(skip)]
    pub extra: BTreeMap<String, Value>,
}

impl MetadataRecord {
    /// File extension from `extension`, else `filename`, else `path`.
    pub fn file_extension(&self) -> Option<String> {
        self.extension
            .clone()
            .or_else(|| self.filename.as_deref().and_then(extension_of))
            .or_else(|| self.path.as_deref().and_then(extension_of))
    }

    /// Spec of the complete sample gathered from the root-level fields.
    ///
    /// `None` if none of them is present.
    pub fn root_sample_spec(&self) -> Option<SampleSpec> {
        let spec = SampleSpec {
            reference: Some(COMPLETE_SAMPLE.to_string()),
            title: None,
            start_time: self.start_time.clone(),
            duration: self.duration.clone(),
            end_time: self.end_time.clone(),
            fade_in: self.fade_in.clone(),
            fade_out: self.fade_out.clone(),
            shortcut: self.shortcut.clone(),
        };
        spec.has_time_fields().then_some(spec)
    }
}

/// One entry of a record's `samples` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[serde(default, rename_all = "camelCase")]
#[setters(prefix = "with_", strip_option, into)]
pub struct SampleSpec {
    /// Fragment naming the sample
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Display title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Start offset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<TimeValue>,
    /// Length, exclusive with `end_time`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<TimeValue>,
    /// End offset, exclusive with `duration`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<TimeValue>,
    /// Fade-in length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_in: Option<TimeValue>,
    /// Fade-out length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_out: Option<TimeValue>,
    /// Explicit shortcut, e.g. `"a 1"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
}

impl SampleSpec {
    fn has_time_fields(&self) -> bool {
        self.start_time.is_some()
            || self.duration.is_some()
            || self.end_time.is_some()
            || self.fade_in.is_some()
            || self.fade_out.is_some()
            || self.shortcut.is_some()
    }

    /// Whether this spec names the complete sample.
    pub fn is_complete(&self) -> bool {
        self.reference.as_deref() == Some(COMPLETE_SAMPLE)
    }

    /// Normalised time window of this spec.
    ///
    /// # Errors
    ///
    /// See [`TimeWindow::normalize`].
    pub fn time_window(&self) -> MediaRefResult<TimeWindow> {
        TimeWindow::normalize(
            self.start_time.as_ref(),
            self.duration.as_ref(),
            self.end_time.as_ref(),
        )
    }

    /// Fade-in and fade-out in seconds, defaults applied.
    ///
    /// # Errors
    ///
    /// Returns an invalid time value error for unreadable or negative fades.
    pub fn fades(&self) -> MediaRefResult<(f64, f64)> {
        Ok((
            fade_seconds(self.fade_in.as_ref(), DEFAULT_FADE_IN_SEC)?,
            fade_seconds(self.fade_out.as_ref(), DEFAULT_FADE_OUT_SEC)?,
        ))
    }
}

fn fade_seconds(value: Option<&TimeValue>, default: f64) -> MediaRefResult<f64> {
    let Some(value) = value else {
        return Ok(default);
    };
    let seconds = value.to_seconds()?;
    if seconds < 0.0 {
        return Err(TimeSpecError::new(TimeSpecErrorKind::InvalidTimeValue(format!(
            "negative fade {:?}",
            value
        )))
        .into());
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_fallbacks() {
        let record = MetadataRecord::default().with_path("a/b/c.MP3");
        assert_eq!(record.file_extension().as_deref(), Some("MP3"));

        let record = record.with_filename("c.m4a");
        assert_eq!(record.file_extension().as_deref(), Some("m4a"));

        let record = record.with_extension("mp4");
        assert_eq!(record.file_extension().as_deref(), Some("mp4"));

        assert_eq!(MetadataRecord::default().file_extension(), None);
    }

    #[test]
    fn test_root_sample_spec_only_when_present() {
        assert!(MetadataRecord::default().root_sample_spec().is_none());

        let record = MetadataRecord::default().with_start_time(5.0).with_fade_out("0:02");
        let spec = record.root_sample_spec().unwrap();
        assert!(spec.is_complete());
        assert_eq!(spec.start_time, Some(TimeValue::Seconds(5.0)));
        assert_eq!(spec.fades().unwrap(), (DEFAULT_FADE_IN_SEC, 2.0));
    }

    #[test]
    fn test_negative_fade_is_rejected() {
        let spec = SampleSpec::default().with_fade_in(-0.5);
        assert!(spec.fades().is_err());
    }

    #[test]
    fn test_samples_deserialize_with_mixed_time_values() {
        let record: MetadataRecord = serde_json::from_str(
            r#"{
                "uuid": "c262fe9b",
                "year": 1965,
                "samples": [
                    {"ref": "intro", "startTime": 0, "duration": "0:15"},
                    {"title": "Refrain", "startTime": "1:02", "endTime": 80}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(record.samples.len(), 2);
        assert_eq!(record.year, Some(serde_json::json!(1965)));
        let window = record.samples[1].time_window().unwrap();
        assert_eq!(window.start_time_sec, 62.0);
        assert_eq!(window.duration_sec, Some(18.0));
        assert!(record.extra.is_empty());
    }
}
