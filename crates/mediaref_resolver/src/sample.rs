//! Time-sliced samples of an asset.

use crate::Asset;
use mediaref_core::{COMPLETE_SAMPLE, SampleSpec, TimeWindow};
use mediaref_error::MediaRefResult;
use serde_json::Value;
use std::sync::{Arc, OnceLock, Weak};

/// Title of the complete sample when its spec has none.
const COMPLETE_TITLE: &str = "komplett";

/// Validated sample spec, waiting for its asset.
#[derive(Debug, Clone)]
pub(crate) struct SampleDraft {
    reference: String,
    title: String,
    window: TimeWindow,
    fade_in_sec: f64,
    fade_out_sec: f64,
    shortcut: Option<String>,
}

impl SampleDraft {
    /// Normalise `spec` under the given ref and title.
    pub(crate) fn from_spec(spec: &SampleSpec, reference: String, title: String) -> MediaRefResult<Self> {
        let window = spec.time_window()?;
        let (fade_in_sec, fade_out_sec) = spec.fades()?;
        Ok(Self {
            reference,
            title,
            window,
            fade_in_sec,
            fade_out_sec,
            shortcut: spec.shortcut.clone(),
        })
    }

    /// Draft of the complete sample.
    pub(crate) fn complete(spec: &SampleSpec) -> MediaRefResult<Self> {
        let title = spec.title.clone().unwrap_or_else(|| COMPLETE_TITLE.to_string());
        Self::from_spec(spec, COMPLETE_SAMPLE.to_string(), title)
    }

    pub(crate) fn into_sample(self, asset: Weak<Asset>, asset_key: &str) -> Sample {
        let shortcut = OnceLock::new();
        if let Some(explicit) = self.shortcut {
            let _ = shortcut.set(explicit);
        }
        Sample {
            asset,
            uri: format!("{}#{}", asset_key, self.reference),
            reference: self.reference,
            title: self.title,
            window: self.window,
            fade_in_sec: self.fade_in_sec,
            fade_out_sec: self.fade_out_sec,
            shortcut,
        }
    }
}

/// A playable slice of an asset.
///
/// Holds only a weak link to its asset; the resolver session or the caller
/// keeps the asset alive.
#[derive(Debug)]
pub struct Sample {
    asset: Weak<Asset>,
    uri: String,
    reference: String,
    title: String,
    window: TimeWindow,
    fade_in_sec: f64,
    fade_out_sec: f64,
    shortcut: OnceLock<String>,
}

impl Sample {
    /// Parent asset, if still alive.
    pub fn asset(&self) -> Option<Arc<Asset>> {
        self.asset.upgrade()
    }

    /// Fragment naming this sample, e.g. `complete`.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// `{asset canonical key}#{ref}`.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Whether this is the sample spanning the whole asset.
    pub fn is_complete(&self) -> bool {
        self.reference == COMPLETE_SAMPLE
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Normalised time window.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Start offset in seconds.
    pub fn start_time_sec(&self) -> f64 {
        self.window.start_time_sec
    }

    /// Length in seconds, if bounded.
    pub fn duration_sec(&self) -> Option<f64> {
        self.window.duration_sec
    }

    /// End offset in seconds, if bounded.
    pub fn end_time_sec(&self) -> Option<f64> {
        self.window.end_time_sec()
    }

    /// Fade-in length in seconds.
    pub fn fade_in_sec(&self) -> f64 {
        self.fade_in_sec
    }

    /// Fade-out length in seconds.
    pub fn fade_out_sec(&self) -> f64 {
        self.fade_out_sec
    }

    /// Keyboard shortcut.
    ///
    /// The complete sample falls back to its asset's shortcut.
    pub fn shortcut(&self) -> Option<String> {
        if let Some(shortcut) = self.shortcut.get() {
            return Some(shortcut.clone());
        }
        if self.is_complete() {
            return self.asset().and_then(|asset| asset.shortcut().map(str::to_string));
        }
        None
    }

    /// Set the shortcut unless one is already present.
    pub fn assign_shortcut(&self, shortcut: impl Into<String>) -> bool {
        self.shortcut.set(shortcut.into()).is_ok()
    }

    /// Title for display: the asset title for the complete sample, else
    /// `"{title} ({asset title})"`.
    pub fn title_safe(&self) -> String {
        match self.asset() {
            Some(asset) if self.is_complete() => asset.title_safe().to_string(),
            Some(asset) => format!("{} ({})", self.title, asset.title_safe()),
            None => self.title.clone(),
        }
    }

    /// Composer and artist as `"composer (artist)"`, or whichever is known.
    pub fn artist_safe(&self) -> Option<String> {
        let asset = self.asset()?;
        let metadata = asset.metadata();
        match (&metadata.composer, &metadata.artist) {
            (Some(composer), Some(artist)) => Some(format!("{} ({})", composer, artist)),
            (Some(composer), None) => Some(composer.clone()),
            (None, Some(artist)) => Some(artist.clone()),
            (None, None) => None,
        }
    }

    /// Creation date, else year.
    pub fn year_safe(&self) -> Option<String> {
        let asset = self.asset()?;
        let metadata = asset.metadata();
        if let Some(date) = &metadata.creation_date {
            return Some(date.clone());
        }
        match metadata.year.as_ref()? {
            Value::String(year) => Some(year.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
