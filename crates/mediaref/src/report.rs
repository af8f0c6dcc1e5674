//! Plain-text and JSON renderings of resolved objects.

use mediaref_resolver::{Asset, Sample};
use serde_json::{Value, json};
use std::sync::Arc;

/// `key mime shortcut url`, with `-` for a missing shortcut.
pub fn asset_line(asset: &Asset) -> String {
    format!(
        "{} {} {} {}",
        asset.reference().canonical_key(),
        asset.mime_class(),
        asset.shortcut().unwrap_or("-"),
        asset.http_url()
    )
}

/// `uri start end shortcut title`, with `-` for unknown values.
pub fn sample_line(sample: &Sample) -> String {
    let end = sample
        .end_time_sec()
        .map(|end| format!("{:.2}", end))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} {:.2} {} {} {}",
        sample.uri(),
        sample.start_time_sec(),
        end,
        sample.shortcut().unwrap_or_else(|| "-".to_string()),
        sample.title_safe()
    )
}

/// JSON array describing `assets` and their samples.
pub fn assets_json(assets: &[Arc<Asset>]) -> Value {
    Value::Array(
        assets
            .iter()
            .map(|asset| {
                let samples: Vec<Value> = asset
                    .samples()
                    .iter()
                    .map(|sample| {
                        json!({
                            "uri": sample.uri(),
                            "title": sample.title(),
                            "startTimeSec": sample.start_time_sec(),
                            "durationSec": sample.duration_sec(),
                            "fadeInSec": sample.fade_in_sec(),
                            "fadeOutSec": sample.fade_out_sec(),
                            "shortcut": sample.shortcut(),
                        })
                    })
                    .collect();
                json!({
                    "key": asset.reference().canonical_key(),
                    "mime": asset.mime_class().as_str(),
                    "title": asset.title_safe(),
                    "shortcut": asset.shortcut(),
                    "httpUrl": asset.http_url(),
                    "previewUrl": asset.preview_url(),
                    "waveformUrl": asset.waveform_url(),
                    "samples": samples,
                })
            })
            .collect(),
    )
}
