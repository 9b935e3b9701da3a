//! Data structures for upstream provider payloads
//!
//! Provider payloads are untrusted and partial: every field is optional and
//! the common aliases observed across providers are accepted on each field.

use serde::{Deserialize, Serialize};

/// Numeric field that providers serialize either as a number or a string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Int(u64),
    Float(f64),
    Text(String),
}

impl LooseNumber {
    /// Render the raw value as a string, suitable for label extraction
    pub fn as_label(&self) -> String {
        match self {
            LooseNumber::Int(value) => value.to_string(),
            LooseNumber::Float(value) => format!("{value}"),
            LooseNumber::Text(value) => value.clone(),
        }
    }

    /// Best-effort non-negative integer view (0 when nothing parses)
    pub fn as_u64(&self) -> u64 {
        match self {
            LooseNumber::Int(value) => *value,
            LooseNumber::Float(value) if *value >= 0.0 => *value as u64,
            LooseNumber::Float(_) => 0,
            LooseNumber::Text(value) => value.trim().parse().unwrap_or(0),
        }
    }
}

/// One raw audio variant as returned by a provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAudioItem {
    pub url: Option<String>,
    #[serde(alias = "audioBitrate", alias = "abr", alias = "audioQuality")]
    pub bitrate: Option<LooseNumber>,
    #[serde(alias = "contentLength")]
    pub size: Option<LooseNumber>,
    #[serde(alias = "type")]
    pub mime_type: Option<String>,
}

/// One raw video variant as returned by a provider
///
/// Renderable entries carry a render execution URL instead of (or alongside)
/// a direct URL; the adapter orders them before progressive entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawVideoItem {
    pub url: Option<String>,
    pub height: Option<LooseNumber>,
    #[serde(alias = "qualityLabel")]
    pub quality: Option<String>,
    #[serde(alias = "size", alias = "contentLength")]
    pub file_size: Option<LooseNumber>,
    pub has_audio: Option<bool>,
    pub audio_channels: Option<u32>,
    #[serde(alias = "type")]
    pub mime_type: Option<String>,
    #[serde(alias = "executionUrl", alias = "mergeUrl")]
    pub render_url: Option<String>,
}

/// Pass-through video metadata, assembled with best-effort field fallback
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub thumbnail: Option<String>,
    pub duration: Option<u64>,
    pub channel: Option<String>,
}

/// Everything one provider call yields for a video: metadata plus the raw
/// variant lists consumed by the normalizer. Lives for one request only.
#[derive(Debug, Clone, Default)]
pub struct StreamCatalog {
    pub metadata: VideoMetadata,
    pub audios: Vec<RawAudioItem>,
    pub videos: Vec<RawVideoItem>,
}
