//! Canonical quality options and raw-item normalization

use serde::{Deserialize, Serialize};

use crate::extractor::models::{RawAudioItem, RawVideoItem};
use crate::quality::extract::extract_rank_value;

/// Bitrate assumed when an audio variant carries no resolvable bitrate
pub const DEFAULT_AUDIO_BITRATE: u32 = 128;

/// One selectable quality variant
///
/// `label` is the dedup and selection key. `url` may be empty only while a
/// renderable variant awaits its secondary resolution step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityOption {
    pub url: String,
    pub label: String,
    pub rank_value: u32,
    pub has_audio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_label: Option<String>,
    /// Execution URL for renderable variants, consumed on selection
    #[serde(skip)]
    pub render_url: Option<String>,
    /// Progressive URL with the same label, kept as a render fallback
    #[serde(skip)]
    pub fallback_url: Option<String>,
}

/// Convert a raw audio item into a canonical option
///
/// Items without a URL are dropped; a bitrate that does not resolve defaults
/// to 128 kbps.
pub fn normalize_audio(item: &RawAudioItem) -> Option<QualityOption> {
    let url = item.url.clone().filter(|u| !u.is_empty())?;

    let bitrate = item
        .bitrate
        .as_ref()
        .map(|value| extract_rank_value(&value.as_label()))
        .filter(|rank| *rank > 0)
        .unwrap_or(DEFAULT_AUDIO_BITRATE);

    Some(QualityOption {
        url,
        label: format!("{bitrate}kbps"),
        rank_value: bitrate,
        has_audio: true,
        file_size_label: item.size.as_ref().map(|size| size.as_label()),
        render_url: None,
        fallback_url: None,
    })
}

/// Convert a raw video item into a canonical option
///
/// Items with neither a direct URL nor a render URL are dropped. Audio
/// availability is computed from explicit upstream signals when present;
/// `assume_audio` decides the ambiguous case and renderable entries are
/// always audio-capable.
pub fn normalize_video(item: &RawVideoItem, assume_audio: bool) -> Option<QualityOption> {
    let url = item.url.clone().filter(|u| !u.is_empty()).unwrap_or_default();
    if url.is_empty() && item.render_url.is_none() {
        return None;
    }

    let height = item
        .height
        .as_ref()
        .map(|value| value.as_u64() as u32)
        .unwrap_or(0);
    let rank = if height > 0 {
        height
    } else {
        item.quality
            .as_deref()
            .map(extract_rank_value)
            .unwrap_or(0)
    };
    let label = if rank > 0 {
        format!("{rank}p")
    } else {
        // no numeric height anywhere; surface the provider's own wording
        item.quality.clone().filter(|q| !q.is_empty())?
    };

    let has_audio = if item.render_url.is_some() {
        true
    } else if let Some(flag) = item.has_audio {
        flag
    } else if let Some(channels) = item.audio_channels {
        channels > 0
    } else if item
        .mime_type
        .as_deref()
        .is_some_and(|mime| mime.contains("mp4a"))
    {
        true
    } else {
        assume_audio
    };

    Some(QualityOption {
        url,
        label,
        rank_value: rank,
        has_audio,
        file_size_label: item.file_size.as_ref().map(|size| size.as_label()),
        render_url: item.render_url.clone(),
        fallback_url: None,
    })
}
