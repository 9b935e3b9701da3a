//! ytstream-style adapter
//!
//! This provider family exposes the raw player response: progressive
//! `formats` (audio and video muxed), plus `adaptiveFormats` split into
//! audio-only and video-only variants. High-resolution merged downloads are
//! offered as renderable descriptors whose execution URL must be fetched
//! separately to obtain the muxed stream.

use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::extractor::models::{LooseNumber, RawAudioItem, RawVideoItem, StreamCatalog, VideoMetadata};
use crate::extractor::traits::StreamProvider;
use crate::utils::config::AppSettings;
use crate::utils::error::TubeGrabError;
use async_trait::async_trait;

pub struct YtStreamProvider {
    client: reqwest::Client,
    api_key: String,
    api_host: String,
}

impl YtStreamProvider {
    /// Initialize the adapter; fails when the credential is absent
    pub fn new(settings: &AppSettings) -> Result<Self, TubeGrabError> {
        let api_key = settings
            .api_key
            .clone()
            .ok_or_else(|| TubeGrabError::Configuration("API key not configured".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            client,
            api_key,
            api_host: settings.api_host.clone(),
        })
    }
}

#[async_trait]
impl StreamProvider for YtStreamProvider {
    fn id(&self) -> &'static str {
        "ytstream"
    }

    async fn fetch_streams(&self, video_id: &str) -> Result<StreamCatalog, TubeGrabError> {
        let url = format!("https://{}/dl", self.api_host);
        debug!("Fetching stream listing for {} from {}", video_id, self.api_host);

        let response = self
            .client
            .get(&url)
            .query(&[("id", video_id)])
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.api_host)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            error!("ytstream returned {}: {}", status, details);
            return Err(TubeGrabError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        let payload: StreamResponse = response.json().await?;

        if payload
            .status
            .as_deref()
            .is_some_and(|value| !value.eq_ignore_ascii_case("ok"))
        {
            let reason = payload
                .reason
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| "Video not available".to_string());
            return Err(TubeGrabError::Validation(reason));
        }

        let metadata = VideoMetadata {
            title: payload.title.unwrap_or_default(),
            thumbnail: payload.thumbnail.first().and_then(|thumb| thumb.url.clone()),
            duration: payload.length_seconds.map(|value| value.as_u64()),
            channel: payload.channel_title,
        };

        let mut audios = Vec::new();
        let mut renderable = Vec::new();
        let mut progressive = Vec::new();
        let mut adaptive = Vec::new();

        // Progressive formats always carry an audio track
        for item in payload.formats {
            progressive.push(RawVideoItem {
                has_audio: Some(true),
                ..item
            });
        }

        for value in payload.adaptive_formats {
            let mime = value
                .get("mimeType")
                .and_then(|mime| mime.as_str())
                .unwrap_or_default()
                .to_string();

            if mime.starts_with("audio") {
                match serde_json::from_value::<RawAudioItem>(value) {
                    Ok(item) => audios.push(scale_bitrate_to_kbps(item)),
                    Err(err) => warn!("Skipping malformed adaptive audio entry: {}", err),
                }
                continue;
            }

            match serde_json::from_value::<RawVideoItem>(value) {
                Ok(item) if item.render_url.is_some() => renderable.push(item),
                Ok(mut item) => {
                    // Split video streams are audio-less unless the codec list
                    // says otherwise
                    if item.has_audio.is_none() {
                        item.has_audio = Some(mime.contains("mp4a"));
                    }
                    adaptive.push(item);
                }
                Err(err) => warn!("Skipping malformed adaptive video entry: {}", err),
            }
        }

        let mut videos = renderable;
        videos.extend(progressive);
        videos.extend(adaptive);

        Ok(StreamCatalog {
            metadata,
            audios,
            videos,
        })
    }

    async fn resolve_renderable(&self, execution_url: &str) -> Result<String, TubeGrabError> {
        debug!("Resolving renderable stream");

        let response = self
            .client
            .get(execution_url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.api_host)
            .send()
            .await
            .map_err(|err| TubeGrabError::ResolutionFailed(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TubeGrabError::ResolutionFailed(format!(
                "Render call failed with status {status}"
            )));
        }

        let payload: RenderResponse = response
            .json()
            .await
            .map_err(|err| TubeGrabError::ResolutionFailed(err.to_string()))?;

        payload
            .into_url()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                TubeGrabError::ResolutionFailed("Render response carried no download URL".to_string())
            })
    }
}

/// Adaptive audio bitrates arrive in bits per second; canonical ranks are kbps
fn scale_bitrate_to_kbps(mut item: RawAudioItem) -> RawAudioItem {
    item.bitrate = match item.bitrate {
        Some(LooseNumber::Int(bps)) if bps >= 10_000 => Some(LooseNumber::Int(bps / 1000)),
        Some(LooseNumber::Float(bps)) if bps >= 10_000.0 => {
            Some(LooseNumber::Int((bps / 1000.0) as u64))
        }
        other => other,
    };
    item
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StreamResponse {
    status: Option<String>,
    reason: Option<String>,
    title: Option<String>,
    length_seconds: Option<LooseNumber>,
    channel_title: Option<String>,
    thumbnail: Vec<Thumbnail>,
    formats: Vec<RawVideoItem>,
    adaptive_formats: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
struct Thumbnail {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RenderResponse {
    url: Option<String>,
    download_url: Option<String>,
    link: Option<String>,
}

impl RenderResponse {
    fn into_url(self) -> Option<String> {
        self.url.or(self.download_url).or(self.link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bitrates_scale_from_bps_to_kbps() {
        let scaled = scale_bitrate_to_kbps(RawAudioItem {
            bitrate: Some(LooseNumber::Int(129_478)),
            ..Default::default()
        });
        assert_eq!(scaled.bitrate.unwrap().as_u64(), 129);

        // already-kbps values pass through
        let untouched = scale_bitrate_to_kbps(RawAudioItem {
            bitrate: Some(LooseNumber::Int(128)),
            ..Default::default()
        });
        assert_eq!(untouched.bitrate.unwrap().as_u64(), 128);
    }

    #[test]
    fn render_response_accepts_url_aliases() {
        let payload: RenderResponse =
            serde_json::from_value(json!({"downloadUrl": "https://cdn.example/m"})).unwrap();
        assert_eq!(payload.into_url().as_deref(), Some("https://cdn.example/m"));

        let empty: RenderResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.into_url().is_none());
    }

    #[test]
    fn stream_payload_parses_player_shapes() {
        let payload: StreamResponse = serde_json::from_value(json!({
            "status": "OK",
            "title": "t",
            "lengthSeconds": 213,
            "channelTitle": "c",
            "thumbnail": [{ "url": "https://i.ytimg.com/vi/x/hq.jpg" }],
            "formats": [{ "url": "https://cdn.example/p", "qualityLabel": "360p" }],
            "adaptiveFormats": [
                { "url": "https://cdn.example/v", "qualityLabel": "1080p", "mimeType": "video/mp4; codecs=\"avc1.640028\"" },
                { "url": "https://cdn.example/a", "bitrate": 129478, "mimeType": "audio/webm; codecs=\"opus\"" }
            ]
        }))
        .unwrap();

        assert_eq!(payload.formats.len(), 1);
        assert_eq!(payload.adaptive_formats.len(), 2);
    }
}
