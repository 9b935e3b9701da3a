//! youtube-media-downloader adapter
//!
//! Calls the provider's `/v2/video/details` endpoint, which returns already
//! merged (progressive) audio and video variants. Authentication is a
//! key/host header pair; the key is never logged.

use serde::Deserialize;
use tracing::{debug, error};

use crate::extractor::models::{LooseNumber, RawAudioItem, RawVideoItem, StreamCatalog, VideoMetadata};
use crate::extractor::traits::StreamProvider;
use crate::utils::config::AppSettings;
use crate::utils::error::TubeGrabError;
use async_trait::async_trait;

pub struct MediaDownloaderProvider {
    client: reqwest::Client,
    api_key: String,
    api_host: String,
}

impl MediaDownloaderProvider {
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
impl StreamProvider for MediaDownloaderProvider {
    fn id(&self) -> &'static str {
        "media-downloader"
    }

    async fn fetch_streams(&self, video_id: &str) -> Result<StreamCatalog, TubeGrabError> {
        let url = format!("https://{}/v2/video/details", self.api_host);
        debug!("Fetching video details for {} from {}", video_id, self.api_host);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("videoId", video_id),
                ("videos", "true"),
                ("audios", "true"),
                ("subtitles", "false"),
                ("related", "false"),
            ])
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.api_host)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            error!("media-downloader returned {}: {}", status, details);
            return Err(TubeGrabError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        let payload: DetailsResponse = response.json().await?;

        // The provider reports content errors inside a 200 body
        if payload.status == Some(false) {
            let reason = payload
                .error_id
                .filter(|id| !id.is_empty() && id.as_str() != "Success")
                .unwrap_or_else(|| "Video not available".to_string());
            return Err(TubeGrabError::Validation(reason));
        }

        let metadata = VideoMetadata {
            title: payload.title.unwrap_or_default(),
            thumbnail: payload
                .thumbnails
                .first()
                .and_then(|thumb| thumb.url.clone())
                .or_else(|| payload.thumbnail.and_then(|thumb| thumb.url)),
            duration: payload.length_seconds.map(|value| value.as_u64()),
            channel: payload.channel.and_then(|channel| channel.name),
        };

        Ok(StreamCatalog {
            metadata,
            audios: payload.audios.items,
            videos: payload.videos.items,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DetailsResponse {
    status: Option<bool>,
    error_id: Option<String>,
    title: Option<String>,
    length_seconds: Option<LooseNumber>,
    channel: Option<ChannelInfo>,
    thumbnails: Vec<Thumbnail>,
    thumbnail: Option<Thumbnail>,
    audios: ItemList<RawAudioItem>,
    videos: ItemList<RawVideoItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ItemList<T: Default> {
    items: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChannelInfo {
    name: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
struct Thumbnail {
    url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn details_payload_maps_into_the_catalog_shapes() {
        let payload: DetailsResponse = serde_json::from_value(json!({
            "status": true,
            "errorId": "Success",
            "title": "Never Gonna Give You Up",
            "lengthSeconds": "213",
            "channel": { "name": "Rick Astley" },
            "thumbnails": [{ "url": "https://i.ytimg.com/vi/x/hq.jpg" }],
            "audios": { "items": [{ "url": "https://cdn.example/a", "bitrate": 128 }] },
            "videos": { "items": [{ "url": "https://cdn.example/v", "height": 720 }] }
        }))
        .unwrap();

        assert_eq!(payload.title.as_deref(), Some("Never Gonna Give You Up"));
        assert_eq!(payload.length_seconds.unwrap().as_u64(), 213);
        assert_eq!(payload.audios.items.len(), 1);
        assert_eq!(payload.videos.items.len(), 1);
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let payload: DetailsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(payload.title.is_none());
        assert!(payload.audios.items.is_empty());
        assert!(payload.thumbnails.is_empty());
    }

    #[test]
    fn missing_credential_is_a_configuration_error() {
        let settings = AppSettings::default();
        let provider = MediaDownloaderProvider::new(&settings);
        assert!(matches!(
            provider,
            Err(TubeGrabError::Configuration(_))
        ));
    }
}
