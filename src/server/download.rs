//! Download resolution pipeline
//!
//! One request flows fetch -> normalize -> dedup -> rank -> select ->
//! optional render resolution -> response. Nothing outlives the request.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::extractor::models::{RawVideoItem, VideoMetadata};
use crate::extractor::traits::StreamProvider;
use crate::quality::{
    dedupe_by_label, normalize_audio, normalize_video, rank_audio, rank_video, select,
    video_only_warning, QualityOption,
};
use crate::utils::config::AppSettings;
use crate::utils::error::TubeGrabError;

/// Requested output container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Mp3,
    Mp4,
    Av1,
}

impl MediaFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "mp4" => Some(Self::Mp4),
            "av1" => Some(Self::Av1),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFormat::Mp3 => "mp3",
            MediaFormat::Mp4 => "mp4",
            MediaFormat::Av1 => "av1",
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, MediaFormat::Mp3)
    }
}

/// Inbound request body for POST /download
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DownloadRequest {
    pub video_id: Option<String>,
    pub format: Option<String>,
    pub selected_quality: Option<String>,
}

/// Outbound response body for a resolved download
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub success: bool,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub download_url: String,
    pub quality: String,
    pub file_size: String,
    pub format: String,
    pub available_qualities: Vec<QualityOption>,
    pub has_video_only_warning: bool,
}

/// Run the full resolution pipeline for one request
pub async fn resolve_download(
    provider: &dyn StreamProvider,
    settings: &AppSettings,
    request: DownloadRequest,
) -> Result<DownloadResponse, TubeGrabError> {
    let video_id = request
        .video_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| TubeGrabError::Validation("Video ID is required".to_string()))?
        .to_string();

    let format = request
        .format
        .as_deref()
        .and_then(MediaFormat::parse)
        .ok_or_else(|| {
            TubeGrabError::NotFound("No download URL found for the requested format".to_string())
        })?;

    info!("Fetching video info for: {}, format: {}", video_id, format.as_str());
    let catalog = provider.fetch_streams(&video_id).await?;

    let mut options: Vec<QualityOption> = if format.is_audio() {
        catalog.audios.iter().filter_map(normalize_audio).collect()
    } else {
        let wanted: Vec<&RawVideoItem> = if format == MediaFormat::Av1 {
            catalog.videos.iter().filter(|item| is_av1(item)).collect()
        } else {
            catalog.videos.iter().collect()
        };
        wanted
            .into_iter()
            .filter_map(|item| normalize_video(item, settings.assume_audio_when_unknown))
            .collect()
    };

    options = dedupe_by_label(options);
    if format.is_audio() {
        rank_audio(&mut options);
    } else {
        rank_video(&mut options, settings.rank_policy, settings.resolution_ceiling);
    }
    debug!("Canonical list for {}: {} entries", format.as_str(), options.len());

    let warning = video_only_warning(&options);
    let chosen = select(&options, request.selected_quality.as_deref())?.clone();

    let mut download_url = chosen.url.clone();
    if download_url.is_empty() {
        if let Some(execution_url) = chosen.render_url.as_deref() {
            match provider.resolve_renderable(execution_url).await {
                Ok(resolved) => download_url = resolved,
                Err(err) => {
                    warn!("Render resolution failed for {}: {}", chosen.label, err);
                    if let Some(fallback) = chosen.fallback_url.clone() {
                        info!("Using progressive {} stream instead", chosen.label);
                        download_url = fallback;
                    }
                }
            }
        } else if let Some(fallback) = chosen.fallback_url.clone() {
            download_url = fallback;
        }
    }

    if download_url.is_empty() {
        if options.len() > 1 {
            // Other qualities stay selectable; fail only this selection
            return Ok(assemble_response(
                &catalog.metadata,
                String::new(),
                &chosen,
                format,
                options,
                warning,
            ));
        }
        return Err(TubeGrabError::ResolutionFailed(
            "No download URL could be resolved for the selected quality".to_string(),
        ));
    }

    Ok(assemble_response(
        &catalog.metadata,
        download_url,
        &chosen,
        format,
        options,
        warning,
    ))
}

fn is_av1(item: &RawVideoItem) -> bool {
    item.mime_type
        .as_deref()
        .is_some_and(|mime| mime.contains("av01"))
}

fn assemble_response(
    metadata: &VideoMetadata,
    download_url: String,
    chosen: &QualityOption,
    format: MediaFormat,
    options: Vec<QualityOption>,
    warning: bool,
) -> DownloadResponse {
    DownloadResponse {
        success: true,
        title: metadata.title.clone(),
        thumbnail: metadata.thumbnail.clone(),
        duration: metadata.duration,
        channel: metadata.channel.clone(),
        download_url,
        quality: chosen.label.clone(),
        file_size: chosen.file_size_label.clone().unwrap_or_default(),
        format: format.as_str().to_string(),
        available_qualities: options,
        has_video_only_warning: warning,
    }
}
