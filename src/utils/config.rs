//! Service configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::quality::RankPolicy;

/// Runtime settings for the resolver service
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Provider credential; requests fail with a configuration error while absent
    pub api_key: Option<String>,

    /// Provider API host
    pub api_host: String,

    /// Which upstream adapter handles extraction
    pub provider: ProviderKind,

    /// Video ranking policy
    pub rank_policy: RankPolicy,

    /// Maximum vertical resolution offered to clients (None disables the cap)
    pub resolution_ceiling: Option<u32>,

    /// Treat video streams with no audio signal as audio-capable
    pub assume_audio_when_unknown: bool,

    /// Timeout applied to each outbound provider call
    pub request_timeout: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: ProviderKind::MediaDownloader.default_host().to_string(),
            provider: ProviderKind::MediaDownloader,
            rank_policy: RankPolicy::AudioFirst,
            resolution_ceiling: Some(1080),
            assume_audio_when_unknown: true,
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl AppSettings {
    /// Build settings from process environment variables
    ///
    /// Unset or unparseable variables fall back to the defaults above. The
    /// credential is read from TUBEGRAB_API_KEY, with RAPIDAPI_KEY accepted
    /// as an alias.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = env_value("TUBEGRAB_API_KEY").or_else(|| env_value("RAPIDAPI_KEY"));
        let provider = env_value("TUBEGRAB_PROVIDER")
            .and_then(|value| ProviderKind::parse(&value))
            .unwrap_or(defaults.provider);
        let api_host =
            env_value("TUBEGRAB_API_HOST").unwrap_or_else(|| provider.default_host().to_string());
        let rank_policy = env_value("TUBEGRAB_RANK_POLICY")
            .and_then(|value| RankPolicy::parse(&value))
            .unwrap_or(defaults.rank_policy);
        let resolution_ceiling = match env_value("TUBEGRAB_MAX_HEIGHT")
            .and_then(|value| value.parse::<u32>().ok())
        {
            Some(0) => None,
            Some(height) => Some(height),
            None => defaults.resolution_ceiling,
        };
        let assume_audio_when_unknown = env_value("TUBEGRAB_ASSUME_AUDIO")
            .map(|value| !matches!(value.to_ascii_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(defaults.assume_audio_when_unknown);
        let request_timeout = env_value("TUBEGRAB_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Self {
            api_key,
            api_host,
            provider,
            rank_policy,
            resolution_ceiling,
            assume_audio_when_unknown,
            request_timeout,
        }
    }
}

/// Upstream adapter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    MediaDownloader,
    YtStream,
}

impl ProviderKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "media-downloader" | "media_downloader" | "mediadownloader" => {
                Some(Self::MediaDownloader)
            }
            "ytstream" | "yt-stream" | "yt_stream" => Some(Self::YtStream),
            _ => None,
        }
    }

    /// Get string representation for display
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::MediaDownloader => "media-downloader",
            ProviderKind::YtStream => "ytstream",
        }
    }

    pub fn default_host(&self) -> &'static str {
        match self {
            ProviderKind::MediaDownloader => "youtube-media-downloader.p.rapidapi.com",
            ProviderKind::YtStream => "ytstream-download-youtube-videos.p.rapidapi.com",
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppSettings::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.provider, ProviderKind::MediaDownloader);
        assert_eq!(config.rank_policy, RankPolicy::AudioFirst);
        assert_eq!(config.resolution_ceiling, Some(1080));
        assert!(config.assume_audio_when_unknown);
        assert!(config.request_timeout.as_secs() > 0);
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!(
            ProviderKind::parse("media-downloader"),
            Some(ProviderKind::MediaDownloader)
        );
        assert_eq!(ProviderKind::parse(" YtStream "), Some(ProviderKind::YtStream));
        assert_eq!(ProviderKind::parse("unknown"), None);
    }

    #[test]
    fn test_default_host_follows_provider() {
        assert!(ProviderKind::MediaDownloader
            .default_host()
            .starts_with("youtube-media-downloader"));
        assert!(ProviderKind::YtStream.default_host().starts_with("ytstream"));
    }
}
