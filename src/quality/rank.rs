//! Ranking policies for canonical quality lists

use serde::{Deserialize, Serialize};

use crate::quality::normalize::QualityOption;

/// Resolution gap within which an audio-capable entry outranks the sharpest
/// video-only one under `QualityFirst` (one step on the accepted quality
/// ladder 144/240/360/480/720/1080/1440/2160/4320 at the high end).
const AUDIO_PREFERENCE_GAP: u32 = 360;

/// Video ranking policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankPolicy {
    /// Audio-present entries first, each partition resolution-descending
    AudioFirst,
    /// Highest resolution wins unless an audio-present entry is close enough
    QualityFirst,
}

impl RankPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "audio-first" | "audio_first" | "audiofirst" => Some(Self::AudioFirst),
            "quality-first" | "quality_first" | "qualityfirst" => Some(Self::QualityFirst),
            _ => None,
        }
    }

    /// Get string representation for display
    pub fn as_str(&self) -> &'static str {
        match self {
            RankPolicy::AudioFirst => "audio-first",
            RankPolicy::QualityFirst => "quality-first",
        }
    }
}

/// Sort audio options by bitrate descending; ties keep upstream order
pub fn rank_audio(options: &mut [QualityOption]) {
    options.sort_by(|a, b| b.rank_value.cmp(&a.rank_value));
}

/// Sort video options under the given policy, after applying the resolution
/// ceiling (a named setting, not a silent drop — `None` disables it).
pub fn rank_video(options: &mut Vec<QualityOption>, policy: RankPolicy, ceiling: Option<u32>) {
    if let Some(max_height) = ceiling {
        options.retain(|option| option.rank_value <= max_height);
    }

    match policy {
        RankPolicy::AudioFirst => {
            options.sort_by(|a, b| {
                b.has_audio
                    .cmp(&a.has_audio)
                    .then(b.rank_value.cmp(&a.rank_value))
            });
        }
        RankPolicy::QualityFirst => {
            options.sort_by(|a, b| b.rank_value.cmp(&a.rank_value));

            let Some(top) = options.first() else { return };
            if top.has_audio {
                return;
            }
            let top_rank = top.rank_value;
            let promoted = options
                .iter()
                .position(|option| option.has_audio && top_rank - option.rank_value <= AUDIO_PREFERENCE_GAP);
            if let Some(index) = promoted {
                let option = options.remove(index);
                options.insert(0, option);
            }
        }
    }
}

/// True when the final selectable list still contains a video-only entry
pub fn video_only_warning(options: &[QualityOption]) -> bool {
    options.iter().any(|option| !option.has_audio)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(label: &str, rank: u32, has_audio: bool) -> QualityOption {
        QualityOption {
            url: format!("https://cdn.example/{label}"),
            label: label.to_string(),
            rank_value: rank,
            has_audio,
            file_size_label: None,
            render_url: None,
            fallback_url: None,
        }
    }

    fn labels(options: &[QualityOption]) -> Vec<&str> {
        options.iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn audio_sorts_by_bitrate_descending() {
        let mut options = vec![
            option("128kbps", 128, true),
            option("256kbps", 256, true),
            option("64kbps", 64, true),
        ];
        rank_audio(&mut options);
        assert_eq!(labels(&options), vec!["256kbps", "128kbps", "64kbps"]);
    }

    #[test]
    fn audio_ties_keep_upstream_order() {
        let mut options = vec![
            option("first", 128, true),
            option("second", 128, true),
            option("third", 256, true),
        ];
        rank_audio(&mut options);
        assert_eq!(labels(&options), vec!["third", "first", "second"]);
    }

    #[test]
    fn audio_first_partitions_before_sorting() {
        let mut options = vec![
            option("1080p", 1080, false),
            option("720p", 720, true),
            option("480p", 480, true),
            option("1440p", 1440, false),
        ];
        rank_video(&mut options, RankPolicy::AudioFirst, None);
        assert_eq!(labels(&options), vec!["720p", "480p", "1440p", "1080p"]);
    }

    #[test]
    fn quality_first_promotes_audio_within_the_gap() {
        let mut options = vec![
            option("1080p", 1080, false),
            option("720p", 720, true),
        ];
        rank_video(&mut options, RankPolicy::QualityFirst, None);
        assert_eq!(labels(&options), vec!["720p", "1080p"]);
    }

    #[test]
    fn quality_first_keeps_the_top_when_the_gap_is_too_wide() {
        let mut options = vec![
            option("2160p", 2160, false),
            option("720p", 720, true),
        ];
        rank_video(&mut options, RankPolicy::QualityFirst, None);
        assert_eq!(labels(&options), vec!["2160p", "720p"]);
    }

    #[test]
    fn quality_first_leaves_audio_tops_alone() {
        let mut options = vec![
            option("1080p", 1080, true),
            option("720p", 720, true),
        ];
        rank_video(&mut options, RankPolicy::QualityFirst, None);
        assert_eq!(labels(&options), vec!["1080p", "720p"]);
    }

    #[test]
    fn ceiling_filters_premium_resolutions() {
        let mut options = vec![
            option("2160p", 2160, true),
            option("1080p", 1080, true),
            option("720p", 720, true),
        ];
        rank_video(&mut options, RankPolicy::AudioFirst, Some(1080));
        assert_eq!(labels(&options), vec!["1080p", "720p"]);
    }

    #[test]
    fn unknown_ranks_survive_the_ceiling_and_sort_last() {
        let mut options = vec![option("HD", 0, true), option("720p", 720, true)];
        rank_video(&mut options, RankPolicy::AudioFirst, Some(1080));
        assert_eq!(labels(&options), vec!["720p", "HD"]);
    }

    #[test]
    fn warning_fires_on_any_video_only_entry() {
        let silent = vec![option("1080p", 1080, false), option("720p", 720, true)];
        assert!(video_only_warning(&silent));

        let audible = vec![option("720p", 720, true)];
        assert!(!video_only_warning(&audible));
    }
}
