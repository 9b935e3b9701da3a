//! Label deduplication with audio preference

use crate::quality::normalize::QualityOption;

/// Collapse a list to one entry per label
///
/// On a label collision the audio-capable entry wins over the non-audio one;
/// otherwise the first encountered stays (the caller enumerates
/// renderable-source entries before progressive-source entries). A discarded
/// duplicate's direct URL is retained as `fallback_url` when the kept entry
/// is still awaiting render resolution.
pub fn dedupe_by_label(options: Vec<QualityOption>) -> Vec<QualityOption> {
    let mut deduped: Vec<QualityOption> = Vec::with_capacity(options.len());

    for candidate in options {
        match deduped.iter().position(|kept| kept.label == candidate.label) {
            None => deduped.push(candidate),
            Some(index) => {
                let kept = &mut deduped[index];
                if candidate.has_audio && !kept.has_audio {
                    let displaced = std::mem::replace(kept, candidate);
                    if kept.url.is_empty()
                        && kept.fallback_url.is_none()
                        && !displaced.url.is_empty()
                    {
                        kept.fallback_url = Some(displaced.url);
                    }
                } else if kept.url.is_empty()
                    && kept.fallback_url.is_none()
                    && !candidate.url.is_empty()
                {
                    kept.fallback_url = Some(candidate.url);
                }
            }
        }
    }

    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(label: &str, url: &str, has_audio: bool) -> QualityOption {
        QualityOption {
            url: url.to_string(),
            label: label.to_string(),
            rank_value: 0,
            has_audio,
            file_size_label: None,
            render_url: None,
            fallback_url: None,
        }
    }

    #[test]
    fn labels_are_unique_after_dedup() {
        let deduped = dedupe_by_label(vec![
            option("720p", "a", true),
            option("1080p", "b", true),
            option("720p", "c", true),
        ]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].label, "720p");
        assert_eq!(deduped[1].label, "1080p");
    }

    #[test]
    fn audio_capable_entry_wins_the_collision() {
        let deduped = dedupe_by_label(vec![
            option("1080p", "muted", false),
            option("1080p", "sound", true),
        ]);
        assert_eq!(deduped.len(), 1);
        assert!(deduped[0].has_audio);
        assert_eq!(deduped[0].url, "sound");
    }

    #[test]
    fn audio_is_never_displaced_by_video_only() {
        let deduped = dedupe_by_label(vec![
            option("1080p", "sound", true),
            option("1080p", "muted", false),
        ]);
        assert_eq!(deduped[0].url, "sound");
        assert!(deduped[0].has_audio);
    }

    #[test]
    fn first_encountered_wins_when_audio_ties() {
        let deduped = dedupe_by_label(vec![
            option("720p", "first", true),
            option("720p", "second", true),
        ]);
        assert_eq!(deduped[0].url, "first");
    }

    #[test]
    fn renderable_keeps_a_progressive_fallback() {
        let mut renderable = option("1080p", "", true);
        renderable.render_url = Some("https://render.example/abc".to_string());

        let deduped = dedupe_by_label(vec![renderable, option("1080p", "progressive", true)]);
        assert_eq!(deduped.len(), 1);
        assert!(deduped[0].url.is_empty());
        assert_eq!(deduped[0].fallback_url.as_deref(), Some("progressive"));
    }
}
