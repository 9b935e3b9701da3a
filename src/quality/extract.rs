//! Numeric extraction from loosely-formatted quality strings
//!
//! Upstream fields mix plain numbers, unit suffixes and vague labels, so a
//! layered match is the only common denominator. Zero means "unknown" and
//! always sorts last.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LITERAL_MARKER: Regex = Regex::new(r"(?i)\b([248])k\b").unwrap();
    static ref LONG_DIGIT_RUN: Regex = Regex::new(r"\d{3,4}").unwrap();
    static ref SHORT_DIGIT_RUN: Regex = Regex::new(r"\d{2}").unwrap();
}

/// Extract a rank value (bitrate in kbps or vertical resolution in pixels)
/// from an arbitrary quality string. First match wins:
/// literal 8k/4k/2k markers, then a 3-4 digit run, then a 2 digit run.
pub fn extract_rank_value(raw: &str) -> u32 {
    if let Some(caps) = LITERAL_MARKER.captures(raw) {
        return match &caps[1] {
            "8" => 4320,
            "4" => 2160,
            _ => 1440,
        };
    }

    if let Some(found) = LONG_DIGIT_RUN.find(raw) {
        return found.as_str().parse().unwrap_or(0);
    }

    if let Some(found) = SHORT_DIGIT_RUN.find(raw) {
        return found.as_str().parse().unwrap_or(0);
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_markers_win_over_digits() {
        assert_eq!(extract_rank_value("4K HDR"), 2160);
        assert_eq!(extract_rank_value("8k"), 4320);
        assert_eq!(extract_rank_value("2K UltraWide"), 1440);
    }

    #[test]
    fn long_digit_runs() {
        assert_eq!(extract_rank_value("1080p60"), 1080);
        assert_eq!(extract_rank_value("320kbps"), 320);
        assert_eq!(extract_rank_value("2160"), 2160);
    }

    #[test]
    fn short_digit_runs() {
        assert_eq!(extract_rank_value("96"), 96);
        assert_eq!(extract_rank_value("96kbps"), 96);
    }

    #[test]
    fn unknown_strings_rank_zero() {
        assert_eq!(extract_rank_value("abr"), 0);
        assert_eq!(extract_rank_value("high"), 0);
        assert_eq!(extract_rank_value(""), 0);
        assert_eq!(extract_rank_value("x9"), 0);
    }

    #[test]
    fn markers_need_word_boundaries() {
        // "120k" must not read as a 2k marker
        assert_eq!(extract_rank_value("120k"), 120);
    }
}
