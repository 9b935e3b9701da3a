//! Quality selection over a ranked canonical list

use crate::quality::normalize::QualityOption;
use crate::utils::error::TubeGrabError;

/// Resolve the requested quality against a ranked list
///
/// An explicit label must match exactly; the caller never gets a near-match
/// substitute. Without a label the top-ranked entry wins.
pub fn select<'a>(
    options: &'a [QualityOption],
    requested_label: Option<&str>,
) -> Result<&'a QualityOption, TubeGrabError> {
    match requested_label {
        Some(label) => options
            .iter()
            .find(|option| option.label == label)
            .ok_or_else(|| {
                TubeGrabError::NotFound(format!("Quality {label} is not available for this video"))
            }),
        None => options.first().ok_or_else(|| {
            TubeGrabError::NotFound("No download URL found for the requested format".to_string())
        }),
    }
}
