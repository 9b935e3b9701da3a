use crate::extractor::models::StreamCatalog;
use crate::utils::error::TubeGrabError;
use async_trait::async_trait;

/// Core trait for upstream media-extraction providers
///
/// This trait isolates the service from the specific provider (payload shape,
/// authentication, renderable-stream semantics). Adapters are selected by
/// configuration, one per request.
#[async_trait]
pub trait StreamProvider: Send + Sync {
    /// Returns a unique identifier for this provider (e.g., "media-downloader")
    fn id(&self) -> &'static str;

    /// Fetches metadata plus the raw audio/video variant lists for a video
    ///
    /// Renderable entries must be ordered before progressive entries in the
    /// returned video list.
    async fn fetch_streams(&self, video_id: &str) -> Result<StreamCatalog, TubeGrabError>;

    /// Resolves a renderable descriptor's execution URL into a download URL
    ///
    /// Single best-effort call, no retry. Default implementation for
    /// providers whose streams are all progressive.
    async fn resolve_renderable(&self, execution_url: &str) -> Result<String, TubeGrabError> {
        let _ = execution_url;
        Err(TubeGrabError::ResolutionFailed(format!(
            "Renderable streams not supported by {}",
            self.id()
        )))
    }
}
