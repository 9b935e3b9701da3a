//! HTTP service layer

pub mod download;
pub mod routes;

// Re-export for convenience
pub use download::{DownloadRequest, DownloadResponse, MediaFormat};
pub use routes::{build_provider, AppState};
