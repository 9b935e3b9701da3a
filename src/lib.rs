//! TubeGrab library

pub mod extractor;
pub mod quality;
pub mod server;
pub mod utils;

// Re-export main types for easier use
pub use extractor::{MediaDownloaderProvider, StreamCatalog, StreamProvider, YtStreamProvider};
pub use quality::{QualityOption, RankPolicy};
pub use server::{AppState, DownloadRequest, DownloadResponse, MediaFormat};
pub use utils::{AppSettings, ProviderKind, TubeGrabError};
