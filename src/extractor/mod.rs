pub mod media_downloader;
pub mod models;
pub mod traits;
pub mod ytstream;

pub use media_downloader::MediaDownloaderProvider;
pub use models::{LooseNumber, RawAudioItem, RawVideoItem, StreamCatalog, VideoMetadata};
pub use traits::StreamProvider;
pub use ytstream::YtStreamProvider;
