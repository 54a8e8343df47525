pub mod info;
pub mod youtube;

use std::path::{Path, PathBuf};

use strum::Display;

use crate::errors::StreamResult;

pub use info::{VideoQuality, YtDlpFormat, YtDlpInfo};
pub use youtube::{YtDlp, YtDlpStream, YtDlpVideo};

/// Container formats a stream can be filtered by
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Container {
    Mp4,
    Webm,
    M4a,
}

/// Turns a URL into a handle over its downloadable streams
#[allow(async_fn_in_trait)]
pub trait Resolver {
    type Video: VideoHandle;

    async fn resolve(&self, url: &str) -> StreamResult<Self::Video>;
}

/// Metadata for one resolved video
#[allow(async_fn_in_trait)]
pub trait VideoHandle {
    type Stream: StreamHandle;

    /// Best audio-only stream, as ranked by the backend
    async fn best_audio_stream(&self) -> StreamResult<Self::Stream>;

    /// Streams carrying both audio and video in `container`, lowest resolution first
    async fn progressive_streams(&self, container: Container) -> StreamResult<Vec<Self::Stream>>;
}

/// One downloadable track
#[allow(async_fn_in_trait)]
pub trait StreamHandle {
    fn quality(&self) -> Option<VideoQuality>;

    /// Downloads into `destination` (empty path means the working directory)
    /// and returns the path reported by the backend.
    async fn download(&self, destination: &Path) -> StreamResult<PathBuf>;
}
