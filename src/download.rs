use std::path::{Path, PathBuf};

use log::info;
use tokio::fs;

use crate::errors::{DownloadError, DownloadResult, MediaKind, StreamError, StreamResult};
use crate::video::{Container, Resolver, StreamHandle, VideoHandle};

/// Container the video path downloads from
pub const PROGRESSIVE_CONTAINER: Container = Container::Mp4;

/// Downloads the best audio stream of `url` into the working directory.
///
/// Every failure after validation is reported as a transfer failure.
pub async fn download_audio<R: Resolver>(resolver: &R, url: &str) -> DownloadResult<PathBuf> {
    if url.trim().is_empty() {
        return Err(DownloadError::invalid_argument("URL cannot be empty"));
    }

    info!("Starting audio download: {}", url);
    fetch_best_audio(resolver, url)
        .await
        .map_err(DownloadError::transfer_failed(MediaKind::Audio))
}

async fn fetch_best_audio<R: Resolver>(resolver: &R, url: &str) -> StreamResult<PathBuf> {
    let video = resolver.resolve(url).await?;
    let stream = video.best_audio_stream().await?;
    stream.download(Path::new("")).await
}

/// Downloads the highest-resolution progressive mp4 stream of `link`.
///
/// An empty `save_path` means the working directory; otherwise the directory
/// is created when missing.
pub async fn download_video<R: Resolver>(
    resolver: &R,
    link: &str,
    save_path: &str,
) -> DownloadResult<PathBuf> {
    if link.trim().is_empty() {
        return Err(DownloadError::invalid_argument("Link cannot be empty"));
    }

    info!("Starting video download: {} (save path: {:?})", link, save_path);
    let video = resolver
        .resolve(link)
        .await
        .map_err(DownloadError::ConnectionFailed)?;

    fetch_highest_progressive(&video, Path::new(save_path))
        .await
        .map_err(DownloadError::transfer_failed(MediaKind::Video))
}

async fn fetch_highest_progressive<V: VideoHandle>(
    video: &V,
    destination: &Path,
) -> StreamResult<PathBuf> {
    let candidates = video.progressive_streams(PROGRESSIVE_CONTAINER).await?;
    let stream = select_highest_resolution(candidates).ok_or_else(|| {
        StreamError::no_matching_stream(format!(
            "no progressive {} stream available",
            PROGRESSIVE_CONTAINER
        ))
    })?;

    if let Some(quality) = stream.quality() {
        info!("Selected {} stream", quality.label);
    }

    if !destination.as_os_str().is_empty() {
        fs::create_dir_all(destination).await?;
    }

    stream.download(destination).await
}

/// Picks the stream with the greatest resolution; on ties the later one wins.
pub fn select_highest_resolution<S: StreamHandle>(
    streams: impl IntoIterator<Item = S>,
) -> Option<S> {
    streams.into_iter().max_by_key(|s| s.quality())
}
