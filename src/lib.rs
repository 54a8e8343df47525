//! Fetch a single audio or video stream from a YouTube URL.
//!
//! The heavy lifting is done by `yt-dlp`; this crate validates input, picks
//! a stream and reports failures in two tiers (see [`errors::ErrorKind`]).

pub mod cli;
pub mod config;
pub mod download;
pub mod errors;
pub mod utils;
pub mod video;

#[cfg(test)]
mod testing;

pub use config::{Config, TlsConfig};
pub use download::{download_audio, download_video, select_highest_resolution};
pub use errors::{DownloadError, DownloadResult, ErrorKind, MediaKind, StreamError};
pub use video::{Container, Resolver, StreamHandle, VideoHandle, YtDlp};
