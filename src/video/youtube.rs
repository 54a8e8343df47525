use std::path::{Path, PathBuf};

use log::info;
use tokio::process;

use crate::config::{Config, TlsConfig};
use crate::errors::{StreamError, StreamResult};
use crate::utils::format_duration;
use crate::video::{Container, Resolver, StreamHandle, VideoHandle, VideoQuality, YtDlpFormat, YtDlpInfo};

const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Resolver backed by the `yt-dlp` executable
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
    tls: TlsConfig,
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>, tls: TlsConfig) -> Self {
        Self {
            program: program.into(),
            tls,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ytdlp_path.clone(), config.tls.clone())
    }

    fn base_command(&self) -> process::Command {
        let mut cmd = process::Command::new(&self.program);
        cmd.arg("--no-playlist");
        self.tls.apply(&mut cmd);
        cmd
    }

    fn info_command(&self, url: &str) -> process::Command {
        let mut cmd = self.base_command();
        cmd.arg("-J").arg(url);
        cmd
    }

    fn download_command(&self, url: &str, format_id: &str, destination: &Path) -> process::Command {
        let mut cmd = self.base_command();
        cmd.args(["-f", format_id])
            .arg("--no-simulate")
            .args(["--print", "after_move:filepath"])
            .args(["-o", OUTPUT_TEMPLATE]);

        if !destination.as_os_str().is_empty() {
            cmd.arg("-P").arg(destination);
        }

        cmd.arg(url);
        cmd
    }

    async fn run(&self, mut cmd: process::Command) -> StreamResult<String> {
        let output = cmd.output().await?;

        info!("yt-dlp exit code: {:?}", output.status.code());

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            log::error!("yt-dlp failed: {}", stderr);
            Err(StreamError::command("yt-dlp", stderr))
        }
    }
}

impl Resolver for YtDlp {
    type Video = YtDlpVideo;

    async fn resolve(&self, url: &str) -> StreamResult<YtDlpVideo> {
        info!("Resolving {}", url);
        let stdout = self.run(self.info_command(url)).await?;
        let info: YtDlpInfo = serde_json::from_str(&stdout)?;

        match info.duration {
            Some(secs) => info!("Resolved \"{}\" ({})", info.title, format_duration(secs as u32)),
            None => info!("Resolved \"{}\"", info.title),
        }

        Ok(YtDlpVideo {
            client: self.clone(),
            url: url.to_owned(),
            info,
        })
    }
}

#[derive(Debug, Clone)]
pub struct YtDlpVideo {
    client: YtDlp,
    url: String,
    info: YtDlpInfo,
}

impl YtDlpVideo {
    pub fn info(&self) -> &YtDlpInfo {
        &self.info
    }

    fn stream(&self, format: &YtDlpFormat) -> YtDlpStream {
        YtDlpStream {
            client: self.client.clone(),
            url: self.url.clone(),
            format: format.clone(),
        }
    }
}

impl VideoHandle for YtDlpVideo {
    type Stream = YtDlpStream;

    async fn best_audio_stream(&self) -> StreamResult<YtDlpStream> {
        self.info
            .best_audio_format()
            .map(|f| self.stream(f))
            .ok_or_else(|| StreamError::no_matching_stream("no audio-only stream available"))
    }

    async fn progressive_streams(&self, container: Container) -> StreamResult<Vec<YtDlpStream>> {
        Ok(self
            .info
            .progressive_formats(container)
            .into_iter()
            .map(|f| self.stream(f))
            .collect())
    }
}

#[derive(Debug, Clone)]
pub struct YtDlpStream {
    client: YtDlp,
    url: String,
    format: YtDlpFormat,
}

impl YtDlpStream {
    pub fn format(&self) -> &YtDlpFormat {
        &self.format
    }
}

impl StreamHandle for YtDlpStream {
    fn quality(&self) -> Option<VideoQuality> {
        self.format.quality()
    }

    async fn download(&self, destination: &Path) -> StreamResult<PathBuf> {
        info!(
            "Starting download: {} (format: {}, ext: {}, destination: {:?})",
            self.url, self.format.format_id, self.format.ext, destination
        );

        let cmd = self
            .client
            .download_command(&self.url, &self.format.format_id, destination);
        let stdout = self.client.run(cmd).await?;
        let path = reported_path(&stdout)?;

        info!("Download successful: {}", path.display());
        Ok(path)
    }
}

/// `--print after_move:filepath` writes the final path as the last line
fn reported_path(stdout: &str) -> StreamResult<PathBuf> {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| StreamError::Parse("yt-dlp did not report a file path".to_string()))
}
