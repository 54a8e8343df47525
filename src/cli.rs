use log::{info, warn};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::download::{download_audio, download_video};
use crate::utils::is_youtube_video_link;
use crate::video::Resolver;

pub const URL_PROMPT: &str = "Please enter the YouTube URL: ";
pub const SAVE_PATH_PROMPT: &str = "Please enter the save path (leave empty for current directory): ";

/// Writes `question`, then reads one trimmed line. EOF yields an empty string.
pub async fn prompt<R, W>(input: &mut R, output: &mut W, question: &str) -> io::Result<String>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(question.as_bytes()).await?;
    output.flush().await?;

    let mut line = String::new();
    input.read_line(&mut line).await?;
    Ok(line.trim().to_string())
}

async fn say<W: AsyncWrite + Unpin>(output: &mut W, msg: &str) -> io::Result<()> {
    output.write_all(msg.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}

fn warn_if_unusual(url: &str) {
    if !is_youtube_video_link(url) {
        warn!("{} does not look like a YouTube video link, trying anyway", url);
    }
}

pub async fn run_audio<Res, R, W>(resolver: &Res, input: &mut R, output: &mut W) -> io::Result<()>
where
    Res: Resolver,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let url = prompt(input, output, URL_PROMPT).await?;
    if url.is_empty() {
        return say(output, "URL cannot be empty").await;
    }
    warn_if_unusual(&url);

    match download_audio(resolver, &url).await {
        Ok(path) => {
            info!("Audio saved to {}", path.display());
            say(output, "Audio downloaded successfully").await
        }
        Err(e) => say(output, &format!("Error: {}", e)).await,
    }
}

pub async fn run_video<Res, R, W>(resolver: &Res, input: &mut R, output: &mut W) -> io::Result<()>
where
    Res: Resolver,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let link = prompt(input, output, URL_PROMPT).await?;
    let save_path = prompt(input, output, SAVE_PATH_PROMPT).await?;

    if link.is_empty() {
        return say(output, "Please provide a YouTube link").await;
    }
    warn_if_unusual(&link);

    match download_video(resolver, &link, &save_path).await {
        Ok(path) => {
            info!("Video saved to {}", path.display());
            say(output, "Video downloaded successfully").await
        }
        Err(e) => say(output, &format!("Error: {}", e)).await,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::testing::FakeResolver;

    async fn audio_session(resolver: &FakeResolver, stdin: &str) -> String {
        let mut input = stdin.as_bytes();
        let mut output = Vec::new();
        run_audio(resolver, &mut input, &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    async fn video_session(resolver: &FakeResolver, stdin: &str) -> String {
        let mut input = stdin.as_bytes();
        let mut output = Vec::new();
        run_video(resolver, &mut input, &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn prompt_trims_and_handles_eof() {
        let mut input: &[u8] = b"  https://youtu.be/abc \nnext\n";
        let mut output = Vec::new();

        let answer = prompt(&mut input, &mut output, "Q? ").await.unwrap();
        assert_eq!(answer, "https://youtu.be/abc");
        assert_eq!(output, b"Q? ");

        let mut empty: &[u8] = b"";
        assert_eq!(prompt(&mut empty, &mut output, "Q? ").await.unwrap(), "");
    }

    #[tokio::test]
    async fn audio_success() {
        let resolver = FakeResolver::reporting("song.webm");
        let out = audio_session(&resolver, "https://youtu.be/abc\n").await;
        assert_eq!(out, format!("{}Audio downloaded successfully\n", URL_PROMPT));
    }

    #[tokio::test]
    async fn audio_empty_url() {
        let resolver = FakeResolver::reporting("song.webm");
        let out = audio_session(&resolver, "\n").await;
        assert!(out.ends_with("URL cannot be empty\n"));
        assert_eq!(resolver.resolve_calls.get(), 0);
    }

    #[tokio::test]
    async fn audio_failure_is_printed() {
        let resolver = FakeResolver::failing_resolve();
        let out = audio_session(&resolver, "https://youtu.be/abc\n").await;
        assert!(out.contains("Error: Failed to download audio: "));
    }

    #[tokio::test]
    async fn video_success_uses_save_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("downloads");
        let resolver = FakeResolver::reporting("clip.mp4").with_heights(&[360, 720]);

        let stdin = format!("https://youtu.be/abc\n{}\n", target.display());
        let out = video_session(&resolver, &stdin).await;

        assert_eq!(
            out,
            format!(
                "{}{}Video downloaded successfully\n",
                URL_PROMPT, SAVE_PATH_PROMPT
            )
        );
        assert_eq!(resolver.downloaded_to(), [target]);
    }

    #[tokio::test]
    async fn video_without_link() {
        let resolver = FakeResolver::reporting("clip.mp4");
        let out = video_session(&resolver, "\n\n").await;
        assert!(out.ends_with("Please provide a YouTube link\n"));
        assert_eq!(resolver.resolve_calls.get(), 0);
    }

    #[tokio::test]
    async fn video_connection_error_is_printed() {
        let resolver = FakeResolver::failing_resolve();
        let out = video_session(&resolver, "https://youtu.be/abc\n\n").await;
        assert!(out.ends_with("Error: Connection Error: yt-dlp failed: unable to connect\n"));
    }

    #[tokio::test]
    async fn video_without_candidates_is_printed() {
        let resolver = FakeResolver::reporting("clip.mp4");
        let out = video_session(&resolver, "https://youtu.be/abc\n").await;
        assert!(out.contains("Error: Error: Couldn't download the video - "));
        assert_eq!(resolver.downloaded_to(), Vec::<PathBuf>::new());
    }
}
