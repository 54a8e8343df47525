use std::fmt;

/// Which download path produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// Two-tier classification of download failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required input missing, detected before any I/O
    InvalidArgument,
    /// Connection, resolution or transfer failed
    OperationFailed,
}

/// Errors returned by the download entry points
#[derive(Debug)]
pub enum DownloadError {
    /// Empty or otherwise unusable input
    InvalidArgument(String),
    /// The resolver could not be reached or rejected the URL
    ConnectionFailed(StreamError),
    /// Stream selection or transfer failed
    TransferFailed { media: MediaKind, source: StreamError },
}

/// Errors raised by the extraction backend
#[derive(Debug)]
pub enum StreamError {
    /// External command failed to spawn or exited non-zero
    Command { command: String, stderr: String },
    /// Backend output could not be understood
    Parse(String),
    /// Local filesystem failure
    Io(std::io::Error),
    /// No stream matched the requested filter
    NoMatchingStream(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::InvalidArgument(msg) => write!(f, "{}", msg),
            DownloadError::ConnectionFailed(e) => write!(f, "Connection Error: {}", e),
            DownloadError::TransferFailed {
                media: MediaKind::Audio,
                source,
            } => write!(f, "Failed to download audio: {}", source),
            DownloadError::TransferFailed {
                media: MediaKind::Video,
                source,
            } => write!(f, "Error: Couldn't download the video - {}", source),
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Command { command, stderr } => {
                write!(f, "{} failed: {}", command, stderr.trim())
            }
            StreamError::Parse(msg) => write!(f, "unexpected output: {}", msg),
            StreamError::Io(e) => write!(f, "filesystem error: {}", e),
            StreamError::NoMatchingStream(msg) => write!(f, "no matching stream: {}", msg),
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::ConnectionFailed(e) => Some(e),
            DownloadError::TransferFailed { source, .. } => Some(source),
            DownloadError::InvalidArgument(_) => None,
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        StreamError::Io(err)
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        StreamError::Parse(format!("JSON parsing error: {}", err))
    }
}

impl DownloadError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn transfer_failed(media: MediaKind) -> impl FnOnce(StreamError) -> Self {
        move |source| Self::TransferFailed { media, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DownloadError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            DownloadError::ConnectionFailed(_) | DownloadError::TransferFailed { .. } => {
                ErrorKind::OperationFailed
            }
        }
    }
}

impl StreamError {
    pub fn command(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::Command {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    pub fn no_matching_stream(msg: impl Into<String>) -> Self {
        Self::NoMatchingStream(msg.into())
    }
}

/// Result of the download entry points
pub type DownloadResult<T> = Result<T, DownloadError>;

/// Result of backend operations
pub type StreamResult<T> = Result<T, StreamError>;
