use std::path::PathBuf;

use tokio::process;

use crate::errors::{DownloadError, DownloadResult};

pub const DEFAULT_YTDLP_PATH: &str = "yt-dlp";

const YTDLP_PATH_VAR: &str = "YTDLP_PATH";
const VERIFY_TLS_VAR: &str = "YTGRAB_VERIFY_TLS";
const CA_BUNDLE_VAR: &str = "YTGRAB_CA_BUNDLE";

/// Certificate checking for the extraction backend.
///
/// Applied to each spawned backend process, never to the current process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub verify: bool,
    pub ca_bundle: Option<PathBuf>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            verify: true,
            ca_bundle: None,
        }
    }
}

impl TlsConfig {
    pub fn apply(&self, cmd: &mut process::Command) {
        if !self.verify {
            log::warn!("TLS certificate verification is disabled");
            cmd.arg("--no-check-certificates");
        }

        if let Some(bundle) = &self.ca_bundle {
            cmd.env("SSL_CERT_FILE", bundle)
                .env("REQUESTS_CA_BUNDLE", bundle);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ytdlp_path: PathBuf,
    pub tls: TlsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ytdlp_path: PathBuf::from(DEFAULT_YTDLP_PATH),
            tls: TlsConfig::default(),
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> DownloadResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DownloadResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let ytdlp_path = get(YTDLP_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_YTDLP_PATH));

        let verify = match get(VERIFY_TLS_VAR) {
            Some(value) => parse_bool(VERIFY_TLS_VAR, &value)?,
            None => true,
        };

        Ok(Self {
            ytdlp_path,
            tls: TlsConfig {
                verify,
                ca_bundle: get(CA_BUNDLE_VAR).map(PathBuf::from),
            },
        })
    }
}

fn parse_bool(key: &str, value: &str) -> DownloadResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DownloadError::invalid_argument(format!(
            "Invalid value for {}: {}",
            key, other
        ))),
    }
}
