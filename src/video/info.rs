use serde::Deserialize;

use crate::video::Container;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VideoQuality {
    pub height: u32,
    pub width: u32,
    pub label: String,
}

impl VideoQuality {
    pub fn new(height: u32, width: u32) -> Self {
        let label = format!("{}p", height);
        Self {
            height,
            width,
            label,
        }
    }
}

/// One entry of the `formats` array printed by `yt-dlp -J`
#[derive(Debug, Clone, Deserialize)]
pub struct YtDlpFormat {
    pub format_id: String,
    #[serde(default)]
    pub ext: String,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub abr: Option<f64>,
}

impl YtDlpFormat {
    pub fn has_video(&self) -> bool {
        has_codec(&self.vcodec)
    }

    pub fn has_audio(&self) -> bool {
        has_codec(&self.acodec)
    }

    pub fn is_audio_only(&self) -> bool {
        self.has_audio() && !self.has_video()
    }

    pub fn is_progressive(&self) -> bool {
        self.has_audio() && self.has_video()
    }

    pub fn quality(&self) -> Option<VideoQuality> {
        if !self.has_video() {
            return None;
        }
        self.height
            .filter(|&h| h > 0)
            .map(|h| VideoQuality::new(h, self.width.unwrap_or(0)))
    }
}

// yt-dlp writes "none" for a missing track and omits the field when unknown
fn has_codec(codec: &Option<String>) -> bool {
    codec.as_deref().is_some_and(|c| c != "none")
}

#[derive(Debug, Clone, Deserialize)]
pub struct YtDlpInfo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub duration: Option<f64>,
    #[serde(default)]
    pub formats: Vec<YtDlpFormat>,
}

impl YtDlpInfo {
    /// yt-dlp lists formats worst to best, so the last audio-only entry wins.
    pub fn best_audio_format(&self) -> Option<&YtDlpFormat> {
        self.formats.iter().rev().find(|f| f.is_audio_only())
    }

    pub fn progressive_formats(&self, container: Container) -> Vec<&YtDlpFormat> {
        let ext = container.to_string();
        let mut formats: Vec<&YtDlpFormat> = self
            .formats
            .iter()
            .filter(|f| f.is_progressive() && f.ext == ext)
            .collect();

        // stable sort keeps yt-dlp's own preference for equal resolutions
        formats.sort_by_key(|f| f.quality());
        formats
    }
}

#[cfg(test)]
pub(crate) const SAMPLE_INFO_JSON: &str = r#"{
    "id": "dQw4w9WgXcQ",
    "title": "Sample Clip",
    "duration": 212.0,
    "formats": [
        {"format_id": "sb0", "ext": "mhtml", "vcodec": "none", "acodec": "none"},
        {"format_id": "139", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.5", "abr": 48.8},
        {"format_id": "249", "ext": "webm", "vcodec": "none", "acodec": "opus", "abr": 50.1},
        {"format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2", "abr": 129.5},
        {"format_id": "251", "ext": "webm", "vcodec": "none", "acodec": "opus", "abr": 135.2},
        {"format_id": "22", "ext": "mp4", "vcodec": "avc1.64001F", "acodec": "mp4a.40.2", "height": 720, "width": 1280},
        {"format_id": "18", "ext": "mp4", "vcodec": "avc1.42001E", "acodec": "mp4a.40.2", "height": 360, "width": 640},
        {"format_id": "43", "ext": "webm", "vcodec": "vp8.0", "acodec": "vorbis", "height": 360, "width": 640},
        {"format_id": "135", "ext": "mp4", "vcodec": "avc1.4d401f", "acodec": "none", "height": 480, "width": 854},
        {"format_id": "137", "ext": "mp4", "vcodec": "avc1.640028", "acodec": "none", "height": 1080, "width": 1920},
        {"format_id": "59", "ext": "mp4", "vcodec": "avc1.4d401f", "acodec": "mp4a.40.2", "height": 480, "width": 854}
    ]
}"#;
