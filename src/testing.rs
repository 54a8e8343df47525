//! In-memory resolver used by the unit tests.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::errors::{StreamError, StreamResult};
use crate::video::{Container, Resolver, StreamHandle, VideoHandle, VideoQuality};

#[derive(Default)]
pub struct FakeResolver {
    pub fail_resolve: bool,
    pub fail_listing: bool,
    pub fail_download: bool,
    pub heights: Vec<u32>,
    pub reported_path: String,
    pub resolve_calls: Cell<usize>,
    pub containers: Rc<RefCell<Vec<Container>>>,
    pub destinations: Rc<RefCell<Vec<PathBuf>>>,
}

impl FakeResolver {
    pub fn reporting(path: &str) -> Self {
        Self {
            reported_path: path.to_string(),
            ..Default::default()
        }
    }

    pub fn with_heights(mut self, heights: &[u32]) -> Self {
        self.heights = heights.to_vec();
        self
    }

    pub fn failing_resolve() -> Self {
        Self {
            fail_resolve: true,
            ..Default::default()
        }
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn failing_download(mut self) -> Self {
        self.fail_download = true;
        self
    }

    pub fn downloaded_to(&self) -> Vec<PathBuf> {
        self.destinations.borrow().clone()
    }
}

pub struct FakeVideo {
    fail_listing: bool,
    fail_download: bool,
    heights: Vec<u32>,
    reported_path: String,
    containers: Rc<RefCell<Vec<Container>>>,
    destinations: Rc<RefCell<Vec<PathBuf>>>,
}

pub struct FakeStream {
    fail_download: bool,
    quality: Option<VideoQuality>,
    reported_path: String,
    destinations: Rc<RefCell<Vec<PathBuf>>>,
}

impl FakeStream {
    pub fn with_height(height: u32) -> Self {
        Self::reporting(height, &format!("{}p.mp4", height))
    }

    pub fn reporting(height: u32, path: &str) -> Self {
        Self {
            fail_download: false,
            quality: Some(VideoQuality::new(height, height * 16 / 9)),
            reported_path: path.to_string(),
            destinations: Rc::default(),
        }
    }

    pub fn reported_path(&self) -> &str {
        &self.reported_path
    }
}

impl Resolver for FakeResolver {
    type Video = FakeVideo;

    async fn resolve(&self, _url: &str) -> StreamResult<FakeVideo> {
        self.resolve_calls.set(self.resolve_calls.get() + 1);
        if self.fail_resolve {
            return Err(StreamError::command("yt-dlp", "unable to connect"));
        }
        Ok(FakeVideo {
            fail_listing: self.fail_listing,
            fail_download: self.fail_download,
            heights: self.heights.clone(),
            reported_path: self.reported_path.clone(),
            containers: Rc::clone(&self.containers),
            destinations: Rc::clone(&self.destinations),
        })
    }
}

impl FakeVideo {
    fn stream(&self, quality: Option<VideoQuality>) -> FakeStream {
        FakeStream {
            fail_download: self.fail_download,
            quality,
            reported_path: self.reported_path.clone(),
            destinations: Rc::clone(&self.destinations),
        }
    }
}

impl VideoHandle for FakeVideo {
    type Stream = FakeStream;

    async fn best_audio_stream(&self) -> StreamResult<FakeStream> {
        Ok(self.stream(None))
    }

    async fn progressive_streams(&self, container: Container) -> StreamResult<Vec<FakeStream>> {
        self.containers.borrow_mut().push(container);
        if self.fail_listing {
            return Err(StreamError::Parse("formats missing".to_string()));
        }
        Ok(self
            .heights
            .iter()
            .map(|&h| self.stream(Some(VideoQuality::new(h, h * 16 / 9))))
            .collect())
    }
}

impl StreamHandle for FakeStream {
    fn quality(&self) -> Option<VideoQuality> {
        self.quality.clone()
    }

    async fn download(&self, destination: &Path) -> StreamResult<PathBuf> {
        self.destinations.borrow_mut().push(destination.to_path_buf());
        if self.fail_download {
            return Err(StreamError::command("yt-dlp", "HTTP Error 403: Forbidden"));
        }
        Ok(PathBuf::from(&self.reported_path))
    }
}
