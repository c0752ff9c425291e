//! Shared types used across the pipeline stages.
//!
//! An [`Asset`] is the stable identity of one source file: its path relative
//! to the source root plus its [`MediaKind`]. Every later stage (mapping,
//! freshness, transcoding, reporting) is keyed on these two values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The two families of media the pipeline knows how to optimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Extension of the optimized output for this kind.
    pub fn target_extension(self) -> &'static str {
        match self {
            MediaKind::Image => "webp",
            MediaKind::Video => "mp4",
        }
    }

    /// Human label, pluralized when `count != 1`.
    pub fn label(self, count: usize) -> &'static str {
        match (self, count == 1) {
            (MediaKind::Image, true) => "image",
            (MediaKind::Image, false) => "images",
            (MediaKind::Video, true) => "video",
            (MediaKind::Video, false) => "videos",
        }
    }
}

/// One discoverable source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Asset {
    /// Path relative to the source root.
    pub relative_path: PathBuf,
    pub kind: MediaKind,
}

impl Asset {
    pub fn new(relative_path: impl Into<PathBuf>, kind: MediaKind) -> Self {
        Self {
            relative_path: relative_path.into(),
            kind,
        }
    }

    /// Absolute (or root-joined) path of the source file.
    pub fn source_path(&self, source_root: &Path) -> PathBuf {
        source_root.join(&self.relative_path)
    }

    /// Relative path rendered with forward slashes, for display and reports.
    pub fn display_path(&self) -> String {
        display_relative(&self.relative_path)
    }
}

/// Render a relative path with `/` separators regardless of platform.
pub fn display_relative(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Classify a file by extension against the configured extension sets.
///
/// Matching is ASCII case-insensitive, so `IMG_001.JPG` counts as an image.
pub fn classify(path: &Path, image_exts: &[String], video_exts: &[String]) -> Option<MediaKind> {
    let ext = path.extension()?.to_str()?;
    let matches = |set: &[String]| set.iter().any(|e| e.eq_ignore_ascii_case(ext));
    if matches(image_exts) {
        Some(MediaKind::Image)
    } else if matches(video_exts) {
        Some(MediaKind::Video)
    } else {
        None
    }
}
