//! Optimizer configuration.
//!
//! Handles loading, validating, and merging `optimedia.toml`. Stock defaults
//! are serialized to a TOML table, the user file is merged on top key by key,
//! and the result is deserialized and validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_dir = "pics"
//! output_dir = "pics-optimized"
//!
//! [images]
//! max_width = 1600          # Never upscaled
//! quality = 80              # WebP quality (1-100)
//! effort = 5                # WebP compression effort (0-6)
//! extensions = ["png", "jpg", "jpeg"]
//!
//! [videos]
//! max_width = 1280
//! codec = "libx264"
//! crf = 27
//! preset = "faster"
//! pixel_format = "yuv420p"
//! audio_codec = "aac"
//! audio_bitrate = "128k"
//! extensions = ["mp4", "mov"]
//! # ffmpeg = "/usr/local/bin/ffmpeg"
//!
//! [processing]
//! max_processes = 4         # Max parallel image workers (omit for auto = CPU cores)
//!
//! [cache]
//! name = "media-cache-v1"   # Bump on every deployment
//! url_prefix = "/pics-optimized/"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "optimedia.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    /// Source tree scanned for media.
    pub source_dir: PathBuf,
    /// Root of the optimized mirror tree.
    pub output_dir: PathBuf,
    pub images: ImagesConfig,
    pub videos: VideosConfig,
    pub processing: ProcessingConfig,
    pub cache: CacheConfig,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("pics"),
            output_dir: PathBuf::from("pics-optimized"),
            images: ImagesConfig::default(),
            videos: VideosConfig::default(),
            processing: ProcessingConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl OptimizerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.images.quality) {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        if self.images.effort > 6 {
            return Err(ConfigError::Validation("images.effort must be 0-6".into()));
        }
        if self.images.max_width == 0 || self.videos.max_width == 0 {
            return Err(ConfigError::Validation(
                "max_width values must be non-zero".into(),
            ));
        }
        if self.videos.crf > 51 {
            return Err(ConfigError::Validation("videos.crf must be 0-51".into()));
        }
        if self.images.extensions.is_empty() || self.videos.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extension lists must not be empty".into(),
            ));
        }
        if let Some(ext) = self
            .images
            .extensions
            .iter()
            .find(|i| self.videos.extensions.iter().any(|v| v.eq_ignore_ascii_case(i)))
        {
            return Err(ConfigError::Validation(format!(
                "extension '{ext}' is listed for both images and videos"
            )));
        }
        if self.cache.name.trim().is_empty() {
            return Err(ConfigError::Validation("cache.name must not be empty".into()));
        }
        if !self.cache.url_prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "cache.url_prefix must start with '/'".into(),
            ));
        }
        if self.cache.url_prefix.chars().any(char::is_control) {
            return Err(ConfigError::Validation(
                "cache.url_prefix must not contain control characters".into(),
            ));
        }
        Ok(())
    }
}

/// Image transcoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Output width cap in pixels. Smaller images keep their width.
    pub max_width: u32,
    /// WebP encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// WebP compression effort (0 = fastest, 6 = smallest).
    pub effort: u32,
    /// Source extensions treated as images.
    pub extensions: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_width: 1600,
            quality: 80,
            effort: 5,
            extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
        }
    }
}

/// Video transcoding profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideosConfig {
    /// Output width cap in pixels.
    pub max_width: u32,
    /// ffmpeg video encoder name.
    pub codec: String,
    /// Constant rate factor (0-51, lower is better).
    pub crf: u32,
    /// Encoder speed preset.
    pub preset: String,
    pub pixel_format: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
    /// Source extensions treated as videos.
    pub extensions: Vec<String>,
    /// Explicit path to the ffmpeg binary. When absent, `PATH` is searched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ffmpeg: Option<PathBuf>,
}

impl Default for VideosConfig {
    fn default() -> Self {
        Self {
            max_width: 1280,
            codec: "libx264".into(),
            crf: 27,
            preset: "faster".into(),
            pixel_format: "yuv420p".into(),
            audio_codec: "aac".into(),
            audio_bitrate: "128k".into(),
            extensions: vec!["mp4".into(), "mov".into()],
            ffmpeg: None,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    /// Videos are always encoded one at a time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Runtime media cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Cache generation name. Changing it evicts every older generation.
    pub name: String,
    /// Public URL prefix of the optimized tree.
    pub url_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: "media-cache-v1".into(),
            url_prefix: "/pics-optimized/".into(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(OptimizerConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<OptimizerConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: OptimizerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults if it is absent.
pub fn load_config(path: &Path) -> Result<OptimizerConfig, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// Returns a fully-commented stock `optimedia.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# optimedia configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Source tree scanned for images and videos.
source_dir = "pics"

# Optimized mirror tree. Directory structure matches source_dir.
output_dir = "pics-optimized"

# ---------------------------------------------------------------------------
# Images -> WebP
# ---------------------------------------------------------------------------
[images]
# Output width cap in pixels. Narrower images are never upscaled.
max_width = 1600

# WebP quality (1 = worst, 100 = best).
quality = 80

# WebP compression effort (0 = fastest, 6 = smallest files).
effort = 5

# Source extensions treated as images (case-insensitive).
extensions = ["png", "jpg", "jpeg"]

# ---------------------------------------------------------------------------
# Videos -> MP4 (requires ffmpeg)
# ---------------------------------------------------------------------------
[videos]
# Output width cap in pixels. Height keeps the aspect ratio, rounded to even.
max_width = 1280
codec = "libx264"

# Constant rate factor (0-51, lower = better quality, larger files).
crf = 27
preset = "faster"
pixel_format = "yuv420p"
audio_codec = "aac"
audio_bitrate = "128k"

# Source extensions treated as videos (case-insensitive).
extensions = ["mp4", "mov"]

# Explicit ffmpeg binary. When omitted, PATH is searched.
# Without ffmpeg, videos are skipped with a warning.
# ffmpeg = "/usr/local/bin/ffmpeg"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image workers. Omit to use all CPU cores.
# Videos are always encoded one at a time.
# max_processes = 4

# ---------------------------------------------------------------------------
# Runtime media cache (service worker)
# ---------------------------------------------------------------------------
[cache]
# Cache generation. Bump on every deployment to evict old entries.
name = "media-cache-v1"

# Public URL prefix of output_dir. Only GET requests under it are cached.
url_prefix = "/pics-optimized/"
"##
}
