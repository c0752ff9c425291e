//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_target_dimensions;
use super::params::{EncodeParams, Effort, Quality};
use crate::config::ImagesConfig;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Encoding settings shared by every image in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSettings {
    pub max_width: u32,
    pub quality: Quality,
    pub effort: Effort,
}

impl ImageSettings {
    pub fn from_config(config: &ImagesConfig) -> Self {
        Self {
            max_width: config.max_width,
            quality: Quality::new(config.quality),
            effort: Effort::new(config.effort),
        }
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self::from_config(&ImagesConfig::default())
    }
}

/// Plan an encode without executing it.
pub fn plan_encode(
    source: &Path,
    output: &Path,
    original: Dimensions,
    settings: &ImageSettings,
) -> EncodeParams {
    let (width, height) =
        calculate_target_dimensions((original.width, original.height), settings.max_width);
    EncodeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality: settings.quality,
        effort: settings.effort,
    }
}

/// Transcode one image to WebP, bounded by `settings.max_width`.
///
/// Returns the output dimensions.
pub fn optimize_image(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    settings: &ImageSettings,
) -> Result<Dimensions> {
    let original = backend.identify(source)?;
    let params = plan_encode(source, output, original, settings);
    backend.encode(&params)?;
    Ok(Dimensions {
        width: params.width,
        height: params.height,
    })
}
