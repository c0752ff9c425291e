//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and encode. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::EncodeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image as displayed (orientation applied).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Backends must be `Sync`: the pipeline shares one backend across its
/// worker threads.
pub trait ImageBackend: Sync {
    /// Dimensions after EXIF orientation is applied.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode, orient, resize to `params.width x params.height`, encode to
    /// WebP and write to `params.output`. The output must appear atomically:
    /// either the previous file or the complete new one.
    fn encode(&self, params: &EncodeParams) -> Result<(), BackendError>;
}
