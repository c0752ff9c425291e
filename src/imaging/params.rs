//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between [`operations`](super::operations) (which decides the
//! output size) and the [`backend`](super::backend) (which does the pixel
//! work), so a mock backend can stand in during tests.

use std::path::PathBuf;

/// Lossy WebP quality (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// WebP compression effort, libwebp's `method` (0 = fastest, 6 = smallest).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effort(pub u32);

impl Effort {
    pub fn new(value: u32) -> Self {
        Self(value.min(6))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Effort {
    fn default() -> Self {
        Self(5)
    }
}

/// Full specification for one image encode.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Final dimensions, after orientation correction.
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
    pub effort: Effort,
}
