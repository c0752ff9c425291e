//! Source path → optimized output path.
//!
//! The mapping keeps the directory portion of the relative path, replaces the
//! extension with the kind's target extension, and roots the result under the
//! output tree:
//!
//! ```text
//! pics/img/a.png       →  pics-optimized/img/a.webp
//! pics/vid/b.mov       →  pics-optimized/vid/b.mp4
//! pics/hero.tar.jpg    →  pics-optimized/hero.tar.webp
//! ```
//!
//! Only the last extension is stripped. Two sources that differ only by
//! extension in the same directory map to the same output; the scanner detects
//! that case (see [`crate::scan`]).

use crate::types::MediaKind;
use std::path::{Path, PathBuf};

/// Map a source-relative path to its output-relative path.
pub fn map_relative(relative: &Path, kind: MediaKind) -> PathBuf {
    relative.with_extension(kind.target_extension())
}

/// Map a source-relative path to its full output path under `output_root`.
pub fn output_path_for(output_root: &Path, relative: &Path, kind: MediaKind) -> PathBuf {
    output_root.join(map_relative(relative, kind))
}
