//! Modification-time freshness checks for incremental runs.
//!
//! Encoding is the expensive part of a run: a single video can take minutes
//! through ffmpeg. Before transcoding, the pipeline asks whether the existing
//! output is at least as new as its source and skips the asset if so.
//!
//! # Rules
//!
//! - Both files are stat'ed. Any failure (most commonly: the output does not
//!   exist yet) means **stale**.
//! - Otherwise the output is fresh iff `mtime(output) >= mtime(source)`.
//!   Equal timestamps count as fresh, so an immediate rerun with no source
//!   change never reprocesses.
//!
//! Outputs are always written through a temp file and renamed into place, so
//! a half-written output is never visible here with a fresh timestamp.
//!
//! There is no manifest: deleting the output tree forces a full rebuild.

use std::fmt;
use std::path::Path;
use std::time::SystemTime;

/// Modification time of a file, `None` if it can't be read.
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Whether `output` is up to date with respect to `source`.
pub fn is_fresh(source: &Path, output: &Path) -> bool {
    let (Some(source_time), Some(output_time)) = (get_mtime(source), get_mtime(output)) else {
        return false;
    };
    output_time >= source_time
}

/// Per-run tally of freshness decisions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessStats {
    pub fresh: u32,
    pub stale: u32,
}

impl FreshnessStats {
    pub fn record(&mut self, fresh: bool) {
        if fresh {
            self.fresh += 1;
        } else {
            self.stale += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.fresh + self.stale
    }
}

impl fmt::Display for FreshnessStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fresh > 0 {
            write!(
                f,
                "{} up to date, {} to encode ({} total)",
                self.fresh,
                self.stale,
                self.total()
            )
        } else {
            write!(f, "{} to encode", self.stale)
        }
    }
}
