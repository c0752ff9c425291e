//! Source tree discovery.
//!
//! Walks the source root and classifies every regular file by extension into
//! images and videos. Hidden files and directories (leading `.`) are skipped,
//! as are files with unknown extensions.
//!
//! ## Collisions
//!
//! Two sources in the same directory that differ only by extension
//! (`hero.png` + `hero.jpg`) would map to the same output. Assets are sorted
//! by relative path and the first one claims the output; later ones are
//! returned in [`Discovery::collisions`] and never transcoded. This keeps
//! every output owned by exactly one source, which parallel image workers
//! rely on.
//!
//! ## Output inside the source tree
//!
//! The output root may live inside the source root (`--source . --output
//! optimized`). Its `.mp4` files would otherwise be picked up as video
//! sources on the next run, so the caller passes it as `exclude` and the walk
//! prunes that subtree.
//!
//! Any walk error (unreadable directory, missing root) is fatal to the run.

use crate::mapping::map_relative;
use crate::types::{Asset, MediaKind, classify};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result of scanning the source root.
#[derive(Debug, Default)]
pub struct Discovery {
    pub images: Vec<Asset>,
    pub videos: Vec<Asset>,
    /// Assets whose output path is already claimed by an earlier asset.
    pub collisions: Vec<Collision>,
}

/// An asset that lost its output path to another source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub asset: Asset,
    /// The asset that owns the shared output path.
    pub claimed_by: PathBuf,
}

impl Discovery {
    pub fn total(&self) -> usize {
        self.images.len() + self.videos.len()
    }

    pub fn assets(&self, kind: MediaKind) -> &[Asset] {
        match kind {
            MediaKind::Image => &self.images,
            MediaKind::Video => &self.videos,
        }
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// True for the directory named by `excluded` (already canonicalized).
fn is_excluded(entry: &walkdir::DirEntry, excluded: Option<&Path>) -> bool {
    let Some(excluded) = excluded else {
        return false;
    };
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .path()
            .canonicalize()
            .is_ok_and(|path| path == excluded)
}

/// Scan `source_root` for media assets.
///
/// `exclude` is a directory pruned from the walk, if it exists. Paths are
/// compared after canonicalization, so relative and symlinked spellings of the
/// same directory match.
pub fn scan(
    source_root: &Path,
    exclude: Option<&Path>,
    image_exts: &[String],
    video_exts: &[String],
) -> Result<Discovery, ScanError> {
    if !source_root.is_dir() {
        return Err(ScanError::SourceNotFound(source_root.to_path_buf()));
    }

    let excluded = exclude.and_then(|path| path.canonicalize().ok());
    let mut found = Vec::new();
    for entry in WalkDir::new(source_root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_hidden(e) && !is_excluded(e, excluded.as_deref()))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(kind) = classify(entry.path(), image_exts, video_exts) else {
            continue;
        };
        let relative = entry
            .path()
            .strip_prefix(source_root)
            .unwrap_or(entry.path())
            .to_path_buf();
        found.push(Asset::new(relative, kind));
    }

    found.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    let mut discovery = Discovery::default();
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    for asset in found {
        let output = map_relative(&asset.relative_path, asset.kind);
        if let Some(owner) = claimed.get(&output) {
            discovery.collisions.push(Collision {
                asset,
                claimed_by: owner.clone(),
            });
            continue;
        }
        claimed.insert(output, asset.relative_path.clone());
        match asset.kind {
            MediaKind::Image => discovery.images.push(asset),
            MediaKind::Video => discovery.videos.push(asset),
        }
    }

    Ok(discovery)
}
