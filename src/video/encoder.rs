//! ffmpeg discovery and invocation.

use super::profile::VideoProfile;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to start {}: {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        source: std::io::Error,
    },
    #[error("ffmpeg exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// Trait for video encoders.
///
/// `transcode` blocks until the encode finishes. The output must appear
/// atomically: on failure the previous output (if any) is left untouched.
pub trait VideoEncoder: Sync {
    fn transcode(&self, source: &Path, output: &Path) -> Result<(), EncodeError>;
}

/// Resolve the ffmpeg binary: the configured path if it exists, else `PATH`.
pub fn find_ffmpeg(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        tracing::warn!(
            "configured ffmpeg {} not found, searching PATH",
            path.display()
        );
    }
    which::which("ffmpeg").ok()
}

/// Encoder backed by the ffmpeg CLI.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    binary: PathBuf,
    profile: VideoProfile,
}

impl FfmpegEncoder {
    pub fn new(binary: impl Into<PathBuf>, profile: VideoProfile) -> Self {
        Self {
            binary: binary.into(),
            profile,
        }
    }

    /// Locate ffmpeg and build an encoder, or `None` if it can't be resolved.
    pub fn locate(configured: Option<&Path>, profile: VideoProfile) -> Option<Self> {
        find_ffmpeg(configured).map(|binary| Self::new(binary, profile))
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn profile(&self) -> &VideoProfile {
        &self.profile
    }
}

impl VideoEncoder for FfmpegEncoder {
    fn transcode(&self, source: &Path, output: &Path) -> Result<(), EncodeError> {
        let dir = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        std::fs::create_dir_all(dir)?;
        // Deleted on drop unless persisted.
        let tmp = tempfile::Builder::new()
            .prefix(".optimedia-")
            .suffix(".mp4")
            .tempfile_in(dir)?
            .into_temp_path();

        let args = self.profile.ffmpeg_args(source, &tmp);
        tracing::debug!("running {} {:?}", self.binary.display(), args);

        let result = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|e| EncodeError::Spawn {
                binary: self.binary.clone(),
                source: e,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            return Err(EncodeError::Failed {
                status: result.status.to_string(),
                stderr,
            });
        }

        tmp.persist(output).map_err(|e| EncodeError::Io(e.error))?;
        Ok(())
    }
}
