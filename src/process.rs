//! The optimization run: discovery → freshness → transcode → summary.
//!
//! ```text
//! pics/                         pics-optimized/
//! ├── img/a.png   (2000px)  →   ├── img/a.webp  (1600px)
//! ├── img/b.jpg   (800px)   →   ├── img/b.webp  (800px)
//! └── vid/c.mov             →   └── vid/c.mp4
//! ```
//!
//! ## Phases
//!
//! 1. The output root is created and the source tree scanned. Failures here
//!    are fatal ([`ProcessError`]).
//! 2. **Images**: every stale image is transcoded. Images run in parallel on
//!    the rayon pool (sized by `processing.max_processes`); each worker owns
//!    distinct output paths, so there is no shared state besides the event
//!    channel.
//! 3. **Videos**: stale videos are encoded one at a time, only after the image
//!    phase has finished. Without ffmpeg the phase is skipped with a warning.
//!
//! A failure on one asset never aborts the run: it is recorded in
//! [`RunSummary::failures`] and the asset stays stale, so the next run
//! retries it. Sources that lose their output path to another source are
//! reported in [`RunSummary::collisions`] instead; they need a rename, not a
//! retry.
//!
//! The output root may sit inside the source root. It is pruned from
//! discovery so a run never consumes its own outputs.

use crate::config::OptimizerConfig;
use crate::freshness::{FreshnessStats, is_fresh};
use crate::imaging::{BackendError, ImageBackend, ImageSettings, RustBackend, optimize_image};
use crate::mapping::output_path_for;
use crate::scan::{Collision, ScanError, scan};
use crate::types::{Asset, MediaKind, display_relative};
use crate::video::{EncodeError, FfmpegEncoder, VideoEncoder, VideoProfile};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Run-level failure. Aborts the whole run.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to create output directory {0}: {1}")]
    OutputRoot(PathBuf, std::io::Error),
    #[error("Output directory {0} is the source directory")]
    OutputIsSource(PathBuf),
    #[error("Discovery failed: {0}")]
    Discovery(#[from] ScanError),
}

/// Per-asset failure. Recorded in the summary, never aborts the run.
#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("{0}")]
    Image(#[from] BackendError),
    #[error("{0}")]
    Video(#[from] EncodeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Progress notifications, consumed by the CLI printer.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    PhaseStarted {
        kind: MediaKind,
        total: usize,
        stale: usize,
    },
    Converted {
        kind: MediaKind,
        source: String,
        output: String,
        /// Output dimensions, known for images only.
        dimensions: Option<(u32, u32)>,
    },
    Failed {
        kind: MediaKind,
        source: String,
        message: String,
    },
    /// A source skipped because another source owns its output path.
    Collided {
        kind: MediaKind,
        source: String,
        claimed_by: String,
    },
    EncoderUnavailable {
        pending: usize,
    },
    PhaseFinished {
        kind: MediaKind,
        converted: usize,
    },
}

/// One asset whose transcode failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetFailure {
    pub source: String,
    pub kind: MediaKind,
    pub message: String,
}

/// A source that was not transcoded because its output path is owned by
/// another source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollisionReport {
    pub source: String,
    pub kind: MediaKind,
    pub claimed_by: String,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub images_converted: usize,
    pub videos_converted: usize,
    /// Assets skipped because their output was already fresh.
    pub images_fresh: usize,
    pub videos_fresh: usize,
    /// Stale videos left untouched because no encoder was available.
    pub videos_skipped: usize,
    pub encoder_available: bool,
    pub failures: Vec<AssetFailure>,
    /// Not failures: they persist until a source is renamed, so they don't
    /// count towards [`RunSummary::has_failures`].
    pub collisions: Vec<CollisionReport>,
}

impl RunSummary {
    pub fn converted(&self, kind: MediaKind) -> usize {
        match kind {
            MediaKind::Image => self.images_converted,
            MediaKind::Video => self.videos_converted,
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// An asset with its resolved paths and freshness decision.
#[derive(Debug, Clone)]
pub struct PlannedAsset {
    pub asset: Asset,
    pub source: PathBuf,
    pub output: PathBuf,
    pub fresh: bool,
}

/// Discovery plus freshness, without any encoding.
#[derive(Debug, Default)]
pub struct Plan {
    pub output_root: PathBuf,
    pub images: Vec<PlannedAsset>,
    pub videos: Vec<PlannedAsset>,
    pub collisions: Vec<Collision>,
    pub image_stats: FreshnessStats,
    pub video_stats: FreshnessStats,
}

impl Plan {
    pub fn entries(&self, kind: MediaKind) -> &[PlannedAsset] {
        match kind {
            MediaKind::Image => &self.images,
            MediaKind::Video => &self.videos,
        }
    }

    pub fn stale(&self, kind: MediaKind) -> impl Iterator<Item = &PlannedAsset> {
        self.entries(kind).iter().filter(|e| !e.fresh)
    }

    pub fn stats(&self, kind: MediaKind) -> FreshnessStats {
        match kind {
            MediaKind::Image => self.image_stats,
            MediaKind::Video => self.video_stats,
        }
    }
}

fn plan_assets(
    assets: &[Asset],
    source_root: &Path,
    output_root: &Path,
    stats: &mut FreshnessStats,
) -> Vec<PlannedAsset> {
    assets
        .iter()
        .map(|asset| {
            let source = asset.source_path(source_root);
            let output = output_path_for(output_root, &asset.relative_path, asset.kind);
            let fresh = is_fresh(&source, &output);
            tracing::debug!(
                "{} → {} ({})",
                source.display(),
                output.display(),
                if fresh { "fresh" } else { "stale" }
            );
            stats.record(fresh);
            PlannedAsset {
                asset: asset.clone(),
                source,
                output,
                fresh,
            }
        })
        .collect()
}

/// Scan `source_root` and decide which assets need transcoding.
///
/// When `output_root` exists inside `source_root` it is left out of the scan.
pub fn plan(
    source_root: &Path,
    output_root: &Path,
    config: &OptimizerConfig,
) -> Result<Plan, ProcessError> {
    if let (Ok(source), Ok(output)) = (source_root.canonicalize(), output_root.canonicalize())
        && source == output
    {
        return Err(ProcessError::OutputIsSource(output_root.to_path_buf()));
    }

    let discovery = scan(
        source_root,
        Some(output_root),
        &config.images.extensions,
        &config.videos.extensions,
    )?;

    let mut plan = Plan {
        output_root: output_root.to_path_buf(),
        ..Default::default()
    };
    plan.images = plan_assets(
        &discovery.images,
        source_root,
        output_root,
        &mut plan.image_stats,
    );
    plan.videos = plan_assets(
        &discovery.videos,
        source_root,
        output_root,
        &mut plan.video_stats,
    );
    plan.collisions = discovery.collisions;
    Ok(plan)
}

fn emit(events: Option<&Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // Receiver gone means nobody is printing; the run carries on.
        let _ = tx.send(event);
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) => std::fs::create_dir_all(parent),
        None => Ok(()),
    }
}

/// Run the pipeline with the production backends.
///
/// ffmpeg is resolved from `config.videos.ffmpeg` or `PATH`.
pub fn run(
    source_root: &Path,
    output_root: &Path,
    config: &OptimizerConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<RunSummary, ProcessError> {
    let backend = RustBackend::new();
    let encoder = FfmpegEncoder::locate(
        config.videos.ffmpeg.as_deref(),
        VideoProfile::from_config(&config.videos),
    );
    run_with_backends(
        &backend,
        encoder.as_ref().map(|e| e as &dyn VideoEncoder),
        source_root,
        output_root,
        config,
        events,
    )
}

/// Run the pipeline with explicit backends (allows testing with mocks).
///
/// `video_encoder = None` is the degraded mode: videos are left untouched.
pub fn run_with_backends(
    image_backend: &impl ImageBackend,
    video_encoder: Option<&dyn VideoEncoder>,
    source_root: &Path,
    output_root: &Path,
    config: &OptimizerConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<RunSummary, ProcessError> {
    std::fs::create_dir_all(output_root)
        .map_err(|e| ProcessError::OutputRoot(output_root.to_path_buf(), e))?;

    let plan = plan(source_root, output_root, config)?;
    let events = events.as_ref();

    let mut summary = RunSummary {
        images_fresh: plan.image_stats.fresh as usize,
        videos_fresh: plan.video_stats.fresh as usize,
        encoder_available: video_encoder.is_some(),
        ..Default::default()
    };

    for collision in &plan.collisions {
        record_collision(&mut summary, events, collision);
    }

    run_image_phase(image_backend, &plan, config, events, &mut summary);
    run_video_phase(video_encoder, &plan, events, &mut summary);

    Ok(summary)
}

fn record_failure(
    summary: &mut RunSummary,
    events: Option<&Sender<ProcessEvent>>,
    asset: &Asset,
    error: &TranscodeError,
) {
    let source = asset.display_path();
    let message = error.to_string();
    tracing::warn!("failed to optimize {}: {}", source, message);
    emit(
        events,
        ProcessEvent::Failed {
            kind: asset.kind,
            source: source.clone(),
            message: message.clone(),
        },
    );
    summary.failures.push(AssetFailure {
        source,
        kind: asset.kind,
        message,
    });
}

fn record_collision(
    summary: &mut RunSummary,
    events: Option<&Sender<ProcessEvent>>,
    collision: &Collision,
) {
    let source = collision.asset.display_path();
    let claimed_by = display_relative(&collision.claimed_by);
    tracing::warn!("skipping {}: output already produced by {}", source, claimed_by);
    emit(
        events,
        ProcessEvent::Collided {
            kind: collision.asset.kind,
            source: source.clone(),
            claimed_by: claimed_by.clone(),
        },
    );
    summary.collisions.push(CollisionReport {
        source,
        kind: collision.asset.kind,
        claimed_by,
    });
}

fn converted_event(entry: &PlannedAsset, output_root: &Path, dims: Option<(u32, u32)>) -> ProcessEvent {
    let output = entry
        .output
        .strip_prefix(output_root)
        .map(display_relative)
        .unwrap_or_else(|_| entry.output.display().to_string());
    ProcessEvent::Converted {
        kind: entry.asset.kind,
        source: entry.asset.display_path(),
        output,
        dimensions: dims,
    }
}

fn run_image_phase(
    backend: &impl ImageBackend,
    plan: &Plan,
    config: &OptimizerConfig,
    events: Option<&Sender<ProcessEvent>>,
    summary: &mut RunSummary,
) {
    let settings = ImageSettings::from_config(&config.images);
    let stale: Vec<&PlannedAsset> = plan.stale(MediaKind::Image).collect();

    emit(
        events,
        ProcessEvent::PhaseStarted {
            kind: MediaKind::Image,
            total: plan.images.len(),
            stale: stale.len(),
        },
    );

    let results: Vec<(&PlannedAsset, Result<(u32, u32), TranscodeError>)> = stale
        .into_par_iter()
        .map(|entry| {
            let result = ensure_parent(&entry.output)
                .map_err(TranscodeError::from)
                .and_then(|()| {
                    optimize_image(backend, &entry.source, &entry.output, &settings)
                        .map(|d| (d.width, d.height))
                        .map_err(TranscodeError::from)
                });
            if let Ok(dims) = &result {
                emit(events, converted_event(entry, &plan.output_root, Some(*dims)));
            }
            (entry, result)
        })
        .collect();

    for (entry, result) in results {
        match result {
            Ok(_) => summary.images_converted += 1,
            Err(e) => record_failure(summary, events, &entry.asset, &e),
        }
    }

    emit(
        events,
        ProcessEvent::PhaseFinished {
            kind: MediaKind::Image,
            converted: summary.images_converted,
        },
    );
}

fn run_video_phase(
    encoder: Option<&dyn VideoEncoder>,
    plan: &Plan,
    events: Option<&Sender<ProcessEvent>>,
    summary: &mut RunSummary,
) {
    let stale: Vec<&PlannedAsset> = plan.stale(MediaKind::Video).collect();

    emit(
        events,
        ProcessEvent::PhaseStarted {
            kind: MediaKind::Video,
            total: plan.videos.len(),
            stale: stale.len(),
        },
    );

    match encoder {
        None if !stale.is_empty() => {
            tracing::warn!(
                "no ffmpeg encoder available, leaving {} video(s) unoptimized",
                stale.len()
            );
            summary.videos_skipped = stale.len();
            emit(
                events,
                ProcessEvent::EncoderUnavailable {
                    pending: stale.len(),
                },
            );
        }
        None => {}
        Some(encoder) => {
            for entry in stale {
                let result = ensure_parent(&entry.output)
                    .map_err(TranscodeError::from)
                    .and_then(|()| {
                        encoder
                            .transcode(&entry.source, &entry.output)
                            .map_err(TranscodeError::from)
                    });
                match result {
                    Ok(()) => {
                        summary.videos_converted += 1;
                        emit(events, converted_event(entry, &plan.output_root, None));
                    }
                    Err(e) => record_failure(summary, events, &entry.asset, &e),
                }
            }
        }
    }

    emit(
        events,
        ProcessEvent::PhaseFinished {
            kind: MediaKind::Video,
            converted: summary.videos_converted,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::video::encoder::tests::MockEncoder;
    use std::fs;
    use std::sync::mpsc;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    struct Tree {
        _tmp: TempDir,
        source: PathBuf,
        output: PathBuf,
    }

    fn tree(files: &[&str]) -> Tree {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("pics");
        let output = tmp.path().join("pics-optimized");
        for file in files {
            let path = source.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, b"source").unwrap();
        }
        fs::create_dir_all(&source).unwrap();
        Tree {
            _tmp: tmp,
            source,
            output,
        }
    }

    fn run_mock(
        tree: &Tree,
        backend: &MockBackend,
        encoder: Option<&MockEncoder>,
    ) -> (RunSummary, Vec<ProcessEvent>) {
        let (tx, rx) = mpsc::channel();
        let summary = run_with_backends(
            backend,
            encoder.map(|e| e as &dyn VideoEncoder),
            &tree.source,
            &tree.output,
            &OptimizerConfig::default(),
            Some(tx),
        )
        .unwrap();
        (summary, rx.iter().collect())
    }

    fn touch_future(path: &Path) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(60))
            .unwrap();
    }

    // =========================================================================
    // Image phase
    // =========================================================================

    #[test]
    fn images_are_mirrored_as_webp() {
        let tree = tree(&["img/a.png", "img/nested/b.jpg"]);
        let backend = MockBackend::with_dimensions(&[("a.png", 2000, 1000), ("b.jpg", 800, 600)]);

        let (summary, _) = run_mock(&tree, &backend, None);

        assert_eq!(summary.images_converted, 2);
        assert!(tree.output.join("img/a.webp").exists());
        assert!(tree.output.join("img/nested/b.webp").exists());
        assert!(backend.get_operations().iter().any(|op| matches!(
            op,
            RecordedOp::Encode {
                width: 1600,
                height: 800,
                quality: 80,
                effort: 5,
                ..
            }
        )));
    }

    #[test]
    fn converted_event_carries_relative_paths() {
        let tree = tree(&["img/a.png"]);
        let backend = MockBackend::with_dimensions(&[("a.png", 2000, 1000)]);

        let (_, events) = run_mock(&tree, &backend, None);

        assert!(events.contains(&ProcessEvent::Converted {
            kind: MediaKind::Image,
            source: "img/a.png".into(),
            output: "img/a.webp".into(),
            dimensions: Some((1600, 800)),
        }));
    }

    #[test]
    fn rerun_without_changes_encodes_nothing() {
        let tree = tree(&["img/a.png", "img/b.png"]);
        let backend = MockBackend::with_dimensions(&[("a.png", 100, 100), ("b.png", 100, 100)]);

        run_mock(&tree, &backend, None);
        let first = backend.encode_count();
        let (summary, _) = run_mock(&tree, &backend, None);

        assert_eq!(backend.encode_count(), first);
        assert_eq!(summary.images_converted, 0);
        assert_eq!(summary.images_fresh, 2);
    }

    #[test]
    fn touched_source_is_reencoded() {
        let tree = tree(&["img/a.png", "img/b.png"]);
        let backend = MockBackend::with_dimensions(&[("a.png", 100, 100), ("b.png", 100, 100)]);
        run_mock(&tree, &backend, None);

        touch_future(&tree.source.join("img/a.png"));
        let (summary, _) = run_mock(&tree, &backend, None);

        assert_eq!(summary.images_converted, 1);
        assert_eq!(summary.images_fresh, 1);
    }

    #[test]
    fn failed_image_does_not_abort_run() {
        let tree = tree(&["img/bad.png", "img/good.png"]);
        let backend = MockBackend::with_dimensions(&[("bad.png", 10, 10), ("good.png", 10, 10)])
            .fail_encoding("bad.png");

        let (summary, events) = run_mock(&tree, &backend, None);

        assert_eq!(summary.images_converted, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].source, "img/bad.png");
        assert!(summary.has_failures());
        assert!(tree.output.join("img/good.webp").exists());
        assert!(!tree.output.join("img/bad.webp").exists());
        assert!(
            events
                .iter()
                .any(|e| matches!(e, ProcessEvent::Failed { source, .. } if source == "img/bad.png"))
        );
    }

    #[test]
    fn failed_image_is_retried_next_run() {
        let tree = tree(&["img/bad.png"]);
        let backend = MockBackend::with_dimensions(&[("bad.png", 10, 10)]).fail_encoding("bad.png");

        run_mock(&tree, &backend, None);
        run_mock(&tree, &backend, None);

        assert_eq!(backend.encode_count(), 2);
    }

    #[test]
    fn colliding_sources_encode_once() {
        let tree = tree(&["img/a.jpg", "img/a.png"]);
        let backend = MockBackend::with_dimensions(&[("a.jpg", 10, 10), ("a.png", 10, 10)]);

        let (summary, events) = run_mock(&tree, &backend, None);

        assert_eq!(backend.encode_count(), 1);
        assert_eq!(summary.images_converted, 1);
        assert_eq!(
            summary.collisions,
            vec![CollisionReport {
                source: "img/a.png".into(),
                kind: MediaKind::Image,
                claimed_by: "img/a.jpg".into(),
            }]
        );
        assert!(events.contains(&ProcessEvent::Collided {
            kind: MediaKind::Image,
            source: "img/a.png".into(),
            claimed_by: "img/a.jpg".into(),
        }));
    }

    #[test]
    fn collisions_are_not_failures() {
        let tree = tree(&["img/a.jpg", "img/a.png"]);
        let backend = MockBackend::with_dimensions(&[("a.jpg", 10, 10), ("a.png", 10, 10)]);

        run_mock(&tree, &backend, None);
        let (summary, _) = run_mock(&tree, &backend, None);

        assert_eq!(summary.collisions.len(), 1);
        assert!(summary.failures.is_empty());
        assert!(!summary.has_failures());
    }

    // =========================================================================
    // Video phase
    // =========================================================================

    #[test]
    fn videos_transcode_with_encoder() {
        let tree = tree(&["vid/b.mov", "vid/c.mp4"]);
        let encoder = MockEncoder::new();

        let (summary, _) = run_mock(&tree, &MockBackend::new(), Some(&encoder));

        assert_eq!(summary.videos_converted, 2);
        assert!(summary.encoder_available);
        assert!(tree.output.join("vid/b.mp4").exists());
        assert!(tree.output.join("vid/c.mp4").exists());
    }

    #[test]
    fn missing_encoder_leaves_videos_untouched() {
        let tree = tree(&["vid/b.mov"]);

        let (summary, events) = run_mock(&tree, &MockBackend::new(), None);

        assert_eq!(summary.videos_converted, 0);
        assert_eq!(summary.videos_skipped, 1);
        assert!(!summary.encoder_available);
        assert!(!summary.has_failures());
        assert!(!tree.output.join("vid/b.mp4").exists());
        assert!(events.contains(&ProcessEvent::EncoderUnavailable { pending: 1 }));
    }

    #[test]
    fn missing_encoder_is_silent_without_stale_videos() {
        let tree = tree(&["img/a.png"]);
        let backend = MockBackend::with_dimensions(&[("a.png", 10, 10)]);

        let (_, events) = run_mock(&tree, &backend, None);

        assert!(
            !events
                .iter()
                .any(|e| matches!(e, ProcessEvent::EncoderUnavailable { .. }))
        );
    }

    #[test]
    fn failed_video_is_recorded() {
        let tree = tree(&["vid/bad.mov", "vid/good.mov"]);
        let encoder = MockEncoder::failing(&["bad.mov"]);

        let (summary, _) = run_mock(&tree, &MockBackend::new(), Some(&encoder));

        assert_eq!(summary.videos_converted, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].kind, MediaKind::Video);
        assert!(!tree.output.join("vid/bad.mp4").exists());
    }

    #[test]
    fn video_phase_starts_after_image_phase() {
        let tree = tree(&["img/a.png", "img/b.png", "vid/c.mov"]);
        let backend = MockBackend::with_dimensions(&[("a.png", 10, 10), ("b.png", 10, 10)]);
        let encoder = MockEncoder::new();

        let (_, events) = run_mock(&tree, &backend, Some(&encoder));

        let images_done = events
            .iter()
            .position(|e| matches!(e, ProcessEvent::PhaseFinished { kind: MediaKind::Image, .. }))
            .unwrap();
        let last_image = events
            .iter()
            .rposition(|e| matches!(e, ProcessEvent::Converted { kind: MediaKind::Image, .. }))
            .unwrap();
        let first_video = events
            .iter()
            .position(|e| matches!(e, ProcessEvent::Converted { kind: MediaKind::Video, .. }))
            .unwrap();
        assert!(last_image < images_done);
        assert!(images_done < first_video);
    }

    // =========================================================================
    // Planning and fatal errors
    // =========================================================================

    #[test]
    fn plan_does_not_write() {
        let tree = tree(&["img/a.png", "vid/b.mov"]);

        let plan = plan(&tree.source, &tree.output, &OptimizerConfig::default()).unwrap();

        assert_eq!(plan.image_stats.stale, 1);
        assert_eq!(plan.video_stats.stale, 1);
        assert_eq!(plan.stale(MediaKind::Image).count(), 1);
        assert!(!tree.output.exists());
    }

    #[test]
    fn nested_output_root_is_not_rescanned() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().to_path_buf();
        let output = source.join("optimized");
        fs::create_dir_all(source.join("vid")).unwrap();
        fs::write(source.join("vid/b.mov"), b"source").unwrap();
        let encoder = MockEncoder::new();

        let mut converted = Vec::new();
        for _ in 0..3 {
            let summary = run_with_backends(
                &MockBackend::new(),
                Some(&encoder as &dyn VideoEncoder),
                &source,
                &output,
                &OptimizerConfig::default(),
                None,
            )
            .unwrap();
            converted.push(summary.videos_converted);
        }

        assert_eq!(converted, vec![1, 0, 0]);
        assert_eq!(encoder.call_count(), 1);
        assert!(output.join("vid/b.mp4").exists());
        assert!(!output.join("optimized").exists());
    }

    #[test]
    fn output_root_equal_to_source_is_fatal() {
        let tree = tree(&["vid/b.mov"]);

        let result = run_with_backends(
            &MockBackend::new(),
            None,
            &tree.source,
            &tree.source.join("vid/.."),
            &OptimizerConfig::default(),
            None,
        );

        assert!(matches!(result, Err(ProcessError::OutputIsSource(_))));
    }

    #[test]
    fn missing_source_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let result = run_with_backends(
            &MockBackend::new(),
            None,
            &tmp.path().join("missing"),
            &tmp.path().join("out"),
            &OptimizerConfig::default(),
            None,
        );

        assert!(matches!(
            result,
            Err(ProcessError::Discovery(ScanError::SourceNotFound(_)))
        ));
    }

    #[test]
    fn empty_source_creates_output_root() {
        let tree = tree(&[]);

        let (summary, _) = run_mock(&tree, &MockBackend::new(), None);

        assert_eq!(summary, RunSummary::default());
        assert!(tree.output.is_dir());
    }
}
