//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Optimize
//!
//! ```text
//! Optimizing images (3 found)
//!     2 up to date
//!     converted img/a.png → img/a.webp (1600x800)
//!     failed img/c.png: Processing failed: Failed to decode ...
//!     skipped img/d.png: output already produced by img/d.jpg
//! Optimized 1 image
//! Optimizing videos (1 found)
//!     warning: skipped 1 video, no ffmpeg encoder found
//! Optimized 0 videos
//! ```
//!
//! ## Check
//!
//! ```text
//! Images: 2 up to date, 1 to encode (3 total)
//!     img/a.png → img/a.webp
//! Videos: 1 to encode
//!     vid/b.mov → vid/b.mp4
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::mapping::map_relative;
use crate::process::{Plan, ProcessEvent, RunSummary};
use crate::types::{MediaKind, display_relative};
use std::path::Path;

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn count_label(count: usize, kind: MediaKind) -> String {
    format!("{} {}", count, kind.label(count))
}

fn kind_title(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "Images",
        MediaKind::Video => "Videos",
    }
}

// ============================================================================
// Optimize
// ============================================================================

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::PhaseStarted { kind, total, stale } => {
            let mut lines = vec![format!("Optimizing {} ({} found)", kind.label(2), total)];
            let fresh = total.saturating_sub(*stale);
            if fresh > 0 {
                lines.push(format!("{}{} up to date", indent(1), fresh));
            }
            lines
        }
        ProcessEvent::Converted {
            source,
            output,
            dimensions,
            ..
        } => {
            let line = match dimensions {
                Some((w, h)) => format!(
                    "{}converted {} \u{2192} {} ({}x{})",
                    indent(1),
                    source,
                    output,
                    w,
                    h
                ),
                None => format!("{}converted {} \u{2192} {}", indent(1), source, output),
            };
            vec![line]
        }
        ProcessEvent::Failed {
            source, message, ..
        } => vec![format!("{}failed {}: {}", indent(1), source, message)],
        ProcessEvent::Collided {
            source, claimed_by, ..
        } => vec![format!(
            "{}skipped {}: output already produced by {}",
            indent(1),
            source,
            claimed_by
        )],
        ProcessEvent::EncoderUnavailable { pending } => vec![format!(
            "{}warning: skipped {}, no ffmpeg encoder found",
            indent(1),
            count_label(*pending, MediaKind::Video)
        )],
        ProcessEvent::PhaseFinished { kind, converted } => {
            vec![format!("Optimized {}", count_label(*converted, *kind))]
        }
    }
}

/// Format the end-of-run summary.
pub fn format_summary(summary: &RunSummary) -> Vec<String> {
    let mut lines = Vec::new();
    let fresh = summary.images_fresh + summary.videos_fresh;
    lines.push(format!(
        "Converted {}, {} ({} up to date)",
        count_label(summary.images_converted, MediaKind::Image),
        count_label(summary.videos_converted, MediaKind::Video),
        fresh
    ));

    if summary.videos_skipped > 0 {
        lines.push(format!(
            "Skipped {} (install ffmpeg or set [videos] ffmpeg)",
            count_label(summary.videos_skipped, MediaKind::Video)
        ));
    }

    if summary.has_failures() {
        let n = summary.failures.len();
        lines.push(format!(
            "{} {} failed:",
            n,
            if n == 1 { "asset" } else { "assets" }
        ));
        for failure in &summary.failures {
            lines.push(format!("{}{}: {}", indent(1), failure.source, failure.message));
        }
    }

    if !summary.collisions.is_empty() {
        let n = summary.collisions.len();
        lines.push(format!(
            "{} {} skipped, output already produced by another source (rename to fix):",
            n,
            if n == 1 { "source" } else { "sources" }
        ));
        for collision in &summary.collisions {
            lines.push(format!(
                "{}{} (output claimed by {})",
                indent(1),
                collision.source,
                collision.claimed_by
            ));
        }
    }
    lines
}

pub fn print_process_event(event: &ProcessEvent) {
    for line in format_process_event(event) {
        println!("{}", line);
    }
}

pub fn print_summary(summary: &RunSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format a dry-run plan: freshness per kind and the assets that would encode.
pub fn format_plan(plan: &Plan) -> Vec<String> {
    let mut lines = Vec::new();

    for kind in [MediaKind::Image, MediaKind::Video] {
        if plan.entries(kind).is_empty() {
            continue;
        }
        lines.push(format!("{}: {}", kind_title(kind), plan.stats(kind)));
        for entry in plan.stale(kind) {
            let rel = &entry.asset.relative_path;
            lines.push(format!(
                "{}{} \u{2192} {}",
                indent(1),
                display_relative(rel),
                display_relative(&map_relative(rel, kind))
            ));
        }
    }

    if !plan.collisions.is_empty() {
        lines.push("Collisions".to_string());
        for collision in &plan.collisions {
            lines.push(format!(
                "{}{} (output claimed by {})",
                indent(1),
                collision.asset.display_path(),
                display_relative(&collision.claimed_by)
            ));
        }
    }

    if lines.is_empty() {
        lines.push("No media found".to_string());
    }
    lines
}

pub fn print_plan(plan: &Plan) {
    for line in format_plan(plan) {
        println!("{}", line);
    }
}

// ============================================================================
// Tools
// ============================================================================

/// Format external tool availability.
pub fn format_tools(ffmpeg: Option<&Path>) -> Vec<String> {
    let ffmpeg_line = match ffmpeg {
        Some(path) => format!("ffmpeg: {}", path.display()),
        None => "ffmpeg: not found (videos will be skipped)".to_string(),
    };
    vec![
        ffmpeg_line,
        "webp: libwebp (built in)".to_string(),
    ]
}

pub fn print_tools(ffmpeg: Option<&Path>) {
    for line in format_tools(ffmpeg) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freshness::FreshnessStats;
    use crate::process::{AssetFailure, CollisionReport, PlannedAsset};
    use crate::scan::Collision;
    use crate::types::Asset;
    use std::path::PathBuf;

    // =========================================================================
    // Process events
    // =========================================================================

    #[test]
    fn phase_started_shows_found_count() {
        let lines = format_process_event(&ProcessEvent::PhaseStarted {
            kind: MediaKind::Image,
            total: 3,
            stale: 3,
        });
        assert_eq!(lines, vec!["Optimizing images (3 found)"]);
    }

    #[test]
    fn phase_started_mentions_fresh_assets() {
        let lines = format_process_event(&ProcessEvent::PhaseStarted {
            kind: MediaKind::Video,
            total: 3,
            stale: 1,
        });
        assert_eq!(lines[0], "Optimizing videos (3 found)");
        assert_eq!(lines[1], "    2 up to date");
    }

    #[test]
    fn converted_image_shows_dimensions() {
        let lines = format_process_event(&ProcessEvent::Converted {
            kind: MediaKind::Image,
            source: "img/a.png".into(),
            output: "img/a.webp".into(),
            dimensions: Some((1600, 800)),
        });
        assert_eq!(
            lines,
            vec!["    converted img/a.png \u{2192} img/a.webp (1600x800)"]
        );
    }

    #[test]
    fn converted_video_has_no_dimensions() {
        let lines = format_process_event(&ProcessEvent::Converted {
            kind: MediaKind::Video,
            source: "vid/b.mov".into(),
            output: "vid/b.mp4".into(),
            dimensions: None,
        });
        assert_eq!(lines, vec!["    converted vid/b.mov \u{2192} vid/b.mp4"]);
    }

    #[test]
    fn failure_line() {
        let lines = format_process_event(&ProcessEvent::Failed {
            kind: MediaKind::Image,
            source: "img/c.png".into(),
            message: "corrupt".into(),
        });
        assert_eq!(lines, vec!["    failed img/c.png: corrupt"]);
    }

    #[test]
    fn collision_line() {
        let lines = format_process_event(&ProcessEvent::Collided {
            kind: MediaKind::Image,
            source: "img/a.png".into(),
            claimed_by: "img/a.jpg".into(),
        });
        assert_eq!(
            lines,
            vec!["    skipped img/a.png: output already produced by img/a.jpg"]
        );
    }

    #[test]
    fn encoder_warning_pluralizes() {
        let one = format_process_event(&ProcessEvent::EncoderUnavailable { pending: 1 });
        let many = format_process_event(&ProcessEvent::EncoderUnavailable { pending: 4 });
        assert_eq!(
            one,
            vec!["    warning: skipped 1 video, no ffmpeg encoder found"]
        );
        assert_eq!(
            many,
            vec!["    warning: skipped 4 videos, no ffmpeg encoder found"]
        );
    }

    #[test]
    fn phase_finished_pluralizes() {
        let one = format_process_event(&ProcessEvent::PhaseFinished {
            kind: MediaKind::Image,
            converted: 1,
        });
        let none = format_process_event(&ProcessEvent::PhaseFinished {
            kind: MediaKind::Video,
            converted: 0,
        });
        assert_eq!(one, vec!["Optimized 1 image"]);
        assert_eq!(none, vec!["Optimized 0 videos"]);
    }

    // =========================================================================
    // Summary
    // =========================================================================

    #[test]
    fn summary_clean_run() {
        let summary = RunSummary {
            images_converted: 2,
            videos_converted: 1,
            images_fresh: 4,
            videos_fresh: 1,
            encoder_available: true,
            ..Default::default()
        };
        assert_eq!(
            format_summary(&summary),
            vec!["Converted 2 images, 1 video (5 up to date)"]
        );
    }

    #[test]
    fn summary_lists_failures_and_skips() {
        let summary = RunSummary {
            videos_skipped: 2,
            failures: vec![AssetFailure {
                source: "img/c.png".into(),
                kind: MediaKind::Image,
                message: "corrupt".into(),
            }],
            ..Default::default()
        };
        let lines = format_summary(&summary);
        assert_eq!(lines[1], "Skipped 2 videos (install ffmpeg or set [videos] ffmpeg)");
        assert_eq!(lines[2], "1 asset failed:");
        assert_eq!(lines[3], "    img/c.png: corrupt");
    }

    #[test]
    fn summary_lists_collisions_apart_from_failures() {
        let summary = RunSummary {
            images_converted: 1,
            collisions: vec![CollisionReport {
                source: "img/a.png".into(),
                kind: MediaKind::Image,
                claimed_by: "img/a.jpg".into(),
            }],
            ..Default::default()
        };
        assert_eq!(
            format_summary(&summary),
            vec![
                "Converted 1 image, 0 videos (0 up to date)",
                "1 source skipped, output already produced by another source (rename to fix):",
                "    img/a.png (output claimed by img/a.jpg)",
            ]
        );
    }

    // =========================================================================
    // Plan
    // =========================================================================

    fn planned(rel: &str, kind: MediaKind, fresh: bool) -> PlannedAsset {
        PlannedAsset {
            asset: Asset::new(rel, kind),
            source: PathBuf::from("pics").join(rel),
            output: PathBuf::new(),
            fresh,
        }
    }

    #[test]
    fn plan_lists_stale_assets_only() {
        let plan = Plan {
            images: vec![
                planned("img/a.png", MediaKind::Image, false),
                planned("img/b.png", MediaKind::Image, true),
            ],
            image_stats: FreshnessStats { fresh: 1, stale: 1 },
            ..Default::default()
        };
        assert_eq!(
            format_plan(&plan),
            vec![
                "Images: 1 up to date, 1 to encode (2 total)",
                "    img/a.png \u{2192} img/a.webp",
            ]
        );
    }

    #[test]
    fn plan_shows_collisions() {
        let plan = Plan {
            collisions: vec![Collision {
                asset: Asset::new("img/a.png", MediaKind::Image),
                claimed_by: PathBuf::from("img/a.jpg"),
            }],
            ..Default::default()
        };
        assert_eq!(
            format_plan(&plan),
            vec!["Collisions", "    img/a.png (output claimed by img/a.jpg)"]
        );
    }

    #[test]
    fn empty_plan() {
        assert_eq!(format_plan(&Plan::default()), vec!["No media found"]);
    }

    // =========================================================================
    // Tools
    // =========================================================================

    #[test]
    fn tools_without_ffmpeg() {
        let lines = format_tools(None);
        assert_eq!(lines[0], "ffmpeg: not found (videos will be skipped)");
    }

    #[test]
    fn tools_with_ffmpeg() {
        let lines = format_tools(Some(Path::new("/usr/bin/ffmpeg")));
        assert_eq!(lines[0], "ffmpeg: /usr/bin/ffmpeg");
    }
}
