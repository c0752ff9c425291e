//! # optimedia
//!
//! Incremental media optimization for static sites. A source tree of images
//! and videos is mirrored into an output tree of web-ready assets, and a
//! cache-first runtime layer serves that tree.
//!
//! # Architecture
//!
//! ```text
//! pics/ ──► scan ──► freshness ──► imaging (WebP) ──┐
//!                        │                          ├──► pics-optimized/
//!                        └───────► video (ffmpeg) ──┘
//!
//! GET /pics-optimized/... ──► cache::MediaCache ──► storage | network
//! ```
//!
//! Only stale assets are encoded: an output is fresh when its modification
//! time is at least that of its source. Reruns over an unchanged tree encode
//! nothing, and a failed asset is retried on the next run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the source root and classifies files into images and videos |
//! | [`mapping`] | Source-relative path → output path (`.webp` / `.mp4`) |
//! | [`freshness`] | mtime comparison deciding what needs encoding |
//! | [`imaging`] | Image backend trait, dimension math, WebP encoding |
//! | [`video`] | ffmpeg discovery, encoding profile, transcoding |
//! | [`process`] | The run: image phase (parallel) then video phase (sequential) |
//! | [`cache`] | Runtime cache-first layer and its service worker rendering |
//! | [`config`] | `optimedia.toml` loading, merging, and validation |
//! | [`types`] | Shared types (`Asset`, `MediaKind`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Output per Source
//!
//! Every source maps to exactly one output with the same relative path and a
//! new extension. No size variants, no manifest. Two sources that would claim
//! the same output (`a.png` + `a.jpg`) are reported and only the first one in
//! path order is encoded.
//!
//! ## Videos Are Optional
//!
//! Image encoding is built in (`image` + libwebp). Video encoding shells out
//! to ffmpeg; without it the run still succeeds, the videos are left alone and
//! a warning is printed.
//!
//! ## Generation-Based Cache Invalidation
//!
//! The runtime cache never revalidates individual entries. Deploying new
//! assets means bumping `[cache] name`; activation of the new generation
//! deletes every other one.

pub mod cache;
pub mod config;
pub mod freshness;
pub mod imaging;
pub mod mapping;
pub mod output;
pub mod process;
pub mod scan;
pub mod types;
pub mod video;
