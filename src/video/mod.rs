//! Video transcoding through an external ffmpeg binary.
//!
//! Every video is re-encoded with one fixed [`VideoProfile`]: width capped
//! with the aspect ratio kept (even height), H.264 at a constant rate
//! factor, `yuv420p` for broad playback support, `+faststart` so playback
//! can begin before the download completes, and AAC audio at a fixed
//! bitrate.
//!
//! ffmpeg is optional. When no binary can be resolved, [`FfmpegEncoder::locate`]
//! returns `None` and the pipeline skips the video phase with a warning.

pub mod encoder;
pub mod profile;

pub use encoder::{EncodeError, FfmpegEncoder, VideoEncoder, find_ffmpeg};
pub use profile::VideoProfile;
