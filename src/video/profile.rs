//! The fixed encoding profile and its ffmpeg command line.

use crate::config::VideosConfig;
use std::ffi::OsString;
use std::path::Path;

/// Encoding profile applied to every video in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoProfile {
    pub max_width: u32,
    pub codec: String,
    pub crf: u32,
    pub preset: String,
    pub pixel_format: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
}

impl VideoProfile {
    pub fn from_config(config: &VideosConfig) -> Self {
        Self {
            max_width: config.max_width,
            codec: config.codec.clone(),
            crf: config.crf,
            preset: config.preset.clone(),
            pixel_format: config.pixel_format.clone(),
            audio_codec: config.audio_codec.clone(),
            audio_bitrate: config.audio_bitrate.clone(),
        }
    }

    /// Scale filter: width `min(max_width, iw)`, height derived and kept even.
    pub fn scale_filter(&self) -> String {
        format!("scale='min({},iw)':-2", self.max_width)
    }

    /// Full ffmpeg argument list for `input` → `output`.
    ///
    /// The muxer is forced to mp4 so `output` may carry any extension
    /// (the encoder writes to a temp file first).
    pub fn ffmpeg_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-hide_banner",
            "-nostdin",
            "-loglevel",
            "error",
            "-y",
            "-i",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        args.push(input.as_os_str().to_owned());

        let crf = self.crf.to_string();
        let filter = self.scale_filter();
        for arg in [
            "-vf",
            filter.as_str(),
            "-c:v",
            self.codec.as_str(),
            "-crf",
            crf.as_str(),
            "-preset",
            self.preset.as_str(),
            "-pix_fmt",
            self.pixel_format.as_str(),
            "-movflags",
            "+faststart",
            "-c:a",
            self.audio_codec.as_str(),
            "-b:a",
            self.audio_bitrate.as_str(),
            "-f",
            "mp4",
        ] {
            args.push(OsString::from(arg));
        }
        args.push(output.as_os_str().to_owned());
        args
    }
}

impl Default for VideoProfile {
    fn default() -> Self {
        Self::from_config(&VideosConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_as_strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    /// Value following `flag` in the argument list.
    fn value_of<'a>(args: &'a [String], flag: &str) -> &'a str {
        let idx = args.iter().position(|a| a == flag).unwrap();
        &args[idx + 1]
    }

    #[test]
    fn default_profile_values() {
        let profile = VideoProfile::default();
        assert_eq!(profile.max_width, 1280);
        assert_eq!(profile.codec, "libx264");
        assert_eq!(profile.crf, 27);
        assert_eq!(profile.preset, "faster");
        assert_eq!(profile.pixel_format, "yuv420p");
        assert_eq!(profile.audio_codec, "aac");
        assert_eq!(profile.audio_bitrate, "128k");
    }

    #[test]
    fn scale_filter_caps_width_and_keeps_height_even() {
        assert_eq!(
            VideoProfile::default().scale_filter(),
            "scale='min(1280,iw)':-2"
        );
    }

    #[test]
    fn args_carry_the_full_profile() {
        let args = args_as_strings(
            &VideoProfile::default().ffmpeg_args(Path::new("in/b.mov"), Path::new("out/b.mp4")),
        );

        assert_eq!(value_of(&args, "-i"), "in/b.mov");
        assert_eq!(value_of(&args, "-vf"), "scale='min(1280,iw)':-2");
        assert_eq!(value_of(&args, "-c:v"), "libx264");
        assert_eq!(value_of(&args, "-crf"), "27");
        assert_eq!(value_of(&args, "-preset"), "faster");
        assert_eq!(value_of(&args, "-pix_fmt"), "yuv420p");
        assert_eq!(value_of(&args, "-movflags"), "+faststart");
        assert_eq!(value_of(&args, "-c:a"), "aac");
        assert_eq!(value_of(&args, "-b:a"), "128k");
        assert_eq!(value_of(&args, "-f"), "mp4");
        assert_eq!(args.last().unwrap(), "out/b.mp4");
        assert!(args.contains(&"-y".to_string()));
    }
}
