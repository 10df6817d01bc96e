use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::foundation::error::{LoopfxError, LoopfxResult};

/// Encoder argument set and container for an export.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CodecProfile {
    /// VP8 color stream plus a gray alpha stream, both tagged `alpha_mode=1`, in WebM.
    DualStreamAlpha,
    /// VP9 `yuva420p` with alt-ref frames, in WebM.
    #[default]
    SingleStreamAlpha,
    /// PNG frames in a QuickTime container, full RGBA.
    LosslessRgba,
}

impl CodecProfile {
    /// Every profile.
    pub const ALL: [Self; 3] = [
        Self::DualStreamAlpha,
        Self::SingleStreamAlpha,
        Self::LosslessRgba,
    ];

    /// Kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::DualStreamAlpha => "dual-stream-alpha",
            Self::SingleStreamAlpha => "single-stream-alpha",
            Self::LosslessRgba => "lossless-rgba",
        }
    }

    /// Output file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::DualStreamAlpha | Self::SingleStreamAlpha => "webm",
            Self::LosslessRgba => "mov",
        }
    }

    /// 4:2:0 chroma needs both dimensions even.
    pub fn needs_even_dimensions(self) -> bool {
        !matches!(self, Self::LosslessRgba)
    }

    fn output_args(self) -> &'static [&'static str] {
        match self {
            Self::DualStreamAlpha => &[
                "-an",
                "-filter_complex",
                "[0:v]split=2[c][a];[c]format=yuv420p[color];[a]alphaextract,format=gray[alpha]",
                "-map",
                "[color]",
                "-map",
                "[alpha]",
                "-c:v:0",
                "libvpx",
                "-pix_fmt:v:0",
                "yuv420p",
                "-b:v:0",
                "0",
                "-crf:v:0",
                "22",
                "-c:v:1",
                "libvpx",
                "-pix_fmt:v:1",
                "yuv420p",
                "-b:v:1",
                "0",
                "-crf:v:1",
                "22",
                "-g",
                "60",
                "-deadline",
                "good",
                "-cpu-used",
                "4",
                "-auto-alt-ref",
                "0",
                "-metadata:s:v:0",
                "alpha_mode=1",
                "-metadata:s:v:1",
                "alpha_mode=1",
            ],
            Self::SingleStreamAlpha => &[
                "-an",
                "-vf",
                "format=rgba,format=yuva420p",
                "-c:v",
                "libvpx-vp9",
                "-pix_fmt",
                "yuva420p",
                "-b:v",
                "0",
                "-crf",
                "22",
                "-g",
                "60",
                "-deadline",
                "good",
                "-cpu-used",
                "4",
                "-auto-alt-ref",
                "1",
                "-lag-in-frames",
                "25",
                "-metadata:s:v:0",
                "alpha_mode=1",
            ],
            Self::LosslessRgba => &["-an", "-c:v", "png", "-pix_fmt", "rgba"],
        }
    }
}

impl fmt::Display for CodecProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodecProfile {
    type Err = LoopfxError;

    fn from_str(s: &str) -> LoopfxResult<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                LoopfxError::validation(format!(
                    "unknown codec profile '{s}' (expected dual-stream-alpha, single-stream-alpha \
                     or lossless-rgba)"
                ))
            })
    }
}

/// What the encoder reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncoderInput {
    /// Raw BGRA frames on stdin.
    RawBgra {
        /// Frame width.
        width: u32,
        /// Frame height.
        height: u32,
        /// Input rate.
        fps: u32,
    },
    /// Numbered still images matching a printf-style pattern, starting at 0.
    StillSequence {
        /// Path pattern such as `dir/frame_%05d.png`.
        pattern: PathBuf,
        /// Input rate.
        fps: u32,
    },
}

/// Full encoder argument list (without the program name).
///
/// `verbose` keeps the encoder's informational output, used when logs are saved to a file.
pub fn encoder_args(
    profile: CodecProfile,
    input: &EncoderInput,
    out: &Path,
    overwrite: bool,
    verbose: bool,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    push_all(
        &mut args,
        &[
            "-hide_banner",
            "-loglevel",
            if verbose { "info" } else { "error" },
            if overwrite { "-y" } else { "-n" },
        ],
    );

    match input {
        EncoderInput::RawBgra { width, height, fps } => {
            let size = format!("{width}x{height}");
            let rate = fps.to_string();
            push_all(
                &mut args,
                &[
                    "-f", "rawvideo", "-pix_fmt", "bgra", "-s", &size, "-r", &rate, "-i", "pipe:0",
                ],
            );
        }
        EncoderInput::StillSequence { pattern, fps } => {
            let rate = fps.to_string();
            push_all(&mut args, &["-framerate", &rate, "-start_number", "0", "-i"]);
            args.push(pattern.as_os_str().to_owned());
        }
    }

    args.extend(profile.output_args().iter().map(OsString::from));
    args.push(out.as_os_str().to_owned());
    args
}

fn push_all(args: &mut Vec<OsString>, items: &[&str]) {
    args.extend(items.iter().map(OsString::from));
}

#[cfg(test)]
#[path = "../../tests/unit/encode/profile.rs"]
mod tests;
