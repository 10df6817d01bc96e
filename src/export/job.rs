use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context as _;

use crate::effects::EffectKind;
use crate::effects::context::EffectContext;
use crate::encode::batch::{DEFAULT_FRAME_PATTERN, frame_file_name};
use crate::encode::profile::CodecProfile;
use crate::export::exporter::output_file_name;
use crate::foundation::core::Resolution;
use crate::foundation::error::{LoopfxError, LoopfxResult};

/// How frames reach the encoder.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMode {
    /// Raw frames piped to the encoder as they are rendered.
    #[default]
    Streaming,
    /// PNG sequence in a temporary directory, encoded in one run at the end.
    Batch,
}

impl DeliveryMode {
    /// Kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Streaming => "streaming",
            Self::Batch => "batch",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeliveryMode {
    type Err = LoopfxError;

    fn from_str(s: &str) -> LoopfxResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "streaming" => Ok(Self::Streaming),
            "batch" => Ok(Self::Batch),
            other => Err(LoopfxError::validation(format!(
                "unknown delivery mode '{other}' (expected streaming or batch)"
            ))),
        }
    }
}

/// Everything one export run needs.
///
/// Loaded from JSON with [`ExportJob::from_path`]; every field is optional and falls back to
/// [`ExportJob::default`]. The context's own width/height are replaced per entry of
/// `resolutions`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportJob {
    /// Effect name; unknown names fall back to golden-lights.
    pub effect: String,
    /// Timing, speed, density and size range shared by every resolution.
    pub context: EffectContext,
    /// Target sizes, each exported independently.
    pub resolutions: Vec<Resolution>,
    /// Encoder argument set.
    pub codec: CodecProfile,
    /// Streaming or batch delivery.
    pub mode: DeliveryMode,
    /// Directory receiving the videos.
    pub out_dir: PathBuf,
    /// Write encoder diagnostics to `<output base>-encoder-output.txt`.
    pub save_logs: bool,
    /// Encoder executable.
    pub encoder: PathBuf,
    /// Still-sequence file pattern for batch mode.
    pub frame_pattern: String,
    /// Parent of the per-run frame directories in batch mode; system temp dir when unset.
    pub temp_root: Option<PathBuf>,
    /// Export resolutions concurrently.
    pub parallel: bool,
    /// Worker count for parallel export; rayon's default when unset.
    pub threads: Option<usize>,
}

impl Default for ExportJob {
    fn default() -> Self {
        Self {
            effect: EffectKind::default().name().to_owned(),
            context: EffectContext::default(),
            resolutions: Resolution::default_export_set(),
            codec: CodecProfile::default(),
            mode: DeliveryMode::default(),
            out_dir: PathBuf::from("."),
            save_logs: false,
            encoder: PathBuf::from("ffmpeg"),
            frame_pattern: DEFAULT_FRAME_PATTERN.to_owned(),
            temp_root: None,
            parallel: true,
            threads: None,
        }
    }
}

impl ExportJob {
    /// Read a job from a JSON file.
    pub fn from_path(path: &Path) -> LoopfxResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read job file '{}'", path.display()))?;
        serde_json::from_str(&text)
            .map_err(|e| LoopfxError::serde(format!("job file '{}': {e}", path.display())))
    }

    /// Reject jobs that cannot produce any output.
    pub fn validate(&self) -> LoopfxResult<()> {
        if self.resolutions.is_empty() {
            return Err(LoopfxError::validation("job lists no resolutions"));
        }
        for (i, res) in self.resolutions.iter().enumerate() {
            if res.width == 0 || res.height == 0 {
                return Err(LoopfxError::validation(format!(
                    "resolution {res} must be non-zero"
                )));
            }
            if self.resolutions[..i].contains(res) {
                return Err(LoopfxError::validation(format!(
                    "resolution {res} is listed twice"
                )));
            }
        }
        if self.threads == Some(0) {
            return Err(LoopfxError::validation("'threads' must be >= 1 when set"));
        }
        if self.frame_pattern.contains(['/', '\\']) {
            return Err(LoopfxError::validation(format!(
                "frame pattern '{}' must be a bare file name",
                self.frame_pattern
            )));
        }
        frame_file_name(&self.frame_pattern, 0)?;
        Ok(())
    }

    /// Variant the exporter will render, after fallback.
    pub fn effect_kind(&self) -> EffectKind {
        EffectKind::from_name_or_default(&self.effect)
    }

    /// Job context resized to `res`.
    pub fn context_for(&self, res: Resolution) -> EffectContext {
        self.context.clone().with_resolution(res)
    }

    /// `<out_dir>/<effect>-<W>x<H>.<ext>`.
    pub fn output_path(&self, res: Resolution) -> PathBuf {
        self.out_dir
            .join(output_file_name(self.effect_kind(), res, self.codec))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/job.rs"]
mod tests;
