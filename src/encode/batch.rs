use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Context as _;
use tempfile::TempDir;

use crate::encode::ffmpeg::EncoderOpts;
use crate::encode::profile::EncoderInput;
use crate::encode::sink::{FrameGate, FrameSink, SinkConfig};
use crate::encode::still::write_bgra_png;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LoopfxError, LoopfxResult};

/// Default file pattern of the still sequence.
pub const DEFAULT_FRAME_PATTERN: &str = "frame_%05d.png";

/// Writes every frame as a numbered PNG into a temporary directory, then runs the encoder once
/// over the sequence.
///
/// The directory is deleted only after the encoder exits successfully. Any other outcome,
/// including dropping the sink before `end`, leaves it on disk for inspection.
pub struct BatchSink {
    opts: EncoderOpts,
    pattern: String,
    temp_root: Option<PathBuf>,
    dir: Option<TempDir>,
    gate: FrameGate,
}

impl BatchSink {
    /// Create a sink with the default frame pattern, using the system temp directory.
    pub fn new(opts: EncoderOpts) -> Self {
        Self {
            opts,
            pattern: DEFAULT_FRAME_PATTERN.to_owned(),
            temp_root: None,
            dir: None,
            gate: FrameGate::default(),
        }
    }

    /// Use a custom printf-style pattern (`%d` or `%0Nd`).
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Create the per-run frame directory under `root` instead of the system temp directory.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Directory currently holding the frames, while a run is in progress.
    pub fn frames_dir(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    fn create_dir(&self) -> LoopfxResult<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("loopfx-frames-");
        let created = match &self.temp_root {
            Some(root) => {
                std::fs::create_dir_all(root).map_err(|source| LoopfxError::Directory {
                    path: root.clone(),
                    source,
                })?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        };
        created.map_err(|source| LoopfxError::Directory {
            path: self.temp_root.clone().unwrap_or_else(std::env::temp_dir),
            source,
        })
    }

    fn encode_sequence(&self, dir: &Path, cfg: SinkConfig) -> LoopfxResult<()> {
        let mut cmd = self.opts.command(&EncoderInput::StillSequence {
            pattern: dir.join(&self.pattern),
            fps: cfg.fps,
        })?;
        cmd.stdin(Stdio::null());
        let child = self.opts.spawn(cmd)?;
        let output = child
            .wait_with_output()
            .context("failed to wait for the encoder to finish")?;
        if !output.status.success() {
            return Err(LoopfxError::NonZeroExit {
                status: output.status,
                stderr: self.opts.failure_detail(&output.stderr),
            });
        }
        Ok(())
    }
}

impl FrameSink for BatchSink {
    fn begin(&mut self, cfg: SinkConfig) -> LoopfxResult<()> {
        if self.dir.is_some() {
            return Err(LoopfxError::encode("batch sink already started"));
        }
        frame_file_name(&self.pattern, 0)?;
        self.opts.check_config(&cfg)?;
        self.gate.open(cfg)?;
        let dir = self.create_dir()?;
        tracing::debug!(dir = %dir.path().display(), "batch frame directory created");
        self.dir = Some(dir);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, bgra: &[u8]) -> LoopfxResult<()> {
        let cfg = self.gate.admit(idx, bgra.len())?;
        let dir = self
            .dir
            .as_ref()
            .ok_or_else(|| LoopfxError::encode("batch sink not started"))?;
        let path = dir.path().join(frame_file_name(&self.pattern, idx.0)?);
        write_bgra_png(&path, cfg.width, cfg.height, bgra)
    }

    fn end(&mut self) -> LoopfxResult<()> {
        let frames = self.gate.frames_seen();
        let cfg = self.gate.close()?;
        let dir = self
            .dir
            .take()
            .ok_or_else(|| LoopfxError::encode("batch sink not started"))?;

        match self.encode_sequence(dir.path(), cfg) {
            Ok(()) => {
                dir.close()
                    .context("failed to remove the batch frame directory")?;
                tracing::debug!(frames, out = %self.opts.out_path.display(), "batch encode finished");
                Ok(())
            }
            Err(err) => {
                let kept = dir.keep();
                tracing::warn!(dir = %kept.display(), "encoder failed; frame directory preserved");
                Err(err)
            }
        }
    }
}

impl Drop for BatchSink {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let kept = dir.keep();
            tracing::warn!(dir = %kept.display(), "batch export interrupted; frame directory preserved");
        }
    }
}

/// Expand the single `%d` / `%0Nd` placeholder of `pattern` with `n`.
pub fn frame_file_name(pattern: &str, n: u64) -> LoopfxResult<String> {
    let bad = || {
        LoopfxError::validation(format!(
            "frame pattern '{pattern}' needs exactly one %d or %0Nd placeholder"
        ))
    };
    let start = pattern.find('%').ok_or_else(bad)?;
    let rest = &pattern[start + 1..];
    let end = rest.find('d').ok_or_else(bad)?;
    let spec = &rest[..end];
    let width = if spec.is_empty() {
        0
    } else if spec.starts_with('0') && spec.bytes().all(|b| b.is_ascii_digit()) {
        spec.parse::<usize>().map_err(|_| bad())?
    } else {
        return Err(bad());
    };
    let tail = &rest[end + 1..];
    if tail.contains('%') {
        return Err(bad());
    }
    Ok(format!("{}{n:0width$}{tail}", &pattern[..start]))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/batch.rs"]
mod tests;
