use std::fs::File;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use anyhow::Context as _;

use crate::encode::profile::{CodecProfile, EncoderInput, encoder_args};
use crate::encode::sink::{FrameGate, FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LoopfxError, LoopfxResult};

/// Where and how an encoder run writes its output.
#[derive(Clone, Debug)]
pub struct EncoderOpts {
    /// Output video path.
    pub out_path: PathBuf,
    /// Argument set and container.
    pub profile: CodecProfile,
    /// Encoder executable, `ffmpeg` unless overridden.
    pub program: PathBuf,
    /// Redirect the encoder's diagnostics to this file instead of capturing them.
    pub log_path: Option<PathBuf>,
    /// Overwrite an existing output file.
    pub overwrite: bool,
}

impl EncoderOpts {
    /// Options for `out_path` with the default program, no log file and overwrite on.
    pub fn new(out_path: impl Into<PathBuf>, profile: CodecProfile) -> Self {
        Self {
            out_path: out_path.into(),
            profile,
            program: PathBuf::from("ffmpeg"),
            log_path: None,
            overwrite: true,
        }
    }

    /// Use a different encoder executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Send diagnostics to `<output base>-encoder-output.txt` next to the output.
    pub fn with_saved_log(mut self) -> Self {
        self.log_path = Some(encoder_log_path(&self.out_path));
        self
    }

    pub(crate) fn check_config(&self, cfg: &SinkConfig) -> LoopfxResult<()> {
        cfg.validate()?;
        if self.profile.needs_even_dimensions()
            && (!cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2))
        {
            return Err(LoopfxError::validation(format!(
                "{} output needs even width/height, got {}x{}",
                self.profile, cfg.width, cfg.height
            )));
        }
        ensure_parent_dir(&self.out_path)?;
        if !self.overwrite && self.out_path.exists() {
            return Err(LoopfxError::validation(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }
        Ok(())
    }

    /// Command with arguments and stderr wiring in place; stdin is left to the caller.
    pub(crate) fn command(&self, input: &EncoderInput) -> LoopfxResult<Command> {
        let args = encoder_args(
            self.profile,
            input,
            &self.out_path,
            self.overwrite,
            self.log_path.is_some(),
        );
        tracing::debug!(
            program = %self.program.display(),
            args = ?args,
            "encoder command"
        );

        let mut cmd = Command::new(&self.program);
        cmd.args(&args).stdout(Stdio::null());
        match &self.log_path {
            Some(log) => {
                let file = File::create(log)
                    .with_context(|| format!("failed to create encoder log '{}'", log.display()))?;
                cmd.stderr(Stdio::from(file));
            }
            None => {
                cmd.stderr(Stdio::piped());
            }
        }
        Ok(cmd)
    }

    pub(crate) fn spawn(&self, mut cmd: Command) -> LoopfxResult<Child> {
        cmd.spawn().map_err(|source| LoopfxError::Spawn {
            program: self.program.display().to_string(),
            source,
        })
    }

    /// Stderr text for a failure report.
    pub(crate) fn failure_detail(&self, captured: &[u8]) -> String {
        match &self.log_path {
            Some(log) => format!("see {}", log.display()),
            None => String::from_utf8_lossy(captured).trim().to_owned(),
        }
    }
}

/// Streams raw BGRA frames into the encoder's stdin as they are produced.
pub struct StreamingSink {
    opts: EncoderOpts,
    gate: FrameGate,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl StreamingSink {
    /// Create a sink; nothing is spawned until `begin`.
    pub fn new(opts: EncoderOpts) -> Self {
        Self {
            opts,
            gate: FrameGate::default(),
            child: None,
            stdin: None,
            stderr_drain: None,
        }
    }

    fn write_frame(&mut self, bgra: &[u8]) -> LoopfxResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| LoopfxError::encode("encoder stdin is already closed"))?;
        let expected = bgra.len();
        let mut written = 0;
        while written < expected {
            match stdin.write(&bgra[written..]) {
                Ok(0) => {
                    return Err(LoopfxError::PartialWrite {
                        expected,
                        written,
                        source: None,
                    });
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    return Err(LoopfxError::PartialWrite {
                        expected,
                        written,
                        source: Some(e),
                    });
                }
            }
        }
        Ok(())
    }
}

impl FrameSink for StreamingSink {
    fn begin(&mut self, cfg: SinkConfig) -> LoopfxResult<()> {
        if self.child.is_some() {
            return Err(LoopfxError::encode("streaming sink already started"));
        }
        self.opts.check_config(&cfg)?;
        self.gate.open(cfg)?;

        let mut cmd = self.opts.command(&EncoderInput::RawBgra {
            width: cfg.width,
            height: cfg.height,
            fps: cfg.fps,
        })?;
        cmd.stdin(Stdio::piped());
        let mut child = self.opts.spawn(cmd)?;

        let stdin = child.stdin.take();
        if stdin.is_none() {
            let _ = child.kill();
            let _ = child.wait();
            return Err(LoopfxError::encode("failed to open encoder stdin"));
        }
        self.stderr_drain = child.stderr.take().map(|mut stderr| {
            std::thread::spawn(move || {
                let mut bytes = Vec::new();
                stderr.read_to_end(&mut bytes)?;
                Ok(bytes)
            })
        });
        self.stdin = stdin;
        self.child = Some(child);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, bgra: &[u8]) -> LoopfxResult<()> {
        self.gate.admit(idx, bgra.len())?;
        self.write_frame(bgra)
    }

    fn end(&mut self) -> LoopfxResult<()> {
        self.gate.close()?;
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| LoopfxError::encode("streaming sink not started"))?;
        let status = child
            .wait()
            .context("failed to wait for the encoder to finish")?;
        let stderr = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| LoopfxError::encode("encoder stderr drain thread panicked"))?
                .context("failed to read encoder stderr")?,
            None => Vec::new(),
        };

        if !status.success() {
            return Err(LoopfxError::NonZeroExit {
                status,
                stderr: self.opts.failure_detail(&stderr),
            });
        }
        tracing::debug!(out = %self.opts.out_path.display(), "streaming encode finished");
        Ok(())
    }
}

impl Drop for StreamingSink {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            tracing::warn!(
                out = %self.opts.out_path.display(),
                "encoder abandoned before end; terminating"
            );
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
    }
}

/// `<output base>-encoder-output.txt` beside `out_path`.
pub(crate) fn encoder_log_path(out_path: &Path) -> PathBuf {
    let stem = out_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_owned());
    out_path.with_file_name(format!("{stem}-encoder-output.txt"))
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> LoopfxResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
