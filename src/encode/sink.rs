use crate::foundation::core::{FrameIndex, Resolution};
use crate::foundation::error::{LoopfxError, LoopfxResult};

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
}

impl SinkConfig {
    /// Byte length of one BGRA frame.
    pub fn frame_len(&self) -> usize {
        Resolution::new(self.width, self.height).frame_len()
    }

    pub(crate) fn validate(&self) -> LoopfxResult<()> {
        if self.fps == 0 {
            return Err(LoopfxError::validation("fps must be non-zero"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(LoopfxError::validation("sink width/height must be non-zero"));
        }
        Ok(())
    }
}

/// Consumer of emitted frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing [`FrameIndex`] values,
/// each carrying exactly `width * height * 4` BGRA bytes.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> LoopfxResult<()>;
    /// Push one BGRA frame.
    fn push_frame(&mut self, idx: FrameIndex, bgra: &[u8]) -> LoopfxResult<()>;
    /// Called once after the last frame; finalizes the output.
    fn end(&mut self) -> LoopfxResult<()>;
}

/// Order and size bookkeeping shared by the sinks.
#[derive(Debug, Default)]
pub(crate) struct FrameGate {
    cfg: Option<SinkConfig>,
    last: Option<FrameIndex>,
}

impl FrameGate {
    pub(crate) fn open(&mut self, cfg: SinkConfig) -> LoopfxResult<()> {
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.last = None;
        Ok(())
    }

    pub(crate) fn admit(&mut self, idx: FrameIndex, len: usize) -> LoopfxResult<SinkConfig> {
        let cfg = self
            .cfg
            .ok_or_else(|| LoopfxError::encode("sink not started"))?;
        if let Some(last) = self.last
            && idx <= last
        {
            return Err(LoopfxError::encode(format!(
                "out-of-order frame {} after {}",
                idx.0, last.0
            )));
        }
        if len != cfg.frame_len() {
            return Err(LoopfxError::validation(format!(
                "frame is {len} bytes, expected {} for {}x{}",
                cfg.frame_len(),
                cfg.width,
                cfg.height
            )));
        }
        self.last = Some(idx);
        Ok(cfg)
    }

    pub(crate) fn close(&mut self) -> LoopfxResult<SinkConfig> {
        self.last = None;
        self.cfg
            .take()
            .ok_or_else(|| LoopfxError::encode("sink not started"))
    }

    pub(crate) fn frames_seen(&self) -> u64 {
        self.last.map_or(0, |l| l.0 + 1)
    }
}

/// Sink that keeps every frame in memory, for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    gate: FrameGate,
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Vec<u8>)>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, Vec<u8>)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> LoopfxResult<()> {
        self.gate.open(cfg)?;
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, bgra: &[u8]) -> LoopfxResult<()> {
        self.gate.admit(idx, bgra.len())?;
        self.frames.push((idx, bgra.to_vec()));
        Ok(())
    }

    fn end(&mut self) -> LoopfxResult<()> {
        self.gate.close()?;
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
