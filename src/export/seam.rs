//! Crossfade that makes the last frame of a clip equal one of its first frames.
//!
//! With `total` frames and `cross = clamp(fps, 1, total / 2)`, frames `[0, cross)` are held as
//! they are emitted. Tail frame `i >= total - cross` at position `k = i - (total - cross)` is
//! emitted as `round((1 - t) * current + t * first[k])` per byte with `t = (k + 1) / cross`.
//! At `k = cross - 1` the weight is exactly 1, so the final frame is a copy of `first[cross - 1]`.
//!
//! The blend is a plain per-channel interpolation of bytes, alpha included; it is not
//! source-over compositing.

use crate::foundation::error::{LoopfxError, LoopfxResult};
use crate::foundation::math::lerp_u8;

/// Number of frames in the crossfade window.
pub fn crossfade_len(fps: u32, total: u64) -> u64 {
    u64::from(fps).min(total / 2).max(1)
}

/// Weight of the held frame at tail position `k`.
pub fn tail_weight(k: u64, cross: u64) -> f32 {
    if cross == 0 {
        return 1.0;
    }
    (k + 1) as f32 / cross as f32
}

/// `dst[i] = round((1 - t) * current[i] + t * first[i])`.
pub fn blend_toward(dst: &mut [u8], current: &[u8], first: &[u8], t: f32) -> LoopfxResult<()> {
    if dst.len() != current.len() || current.len() != first.len() {
        return Err(LoopfxError::validation(format!(
            "seam blend expects equal-length buffers (dst {}, current {}, first {})",
            dst.len(),
            current.len(),
            first.len()
        )));
    }
    if t >= 1.0 {
        dst.copy_from_slice(first);
        return Ok(());
    }
    for ((d, &c), &f) in dst.iter_mut().zip(current).zip(first) {
        *d = lerp_u8(c, f, t);
    }
    Ok(())
}

/// Streaming application of the seam to frames rendered in order.
#[derive(Debug)]
pub struct SeamBlender {
    total: u64,
    cross: u64,
    held: Vec<Vec<u8>>,
    scratch: Vec<u8>,
    next: u64,
}

impl SeamBlender {
    /// Blender for a clip of `total` frames at `fps`.
    pub fn new(total: u64, fps: u32) -> Self {
        let cross = crossfade_len(fps, total);
        Self {
            total,
            cross,
            held: Vec::with_capacity(cross as usize),
            scratch: Vec::new(),
            next: 0,
        }
    }

    /// Crossfade window length.
    pub fn cross(&self) -> u64 {
        self.cross
    }

    /// First frame index of the tail window.
    pub fn tail_start(&self) -> u64 {
        self.total.saturating_sub(self.cross)
    }

    /// Take frame `idx` as rendered and return the bytes to emit.
    ///
    /// Frames must arrive exactly once each, in order from 0.
    pub fn process<'a>(&'a mut self, idx: u64, frame: &'a [u8]) -> LoopfxResult<&'a [u8]> {
        if idx != self.next || idx >= self.total {
            return Err(LoopfxError::validation(format!(
                "seam expected frame {} of {}, got {idx}",
                self.next, self.total
            )));
        }
        self.next += 1;

        if idx < self.cross {
            self.held.push(frame.to_vec());
        }
        let tail_start = self.tail_start();
        if idx < tail_start {
            return Ok(frame);
        }

        let k = idx - tail_start;
        let first = self
            .held
            .get(k as usize)
            .ok_or_else(|| LoopfxError::validation(format!("seam has no held frame {k}")))?;
        self.scratch.resize(frame.len(), 0);
        blend_toward(&mut self.scratch, frame, first, tail_weight(k, self.cross))?;
        Ok(&self.scratch)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/seam.rs"]
mod tests;
