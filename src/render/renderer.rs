use crate::effects::context::EffectContext;
use crate::effects::{Effect, EffectKind};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LoopfxError, LoopfxResult};
use crate::raster::frame::FrameBgra;

/// Lifecycle of a [`Renderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererState {
    /// No effect instance; [`Renderer::render_next_frame`] does nothing.
    Unconfigured,
    /// An effect is set up and frames can be produced.
    Ready,
}

/// Owns one effect instance, its context and the frame buffer it draws into.
///
/// Frames come out strictly in order: each [`Renderer::render_next_frame`] clears the buffer,
/// draws frame `cursor`, then advances `cursor` modulo the loop length. A renderer is never
/// shared; the preview and every export task build their own.
pub struct Renderer {
    ctx: EffectContext,
    effect_name: String,
    kind: Option<EffectKind>,
    effect: Option<Box<dyn Effect>>,
    frame: FrameBgra,
    cursor: u64,
}

impl Renderer {
    /// An unconfigured renderer with a transparent buffer sized from `ctx`.
    pub fn new(ctx: EffectContext) -> Self {
        let frame = FrameBgra::new(ctx.width(), ctx.height());
        Self {
            ctx,
            effect_name: EffectKind::default().name().to_owned(),
            kind: None,
            effect: None,
            frame,
            cursor: 0,
        }
    }

    /// Choose the effect used by the next [`Self::setup`]. Unknown names are accepted here and
    /// resolved (with fallback) at setup time.
    pub fn set_effect(&mut self, name: impl Into<String>) {
        self.effect_name = name.into();
        self.unconfigure();
    }

    /// Replace the whole context. The buffer is resized and a new [`Self::setup`] is required.
    pub fn set_context(&mut self, ctx: EffectContext) {
        if ctx.resolution() != self.frame.resolution() {
            self.frame = FrameBgra::new(ctx.width(), ctx.height());
        }
        self.ctx = ctx;
        self.unconfigure();
    }

    /// Change speed without touching effect state; applies from the next frame on.
    pub fn set_speed(&mut self, speed: f32) {
        self.ctx.set_speed(speed);
    }

    /// Instantiate the selected effect, clear the buffer, rewind to frame 0 and seed the effect.
    pub fn setup(&mut self) {
        let kind = EffectKind::from_name_or_default(&self.effect_name);
        let mut effect = kind.instantiate();
        self.frame.clear();
        self.cursor = 0;
        effect.setup(&self.ctx);
        tracing::debug!(
            effect = kind.name(),
            particles = effect.particle_count(),
            resolution = %self.ctx.resolution(),
            "effect set up"
        );
        self.kind = Some(kind);
        self.effect = Some(effect);
    }

    /// Draw the frame at the cursor into the buffer and advance. No-op when unconfigured.
    pub fn render_next_frame(&mut self) {
        let Some(effect) = self.effect.as_mut() else {
            return;
        };
        self.frame.clear();
        effect.draw_frame(&mut self.frame, FrameIndex(self.cursor), &self.ctx);
        self.cursor = (self.cursor + 1) % self.ctx.total_frames().max(1);
    }

    /// Position the cursor at `frame` (modulo the loop length).
    ///
    /// Only index-derived effects can be positioned; incremental ones only produce correct
    /// output when driven in order from setup.
    pub fn seek(&mut self, frame: u64) -> LoopfxResult<()> {
        let kind = self
            .kind
            .ok_or_else(|| LoopfxError::validation("renderer is not set up"))?;
        if !kind.is_seekable() {
            return Err(LoopfxError::validation(format!(
                "effect '{kind}' is sequential-only and cannot seek"
            )));
        }
        self.cursor = frame % self.ctx.total_frames().max(1);
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RendererState {
        if self.effect.is_some() {
            RendererState::Ready
        } else {
            RendererState::Unconfigured
        }
    }

    /// `true` once [`Self::setup`] has run for the current context and effect.
    pub fn is_ready(&self) -> bool {
        self.state() == RendererState::Ready
    }

    /// The buffer holding the most recently drawn frame.
    pub fn frame(&self) -> &FrameBgra {
        &self.frame
    }

    /// Index of the frame the next [`Self::render_next_frame`] will draw.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Active context.
    pub fn context(&self) -> &EffectContext {
        &self.ctx
    }

    /// Effect name as requested, before fallback.
    pub fn effect_name(&self) -> &str {
        &self.effect_name
    }

    /// Variant chosen by the last setup.
    pub fn effect_kind(&self) -> Option<EffectKind> {
        self.kind
    }

    /// Population of the active effect, `0` when unconfigured.
    pub fn particle_count(&self) -> usize {
        self.effect.as_ref().map_or(0, |e| e.particle_count())
    }

    fn unconfigure(&mut self) {
        self.effect = None;
        self.kind = None;
        self.cursor = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
