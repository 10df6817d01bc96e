//! The closed set of effect variants and their shared contract.
//!
//! Two state policies coexist and are kept per variant:
//!
//! | variant         | policy        | seekable |
//! |-----------------|---------------|----------|
//! | `grain-noise`   | index-derived | yes      |
//! | `white-noise`   | index-derived | yes      |
//! | `golden-lights` | incremental   | no       |
//! | `rain`          | incremental   | no       |
//! | `snow`          | incremental   | no       |
//! | `fireflies`     | incremental   | no       |

use std::fmt;
use std::str::FromStr;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LoopfxError, LoopfxResult};
use crate::generator::Generator;
use crate::raster::frame::FrameBgra;

pub(crate) mod context;
mod fireflies;
mod golden_lights;
mod grain;
mod rain;
mod snow;
mod white_noise;

use context::EffectContext;

/// How an effect's visual state relates to the frame index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatePolicy {
    /// Frame `f` is a pure function of `floor(f * speed) mod total_frames`; any frame can be
    /// rendered directly.
    IndexDerived,
    /// State accumulates every draw; frames must be produced in order from setup.
    Incremental,
}

/// Effect variants, addressed by kebab-case name.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    /// Dark film dust, scratches and a soft vignette.
    #[serde(alias = "black-noise")]
    GrainNoise,
    /// Light rounded dust and rare thin scratches.
    WhiteNoise,
    /// Warm bokeh dots drifting on sinusoidal paths.
    #[default]
    GoldenLights,
    /// Vertical streaks falling a whole number of times per loop.
    Rain,
    /// White flakes drifting down and sideways.
    Snow,
    /// Blinking green-yellow dots wandering slowly.
    Fireflies,
}

impl EffectKind {
    /// Every variant, in menu order.
    pub const ALL: [Self; 6] = [
        Self::GrainNoise,
        Self::WhiteNoise,
        Self::GoldenLights,
        Self::Rain,
        Self::Snow,
        Self::Fireflies,
    ];

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::GrainNoise => "grain-noise",
            Self::WhiteNoise => "white-noise",
            Self::GoldenLights => "golden-lights",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Fireflies => "fireflies",
        }
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Self::GrainNoise => "Grain Noise",
            Self::WhiteNoise => "White Noise",
            Self::GoldenLights => "Golden Lights",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Fireflies => "Fireflies",
        }
    }

    /// Exact lookup by canonical name or alias.
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("black-noise") {
            return Some(Self::GrainNoise);
        }
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// Lookup with the golden-lights fallback used by [`crate::Renderer::setup`].
    pub fn from_name_or_default(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            tracing::debug!(name, "unknown effect name, falling back to golden-lights");
            Self::GoldenLights
        })
    }

    /// State policy of this variant.
    pub fn policy(self) -> StatePolicy {
        match self {
            Self::GrainNoise | Self::WhiteNoise => StatePolicy::IndexDerived,
            Self::GoldenLights | Self::Rain | Self::Snow | Self::Fireflies => {
                StatePolicy::Incremental
            }
        }
    }

    /// Whether any frame can be rendered without replaying the ones before it.
    pub fn is_seekable(self) -> bool {
        self.policy() == StatePolicy::IndexDerived
    }

    pub(crate) fn instantiate(self) -> Box<dyn Effect> {
        match self {
            Self::GrainNoise => Box::new(grain::GrainNoise::default()),
            Self::WhiteNoise => Box::new(white_noise::WhiteNoise::default()),
            Self::GoldenLights => Box::new(golden_lights::GoldenLights::default()),
            Self::Rain => Box::new(rain::Rain::default()),
            Self::Snow => Box::new(snow::Snow::default()),
            Self::Fireflies => Box::new(fireflies::Fireflies::default()),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = LoopfxError;

    fn from_str(s: &str) -> LoopfxResult<Self> {
        Self::lookup(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|k| k.name()).collect();
            LoopfxError::validation(format!(
                "unknown effect '{s}' (expected one of: {})",
                known.join(", ")
            ))
        })
    }
}

/// Contract shared by every variant.
///
/// `setup` sizes and seeds all state from the context; `draw_frame` composites one frame into a
/// cleared buffer and then advances whatever state the variant keeps.
pub(crate) trait Effect: Send {
    fn setup(&mut self, ctx: &EffectContext);
    fn draw_frame(&mut self, frame: &mut FrameBgra, index: FrameIndex, ctx: &EffectContext);
    /// Particles (or per-frame cells) produced for the current setup.
    fn particle_count(&self) -> usize;
}

/// `floor(index * speed) mod total_frames`, the clock of index-derived variants.
pub(crate) fn loop_phase(index: FrameIndex, ctx: &EffectContext) -> u64 {
    let total = ctx.total_frames().max(1);
    let scaled = (index.0 as f64 * f64::from(ctx.speed())).floor();
    (scaled as u64) % total
}

/// `index * speed`, the clock of periodic motion in incremental variants.
pub(crate) fn scaled_time(index: FrameIndex, ctx: &EffectContext) -> f64 {
    index.0 as f64 * f64::from(ctx.speed())
}

/// Radius drawn uniformly from the context's particle size range.
pub(crate) fn pick_radius(rng: &mut Generator, ctx: &EffectContext) -> f64 {
    rng.range(f64::from(ctx.size_min()), f64::from(ctx.size_max()))
}

/// `width * height` as a wide integer for population formulas.
pub(crate) fn area(ctx: &EffectContext) -> u64 {
    u64::from(ctx.width()) * u64::from(ctx.height())
}

/// Resolution factor for oscillation amplitudes, 1.0 at a 720 px short side.
pub(crate) fn amplitude_scale(ctx: &EffectContext) -> f64 {
    f64::from(ctx.width().min(ctx.height())) / 720.0
}

#[cfg(test)]
#[path = "../../tests/unit/effects/kinds.rs"]
mod tests;
