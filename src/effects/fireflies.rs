use std::f64::consts::TAU;

use kurbo::{Point, Vec2};

use crate::effects::context::EffectContext;
use crate::effects::{Effect, amplitude_scale, area, pick_radius, scaled_time};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::math::{opacity_to_alpha, wrap};
use crate::generator::Generator;
use crate::raster::frame::FrameBgra;
use crate::raster::shapes::fill_circle;

const SEED: u64 = 112_233;
const GLOW: Rgba8 = Rgba8::new(223, 255, 100, 255);

struct Firefly {
    base: Point,
    velocity: Vec2,
    wander: Vec2,
    wander_phase: Vec2,
    radius: f64,
    blink_offset: f64,
    blink_speed: f64,
}

impl Firefly {
    fn wander_direction(&self, t: f64) -> Vec2 {
        let arg = t * self.blink_speed;
        Vec2::new(
            (arg + self.wander_phase.x).sin(),
            (arg + self.wander_phase.y).cos(),
        )
    }

    fn wander_at(&self, t: f64) -> Vec2 {
        let dir = self.wander_direction(t);
        Vec2::new(dir.x * self.wander.x, dir.y * self.wander.y)
    }
}

/// Slow drifting dots that blink and wander.
///
/// Blink and wander frequencies are whole cycles per loop, so both return to their start phase
/// at the loop boundary along with the drift.
#[derive(Default)]
pub(crate) struct Fireflies {
    flies: Vec<Firefly>,
}

pub(crate) fn population(ctx: &EffectContext) -> usize {
    ((area(ctx) / 16_000) * u64::from(ctx.density()) / 50).max(20) as usize
}

impl Fireflies {
    /// `(frequency, unit wander direction)` for every fly at scaled time `t`.
    #[cfg(test)]
    pub(crate) fn wander_directions(&self, t: f64) -> Vec<(f64, Vec2)> {
        self.flies
            .iter()
            .map(|fly| (fly.blink_speed, fly.wander_direction(t)))
            .collect()
    }
}

impl Effect for Fireflies {
    fn setup(&mut self, ctx: &EffectContext) {
        let mut rng = Generator::new(SEED);
        let (w, h) = (f64::from(ctx.width()), f64::from(ctx.height()));
        let total = ctx.total_frames().max(1) as f64;
        let amp_scale = amplitude_scale(ctx);

        self.flies = (0..population(ctx))
            .map(|_| {
                let base = Point::new(rng.uniform01() * w, rng.uniform01() * h);
                let velocity = Vec2::new(
                    ((rng.uniform01() - 0.5) * w / 2.0) / total,
                    ((rng.uniform01() - 0.5) * h / 2.0) / total,
                );
                let radius = pick_radius(&mut rng, ctx);
                let blink_offset = rng.uniform01() * TAU;
                let blink_speed = TAU * f64::from(rng.randint(1, 2)) / total;
                let wander = Vec2::new(
                    (rng.uniform01() * 8.0 + 4.0) * amp_scale,
                    (rng.uniform01() * 8.0 + 4.0) * amp_scale,
                );
                let wander_phase = Vec2::new(rng.uniform01() * TAU, rng.uniform01() * TAU);
                Firefly {
                    base,
                    velocity,
                    wander,
                    wander_phase,
                    radius,
                    blink_offset,
                    blink_speed,
                }
            })
            .collect();
        tracing::debug!(count = self.flies.len(), "fireflies seeded");
    }

    fn draw_frame(&mut self, frame: &mut FrameBgra, index: FrameIndex, ctx: &EffectContext) {
        let t = scaled_time(index, ctx);
        let (w, h) = (f64::from(ctx.width()), f64::from(ctx.height()));
        let speed = f64::from(ctx.speed());

        for fly in &mut self.flies {
            let phase = fly.blink_offset + t * fly.blink_speed;
            let blink = 0.5 + phase.sin() * 0.5;
            let offset = fly.wander_at(t);
            let center = Point::new(
                wrap(fly.base.x + offset.x, w),
                wrap(fly.base.y + offset.y, h),
            );
            fill_circle(
                frame,
                center,
                fly.radius,
                GLOW.with_alpha(opacity_to_alpha(blink)),
            );
            let next = fly.base + fly.velocity * speed;
            fly.base = Point::new(wrap(next.x, w), wrap(next.y, h));
        }
    }

    fn particle_count(&self) -> usize {
        self.flies.len()
    }
}
