use std::f64::consts::TAU;

use kurbo::{Point, Vec2};

use crate::effects::context::EffectContext;
use crate::effects::{Effect, amplitude_scale, area, pick_radius, scaled_time};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::math::{opacity_to_alpha, wrap};
use crate::generator::Generator;
use crate::raster::frame::FrameBgra;
use crate::raster::shapes::fill_circle;

const SEED: u64 = 98_765;

const PALETTE: [Rgba8; 4] = [
    Rgba8::new(255, 196, 0, 255),
    Rgba8::new(255, 214, 10, 255),
    Rgba8::new(255, 170, 51, 255),
    Rgba8::new(255, 236, 179, 255),
];

struct Light {
    base: Point,
    velocity: Vec2,
    amplitude: Vec2,
    freq: f64,
    phase: Vec2,
    radius: f64,
    color: Rgba8,
    opacity: f64,
}

/// Warm dots on linear drift plus a 1–2 cycle-per-loop sinusoidal orbit.
#[derive(Default)]
pub(crate) struct GoldenLights {
    lights: Vec<Light>,
}

pub(crate) fn population(ctx: &EffectContext) -> usize {
    ((area(ctx) / 8000) * u64::from(ctx.density()) / 50).max(10) as usize
}

impl Effect for GoldenLights {
    fn setup(&mut self, ctx: &EffectContext) {
        let mut rng = Generator::new(SEED);
        let total = ctx.total_frames().max(1) as f64;
        let (w, h) = (f64::from(ctx.width()), f64::from(ctx.height()));
        let amp_scale = amplitude_scale(ctx);

        self.lights = (0..population(ctx))
            .map(|_| {
                let cycles = f64::from(rng.randint(1, 2));
                let base = Point::new(rng.uniform01() * w, rng.uniform01() * h);
                let velocity = Vec2::new(
                    ((rng.uniform01() - 0.5) * w / 2.0) / total,
                    ((rng.uniform01() - 0.5) * h / 2.0) / total,
                );
                let amplitude = Vec2::new(
                    (rng.uniform01() * 20.0 + 10.0) * amp_scale,
                    (rng.uniform01() * 20.0 + 10.0) * amp_scale,
                );
                let phase = Vec2::new(rng.uniform01() * TAU, rng.uniform01() * TAU);
                let radius = pick_radius(&mut rng, ctx);
                let color = rng.pick(&PALETTE).copied().unwrap_or(PALETTE[0]);
                let opacity = rng.uniform01() * 0.5 + 0.2;
                Light {
                    base,
                    velocity,
                    amplitude,
                    freq: TAU * cycles / total,
                    phase,
                    radius,
                    color,
                    opacity,
                }
            })
            .collect();
        tracing::debug!(count = self.lights.len(), "golden-lights seeded");
    }

    fn draw_frame(&mut self, frame: &mut FrameBgra, index: FrameIndex, ctx: &EffectContext) {
        let t = scaled_time(index, ctx);
        let speed = f64::from(ctx.speed());
        let (w, h) = (f64::from(ctx.width()), f64::from(ctx.height()));

        for light in &mut self.lights {
            let ox = (t * light.freq + light.phase.x).sin() * light.amplitude.x;
            let oy = (t * light.freq + light.phase.y).cos() * light.amplitude.y;
            let center = Point::new(wrap(light.base.x + ox, w), wrap(light.base.y + oy, h));
            let color = light.color.with_alpha(opacity_to_alpha(light.opacity));
            fill_circle(frame, center, light.radius, color);
            light.base += light.velocity * speed;
        }
    }

    fn particle_count(&self) -> usize {
        self.lights.len()
    }
}
