use kurbo::{Point, Vec2};

use crate::effects::context::EffectContext;
use crate::effects::{Effect, area, pick_radius};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::math::{opacity_to_alpha, wrap};
use crate::generator::Generator;
use crate::raster::frame::FrameBgra;
use crate::raster::shapes::fill_circle;

const SEED: u64 = 13_579;

struct Flake {
    pos: Point,
    velocity: Vec2,
    radius: f64,
    alpha: u8,
}

/// White flakes falling a whole number of heights per loop with a slight sideways drift.
#[derive(Default)]
pub(crate) struct Snow {
    flakes: Vec<Flake>,
}

pub(crate) fn population(ctx: &EffectContext) -> usize {
    ((area(ctx) / 2400) * u64::from(ctx.density()) / 50).max(50) as usize
}

impl Effect for Snow {
    fn setup(&mut self, ctx: &EffectContext) {
        let mut rng = Generator::new(SEED);
        let (w, h) = (f64::from(ctx.width()), f64::from(ctx.height()));
        let total = ctx.total_frames().max(1) as f64;
        let per_frame = h / f64::from(ctx.duration()) / f64::from(ctx.fps());

        self.flakes = (0..population(ctx))
            .map(|_| {
                let pos = Point::new(rng.uniform01() * w, rng.uniform01() * h);
                let vx = ((rng.uniform01() - 0.5) * w / 4.0) / total;
                let vy = f64::from(rng.randint(1, 2)) * per_frame;
                let radius = pick_radius(&mut rng, ctx);
                let alpha = opacity_to_alpha(rng.uniform01() * 0.5 + 0.3);
                Flake {
                    pos,
                    velocity: Vec2::new(vx, vy),
                    radius,
                    alpha,
                }
            })
            .collect();
        tracing::debug!(count = self.flakes.len(), "snow seeded");
    }

    fn draw_frame(&mut self, frame: &mut FrameBgra, _index: FrameIndex, ctx: &EffectContext) {
        let (w, h) = (f64::from(ctx.width()), f64::from(ctx.height()));
        let speed = f64::from(ctx.speed());
        for flake in &mut self.flakes {
            fill_circle(frame, flake.pos, flake.radius, Rgba8::gray(255, flake.alpha));
            let next = flake.pos + flake.velocity * speed;
            flake.pos = Point::new(wrap(next.x, w), wrap(next.y, h));
        }
    }

    fn particle_count(&self) -> usize {
        self.flakes.len()
    }
}
