use std::f64::consts::TAU;

use kurbo::Point;

use crate::effects::context::EffectContext;
use crate::effects::{Effect, loop_phase, pick_radius};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::generator::Generator;
use crate::raster::frame::FrameBgra;
use crate::raster::shapes::{draw_line, draw_quad_curve, fill_circle};

const SEED_BASE: u64 = 99_123;

/// Light rounded specks with a few faint scratches. Reseeded from the loop phase every frame.
#[derive(Default)]
pub(crate) struct WhiteNoise {
    speck_count: usize,
}

impl Effect for WhiteNoise {
    fn setup(&mut self, ctx: &EffectContext) {
        self.speck_count = (ctx.density() as usize * 52 / 240).clamp(8, 36);
    }

    fn draw_frame(&mut self, frame: &mut FrameBgra, index: FrameIndex, ctx: &EffectContext) {
        let mut rng = Generator::for_frame(SEED_BASE, loop_phase(index, ctx));
        let w = ctx.width() as i32;
        let h = ctx.height() as i32;

        let jx = f64::from(rng.randint(-1, 1));
        let jy = f64::from(rng.randint(-1, 1));
        let jitter = |p: Point| Point::new(p.x + jx, p.y + jy);

        for _ in 0..self.speck_count {
            let center = jitter(Point::new(
                f64::from(rng.randint(0, w - 1)),
                f64::from(rng.randint(0, h - 1)),
            ));
            let radius = pick_radius(&mut rng, ctx).max(1.0);
            let color = Rgba8::gray(rng.randint(200, 255) as u8, rng.randint(150, 230) as u8);
            fill_circle(frame, center, radius, color);
        }

        let scratches = rng.randint(0, (ctx.density() as i32 / 30).max(1));
        for _ in 0..scratches {
            let p0 = Point::new(
                f64::from(rng.randint(0, w - 1)),
                f64::from(rng.randint(0, h - 1)),
            );
            let len = f64::from(rng.randint(8, 28));
            let angle = rng.uniform01() * TAU;
            let p1 = Point::new(p0.x + angle.cos() * len, p0.y + angle.sin() * len);
            let color = Rgba8::gray(rng.randint(200, 245) as u8, rng.randint(110, 180) as u8);
            if rng.uniform01() < 0.35 {
                let mid = p0.midpoint(p1);
                let ctrl = Point::new(
                    mid.x + f64::from(rng.randint(-8, 8)),
                    mid.y + f64::from(rng.randint(-8, 8)),
                );
                draw_quad_curve(frame, jitter(p0), jitter(ctrl), jitter(p1), color, 1, 20);
            } else {
                draw_line(frame, jitter(p0), jitter(p1), color, 1);
            }
        }
    }

    fn particle_count(&self) -> usize {
        self.speck_count
    }
}
