use std::f64::consts::TAU;

use kurbo::Point;

use crate::effects::context::EffectContext;
use crate::effects::{Effect, loop_phase};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::generator::Generator;
use crate::raster::composite::blend_pixel;
use crate::raster::frame::FrameBgra;
use crate::raster::shapes::{draw_line, draw_quad_curve, fill_circle, fill_rect};

const SEED_BASE: u64 = 77_771;

/// Old-film dust: vignette, dark specks, scratches and the odd hair or smudge.
///
/// Nothing carries over between frames; every frame reseeds from its loop phase.
#[derive(Default)]
pub(crate) struct GrainNoise {
    width: u32,
    height: u32,
    vignette: Vec<u8>,
    dust_count: usize,
}

impl GrainNoise {
    fn build_vignette(&mut self, density: u32) {
        let (w, h) = (self.width as usize, self.height as usize);
        let max_a = (12 + density as i32 * 8 / 100).clamp(8, 32) as f32;
        let cx = (self.width as f32 - 1.0) * 0.5;
        let cy = (self.height as f32 - 1.0) * 0.5;
        let rx = cx.max(0.5);
        let ry = cy.max(0.5);

        self.vignette = vec![0u8; w * h];
        for y in 0..h {
            let ny = (y as f32 - cy) / ry;
            for x in 0..w {
                let nx = (x as f32 - cx) / rx;
                let d = (nx * nx + ny * ny).sqrt();
                // Darkening starts at 60% of the normalized radius.
                let t = ((d - 0.6) / 0.4).clamp(0.0, 1.0);
                self.vignette[y * w + x] = ((t * max_a) as i32).clamp(0, 255) as u8;
            }
        }
    }

    fn draw_vignette(&self, frame: &mut FrameBgra) {
        let w = self.width as usize;
        for (i, &a) in self.vignette.iter().enumerate() {
            if a == 0 {
                continue;
            }
            let a = (f32::from(a) * 0.6) as u8;
            blend_pixel(frame, (i % w) as i32, (i / w) as i32, Rgba8::gray(0, a));
        }
    }
}

impl Effect for GrainNoise {
    fn setup(&mut self, ctx: &EffectContext) {
        self.width = ctx.width();
        self.height = ctx.height();
        self.build_vignette(ctx.density());
        self.dust_count = (ctx.density() as usize * 70 / 200).clamp(10, 100);
    }

    fn draw_frame(&mut self, frame: &mut FrameBgra, index: FrameIndex, ctx: &EffectContext) {
        let mut rng = Generator::for_frame(SEED_BASE, loop_phase(index, ctx));
        let w = ctx.width() as i32;
        let h = ctx.height() as i32;

        let jx = rng.randint(-1, 1);
        let jy = rng.randint(-1, 1);
        let jitter = |p: Point| Point::new(p.x + f64::from(jx), p.y + f64::from(jy));

        self.draw_vignette(frame);

        let side_min = ctx.size_min().max(1.0) as i32;
        let side_max = ctx.size_max().max(1.0) as i32;
        for _ in 0..self.dust_count {
            let px = rng.randint(0, w - 1) + jx;
            let py = rng.randint(0, h - 1) + jy;
            let rw = rng.randint(side_min, side_max);
            let rh = rng.randint(1, rw.max(1));
            let v = rng.randint(0, 40) as u8;
            let a = rng.randint(178, 255) as u8;
            fill_rect(frame, px, py, rw, rh, Rgba8::gray(v, a));
        }

        let scratches = rng.randint(0, (ctx.density() as i32 / 20 + 2).max(1));
        for _ in 0..scratches {
            let p0 = Point::new(
                f64::from(rng.randint(0, w - 1)),
                f64::from(rng.randint(0, h - 1)),
            );
            let len = f64::from(rng.randint(10, 40));
            let angle = rng.uniform01() * TAU;
            let p1 = Point::new(p0.x + angle.cos() * len, p0.y + angle.sin() * len);
            let thickness = rng.randint(1, 2) as u32;
            let color = Rgba8::gray(rng.randint(0, 30) as u8, rng.randint(130, 220) as u8);
            if rng.uniform01() < 0.5 {
                draw_line(frame, jitter(p0), jitter(p1), color, thickness);
            } else {
                let mid = p0.midpoint(p1);
                let ctrl = Point::new(
                    mid.x + f64::from(rng.randint(-10, 10)),
                    mid.y + f64::from(rng.randint(-10, 10)),
                );
                draw_quad_curve(
                    frame,
                    jitter(p0),
                    jitter(ctrl),
                    jitter(p1),
                    color,
                    thickness,
                    24,
                );
            }
        }

        let rare = rng.uniform01();
        if rare < 0.05 {
            // Hair: a long thin curve entering from a side edge.
            let x0 = if rng.uniform01() < 0.5 {
                0.0
            } else {
                f64::from(w)
            };
            let p0 = Point::new(x0, f64::from(rng.randint(0, h - 1)));
            let p1 = Point::new(
                f64::from(rng.randint(0, w - 1)),
                f64::from(rng.randint(0, h - 1)),
            );
            let mid = p0.midpoint(p1);
            let ctrl = Point::new(
                mid.x + f64::from(rng.randint(-30, 30)),
                mid.y + f64::from(rng.randint(-30, 30)),
            );
            let color = Rgba8::gray(rng.randint(0, 25) as u8, rng.randint(110, 180) as u8);
            draw_quad_curve(frame, jitter(p0), jitter(ctrl), jitter(p1), color, 1, 40);
        } else if rare < 0.08 {
            let center = jitter(Point::new(
                f64::from(rng.randint(0, w - 1)),
                f64::from(rng.randint(0, h - 1)),
            ));
            let radius = f64::from(rng.randint((w / 20).max(20), (w / 10).max(30)));
            let color = Rgba8::gray(rng.randint(20, 60) as u8, rng.randint(25, 50) as u8);
            fill_circle(frame, center, radius, color);
        }
    }

    fn particle_count(&self) -> usize {
        self.dust_count
    }
}
