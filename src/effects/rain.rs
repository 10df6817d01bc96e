use crate::effects::context::EffectContext;
use crate::effects::Effect;
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::math::wrap;
use crate::generator::Generator;
use crate::raster::composite::blend_pixel;
use crate::raster::frame::FrameBgra;

const SEED: u64 = 24_680;
const DROP_COLOR: Rgba8 = Rgba8::new(174, 194, 224, 128);

struct Drop {
    x: i32,
    y: f64,
    length: u32,
    vy: f64,
}

/// One-pixel vertical streaks. Each drop falls one or two full heights per loop.
#[derive(Default)]
pub(crate) struct Rain {
    drops: Vec<Drop>,
}

pub(crate) fn population(ctx: &EffectContext) -> usize {
    (u64::from(ctx.width()) * u64::from(ctx.density()) / 40).max(50) as usize
}

impl Effect for Rain {
    fn setup(&mut self, ctx: &EffectContext) {
        let mut rng = Generator::new(SEED);
        let (w, h) = (f64::from(ctx.width()), f64::from(ctx.height()));
        let per_frame = h / f64::from(ctx.duration()) / f64::from(ctx.fps());

        self.drops = (0..population(ctx))
            .map(|_| {
                let x = (rng.uniform01() * w) as i32;
                let y = rng.uniform01() * h;
                let length = (rng.uniform01() * (h / 30.0) + h / 60.0).max(1.0) as u32;
                let vy = f64::from(rng.randint(1, 2)) * per_frame;
                Drop { x, y, length, vy }
            })
            .collect();
        tracing::debug!(count = self.drops.len(), "rain seeded");
    }

    fn draw_frame(&mut self, frame: &mut FrameBgra, _index: FrameIndex, ctx: &EffectContext) {
        let h = ctx.height();
        let speed = f64::from(ctx.speed());
        for drop in &mut self.drops {
            let top = drop.y as u32;
            for i in 0..drop.length {
                let yy = (top + i) % h;
                blend_pixel(frame, drop.x, yy as i32, DROP_COLOR);
            }
            drop.y = wrap(drop.y + drop.vy * speed, f64::from(h));
        }
    }

    fn particle_count(&self) -> usize {
        self.drops.len()
    }
}
