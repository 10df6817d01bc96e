use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};

/// Seeded pseudo-random stream shared by every effect.
///
/// Same seed, same sequence: the preview and each export task rebuild identical particle layouts
/// from a variant's seed constant, and index-derived variants reseed per frame with
/// [`Generator::for_frame`].
#[derive(Clone, Debug)]
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Stream for a stateless per-frame draw: seed `base + frame`.
    pub fn for_frame(base: u64, frame: u64) -> Self {
        Self::new(base.wrapping_add(frame))
    }

    /// Uniform real in `[0, 1)`.
    pub fn uniform01(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Uniform integer in `[lo, hi]`. Inverted bounds are swapped.
    pub fn randint(&mut self, lo: i32, hi: i32) -> i32 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform real in `[lo, hi)`; collapses to `lo` when `hi <= lo`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.uniform01() * (hi - lo).max(0.0)
    }

    /// Pick one element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let last = i32::try_from(items.len() - 1).unwrap_or(i32::MAX);
        items.get(self.randint(0, last) as usize)
    }
}

#[cfg(test)]
#[path = "../tests/unit/generator.rs"]
mod tests;
