use crate::foundation::core::Resolution;

/// Per-session effect configuration.
///
/// Every setter clamps instead of failing: duration to 10–20 s, fps to 1–120, speed to 0.1–5.0,
/// density to 1–100, particle sizes to 0.1–200 px with `size_min <= size_max` kept by clamping the
/// other bound. Zero dimensions become 1.
///
/// Only speed is meant to change while a [`crate::Renderer`] is running; everything else sizes
/// effect state at setup time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawEffectContext")]
pub struct EffectContext {
    width: u32,
    height: u32,
    duration: u32,
    fps: u32,
    speed: f32,
    density: u32,
    size_min: f32,
    size_max: f32,
}

impl EffectContext {
    /// Allowed clip duration in seconds.
    pub const DURATION_RANGE: (u32, u32) = (10, 20);
    /// Allowed frame rate.
    pub const FPS_RANGE: (u32, u32) = (1, 120);
    /// Allowed speed multiplier.
    pub const SPEED_RANGE: (f32, f32) = (0.1, 5.0);
    /// Allowed density.
    pub const DENSITY_RANGE: (u32, u32) = (1, 100);
    /// Allowed particle size in pixels.
    pub const SIZE_RANGE: (f32, f32) = (0.1, 200.0);

    /// Context at `width x height` with default timing and population.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            duration: 12,
            fps: 30,
            speed: 1.0,
            density: 50,
            size_min: 1.0,
            size_max: 8.0,
        }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frame dimensions.
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Clip length in seconds.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Frames per second.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Motion speed multiplier.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Population slider value.
    pub fn density(&self) -> u32 {
        self.density
    }

    /// Smallest particle size in pixels.
    pub fn size_min(&self) -> f32 {
        self.size_min
    }

    /// Largest particle size in pixels.
    pub fn size_max(&self) -> f32 {
        self.size_max
    }

    /// `duration * fps`.
    pub fn total_frames(&self) -> u64 {
        u64::from(self.duration) * u64::from(self.fps)
    }

    /// Set the frame dimensions (zero becomes 1).
    pub fn set_resolution(&mut self, res: Resolution) {
        self.width = res.width.max(1);
        self.height = res.height.max(1);
    }

    /// Set the clip length, clamped to [`Self::DURATION_RANGE`].
    pub fn set_duration(&mut self, secs: u32) {
        self.duration = secs.clamp(Self::DURATION_RANGE.0, Self::DURATION_RANGE.1);
    }

    /// Set the frame rate, clamped to [`Self::FPS_RANGE`].
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.clamp(Self::FPS_RANGE.0, Self::FPS_RANGE.1);
    }

    /// Set the speed multiplier, clamped to [`Self::SPEED_RANGE`]. NaN resets to 1.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_nan() {
            1.0
        } else {
            speed.clamp(Self::SPEED_RANGE.0, Self::SPEED_RANGE.1)
        };
    }

    /// Set the density, clamped to [`Self::DENSITY_RANGE`].
    pub fn set_density(&mut self, density: u32) {
        self.density = density.clamp(Self::DENSITY_RANGE.0, Self::DENSITY_RANGE.1);
    }

    /// Set the smallest particle size; raises `size_max` if it would fall below.
    pub fn set_size_min(&mut self, px: f32) {
        self.size_min = clamp_size(px);
        if self.size_min > self.size_max {
            self.size_max = self.size_min;
        }
    }

    /// Set the largest particle size; lowers `size_min` if it would rise above.
    pub fn set_size_max(&mut self, px: f32) {
        self.size_max = clamp_size(px);
        if self.size_max < self.size_min {
            self.size_min = self.size_max;
        }
    }

    /// Builder form of [`Self::set_resolution`].
    pub fn with_resolution(mut self, res: Resolution) -> Self {
        self.set_resolution(res);
        self
    }

    /// Builder form of [`Self::set_duration`].
    pub fn with_duration(mut self, secs: u32) -> Self {
        self.set_duration(secs);
        self
    }

    /// Builder form of [`Self::set_fps`].
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.set_fps(fps);
        self
    }

    /// Builder form of [`Self::set_speed`].
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.set_speed(speed);
        self
    }

    /// Builder form of [`Self::set_density`].
    pub fn with_density(mut self, density: u32) -> Self {
        self.set_density(density);
        self
    }

    /// Set both size bounds, minimum first.
    pub fn with_size_range(mut self, min: f32, max: f32) -> Self {
        self.set_size_min(min);
        self.set_size_max(max);
        self
    }
}

impl Default for EffectContext {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

fn clamp_size(px: f32) -> f32 {
    if px.is_nan() {
        return EffectContext::SIZE_RANGE.0;
    }
    px.clamp(EffectContext::SIZE_RANGE.0, EffectContext::SIZE_RANGE.1)
}

/// Unclamped mirror of [`EffectContext`] for deserialization; converted through the setters.
#[derive(serde::Deserialize)]
#[serde(default)]
struct RawEffectContext {
    width: u32,
    height: u32,
    duration: u32,
    fps: u32,
    speed: f32,
    density: u32,
    size_min: f32,
    size_max: f32,
}

impl Default for RawEffectContext {
    fn default() -> Self {
        let d = EffectContext::default();
        Self {
            width: d.width,
            height: d.height,
            duration: d.duration,
            fps: d.fps,
            speed: d.speed,
            density: d.density,
            size_min: d.size_min,
            size_max: d.size_max,
        }
    }
}

impl From<RawEffectContext> for EffectContext {
    fn from(raw: RawEffectContext) -> Self {
        EffectContext::new(raw.width, raw.height)
            .with_duration(raw.duration)
            .with_fps(raw.fps)
            .with_speed(raw.speed)
            .with_density(raw.density)
            .with_size_range(raw.size_min, raw.size_max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/context.rs"]
mod tests;
