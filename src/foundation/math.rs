/// Map a `[0, 1]` value to a byte, rounding half up.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    ((v * 255.0 + 0.5) as i32).clamp(0, 255) as u8
}

/// Opacity in `[0, 1]` to alpha, truncating.
pub(crate) fn opacity_to_alpha(opacity: f64) -> u8 {
    ((opacity * 255.0) as i32).clamp(0, 255) as u8
}

/// Straight linear interpolation on byte values, rounded to nearest.
pub(crate) fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    ((1.0 - t) * f32::from(a) + t * f32::from(b))
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Euclidean modulo that always lands in `[0, m)`.
pub(crate) fn wrap(v: f64, m: f64) -> f64 {
    if m <= 0.0 {
        return 0.0;
    }
    let r = v.rem_euclid(m);
    // rem_euclid rounds tiny negatives up to exactly `m`.
    if r >= m { 0.0 } else { r }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
