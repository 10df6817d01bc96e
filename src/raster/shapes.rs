//! Clipped shape rasterizers. Every primitive reduces to [`blend_pixel`] calls, so nothing here
//! can write outside the frame.

use kurbo::{ParamCurve as _, Point, QuadBez};

use crate::foundation::core::Rgba8;
use crate::raster::composite::blend_pixel;
use crate::raster::frame::FrameBgra;

/// Fill the pixels whose centers lie within `radius` of `center`.
pub fn fill_circle(frame: &mut FrameBgra, center: Point, radius: f64, color: Rgba8) {
    if !radius.is_finite() || radius <= 0.0 || !center.is_finite() {
        return;
    }
    let max_x = i64::from(frame.width) - 1;
    let max_y = i64::from(frame.height) - 1;
    let x0 = ((center.x - radius).floor() as i64).max(0);
    let x1 = ((center.x + radius).ceil() as i64).min(max_x);
    let y0 = ((center.y - radius).floor() as i64).max(0);
    let y1 = ((center.y + radius).ceil() as i64).min(max_y);

    let r2 = radius * radius;
    for y in y0..=y1 {
        let dy = y as f64 + 0.5 - center.y;
        for x in x0..=x1 {
            let dx = x as f64 + 0.5 - center.x;
            if dx * dx + dy * dy <= r2 {
                blend_pixel(frame, x as i32, y as i32, color);
            }
        }
    }
}

/// Fill the axis-aligned rectangle `[x, x + w) x [y, y + h)`.
pub fn fill_rect(frame: &mut FrameBgra, x: i32, y: i32, w: i32, h: i32, color: Rgba8) {
    let x0 = i64::from(x).max(0);
    let y0 = i64::from(y).max(0);
    let x1 = (i64::from(x) + i64::from(w)).min(i64::from(frame.width));
    let y1 = (i64::from(y) + i64::from(h)).min(i64::from(frame.height));
    for yy in y0..y1 {
        for xx in x0..x1 {
            blend_pixel(frame, xx as i32, yy as i32, color);
        }
    }
}

/// Draw a segment by stamping a square pen at `max(1, length)` evenly spaced samples.
pub fn draw_line(frame: &mut FrameBgra, from: Point, to: Point, color: Rgba8, thickness: u32) {
    let len = (to - from).hypot();
    if !len.is_finite() {
        return;
    }
    let steps = len.max(1.0) as u32;
    let half = (thickness / 2) as i32;
    for i in 0..=steps {
        let p = from.lerp(to, f64::from(i) / f64::from(steps));
        let ix = p.x.round() as i32;
        let iy = p.y.round() as i32;
        for oy in -half..=half {
            for ox in -half..=half {
                blend_pixel(frame, ix.saturating_add(ox), iy.saturating_add(oy), color);
            }
        }
    }
}

/// Draw a quadratic Bézier as `segments` joined line segments.
pub fn draw_quad_curve(
    frame: &mut FrameBgra,
    from: Point,
    ctrl: Point,
    to: Point,
    color: Rgba8,
    thickness: u32,
    segments: u32,
) {
    let curve = QuadBez::new(from, ctrl, to);
    let segments = segments.max(1);
    let mut prev = from;
    for i in 1..=segments {
        let p = curve.eval(f64::from(i) / f64::from(segments));
        draw_line(frame, prev, p, color, thickness);
        prev = p;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/shapes.rs"]
mod tests;
