use crate::foundation::core::Rgba8;
use crate::foundation::error::{LoopfxError, LoopfxResult};
use crate::foundation::math::{mul_div255_u16, unit_to_u8};
use crate::raster::frame::FrameBgra;

const ALPHA_EPSILON: f32 = 1e-4;

/// Composite `src` over pixel `(x, y)` with straight-alpha source-over; out-of-bounds is a no-op.
pub fn blend_pixel(frame: &mut FrameBgra, x: i32, y: i32, src: Rgba8) {
    let Some(i) = frame.offset(x, y) else {
        return;
    };
    if src.a == 0 {
        return;
    }
    let px = &mut frame.data[i..i + 4];
    if src.a == 255 {
        px.copy_from_slice(&[src.b, src.g, src.r, 255]);
        return;
    }
    let out = source_over([px[0], px[1], px[2], px[3]], src);
    px.copy_from_slice(&out);
}

/// Straight-alpha source-over of `src` onto a BGRA destination pixel.
///
/// `outA = sa + da * (1 - sa)`, `c = (sc * sa + dc * da * (1 - sa)) / outA`. A result with
/// `outA` near zero collapses to transparent black.
pub fn source_over(dst: [u8; 4], src: Rgba8) -> [u8; 4] {
    let sa = f32::from(src.a) / 255.0;
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= ALPHA_EPSILON {
        return [0; 4];
    }

    let channel = |sc: u8, dc: u8| {
        let s = f32::from(sc) / 255.0;
        let d = f32::from(dc) / 255.0;
        unit_to_u8((s * sa + d * da * (1.0 - sa)) / out_a)
    };
    [
        channel(src.b, dst[0]),
        channel(src.g, dst[1]),
        channel(src.r, dst[2]),
        unit_to_u8(out_a),
    ]
}

/// Opaque backdrop a transparent frame can be previewed against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Background {
    /// Keep the alpha channel.
    None,
    /// Pure black.
    Black,
    /// Dark gray (32, 32, 32).
    #[default]
    Gray,
    /// Pure white.
    White,
}

impl Background {
    /// RGB of the backdrop, `None` when alpha is kept.
    pub fn rgb(self) -> Option<[u8; 3]> {
        match self {
            Self::None => None,
            Self::Black => Some([0, 0, 0]),
            Self::Gray => Some([32, 32, 32]),
            Self::White => Some([255, 255, 255]),
        }
    }
}

/// Flatten straight-alpha BGRA over an opaque RGB backdrop into opaque RGBA8.
pub fn flatten_over_background(
    dst_rgba: &mut [u8],
    src_bgra: &[u8],
    bg: [u8; 3],
) -> LoopfxResult<()> {
    if dst_rgba.len() != src_bgra.len() || !dst_rgba.len().is_multiple_of(4) {
        return Err(LoopfxError::validation(
            "flatten_over_background expects equal-length 4-channel buffers",
        ));
    }

    let bg_r = u16::from(bg[0]);
    let bg_g = u16::from(bg[1]);
    let bg_b = u16::from(bg[2]);

    for (d, s) in dst_rgba.chunks_exact_mut(4).zip(src_bgra.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(&[s[2], s[1], s[0], 255]);
            continue;
        }

        let inv = 255u16 - a;
        let r = mul_div255_u16(u16::from(s[2]), a) + mul_div255_u16(bg_r, inv);
        let g = mul_div255_u16(u16::from(s[1]), a) + mul_div255_u16(bg_g, inv);
        let b = mul_div255_u16(u16::from(s[0]), a) + mul_div255_u16(bg_b, inv);

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
