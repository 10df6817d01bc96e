use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context as _;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder as _};

use crate::foundation::core::Resolution;
use crate::foundation::error::{LoopfxError, LoopfxResult};
use crate::raster::frame::bgra_to_rgba;

/// Process-wide PNG settings shared by every batch export.
#[derive(Debug)]
pub(crate) struct StillCodec {
    compression: CompressionType,
    filter: FilterType,
}

static STILL_CODEC: OnceLock<StillCodec> = OnceLock::new();

/// Initialize on first use; concurrent first calls from parallel exports see one instance.
pub(crate) fn still_codec() -> &'static StillCodec {
    STILL_CODEC.get_or_init(|| {
        tracing::debug!("png still codec initialized");
        StillCodec {
            compression: CompressionType::Fast,
            filter: FilterType::Adaptive,
        }
    })
}

/// Encode a BGRA frame as an RGBA PNG file.
pub fn write_bgra_png(path: &Path, width: u32, height: u32, bgra: &[u8]) -> LoopfxResult<()> {
    check_len(width, height, bgra.len())?;
    write_rgba_png(path, width, height, &bgra_to_rgba(bgra))
}

/// Encode an RGBA buffer as a PNG file.
pub fn write_rgba_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> LoopfxResult<()> {
    check_len(width, height, rgba.len())?;
    let codec = still_codec();
    let file = File::create(path)
        .with_context(|| format!("failed to create png '{}'", path.display()))?;
    let encoder =
        PngEncoder::new_with_quality(BufWriter::new(file), codec.compression, codec.filter);
    encoder
        .write_image(rgba, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| LoopfxError::encode(format!("png encode '{}': {e}", path.display())))
}

fn check_len(width: u32, height: u32, len: usize) -> LoopfxResult<()> {
    let expected = Resolution::new(width, height).frame_len();
    if len != expected {
        return Err(LoopfxError::validation(format!(
            "png buffer is {len} bytes, expected {expected} for {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/still.rs"]
mod tests;
