use crate::foundation::core::Resolution;

/// A frame buffer in BGRA8 byte order, straight alpha, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBgra {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes, `B, G, R, A` per pixel.
    pub data: Vec<u8>,
}

impl FrameBgra {
    /// Allocate a fully transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; Resolution::new(width, height).frame_len()],
        }
    }

    /// Frame dimensions.
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Byte offset of pixel `(x, y)`, or `None` when outside the frame.
    pub fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }

    /// BGRA bytes of pixel `(x, y)`.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Number of pixels with non-zero alpha.
    pub fn coverage(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Copy into RGBA8 byte order.
    pub fn to_rgba(&self) -> Vec<u8> {
        bgra_to_rgba(&self.data)
    }
}

/// Swap the blue and red channels of a 4-channel buffer.
pub(crate) fn bgra_to_rgba(src: &[u8]) -> Vec<u8> {
    let mut out = src.to_vec();
    for px in out.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
    out
}
