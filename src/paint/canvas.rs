use super::{Quad, Surface};
use crate::palette;

/// CPU RGBA8 pixel buffer. Used for the cached yard background.
///
/// Quads are rasterised by their axis-aligned bounds (pixel-centre sampling),
/// which is exact for the untransformed rects the background is built from.
pub struct Canvas {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 rows, tightly packed.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    fn blend(&mut self, x: u32, y: u32, color: u32) {
        let [r, g, b, a] = palette::channels(color);
        let i = ((y * self.width + x) * 4) as usize;
        let dst = &mut self.pixels[i..i + 4];
        if a == 255 {
            dst.copy_from_slice(&[r, g, b, 255]);
            return;
        }
        let alpha = a as u16;
        for (d, s) in dst.iter_mut().zip([r, g, b]) {
            *d = blend_channel(s, *d, alpha);
        }
        dst[3] = (a as u16 + dst[3] as u16 * (255 - alpha) / 255) as u8;
    }
}

/// Source-over for one channel with an 8-bit alpha.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

impl Surface for Canvas {
    fn fill_quad(&mut self, quad: Quad, color: u32) {
        let (min, max) = quad.bounds();
        let x0 = min.x.round().max(0.0) as u32;
        let y0 = min.y.round().max(0.0) as u32;
        let x1 = (max.x.round().max(0.0) as u32).min(self.width);
        let y1 = (max.y.round().max(0.0) as u32).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }
}
