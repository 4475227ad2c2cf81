use beam_detector::glyph::{Glyph, GlyphId};
use beam_detector::image::BinaryMask;

pub const INK: u8 = 20;
pub const PAPER: u8 = 235;
pub const THRESHOLD: u8 = 128;

/// White 8-bit page on which glyph shapes are painted in black.
pub struct GrayCanvas {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "canvas dimensions must be positive");
        Self {
            width,
            height,
            data: vec![PAPER; width * height],
        }
    }

    /// Paint an axis-aligned rectangle, clipped to the canvas.
    pub fn rect(mut self, x: usize, y: usize, w: usize, h: usize) -> Self {
        for yy in y..(y + h).min(self.height) {
            for xx in x..(x + w).min(self.width) {
                self.data[yy * self.width + xx] = INK;
            }
        }
        self
    }

    /// Paint a straight band of constant vertical `thickness` whose top edge
    /// starts at `(x0, y0)` and rises by `slope` per column.
    pub fn band(mut self, x0: usize, width: usize, y0: f64, slope: f64, thickness: usize) -> Self {
        for x in x0..(x0 + width).min(self.width) {
            let top = (y0 + slope * (x - x0) as f64).floor().max(0.0) as usize;
            for y in top..(top + thickness).min(self.height) {
                self.data[y * self.width + x] = INK;
            }
        }
        self
    }

    pub fn to_mask(&self) -> BinaryMask {
        BinaryMask::from_gray(self.width, self.height, &self.data, THRESHOLD)
    }

    pub fn to_glyph(&self, id: u32, origin: [i32; 2]) -> Glyph {
        Glyph::from_mask(GlyphId(id), &self.to_mask(), origin).expect("canvas holds ink")
    }
}

/// Single horizontal beam filling the whole canvas.
pub fn solid_beam(id: u32, width: usize, height: usize) -> Glyph {
    GrayCanvas::new(width, height)
        .rect(0, 0, width, height)
        .to_glyph(id, [0, 0])
}

/// Two beams of `thickness` separated by `gap` rows, joined by two stems.
pub fn double_beam(id: u32, width: usize, thickness: usize, gap: usize) -> Glyph {
    let height = 2 * thickness + gap;
    GrayCanvas::new(width, height)
        .rect(0, 0, width, thickness)
        .rect(0, thickness + gap, width, thickness)
        .rect(5, 0, 3, height)
        .rect(width - 8, 0, 3, height)
        .to_glyph(id, [0, 0])
}
