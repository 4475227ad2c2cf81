/// Owned binary image, one byte per pixel (`0` background, `1` foreground).
///
/// This is the hand-off format from binarization: either a whole page or the
/// crop of a single spot glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    pub w: usize,
    pub h: usize,
    data: Vec<u8>,
}

impl BinaryMask {
    /// Empty (all background) mask.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0u8; w * h],
        }
    }

    /// Threshold a row-major 8-bit gray buffer: pixels darker than
    /// `threshold` are foreground.
    pub fn from_gray(w: usize, h: usize, gray: &[u8], threshold: u8) -> Self {
        debug_assert!(gray.len() >= w * h, "gray buffer too small");
        let data = gray[..w * h]
            .iter()
            .map(|&v| u8::from(v < threshold))
            .collect();
        Self { w, h, data }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.data[y * self.w + x] = u8::from(on);
    }

    /// Set every pixel of the clipped rectangle to foreground.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        let x_end = (x + w).min(self.w);
        let y_end = (y + h).min(self.h);
        for yy in y.min(self.h)..y_end {
            for xx in x.min(self.w)..x_end {
                self.set(xx, yy, true);
            }
        }
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Foreground vertical runs `(start, stop)` of column `x`, top to bottom.
    pub fn column_runs(&self, x: usize) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut start = None;
        for y in 0..self.h {
            match (self.get(x, y), start) {
                (true, None) => start = Some(y),
                (false, Some(s)) => {
                    runs.push((s, y - 1));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, self.h - 1));
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_runs_split_on_background() {
        let mut mask = BinaryMask::new(3, 10);
        mask.fill_rect(1, 0, 1, 3);
        mask.fill_rect(1, 5, 1, 5);
        assert_eq!(mask.column_runs(0), Vec::<(usize, usize)>::new());
        assert_eq!(mask.column_runs(1), vec![(0, 2), (5, 9)]);
        assert_eq!(mask.count(), 8);
    }

    #[test]
    fn gray_threshold_marks_dark_pixels() {
        let gray = [0u8, 200, 127, 128];
        let mask = BinaryMask::from_gray(2, 2, &gray, 128);
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
        assert!(mask.get(0, 1));
        assert!(!mask.get(1, 1));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut mask = BinaryMask::new(4, 4);
        mask.fill_rect(2, 2, 10, 10);
        assert_eq!(mask.count(), 4);
    }
}
