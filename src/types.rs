use nalgebra::Point2;
use serde::{Deserialize, Serialize};

const EPS: f64 = 1e-9;

/// Straight segment in image coordinates, stored left to right.
///
/// Used for beam medians and for the north/south borders handed to the
/// interpretation graph. Ordinates at arbitrary abscissae are obtained by
/// extending the segment's supporting line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment2 {
    pub p1: Point2<f64>,
    pub p2: Point2<f64>,
}

impl Segment2 {
    pub fn new(p1: Point2<f64>, p2: Point2<f64>) -> Self {
        if p2.x < p1.x {
            Self { p1: p2, p2: p1 }
        } else {
            Self { p1, p2 }
        }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    /// Horizontal extent `p2.x - p1.x`.
    pub fn width(&self) -> f64 {
        self.p2.x - self.p1.x
    }

    /// Slope `dy/dx`, `None` for a vertical segment.
    pub fn slope(&self) -> Option<f64> {
        let dx = self.width();
        if dx.abs() <= EPS {
            None
        } else {
            Some((self.p2.y - self.p1.y) / dx)
        }
    }

    /// Ordinate of the supporting line at `x` (a vertical segment yields `p1.y`).
    pub fn y_at_x(&self, x: f64) -> f64 {
        match self.slope() {
            Some(slope) => self.p1.y + slope * (x - self.p1.x),
            None => self.p1.y,
        }
    }

    pub fn point_at_x(&self, x: f64) -> Point2<f64> {
        Point2::new(x, self.y_at_x(x))
    }

    pub fn midpoint(&self) -> Point2<f64> {
        Point2::new(
            (self.p1.x + self.p2.x) * 0.5,
            (self.p1.y + self.p2.y) * 0.5,
        )
    }

    /// Copy shifted vertically by `dy`.
    pub fn translated(&self, dy: f64) -> Self {
        Self {
            p1: Point2::new(self.p1.x, self.p1.y + dy),
            p2: Point2::new(self.p2.x, self.p2.y + dy),
        }
    }

    /// Same supporting line, restricted or extended to `[x1, x2]`.
    pub fn spanning(&self, x1: f64, x2: f64) -> Self {
        Self::new(self.point_at_x(x1), self.point_at_x(x2))
    }
}

/// Integer pixel rectangle (`width`/`height` in pixels, inclusive origin).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Abscissa of the last pixel column.
    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Ordinate of the last pixel row.
    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn center_x(&self) -> f64 {
        self.x as f64 + self.width as f64 * 0.5
    }

    pub fn center_y(&self) -> f64 {
        self.y as f64 + self.height as f64 * 0.5
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &PixelRect) -> PixelRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        PixelRect::new(x, y, right - x + 1, bottom - y + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn segment_is_stored_left_to_right() {
        let seg = Segment2::from_coords(10.0, 4.0, 2.0, 0.0);
        assert!(approx_eq(seg.p1.x, 2.0));
        assert!(approx_eq(seg.p2.x, 10.0));
        assert!(approx_eq(seg.slope().unwrap(), 0.5));
    }

    #[test]
    fn y_at_x_extrapolates_supporting_line() {
        let seg = Segment2::from_coords(0.0, 1.0, 4.0, 3.0);
        assert!(approx_eq(seg.y_at_x(8.0), 5.0));
        assert!(approx_eq(seg.y_at_x(-2.0), 0.0));
        let extended = seg.spanning(-2.0, 8.0);
        assert!(approx_eq(extended.p1.y, 0.0));
        assert!(approx_eq(extended.p2.y, 5.0));
    }

    #[test]
    fn vertical_segment_has_no_slope() {
        let seg = Segment2::from_coords(3.0, 0.0, 3.0, 7.0);
        assert!(seg.slope().is_none());
        assert!(approx_eq(seg.y_at_x(12.0), seg.p1.y));
    }

    #[test]
    fn rect_union_and_edges() {
        let a = PixelRect::new(0, 0, 10, 4);
        let b = PixelRect::new(12, 2, 5, 6);
        let u = a.union(&b);
        assert_eq!(u, PixelRect::new(0, 0, 17, 8));
        assert_eq!(u.right(), 16);
        assert_eq!(u.bottom(), 7);
        assert!(approx_eq(a.center_x(), 5.0));
    }
}
