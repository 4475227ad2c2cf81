//! Incremental least-squares line fitting.
//!
//! [`LinearRegressionLine`] accumulates raw moments of a point cloud and fits
//! `y = slope * x + intercept` on demand. Accumulators can be merged, which is
//! how per-section border lines are combined into one line per beam border.
//!
//! Beam borders are close to horizontal, so residuals are measured vertically
//! rather than orthogonally.

use crate::types::Segment2;
use thiserror::Error;

/// Raised when no meaningful `y = f(x)` fit exists for the accumulated points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DegenerateLineError {
    #[error("cannot fit a line through {count} point(s)")]
    TooFewPoints { count: usize },
    #[error("points are vertically aligned, slope is undefined")]
    Vertical,
}

/// Online accumulator of `(x, y)` samples with a least-squares fit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearRegressionLine {
    count: usize,
    sum_x: f64,
    sum_y: f64,
    sum_xx: f64,
    sum_xy: f64,
    sum_yy: f64,
    min_x: f64,
    max_x: f64,
}

impl LinearRegressionLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_point(&mut self, x: f64, y: f64) {
        if self.count == 0 {
            self.min_x = x;
            self.max_x = x;
        } else {
            self.min_x = self.min_x.min(x);
            self.max_x = self.max_x.max(x);
        }
        self.count += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xx += x * x;
        self.sum_xy += x * y;
        self.sum_yy += y * y;
    }

    /// Merge the samples accumulated by `other` into `self`.
    pub fn include_line(&mut self, other: &LinearRegressionLine) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            self.min_x = other.min_x;
            self.max_x = other.max_x;
        } else {
            self.min_x = self.min_x.min(other.min_x);
            self.max_x = self.max_x.max(other.max_x);
        }
        self.count += other.count;
        self.sum_x += other.sum_x;
        self.sum_y += other.sum_y;
        self.sum_xx += other.sum_xx;
        self.sum_xy += other.sum_xy;
        self.sum_yy += other.sum_yy;
    }

    pub fn number_of_points(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn min_abscissa(&self) -> f64 {
        self.min_x
    }

    pub fn max_abscissa(&self) -> f64 {
        self.max_x
    }

    fn coefficients(&self) -> Result<(f64, f64), DegenerateLineError> {
        if self.count < 2 {
            return Err(DegenerateLineError::TooFewPoints { count: self.count });
        }
        let n = self.count as f64;
        let den = n * self.sum_xx - self.sum_x * self.sum_x;
        // Relative guard: identical abscissae cancel exactly up to rounding.
        if den.abs() <= 1e-12 * (n * self.sum_xx).abs().max(1.0) {
            return Err(DegenerateLineError::Vertical);
        }
        let slope = (n * self.sum_xy - self.sum_x * self.sum_y) / den;
        let intercept = (self.sum_y - slope * self.sum_x) / n;
        Ok((slope, intercept))
    }

    pub fn slope(&self) -> Result<f64, DegenerateLineError> {
        self.coefficients().map(|(slope, _)| slope)
    }

    pub fn intercept(&self) -> Result<f64, DegenerateLineError> {
        self.coefficients().map(|(_, intercept)| intercept)
    }

    pub fn y_at_x(&self, x: f64) -> Result<f64, DegenerateLineError> {
        self.coefficients()
            .map(|(slope, intercept)| slope * x + intercept)
    }

    /// Root mean square of the vertical residuals to the fitted line.
    pub fn mean_distance(&self) -> Result<f64, DegenerateLineError> {
        let (a, b) = self.coefficients()?;
        let n = self.count as f64;
        let sum_sq = self.sum_yy - 2.0 * a * self.sum_xy - 2.0 * b * self.sum_y
            + a * a * self.sum_xx
            + 2.0 * a * b * self.sum_x
            + n * b * b;
        Ok((sum_sq.max(0.0) / n).sqrt())
    }

    /// Fitted line restricted to the accumulated abscissa range.
    pub fn to_segment(&self) -> Result<Segment2, DegenerateLineError> {
        let (slope, intercept) = self.coefficients()?;
        Ok(Segment2::from_coords(
            self.min_x,
            slope * self.min_x + intercept,
            self.max_x,
            slope * self.max_x + intercept,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn line_of(points: &[(f64, f64)]) -> LinearRegressionLine {
        let mut line = LinearRegressionLine::new();
        for &(x, y) in points {
            line.include_point(x, y);
        }
        line
    }

    #[test]
    fn exact_line_has_zero_residual() {
        let line = line_of(&[(0.0, 1.0), (1.0, 1.5), (2.0, 2.0), (3.0, 2.5)]);
        assert!(approx_eq(line.slope().unwrap(), 0.5));
        assert!(approx_eq(line.intercept().unwrap(), 1.0));
        assert!(approx_eq(line.y_at_x(10.0).unwrap(), 6.0));
        assert!(line.mean_distance().unwrap() < 1e-6);
        assert_eq!(line.number_of_points(), 4);
        assert!(approx_eq(line.min_abscissa(), 0.0));
        assert!(approx_eq(line.max_abscissa(), 3.0));
    }

    #[test]
    fn residual_is_vertical_rms() {
        // Alternating +1/-1 around y = 0.
        let line = line_of(&[(0.0, 1.0), (1.0, -1.0), (2.0, 1.0), (3.0, -1.0)]);
        let slope = line.slope().unwrap();
        let dist = line.mean_distance().unwrap();
        assert!(slope.abs() < 0.5, "slope={slope}");
        assert!(dist > 0.8 && dist <= 1.0, "dist={dist}");
    }

    #[test]
    fn merged_line_matches_single_accumulation() {
        let mut left = line_of(&[(0.0, 2.0), (1.0, 2.0)]);
        let right = line_of(&[(5.0, 2.0), (6.0, 2.0)]);
        left.include_line(&right);
        let all = line_of(&[(0.0, 2.0), (1.0, 2.0), (5.0, 2.0), (6.0, 2.0)]);
        assert_eq!(left, all);
        assert!(approx_eq(left.min_abscissa(), 0.0));
        assert!(approx_eq(left.max_abscissa(), 6.0));
    }

    #[test]
    fn merging_into_empty_line_copies_extent() {
        let mut acc = LinearRegressionLine::new();
        acc.include_line(&line_of(&[(4.0, 0.0), (9.0, 1.0)]));
        assert!(approx_eq(acc.min_abscissa(), 4.0));
        assert!(approx_eq(acc.max_abscissa(), 9.0));
        acc.include_line(&LinearRegressionLine::new());
        assert_eq!(acc.number_of_points(), 2);
    }

    #[test]
    fn degenerate_clouds_are_reported() {
        assert_eq!(
            LinearRegressionLine::new().slope(),
            Err(DegenerateLineError::TooFewPoints { count: 0 })
        );
        assert_eq!(
            line_of(&[(1.0, 1.0)]).slope(),
            Err(DegenerateLineError::TooFewPoints { count: 1 })
        );
        assert_eq!(
            line_of(&[(3.0, 0.0), (3.0, 5.0), (3.0, 9.0)]).slope(),
            Err(DegenerateLineError::Vertical)
        );
        assert!(line_of(&[(3.0, 0.0), (3.0, 5.0)]).mean_distance().is_err());
    }

    #[test]
    fn segment_spans_accumulated_range() {
        let seg = line_of(&[(2.0, 0.0), (4.0, 1.0), (6.0, 2.0)])
            .to_segment()
            .unwrap();
        assert!(approx_eq(seg.p1.x, 2.0));
        assert!(approx_eq(seg.p2.x, 6.0));
        assert!(approx_eq(seg.p1.y, 0.0));
        assert!(approx_eq(seg.p2.y, 2.0));
    }
}
