use serde::Serialize;

/// Normalized contributions to the grade of a beam glyph, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Impacts {
    /// Closeness of the border points to their fitted lines.
    pub dist: f64,
    /// Width beyond the minimum beam width.
    pub width: f64,
    /// Parallelism of top and bottom borders.
    pub slope: f64,
}

impl Impacts {
    pub fn new(dist: f64, width: f64, slope: f64) -> Self {
        Self {
            dist: clamp01(dist),
            width: clamp01(width),
            slope: clamp01(slope),
        }
    }

    /// Equal-weight mean of the impacts.
    pub fn grade(&self) -> f64 {
        (self.dist + self.width + self.slope) / 3.0
    }
}

fn clamp01(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
