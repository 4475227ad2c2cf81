use super::RejectionReason;
use crate::regression::LinearRegressionLine;
use crate::types::Segment2;
use serde::Serialize;

/// Contiguous visible span of a beam line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BeamItem {
    pub median: Segment2,
    pub height: f64,
}

impl BeamItem {
    pub fn new(median: Segment2, height: f64) -> Self {
        Self {
            median,
            height: height.max(0.0),
        }
    }

    pub fn width(&self) -> f64 {
        self.median.width()
    }

    /// Upper border.
    pub fn north(&self) -> Segment2 {
        self.median.translated(-self.height * 0.5)
    }

    /// Lower border.
    pub fn south(&self) -> Segment2 {
        self.median.translated(self.height * 0.5)
    }
}

/// One reconstructed beam stroke: median segment, height and visible items.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BeamLine {
    pub median: Segment2,
    pub height: f64,
    items: Vec<BeamItem>,
}

impl BeamLine {
    /// Negative heights are clamped to zero.
    pub fn new(median: Segment2, height: f64) -> Self {
        Self {
            median,
            height: height.max(0.0),
            items: Vec::new(),
        }
    }

    /// Visible items, left to right.
    pub fn items(&self) -> &[BeamItem] {
        &self.items
    }

    pub(crate) fn set_items(&mut self, items: Vec<BeamItem>) {
        self.items = items;
    }

    pub fn slope(&self) -> f64 {
        self.median.slope().unwrap_or(0.0)
    }

    pub fn north(&self) -> Segment2 {
        self.median.translated(-self.height * 0.5)
    }

    pub fn south(&self) -> Segment2 {
        self.median.translated(self.height * 0.5)
    }
}

/// Straightness and parallelism of the borders a structure was built from.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderQuality {
    /// Point-weighted mean residual of all border points to their lines.
    pub mean_distance: f64,
    /// `|slope(top) - slope(bottom)|` for each pair.
    pub slope_deltas: Vec<f64>,
}

/// Beam lines built from matched top/bottom borders.
#[derive(Clone, Debug)]
pub struct PairedBorders {
    /// Lines, top to bottom.
    pub lines: Vec<BeamLine>,
    pub quality: BorderQuality,
}

impl BorderQuality {
    pub fn max_delta_slope(&self) -> f64 {
        self.slope_deltas.iter().copied().fold(0.0, f64::max)
    }

    pub fn mean_delta_slope(&self) -> f64 {
        if self.slope_deltas.is_empty() {
            0.0
        } else {
            self.slope_deltas.iter().sum::<f64>() / self.slope_deltas.len() as f64
        }
    }
}

/// Pair top and bottom border lines index by index into beam lines.
///
/// Both lists are ordered top to bottom and must have the same length.
pub fn pair_borders(
    top_lines: &[LinearRegressionLine],
    bottom_lines: &[LinearRegressionLine],
) -> Result<PairedBorders, RejectionReason> {
    if top_lines.is_empty() || bottom_lines.is_empty() {
        return Err(RejectionReason::NoBorders);
    }
    if top_lines.len() != bottom_lines.len() {
        return Err(RejectionReason::MismatchedBorderCount);
    }

    let mut lines = Vec::with_capacity(top_lines.len());
    let mut slope_deltas = Vec::with_capacity(top_lines.len());
    for (top, bot) in top_lines.iter().zip(bottom_lines) {
        let x1 = top.min_abscissa().min(bot.min_abscissa());
        let x2 = top.max_abscissa().max(bot.max_abscissa());
        let yt1 = top.y_at_x(x1)?;
        let yb1 = bot.y_at_x(x1)?;
        let yt2 = top.y_at_x(x2)?;
        let yb2 = bot.y_at_x(x2)?;
        let height = ((yb1 - yt1) + (yb2 - yt2)) * 0.5;
        let median = Segment2::from_coords(x1, (yt1 + yb1) * 0.5, x2, (yt2 + yb2) * 0.5);
        lines.push(BeamLine::new(median, height));
        slope_deltas.push((top.slope()? - bot.slope()?).abs());
    }

    let mut sum_points = 0usize;
    let mut sum_dist = 0.0f64;
    for line in top_lines.iter().chain(bottom_lines) {
        let n = line.number_of_points();
        sum_points += n;
        sum_dist += line.mean_distance()? * n as f64;
    }
    let mean_distance = sum_dist / sum_points.max(1) as f64;

    Ok(PairedBorders {
        lines,
        quality: BorderQuality {
            mean_distance,
            slope_deltas,
        },
    })
}
