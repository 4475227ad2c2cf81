//! Border extraction for beam candidates.
//!
//! For one glyph and one vertical side, every sufficiently wide section yields
//! a border line fitted through the top (or bottom) ends of its runs. When a
//! glyph is a stack of touching beams, the sections of different beams sit at
//! different heights, so the section borders are clustered by their vertical
//! offset from a glyph-level reference line:
//!
//! - the reference line goes through the glyph centroid with the
//!   point-weighted mean slope of all section borders,
//! - each border gets `dy`, its offset to the reference at the section center,
//! - borders sorted by `dy` are swept once; a border joins the open group when
//!   its `dy` exceeds the group's running mean by at most the allowed jitter
//!   (boundary inclusive), otherwise it opens a new group,
//! - groups with too little evidence (fewer points than the minimum beam
//!   width) are dropped.
//!
//! The result is one border line per beam on that side, ordered top to bottom.

use crate::glyph::{Glyph, Section};
use crate::regression::{DegenerateLineError, LinearRegressionLine};
use crate::scale::BeamParams;
use log::trace;
use serde::{Deserialize, Serialize};

/// Vertical side of a beam.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalSide {
    Top,
    Bottom,
}

/// Border line of one section, with its offset to the glyph reference line.
#[derive(Clone, Debug)]
pub(crate) struct SectionBorder {
    pub(crate) center_x: f64,
    pub(crate) line: LinearRegressionLine,
    pub(crate) dy: f64,
}

/// Border line through the run ends of `section` on `side`.
pub fn section_border_line(section: &Section, side: VerticalSide) -> LinearRegressionLine {
    let mut line = LinearRegressionLine::new();
    for (x, run) in section.columns() {
        let y = match side {
            VerticalSide::Top => run.start,
            VerticalSide::Bottom => run.end(),
        };
        line.include_point(x as f64, y as f64);
    }
    line
}

/// Extract the border lines of `glyph` on `side`, one per detected beam,
/// ordered top to bottom. An empty list means no usable evidence.
pub fn extract_borders(
    glyph: &Glyph,
    side: VerticalSide,
    params: &BeamParams,
) -> Result<Vec<LinearRegressionLine>, DegenerateLineError> {
    let mut borders: Vec<SectionBorder> = glyph
        .sections()
        .iter()
        .filter(|s| s.bounds().width >= params.core_section_width)
        .map(|s| SectionBorder {
            center_x: s.bounds().center_x(),
            line: section_border_line(s, side),
            dy: 0.0,
        })
        .collect();
    if borders.is_empty() {
        return Ok(Vec::new());
    }

    let global_slope = weighted_mean_slope(&borders)?;
    let mut kept = Vec::with_capacity(borders.len());
    for border in borders.drain(..) {
        if (border.line.slope()? - global_slope).abs() <= params.max_section_slope_gap {
            kept.push(border);
        }
    }
    let mut borders = kept;

    let center = glyph.centroid();
    for border in &mut borders {
        let x = border.center_x;
        let reference = center.y + global_slope * (x - center.x);
        border.dy = border.line.y_at_x(x)? - reference;
    }
    borders.sort_by(|a, b| a.dy.total_cmp(&b.dy));

    let groups = group_by_offset(&borders, params.max_border_jitter);
    let min_points = params.min_beam_width;
    let lines: Vec<LinearRegressionLine> = groups
        .into_iter()
        .filter(|line| line.number_of_points() as f64 >= min_points)
        .collect();
    trace!(
        "glyph {:?} {:?}: {} section border(s), slope {:.3}, {} line(s)",
        glyph.id(),
        side,
        borders.len(),
        global_slope,
        lines.len()
    );
    Ok(lines)
}

/// Point-count weighted mean slope of the section borders.
pub(crate) fn weighted_mean_slope(borders: &[SectionBorder]) -> Result<f64, DegenerateLineError> {
    let mut sum_slope = 0.0;
    let mut sum_points = 0usize;
    for border in borders {
        let n = border.line.number_of_points();
        sum_slope += n as f64 * border.line.slope()?;
        sum_points += n;
    }
    if sum_points == 0 {
        return Err(DegenerateLineError::TooFewPoints { count: 0 });
    }
    Ok(sum_slope / sum_points as f64)
}

/// Sweep borders sorted by `dy` and merge them into groups.
///
/// A border joins the current group when `dy - mean <= max_jitter`, `mean`
/// being the point-weighted running mean of the group's offsets.
pub(crate) fn group_by_offset(
    borders: &[SectionBorder],
    max_jitter: f64,
) -> Vec<LinearRegressionLine> {
    let mut groups: Vec<LinearRegressionLine> = Vec::new();
    let mut sum_dy = 0.0f64;
    let mut sum_w = 0.0f64;
    for border in borders {
        let weight = border.line.number_of_points() as f64;
        let opens_group = match groups.last() {
            None => true,
            Some(_) => border.dy - sum_dy / sum_w > max_jitter,
        };
        if opens_group {
            groups.push(LinearRegressionLine::new());
            sum_dy = 0.0;
            sum_w = 0.0;
        }
        sum_dy += weight * border.dy;
        sum_w += weight;
        if let Some(current) = groups.last_mut() {
            current.include_line(&border.line);
        }
    }
    groups
}
