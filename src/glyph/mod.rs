//! Read-only glyph model consumed by the beam stages.
//!
//! A [`Glyph`] is a blob of foreground pixels described as an ordered list of
//! [`Section`]s, each made of one vertical [`Run`] per pixel column. Glyph
//! extraction itself happens upstream; [`Glyph::from_mask`] offers a compact
//! section factory so that binarized crops (and synthetic test shapes) can be
//! turned into glyphs.
//!
//! Coordinates: a run at column `x` covering rows `start..=stop` spans the
//! continuous area `[x, x+1) x [start, stop+1)`. Border points use the column
//! index as abscissa, the glyph line and centroid use row centers.

mod factory;
mod section;

pub use factory::{vertical_sections, JunctionPolicy};
pub use section::{Run, Section};

use crate::image::BinaryMask;
use crate::regression::{DegenerateLineError, LinearRegressionLine};
use crate::types::PixelRect;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a glyph within the upstream glyph store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlyphId(pub u32);

/// Malformed glyph input. These are contract violations by the supplier.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GlyphError {
    #[error("section at column {first_pos} has no run")]
    EmptySection { first_pos: i32 },
    #[error("run at column {column} is inverted ({start} > {stop})")]
    InvertedRun { column: i32, start: i32, stop: i32 },
    #[error("glyph has no foreground section")]
    NoSection,
}

/// Immutable connected pixel blob.
#[derive(Clone, Debug)]
pub struct Glyph {
    id: GlyphId,
    bounds: PixelRect,
    centroid: Point2<f64>,
    line: LinearRegressionLine,
    weight: usize,
    sections: Vec<Section>,
}

impl Glyph {
    /// Build a glyph from its sections. Sections are reordered by first column.
    pub fn new(id: GlyphId, mut sections: Vec<Section>) -> Result<Self, GlyphError> {
        if sections.is_empty() {
            return Err(GlyphError::NoSection);
        }
        sections.sort_by_key(|s| (s.first_pos(), s.bounds().y));

        let mut bounds = sections[0].bounds();
        let mut line = LinearRegressionLine::new();
        let mut weight = 0usize;
        let mut sum_x = 0.0f64;
        let mut sum_y = 0.0f64;
        for section in &sections {
            bounds = bounds.union(&section.bounds());
            for (x, run) in section.columns() {
                let xf = x as f64;
                for y in run.start..=run.stop {
                    let yc = y as f64 + 0.5;
                    line.include_point(xf, yc);
                    sum_x += xf;
                    sum_y += yc;
                }
                weight += run.length() as usize;
            }
        }
        let centroid = Point2::new(sum_x / weight as f64, sum_y / weight as f64);

        Ok(Self {
            id,
            bounds,
            centroid,
            line,
            weight,
            sections,
        })
    }

    /// Build a glyph from the foreground of `mask`, whose top-left pixel lies at
    /// `origin` in page coordinates.
    pub fn from_mask(id: GlyphId, mask: &BinaryMask, origin: [i32; 2]) -> Result<Self, GlyphError> {
        let sections = vertical_sections(mask, origin, JunctionPolicy::default())?;
        Self::new(id, sections)
    }

    pub fn id(&self) -> GlyphId {
        self.id
    }

    pub fn bounds(&self) -> PixelRect {
        self.bounds
    }

    pub fn width(&self) -> i32 {
        self.bounds.width
    }

    pub fn centroid(&self) -> Point2<f64> {
        self.centroid
    }

    /// Least-squares line through all pixel centers.
    pub fn line(&self) -> &LinearRegressionLine {
        &self.line
    }

    pub fn slope(&self) -> Result<f64, DegenerateLineError> {
        self.line.slope()
    }

    /// Pixel count.
    pub fn weight(&self) -> usize {
        self.weight
    }

    /// Sections ordered by first column.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Average vertical thickness, i.e. weight per column of the bounding box.
    pub fn mean_thickness(&self) -> f64 {
        self.weight as f64 / self.bounds.width.max(1) as f64
    }
}
