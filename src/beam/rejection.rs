use crate::regression::DegenerateLineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a glyph was not accepted as a beam. Every reason is final for the glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectionReason {
    /// Glyph narrower than the minimum beam width.
    TooNarrow,
    /// Glyph mean thickness below the minimum beam height.
    TooSlim,
    /// Glyph slope beyond the maximum beam slope.
    TooSteep,
    /// Glyph best-fit line undefined.
    Vertical,
    /// A border line could not be fitted.
    DegenerateBorder,
    /// No usable border group on top or bottom.
    NoBorders,
    /// Different numbers of top and bottom border groups.
    MismatchedBorderCount,
    /// Borders too far from their fitted lines.
    WavyBorders,
    /// Top and bottom borders of one beam not parallel.
    DivergingBorders,
    /// Beam lines narrower than the minimum beam width.
    TooNarrowBorders,
    /// Stacked beams not parallel.
    DivergingBeams,
    /// No visible item on any beam line.
    NoItem,
}

impl RejectionReason {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::TooNarrow => "too narrow",
            Self::TooSlim => "too slim",
            Self::TooSteep => "too steep",
            Self::Vertical => "vertical",
            Self::DegenerateBorder => "degenerate border",
            Self::NoBorders => "no borders",
            Self::MismatchedBorderCount => "mismatched border count",
            Self::WavyBorders => "wavy or inconsistent borders",
            Self::DivergingBorders => "diverging borders",
            Self::TooNarrowBorders => "too narrow borders",
            Self::DivergingBeams => "diverging beams",
            Self::NoItem => "no item",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

impl From<DegenerateLineError> for RejectionReason {
    fn from(_: DegenerateLineError) -> Self {
        Self::DegenerateBorder
    }
}
