//! Beam geometry model and its refinement.
//!
//! - [`BeamLine`]: median segment plus height for one beam stroke, owning the
//!   [`BeamItem`]s where the stroke is actually drawn.
//! - [`pair_borders`]: builds beam lines from matched top/bottom border lines.
//! - [`BeamStructure`]: ordered lines of one glyph with the refinement steps
//!   (side adjustment, slope comparison, middle-line extension, stuck-beam
//!   split, item decomposition).

mod line;
mod rejection;
mod structure;

pub use line::{pair_borders, BeamItem, BeamLine, BorderQuality, PairedBorders};
pub use rejection::RejectionReason;
pub use structure::BeamStructure;
