//! Beam reconstruction from binarized music-score glyphs.
//!
//! Given the glyphs of one system (processing unit) and its scale, the
//! builder decides for every glyph whether it is made of one or more beams,
//! reconstructs each beam as a median line plus height, grades it, and hands
//! graded candidates over to an interpretation graph through [`BeamSink`].
//!
//! ```no_run
//! use beam_detector::prelude::*;
//!
//! # fn main() {
//! let mut mask = BinaryMask::new(40, 8);
//! mask.fill_rect(0, 0, 40, 8);
//! let glyph = Glyph::from_mask(GlyphId(1), &mask, [0, 0]).unwrap();
//!
//! let graph = InMemoryGraph::new();
//! let builder = BeamsBuilder::new(BeamParams::standard(&Scale::new(16.0, 8.0)), &graph);
//! let report = builder.build_beams(SystemId(0), &[glyph]);
//! println!("accepted={} candidates={}", report.accepted_count(), graph.len());
//! # }
//! ```

// Core beam stages.
pub mod beam;
pub mod border;
pub mod builder;
pub mod scale;

// Inputs, outputs and shared geometry.
pub mod diagnostics;
pub mod glyph;
pub mod graph;
pub mod image;
pub mod regression;
pub mod types;

// Demo tool plumbing.
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::beam::{BeamItem, BeamLine, BeamStructure, RejectionReason};
pub use crate::builder::{build_systems, BeamEvaluation, BeamsBuilder, SystemInput};
pub use crate::diagnostics::{GlyphDecision, GlyphOutcome, SystemId, SystemReport};
pub use crate::graph::{BeamCandidate, BeamSink, GlyphLabel, InMemoryGraph, VertexHandle};
pub use crate::scale::{BeamConstants, BeamParams, BeamSize, Scale};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::glyph::{Glyph, GlyphId};
    pub use crate::image::BinaryMask;
    pub use crate::{
        BeamParams, BeamSink, BeamsBuilder, InMemoryGraph, Scale, SystemId, SystemReport,
    };
}
