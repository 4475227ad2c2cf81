//! Serializable diagnostics of the beam stages.
//!
//! `SystemReport` is the entry point returned by the builder for one
//! processing unit: one `GlyphDecision` per examined glyph (accepted with its
//! grade and beam lines, or rejected with the failed check) plus stage timings.

pub mod decision;
pub mod timing;

pub use decision::{GlyphDecision, GlyphOutcome, SystemId, SystemReport};
pub use timing::{StageClock, StageTiming, TimingBreakdown};
