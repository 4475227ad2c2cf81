//! Beam glyph builder of one processing unit.
//!
//! For every candidate glyph the builder runs the cheap checks first (width,
//! thickness, slope), then extracts and pairs top and bottom borders, checks
//! their straightness and parallelism, refines the resulting beam lines and
//! finally emits one graded candidate per visible beam item into the sink.
//! The first failing check rejects the glyph; nothing is emitted for it.
//! Time spent in each stage (checks, borders, refinement, emission) is
//! cumulated per unit in the report.
//!
//! [`build_systems`] processes independent units on the rayon pool, each with
//! its own immutable [`BeamParams`], all writing into the same sink.

mod grade;

pub use grade::Impacts;

use crate::beam::{BeamLine, BeamStructure, BorderQuality, RejectionReason};
use crate::diagnostics::{GlyphDecision, GlyphOutcome, StageClock, SystemId, SystemReport};
use crate::glyph::Glyph;
use crate::graph::{BeamCandidate, BeamSink, GlyphLabel, VertexHandle};
use crate::scale::{BeamConstants, BeamParams, BeamSize, Scale};
use log::{debug, info};
use rayon::prelude::*;
use std::time::Instant;

/// Accepted glyph, before emission.
#[derive(Clone, Debug)]
pub struct BeamEvaluation {
    pub grade: f64,
    pub impacts: Impacts,
    /// Refined lines, top to bottom, with their items.
    pub lines: Vec<BeamLine>,
    /// Whether the glyph was split into two stuck beams.
    pub split: bool,
}

impl BeamEvaluation {
    pub fn item_count(&self) -> usize {
        self.lines.iter().map(|l| l.items().len()).sum()
    }
}

/// Glyphs and scale of one processing unit.
#[derive(Clone, Debug)]
pub struct SystemInput {
    pub id: SystemId,
    pub scale: Scale,
    pub glyphs: Vec<Glyph>,
}

pub struct BeamsBuilder<'s> {
    params: BeamParams,
    sink: &'s dyn BeamSink,
}

impl<'s> BeamsBuilder<'s> {
    pub fn new(params: BeamParams, sink: &'s dyn BeamSink) -> Self {
        Self { params, sink }
    }

    pub fn params(&self) -> &BeamParams {
        &self.params
    }

    /// Check every glyph of the unit, in the given order.
    pub fn build_beams(&self, system: SystemId, glyphs: &[Glyph]) -> SystemReport {
        let start = Instant::now();
        let mut clock = StageClock::new();
        let decisions: Vec<GlyphDecision> = glyphs
            .iter()
            .map(|g| self.check_timed(g, &mut clock))
            .collect();
        let timing = clock.into_breakdown(start.elapsed());

        let report = SystemReport {
            system,
            decisions,
            timing,
        };
        info!(
            "system {}: {} {:?} beam glyph(s) accepted, {} rejected in {:.2} ms",
            system.0,
            report.accepted_count(),
            self.params.size,
            report.rejected_count(),
            report.timing.total_ms
        );
        report
    }

    /// Evaluate `glyph` and, when accepted, insert its candidates into the sink
    /// and tag the glyph.
    pub fn check_beam_glyph(&self, glyph: &Glyph) -> GlyphDecision {
        self.check_timed(glyph, &mut StageClock::new())
    }

    fn check_timed(&self, glyph: &Glyph, clock: &mut StageClock) -> GlyphDecision {
        let outcome = match self.evaluate_timed(glyph, clock) {
            Ok(evaluation) => {
                let vertices = clock.time("emission", || self.emit(glyph, &evaluation));
                debug!(
                    "glyph {:?}: {} line(s), {} item(s), grade {:.3}",
                    glyph.id(),
                    evaluation.lines.len(),
                    vertices.len(),
                    evaluation.grade
                );
                GlyphOutcome::Accepted {
                    grade: evaluation.grade,
                    impacts: evaluation.impacts,
                    lines: evaluation.lines,
                    vertices,
                }
            }
            Err(reason) => {
                debug!("glyph {:?} rejected: {}", glyph.id(), reason);
                GlyphOutcome::Rejected { reason }
            }
        };
        GlyphDecision {
            glyph: glyph.id(),
            outcome,
        }
    }

    /// Run all checks on `glyph` without touching the sink.
    pub fn evaluate(&self, glyph: &Glyph) -> Result<BeamEvaluation, RejectionReason> {
        self.evaluate_timed(glyph, &mut StageClock::new())
    }

    fn evaluate_timed(
        &self,
        glyph: &Glyph,
        clock: &mut StageClock,
    ) -> Result<BeamEvaluation, RejectionReason> {
        let p = &self.params;
        clock.time("checks", || self.check_glyph(glyph))?;

        let mut structure = BeamStructure::new(glyph, p);
        let quality = clock.time("borders", || self.check_borders(&mut structure))?;

        let (lines, split) = clock.time("refinement", || {
            structure.adjust_sides();
            structure.extend_middle_lines();
            let split = structure.split_lines();
            structure.retrieve_items();
            (structure.into_lines(), split)
        });
        if lines.iter().all(|l| l.items().is_empty()) {
            return Err(RejectionReason::NoItem);
        }

        let impacts = Impacts::new(
            1.0 - quality.mean_distance / p.max_distance_to_border,
            (glyph.width() as f64 - p.min_beam_width) / p.min_large_beam_width,
            1.0 - quality.mean_delta_slope() / p.max_delta_slope,
        );
        Ok(BeamEvaluation {
            grade: impacts.grade(),
            impacts,
            lines,
            split,
        })
    }

    /// Cheap glyph-level checks, run before any border extraction.
    fn check_glyph(&self, glyph: &Glyph) -> Result<(), RejectionReason> {
        let p = &self.params;
        if (glyph.width() as f64) < p.min_beam_width {
            return Err(RejectionReason::TooNarrow);
        }
        if glyph.mean_thickness() < p.min_height {
            return Err(RejectionReason::TooSlim);
        }
        // Cue beams are short and often curved by their attachment.
        if p.size == BeamSize::Standard {
            let slope = glyph.slope().map_err(|_| RejectionReason::Vertical)?;
            if slope.abs() > p.max_beam_slope {
                return Err(RejectionReason::TooSteep);
            }
        }
        Ok(())
    }

    fn check_borders(
        &self,
        structure: &mut BeamStructure<'_>,
    ) -> Result<BorderQuality, RejectionReason> {
        let p = &self.params;
        let quality = structure.compute_lines()?;
        if quality.mean_distance > p.max_distance_to_border {
            return Err(RejectionReason::WavyBorders);
        }
        if quality.max_delta_slope() > p.max_delta_slope {
            return Err(RejectionReason::DivergingBorders);
        }
        if structure.width() < p.min_beam_width {
            return Err(RejectionReason::TooNarrowBorders);
        }
        if structure.compare_slopes() > p.max_beam_slope_gap {
            return Err(RejectionReason::DivergingBeams);
        }
        Ok(quality)
    }

    fn emit(&self, glyph: &Glyph, evaluation: &BeamEvaluation) -> Vec<VertexHandle> {
        let mut vertices = Vec::with_capacity(evaluation.item_count());
        for item in evaluation.lines.iter().flat_map(|l| l.items()) {
            let candidate = BeamCandidate {
                glyph: glyph.id(),
                grade: evaluation.grade,
                size: self.params.size,
                north: item.north(),
                south: item.south(),
            };
            vertices.push(self.sink.add_beam_candidate(candidate));
        }
        self.sink
            .tag_glyph(glyph.id(), GlyphLabel::from(self.params.size));
        vertices
    }
}

/// Build beams of independent units in parallel. Reports follow input order.
pub fn build_systems(
    systems: &[SystemInput],
    constants: &BeamConstants,
    size: BeamSize,
    sink: &dyn BeamSink,
) -> Vec<SystemReport> {
    systems
        .par_iter()
        .map(|system| {
            let params = BeamParams::new(&system.scale, constants, size);
            BeamsBuilder::new(params, sink).build_beams(system.id, &system.glyphs)
        })
        .collect()
}
