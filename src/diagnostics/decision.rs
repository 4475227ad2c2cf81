use super::TimingBreakdown;
use crate::beam::{BeamLine, RejectionReason};
use crate::builder::Impacts;
use crate::glyph::GlyphId;
use crate::graph::VertexHandle;
use serde::Serialize;

/// Identifier of a processing unit (one system of staves).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SystemId(pub u32);

/// Final state of one glyph.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum GlyphOutcome {
    Accepted {
        grade: f64,
        impacts: Impacts,
        lines: Vec<BeamLine>,
        vertices: Vec<VertexHandle>,
    },
    Rejected {
        reason: RejectionReason,
    },
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphDecision {
    pub glyph: GlyphId,
    pub outcome: GlyphOutcome,
}

impl GlyphDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, GlyphOutcome::Accepted { .. })
    }

    pub fn rejection(&self) -> Option<RejectionReason> {
        match self.outcome {
            GlyphOutcome::Rejected { reason } => Some(reason),
            GlyphOutcome::Accepted { .. } => None,
        }
    }
}

/// Everything the builder decided for one processing unit.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemReport {
    pub system: SystemId,
    pub decisions: Vec<GlyphDecision>,
    pub timing: TimingBreakdown,
}

impl SystemReport {
    pub fn accepted_count(&self) -> usize {
        self.decisions.iter().filter(|d| d.is_accepted()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.decisions.len() - self.accepted_count()
    }

    pub fn decision(&self, glyph: GlyphId) -> Option<&GlyphDecision> {
        self.decisions.iter().find(|d| d.glyph == glyph)
    }
}
