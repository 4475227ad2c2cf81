//! Hand-off of accepted beams to the interpretation graph.
//!
//! The graph itself (cross-symbol relations, exclusions, final resolution) is
//! external. The beam stages only append candidate vertices and tag their
//! source glyphs, through the [`BeamSink`] trait. Sinks are shared by all
//! processing units running in parallel, hence `&self` methods and the
//! `Send + Sync` bound.

use crate::glyph::GlyphId;
use crate::scale::BeamSize;
use crate::types::Segment2;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;

/// Handle of a vertex inserted into the interpretation graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VertexHandle(pub u64);

/// Classification label attached to a source glyph for display and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GlyphLabel {
    Beam,
    CueBeam,
}

impl From<BeamSize> for GlyphLabel {
    fn from(size: BeamSize) -> Self {
        match size {
            BeamSize::Standard => GlyphLabel::Beam,
            BeamSize::Cue => GlyphLabel::CueBeam,
        }
    }
}

/// Locally scored beam hypothesis.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamCandidate {
    pub glyph: GlyphId,
    pub grade: f64,
    pub size: BeamSize,
    pub north: Segment2,
    pub south: Segment2,
}

impl BeamCandidate {
    /// Mean vertical distance between the two borders.
    pub fn height(&self) -> f64 {
        let left = self.south.p1.y - self.north.p1.y;
        let right = self.south.p2.y - self.north.p2.y;
        0.5 * (left + right)
    }
}

/// Append-only insertion interface of the interpretation graph.
pub trait BeamSink: Send + Sync {
    fn add_beam_candidate(&self, candidate: BeamCandidate) -> VertexHandle;

    fn tag_glyph(&self, glyph: GlyphId, label: GlyphLabel);
}

#[derive(Debug, Default)]
struct GraphState {
    vertices: Vec<BeamCandidate>,
    labels: HashMap<GlyphId, GlyphLabel>,
}

/// In-memory graph recording candidates in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryGraph {
    state: RwLock<GraphState>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.read().vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn candidate(&self, handle: VertexHandle) -> Option<BeamCandidate> {
        self.state.read().vertices.get(handle.0 as usize).cloned()
    }

    /// Snapshot of every candidate, in insertion order.
    pub fn candidates(&self) -> Vec<BeamCandidate> {
        self.state.read().vertices.clone()
    }

    pub fn candidates_of(&self, glyph: GlyphId) -> Vec<BeamCandidate> {
        self.state
            .read()
            .vertices
            .iter()
            .filter(|c| c.glyph == glyph)
            .cloned()
            .collect()
    }

    pub fn label_of(&self, glyph: GlyphId) -> Option<GlyphLabel> {
        self.state.read().labels.get(&glyph).copied()
    }
}

impl BeamSink for InMemoryGraph {
    fn add_beam_candidate(&self, candidate: BeamCandidate) -> VertexHandle {
        let mut state = self.state.write();
        let handle = VertexHandle(state.vertices.len() as u64);
        state.vertices.push(candidate);
        handle
    }

    fn tag_glyph(&self, glyph: GlyphId, label: GlyphLabel) {
        self.state.write().labels.insert(glyph, label);
    }
}
