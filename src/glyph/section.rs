use super::GlyphError;
use crate::types::PixelRect;
use serde::{Deserialize, Serialize};

/// Contiguous vertical foreground interval `[start, stop]` (inclusive) within
/// one pixel column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Run {
    pub start: i32,
    pub stop: i32,
}

impl Run {
    pub fn new(start: i32, stop: i32) -> Self {
        Self { start, stop }
    }

    pub fn length(&self) -> i32 {
        self.stop - self.start + 1
    }

    /// Ordinate of the lower pixel edge (one past `stop`).
    pub fn end(&self) -> i32 {
        self.stop + 1
    }

    pub fn overlaps(&self, other: &Run) -> bool {
        self.start <= other.stop && other.start <= self.stop
    }
}

/// Sequence of vertical runs in consecutive columns, starting at `first_pos`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    first_pos: i32,
    runs: Vec<Run>,
    bounds: PixelRect,
}

impl Section {
    pub fn new(first_pos: i32, runs: Vec<Run>) -> Result<Self, GlyphError> {
        if runs.is_empty() {
            return Err(GlyphError::EmptySection { first_pos });
        }
        let mut top = i32::MAX;
        let mut bottom = i32::MIN;
        for (i, run) in runs.iter().enumerate() {
            if run.stop < run.start {
                return Err(GlyphError::InvertedRun {
                    column: first_pos + i as i32,
                    start: run.start,
                    stop: run.stop,
                });
            }
            top = top.min(run.start);
            bottom = bottom.max(run.stop);
        }
        let bounds = PixelRect::new(first_pos, top, runs.len() as i32, bottom - top + 1);
        Ok(Self {
            first_pos,
            runs,
            bounds,
        })
    }

    /// Column of the first run.
    pub fn first_pos(&self) -> i32 {
        self.first_pos
    }

    /// Column of the last run.
    pub fn last_pos(&self) -> i32 {
        self.first_pos + self.runs.len() as i32 - 1
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub fn bounds(&self) -> PixelRect {
        self.bounds
    }

    /// Number of foreground pixels.
    pub fn weight(&self) -> usize {
        self.runs.iter().map(|r| r.length() as usize).sum()
    }

    /// Run at pixel column `x`, if the section covers it.
    pub fn run_at(&self, x: i32) -> Option<&Run> {
        if x < self.first_pos {
            return None;
        }
        self.runs.get((x - self.first_pos) as usize)
    }

    /// Whether the continuous point `(x, y)` falls on a pixel of the section.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let column = x.floor() as i32;
        match self.run_at(column) {
            Some(run) => y >= run.start as f64 && y < run.end() as f64,
            None => false,
        }
    }

    /// `(column, run)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (i32, &Run)> + '_ {
        self.runs
            .iter()
            .enumerate()
            .map(move |(i, run)| (self.first_pos + i as i32, run))
    }
}
