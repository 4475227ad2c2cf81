//! Vertical section factory.
//!
//! Walks the mask column by column and appends each run to the section of the
//! run it continues in the previous column. A run continues a section only
//! when the link is one-to-one (no split, no merge) and the junction policy
//! accepts the length change; otherwise it opens a new section. Stems crossing
//! a beam, for instance, produce their own sections because of the abrupt
//! change in run length.

use super::{GlyphError, Run, Section};
use crate::image::BinaryMask;
use log::trace;

/// Decides whether a run may continue the section of an overlapping run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JunctionPolicy {
    /// Maximum ratio between the longer and the shorter run lengths.
    pub max_length_ratio: f64,
}

impl Default for JunctionPolicy {
    fn default() -> Self {
        Self {
            max_length_ratio: 1.5,
        }
    }
}

impl JunctionPolicy {
    pub fn accepts(&self, previous: &Run, next: &Run) -> bool {
        let a = previous.length() as f64;
        let b = next.length() as f64;
        a.max(b) <= self.max_length_ratio * a.min(b)
    }
}

struct Building {
    first_pos: i32,
    runs: Vec<Run>,
}

/// Split the foreground of `mask` into vertical sections, in page coordinates.
pub fn vertical_sections(
    mask: &BinaryMask,
    origin: [i32; 2],
    policy: JunctionPolicy,
) -> Result<Vec<Section>, GlyphError> {
    let mut building: Vec<Building> = Vec::new();
    // Runs of the previous column, with the index of the section they ended.
    let mut active: Vec<(Run, usize)> = Vec::new();

    for col in 0..mask.w {
        let x = origin[0] + col as i32;
        let runs: Vec<Run> = mask
            .column_runs(col)
            .into_iter()
            .map(|(start, stop)| Run::new(origin[1] + start as i32, origin[1] + stop as i32))
            .collect();

        let mut next_active = Vec::with_capacity(runs.len());
        for run in &runs {
            let mut overlapping = active.iter().filter(|(prev, _)| prev.overlaps(run));
            let target = match (overlapping.next(), overlapping.next()) {
                (Some(&(prev, sid)), None) => {
                    let fan_out = runs.iter().filter(|r| prev.overlaps(r)).count();
                    (fan_out == 1 && policy.accepts(&prev, run)).then_some(sid)
                }
                _ => None,
            };
            let sid = match target {
                Some(sid) => {
                    building[sid].runs.push(*run);
                    sid
                }
                None => {
                    building.push(Building {
                        first_pos: x,
                        runs: vec![*run],
                    });
                    building.len() - 1
                }
            };
            next_active.push((*run, sid));
        }
        active = next_active;
    }

    trace!("vertical_sections: {} section(s)", building.len());
    building
        .into_iter()
        .map(|b| Section::new(b.first_pos, b.runs))
        .collect()
}
