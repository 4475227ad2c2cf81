use super::line::{pair_borders, BeamItem, BeamLine, BorderQuality};
use super::RejectionReason;
use crate::border::{extract_borders, VerticalSide};
use crate::glyph::Glyph;
use crate::scale::BeamParams;
use log::debug;
use std::fmt;

/// Beam lines reconstructed from one candidate glyph, top to bottom.
///
/// Created per glyph, filled once by [`BeamStructure::compute_lines`], then
/// refined in place before being accepted or dropped.
#[derive(Clone, Debug)]
pub struct BeamStructure<'a> {
    glyph: &'a Glyph,
    params: &'a BeamParams,
    lines: Vec<BeamLine>,
}

impl<'a> BeamStructure<'a> {
    pub fn new(glyph: &'a Glyph, params: &'a BeamParams) -> Self {
        Self {
            glyph,
            params,
            lines: Vec::new(),
        }
    }

    /// Structure over already known lines (sorted top to bottom).
    pub fn with_lines(glyph: &'a Glyph, params: &'a BeamParams, lines: Vec<BeamLine>) -> Self {
        let mut structure = Self {
            glyph,
            params,
            lines,
        };
        structure.sort_lines();
        structure
    }

    pub fn glyph(&self) -> &'a Glyph {
        self.glyph
    }

    pub fn lines(&self) -> &[BeamLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<BeamLine> {
        self.lines
    }

    /// Order lines by their ordinate at the middle of the common envelope.
    ///
    /// Stacked lines may cover different abscissa ranges on a slanted beam, so
    /// their own midpoints are not comparable.
    fn sort_lines(&mut self) {
        if self.lines.len() < 2 {
            return;
        }
        let (x_left, x_right) = self.envelope();
        let x_mid = 0.5 * (x_left + x_right);
        self.lines
            .sort_by(|a, b| a.median.y_at_x(x_mid).total_cmp(&b.median.y_at_x(x_mid)));
    }

    /// Extract top and bottom borders, pair them and build the beam lines.
    ///
    /// Unequal border counts reject the whole glyph, no partial result is kept.
    /// Lines come out in border offset order, which is top to bottom.
    pub fn compute_lines(&mut self) -> Result<BorderQuality, RejectionReason> {
        let top = extract_borders(self.glyph, VerticalSide::Top, self.params)?;
        let bottom = extract_borders(self.glyph, VerticalSide::Bottom, self.params)?;
        if top.len() != bottom.len() {
            debug!(
                "glyph {:?}: {} top vs {} bottom border(s)",
                self.glyph.id(),
                top.len(),
                bottom.len()
            );
        }
        let paired = pair_borders(&top, &bottom)?;
        self.lines = paired.lines;
        Ok(paired.quality)
    }

    /// Snap median ends lying close to the glyph's left or right edge onto it.
    pub fn adjust_sides(&mut self) {
        let bounds = self.glyph.bounds();
        let g_left = bounds.x as f64;
        let g_right = bounds.right() as f64;
        let margin = self.params.min_beam_width;
        for line in &mut self.lines {
            let mut x1 = line.median.p1.x;
            let mut x2 = line.median.p2.x;
            if x1 - g_left < margin {
                x1 = g_left;
            }
            if g_right - x2 < margin {
                x2 = g_right;
            }
            line.median = line.median.spanning(x1, x2);
        }
    }

    /// Largest slope difference between two consecutive lines.
    pub fn compare_slopes(&self) -> f64 {
        self.lines
            .windows(2)
            .map(|pair| (pair[1].slope() - pair[0].slope()).abs())
            .fold(0.0, f64::max)
    }

    /// With three lines or more, extend every median to the common envelope.
    pub fn extend_middle_lines(&mut self) {
        if self.lines.len() < 3 {
            return;
        }
        let (x_left, x_right) = self.envelope();
        for line in &mut self.lines {
            line.median = line.median.spanning(x_left, x_right);
        }
    }

    /// Split a single line into two stuck beams when the glyph is about twice
    /// as thick as a typical beam. Returns whether a split happened.
    pub fn split_lines(&mut self) -> bool {
        let typical = self.params.typical_beam_height;
        let ratio = self.glyph.mean_thickness() / typical;
        let target_count = ratio.round() as usize;
        if self.lines.len() != 1 || target_count < 2 {
            return false;
        }

        let line = &self.lines[0];
        let gutter = line.height - 2.0 * typical;
        if gutter < 0.0 {
            debug!(
                "glyph {:?}: not enough room for 2 beams (height {:.1})",
                self.glyph.id(),
                line.height
            );
            return false;
        }
        let new_height = (line.height - gutter) * 0.5;
        let dy = (new_height + gutter) * 0.5;
        debug!(
            "glyph {:?}: stuck beams, ratio {:.2}, gutter {:.1}",
            self.glyph.id(),
            ratio,
            gutter
        );
        let top = BeamLine::new(line.median.translated(-dy), new_height);
        let bottom = BeamLine::new(line.median.translated(dy), new_height);
        self.lines = vec![top, bottom];
        true
    }

    /// Rebuild the visible items of every line.
    pub fn retrieve_items(&mut self) {
        for i in 0..self.lines.len() {
            let items = self.items_of(&self.lines[i]);
            self.lines[i].set_items(items);
        }
    }

    /// Sections crossed by the median are gathered into items; a horizontal
    /// gap wider than `max_item_x_gap` starts a new item. Items narrower than
    /// `min_beam_width`, or on a line thinner than `min_height`, are dropped.
    ///
    /// Unlike line medians, whose ends sit on pixel column indices, item
    /// medians span pixel edges: `[first column, last column + 1]`, so that
    /// the item width equals its number of columns.
    fn items_of(&self, line: &BeamLine) -> Vec<BeamItem> {
        if line.height < self.params.min_height {
            debug!(
                "glyph {:?}: line too thin for items (height {:.1})",
                self.glyph.id(),
                line.height
            );
            return Vec::new();
        }
        let median = line.median;
        let min_width = self.params.min_beam_width;
        let glyph_id = self.glyph.id();
        let mut items = Vec::new();
        let mut push_item = |start: i32, stop: i32| {
            let width = (stop - start) as f64;
            if width >= min_width {
                items.push(BeamItem::new(
                    median.spanning(start as f64, stop as f64),
                    line.height,
                ));
            } else {
                debug!("glyph {:?}: dropped item {}..{}, too narrow", glyph_id, start, stop);
            }
        };

        let mut span: Option<(i32, i32)> = None;
        for section in self.glyph.sections() {
            let bounds = section.bounds();
            let cx = bounds.center_x();
            if !section.contains(cx, median.y_at_x(cx)) {
                continue;
            }
            let section_stop = bounds.x + bounds.width;
            span = Some(match span {
                None => (bounds.x, section_stop),
                Some((start, stop)) if (bounds.x - stop) as f64 > self.params.max_item_x_gap => {
                    push_item(start, stop);
                    (bounds.x, section_stop)
                }
                Some((start, stop)) => (start, stop.max(section_stop)),
            });
        }
        if let Some((start, stop)) = span {
            push_item(start, stop);
        }
        items
    }

    fn envelope(&self) -> (f64, f64) {
        self.lines.iter().fold((f64::MAX, f64::MIN), |(l, r), line| {
            (l.min(line.median.p1.x), r.max(line.median.p2.x))
        })
    }

    /// Horizontal extent covered by the lines, in pixels.
    pub fn width(&self) -> f64 {
        if self.lines.is_empty() {
            return 0.0;
        }
        let (x_left, x_right) = self.envelope();
        x_right - x_left + 1.0
    }
}

impl fmt::Display for BeamStructure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "beamGlyph#{}", self.glyph.id().0)?;
        for line in &self.lines {
            write!(
                f,
                " [({:.1},{:.1})-({:.1},{:.1}) h:{:.1}]",
                line.median.p1.x, line.median.p1.y, line.median.p2.x, line.median.p2.y, line.height
            )?;
        }
        Ok(())
    }
}
