//! Scale-derived parameters.
//!
//! All thresholds used by the beam stages are expressed either as fractions of
//! the interline (distance between two staff lines), as ratios of the typical
//! beam height, or as plain tangents. [`BeamConstants`] holds those
//! resolution-independent values; [`BeamParams`] is the pixel-space snapshot
//! computed once per processing unit from a [`Scale`] and shared read-only.

use serde::{Deserialize, Serialize};

/// Scale estimate supplied by the upstream scale detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Interline in pixels.
    pub interline: f64,
    /// Typical (standard size) beam thickness in pixels.
    pub beam_thickness: f64,
}

impl Scale {
    pub fn new(interline: f64, beam_thickness: f64) -> Self {
        Self {
            interline,
            beam_thickness,
        }
    }

    /// Convert an interline fraction to pixels.
    pub fn to_pixels(&self, fraction: f64) -> f64 {
        fraction * self.interline
    }
}

/// Beam flavour being searched for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeamSize {
    #[default]
    Standard,
    /// Smaller beams attached to cue (grace) notes.
    Cue,
}

/// Resolution-independent constants of the beam stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConstants {
    /// Minimum width for a beam (interline fraction).
    pub min_beam_width: f64,
    /// Width beyond the minimum that earns a full width grade (interline fraction).
    pub min_large_beam_width: f64,
    /// Acceptable abscissa gap within a beam item (interline fraction).
    pub max_item_x_gap: f64,
    /// Maximum mean distance to the fitted beam borders (interline fraction).
    pub max_distance_to_border: f64,
    /// Maximum absolute tangent of a beam.
    pub max_beam_slope: f64,
    /// Maximum slope delta between top and bottom borders of one beam.
    pub max_delta_slope: f64,
    /// Maximum slope delta between consecutive beams of one glyph.
    pub max_beam_slope_gap: f64,
    /// Maximum slope delta between a section border and the border average.
    pub max_section_slope_gap: f64,
    /// Minimum glyph mean thickness, as ratio of typical beam height.
    pub min_height_ratio: f64,
    /// Maximum vertical jitter within one border, as ratio of typical beam height.
    pub max_border_jitter_ratio: f64,
    /// Typical height of cue beams, as ratio of standard beam height.
    pub cue_beam_ratio: f64,
    /// Minimum width in pixels of a section contributing to borders.
    pub core_section_width: i32,
}

impl Default for BeamConstants {
    fn default() -> Self {
        Self {
            min_beam_width: 1.0,
            min_large_beam_width: 2.0,
            max_item_x_gap: 0.5,
            max_distance_to_border: 0.15,
            max_beam_slope: 1.0,
            max_delta_slope: 0.15,
            max_beam_slope_gap: 0.07,
            max_section_slope_gap: 0.3,
            min_height_ratio: 0.7,
            max_border_jitter_ratio: 0.75,
            cue_beam_ratio: 0.6,
            core_section_width: 3,
        }
    }
}

/// Pixel-space thresholds for one processing unit.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamParams {
    pub size: BeamSize,
    pub min_beam_width: f64,
    pub min_large_beam_width: f64,
    pub max_beam_slope: f64,
    pub max_delta_slope: f64,
    pub max_beam_slope_gap: f64,
    pub max_section_slope_gap: f64,
    pub max_distance_to_border: f64,
    pub typical_beam_height: f64,
    pub min_height: f64,
    pub max_border_jitter: f64,
    pub max_item_x_gap: f64,
    pub core_section_width: i32,
}

impl BeamParams {
    pub fn new(scale: &Scale, constants: &BeamConstants, size: BeamSize) -> Self {
        let typical_beam_height = match size {
            BeamSize::Standard => scale.beam_thickness,
            BeamSize::Cue => scale.beam_thickness * constants.cue_beam_ratio,
        };
        Self {
            size,
            min_beam_width: scale.to_pixels(constants.min_beam_width),
            min_large_beam_width: scale.to_pixels(constants.min_large_beam_width),
            max_beam_slope: constants.max_beam_slope,
            max_delta_slope: constants.max_delta_slope,
            max_beam_slope_gap: constants.max_beam_slope_gap,
            max_section_slope_gap: constants.max_section_slope_gap,
            max_distance_to_border: scale.to_pixels(constants.max_distance_to_border),
            typical_beam_height,
            min_height: typical_beam_height * constants.min_height_ratio,
            max_border_jitter: typical_beam_height * constants.max_border_jitter_ratio,
            max_item_x_gap: scale.to_pixels(constants.max_item_x_gap),
            // A border line needs two distinct columns.
            core_section_width: constants.core_section_width.max(2),
        }
    }

    pub fn standard(scale: &Scale) -> Self {
        Self::new(scale, &BeamConstants::default(), BeamSize::Standard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_scale_with_interline() {
        let small = BeamParams::standard(&Scale::new(16.0, 8.0));
        let large = BeamParams::standard(&Scale::new(32.0, 16.0));
        assert_eq!(small.min_beam_width, 16.0);
        assert_eq!(large.min_beam_width, 32.0);
        assert_eq!(small.max_item_x_gap, 8.0);
        assert_eq!(small.max_border_jitter, 6.0);
        assert_eq!(large.max_border_jitter, 12.0);
        assert_eq!(small.max_beam_slope, large.max_beam_slope);
    }

    #[test]
    fn cue_params_shrink_typical_height() {
        let scale = Scale::new(20.0, 10.0);
        let cue = BeamParams::new(&scale, &BeamConstants::default(), BeamSize::Cue);
        assert!((cue.typical_beam_height - 6.0).abs() < 1e-9);
        assert!((cue.min_height - 4.2).abs() < 1e-9);
        assert_eq!(cue.size, BeamSize::Cue);
    }

    #[test]
    fn constants_deserialize_with_defaults() {
        let constants: BeamConstants =
            serde_json::from_str(r#"{ "max_beam_slope": 0.5 }"#).unwrap();
        assert_eq!(constants.max_beam_slope, 0.5);
        assert_eq!(constants.min_beam_width, 1.0);
        assert_eq!(constants.core_section_width, 3);
    }

    #[test]
    fn core_section_width_keeps_two_columns() {
        let constants = BeamConstants {
            core_section_width: 1,
            ..BeamConstants::default()
        };
        let params = BeamParams::new(&Scale::new(16.0, 8.0), &constants, BeamSize::Standard);
        assert_eq!(params.core_section_width, 2);
    }
}
