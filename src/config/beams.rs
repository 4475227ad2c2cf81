use crate::scale::{BeamConstants, BeamSize, Scale};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct BeamToolConfig {
    /// Binarized glyph crops, one glyph per image.
    pub inputs: Vec<GlyphInputConfig>,
    pub scale: Scale,
    #[serde(default)]
    pub size: BeamSize,
    #[serde(default)]
    pub constants: BeamConstants,
    /// Gray level below which a pixel is foreground.
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    pub output: BeamOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct GlyphInputConfig {
    pub path: PathBuf,
    /// Page position of the crop's top-left pixel.
    #[serde(default)]
    pub origin: [i32; 2],
}

#[derive(Debug, Deserialize)]
pub struct BeamOutputConfig {
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
    /// When set, one overlay PNG per accepted glyph is written there.
    #[serde(default)]
    pub overlay_dir: Option<PathBuf>,
}

fn default_threshold() -> u8 {
    128
}

pub fn load_config(path: &Path) -> Result<BeamToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_takes_defaults() {
        let json = r#"{
            "inputs": [{ "path": "beam.png" }],
            "scale": { "interline": 20.0, "beam_thickness": 10.0 },
            "output": { "report_json": "out/report.json" }
        }"#;
        let config: BeamToolConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.threshold, 128);
        assert_eq!(config.size, BeamSize::Standard);
        assert_eq!(config.constants, BeamConstants::default());
        assert_eq!(config.inputs[0].origin, [0, 0]);
        assert!(config.output.overlay_dir.is_none());
    }

    #[test]
    fn partial_constants_override_defaults() {
        let json = r#"{
            "inputs": [],
            "scale": { "interline": 20.0, "beam_thickness": 10.0 },
            "size": "cue",
            "constants": { "max_beam_slope": 0.5 },
            "output": { "report_json": "r.json", "overlay_dir": "overlays" }
        }"#;
        let config: BeamToolConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.size, BeamSize::Cue);
        assert_eq!(config.constants.max_beam_slope, 0.5);
        assert_eq!(config.constants.min_beam_width, 1.0);
        assert_eq!(config.output.overlay_dir, Some(PathBuf::from("overlays")));
    }
}
