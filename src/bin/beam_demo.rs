use beam_detector::builder::{build_systems, SystemInput};
use beam_detector::config::beams;
use beam_detector::diagnostics::{GlyphOutcome, SystemId, SystemReport};
use beam_detector::glyph::{Glyph, GlyphId};
use beam_detector::graph::{BeamCandidate, InMemoryGraph};
use beam_detector::image::io::{load_binary_mask, save_beam_overlay, write_json_file};
use beam_detector::image::BinaryMask;
use beam_detector::scale::BeamParams;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = beams::load_config(Path::new(&config_path))?;

    let mut masks: Vec<(BinaryMask, [i32; 2])> = Vec::with_capacity(config.inputs.len());
    let mut glyphs = Vec::with_capacity(config.inputs.len());
    for (index, input) in config.inputs.iter().enumerate() {
        let mask = load_binary_mask(&input.path, config.threshold)?;
        let glyph = Glyph::from_mask(GlyphId(index as u32), &mask, input.origin)
            .map_err(|e| format!("Invalid glyph {}: {e}", input.path.display()))?;
        glyphs.push(glyph);
        masks.push((mask, input.origin));
    }

    let system = SystemInput {
        id: SystemId(0),
        scale: config.scale,
        glyphs,
    };
    let graph = InMemoryGraph::new();
    let reports = build_systems(&[system], &config.constants, config.size, &graph);
    let params = BeamParams::new(&config.scale, &config.constants, config.size);

    if let Some(dir) = &config.output.overlay_dir {
        for report in &reports {
            for decision in &report.decisions {
                let GlyphOutcome::Accepted { lines, .. } = &decision.outcome else {
                    continue;
                };
                let (mask, origin) = &masks[decision.glyph.0 as usize];
                let items: Vec<_> = lines.iter().flat_map(|l| l.items()).cloned().collect();
                let path = dir.join(format!("glyph_{:03}.png", decision.glyph.0));
                save_beam_overlay(mask, *origin, &items, &path)?;
            }
        }
    }

    let summary = BeamDemoReport {
        params,
        candidates: graph.candidates(),
        systems: reports,
    };
    write_json_file(&config.output.report_json, &summary)?;

    for report in &summary.systems {
        println!(
            "System {}: {} beam glyph(s), {} rejected",
            report.system.0,
            report.accepted_count(),
            report.rejected_count()
        );
    }
    println!(
        "Saved {} beam candidate(s) to {}",
        summary.candidates.len(),
        config.output.report_json.display()
    );

    Ok(())
}

fn usage() -> String {
    "Usage: beam_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BeamDemoReport {
    params: BeamParams,
    candidates: Vec<BeamCandidate>,
    systems: Vec<SystemReport>,
}
