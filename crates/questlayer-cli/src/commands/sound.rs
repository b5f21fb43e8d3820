use questlayer_core::audio::{render, Voice};
use questlayer_core::SoundCue;
use serde::Serialize;
use std::path::Path;

use super::load_config;

#[derive(Serialize)]
struct CueReport {
    cue: SoundCue,
    sample_rate: u32,
    samples: usize,
    duration_s: f32,
    peak: f32,
    voices: Vec<Voice>,
}

/// Render a cue offline with the configured rate and volume.
pub fn run(cue: &str, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let cue: SoundCue = cue.parse()?;
    let config = load_config(file)?;
    let rendered = render(
        cue,
        config.engine.sample_rate,
        config.engine.master_volume as f32,
    );
    let report = CueReport {
        cue,
        sample_rate: rendered.sample_rate,
        samples: rendered.samples.len(),
        duration_s: rendered.duration_s(),
        peak: rendered.peak(),
        voices: cue.voices(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
