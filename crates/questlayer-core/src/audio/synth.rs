//! Oscillator synthesis of cues into mono PCM.

use std::f32::consts::TAU;

use super::cue::{Envelope, SoundCue, Voice, Waveform};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_MASTER_GAIN: f32 = 0.08;

/// A cue rendered to mono `f32` samples in `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCue {
    pub cue: SoundCue,
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl RenderedCue {
    pub fn duration_s(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0, |acc, s| acc.max(s.abs()))
    }
}

pub fn render(cue: SoundCue, sample_rate: u32, master_gain: f32) -> RenderedCue {
    let rate = sample_rate.max(1) as f32;
    let len = (cue.duration_s() * rate).ceil() as usize;
    let mut samples = vec![0.0f32; len];

    for voice in cue.voices() {
        mix_voice(&voice, rate, master_gain, &mut samples);
    }
    for s in samples.iter_mut() {
        *s = s.clamp(-1.0, 1.0);
    }

    RenderedCue {
        cue,
        sample_rate,
        samples,
    }
}

fn mix_voice(voice: &Voice, rate: f32, master_gain: f32, out: &mut [f32]) {
    let first = (voice.start_s * rate).round() as usize;
    let count = (voice.duration_s * rate).round() as usize;
    let mut phase = 0.0f32;

    for n in 0..count {
        let Some(slot) = out.get_mut(first + n) else {
            break;
        };
        let t = n as f32 / rate;
        *slot += oscillator(voice.waveform, phase) * envelope_gain(voice, t) * master_gain;
        phase = (phase + frequency_at(voice, t) / rate).fract();
    }
}

/// Exponential glide from start to end frequency across the voice.
fn frequency_at(voice: &Voice, t: f32) -> f32 {
    if voice.freq_start_hz == voice.freq_end_hz || voice.duration_s <= 0.0 {
        return voice.freq_start_hz;
    }
    let ratio = voice.freq_end_hz / voice.freq_start_hz;
    voice.freq_start_hz * ratio.powf((t / voice.duration_s).min(1.0))
}

fn envelope_gain(voice: &Voice, t: f32) -> f32 {
    match voice.envelope {
        Envelope::Flat => 1.0,
        Envelope::AttackRelease { peak, attack_s } => {
            if t < attack_s {
                peak * t / attack_s
            } else {
                let release = (voice.duration_s - attack_s).max(f32::EPSILON);
                peak * (1.0 - (t - attack_s) / release).max(0.0)
            }
        }
    }
}

fn oscillator(waveform: Waveform, phase: f32) -> f32 {
    match waveform {
        Waveform::Sine => (phase * TAU).sin(),
        Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
    }
}
