//! Named feedback cues and the notes that make them up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    /// Single rising tone when the session connects.
    Connect,
    /// Fast ascending chord for quest and share rewards.
    Reward,
    /// Slower triangle-wave chord for the daily bonus.
    Fanfare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// Gain shape of a single voice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Envelope {
    /// Constant unit gain for the whole voice.
    Flat,
    /// Linear ramp from 0 to `peak` over `attack_s`, then linear ramp back
    /// to 0 at the end of the voice.
    AttackRelease { peak: f32, attack_s: f32 },
}

/// One oscillator in a cue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Voice {
    pub waveform: Waveform,
    pub freq_start_hz: f32,
    /// Frequency reached at the end of the voice (exponential glide).
    pub freq_end_hz: f32,
    pub start_s: f32,
    pub duration_s: f32,
    pub envelope: Envelope,
}

impl Voice {
    pub fn end_s(&self) -> f32 {
        self.start_s + self.duration_s
    }
}

const REWARD_NOTES: [f32; 4] = [523.25, 659.25, 783.99, 1046.50];
const FANFARE_NOTES: [f32; 4] = [392.00, 523.25, 659.25, 783.99];

fn arpeggio(
    notes: &[f32],
    waveform: Waveform,
    stagger_s: f32,
    attack_s: f32,
    peak: f32,
    duration_s: f32,
) -> Vec<Voice> {
    notes
        .iter()
        .enumerate()
        .map(|(i, &freq)| Voice {
            waveform,
            freq_start_hz: freq,
            freq_end_hz: freq,
            start_s: i as f32 * stagger_s,
            duration_s,
            envelope: Envelope::AttackRelease { peak, attack_s },
        })
        .collect()
}

impl SoundCue {
    pub const ALL: [SoundCue; 3] = [SoundCue::Connect, SoundCue::Reward, SoundCue::Fanfare];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Connect => "connect",
            SoundCue::Reward => "reward",
            SoundCue::Fanfare => "fanfare",
        }
    }

    pub fn voices(&self) -> Vec<Voice> {
        match self {
            SoundCue::Connect => vec![Voice {
                waveform: Waveform::Sine,
                freq_start_hz: 440.0,
                freq_end_hz: 880.0,
                start_s: 0.0,
                duration_s: 0.15,
                envelope: Envelope::Flat,
            }],
            SoundCue::Reward => arpeggio(&REWARD_NOTES, Waveform::Sine, 0.08, 0.04, 0.2, 0.25),
            SoundCue::Fanfare => {
                arpeggio(&FANFARE_NOTES, Waveform::Triangle, 0.12, 0.1, 0.3, 0.6)
            }
        }
    }

    /// Time until the last voice stops.
    pub fn duration_s(&self) -> f32 {
        self.voices()
            .iter()
            .map(Voice::end_s)
            .fold(0.0, f32::max)
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundCue {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundCue::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "sound cue",
                value: s.to_string(),
            })
    }
}
