mod context;
mod cue;
#[cfg(feature = "device-audio")]
mod device;
mod synth;

pub use context::{AudioBackend, AudioContext, RecordingBackend, SilentBackend};
pub use cue::{Envelope, SoundCue, Voice, Waveform};
#[cfg(feature = "device-audio")]
pub use device::RodioBackend;
pub use synth::{render, RenderedCue, DEFAULT_MASTER_GAIN, DEFAULT_SAMPLE_RATE};
