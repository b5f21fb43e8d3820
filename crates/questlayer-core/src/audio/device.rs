//! Speaker output through rodio.
//!
//! The output stream is not `Send`, so it lives on a dedicated thread that
//! owns the device; the backend only holds the sending half of a channel.

use std::sync::mpsc::{self, Sender};
use std::thread;

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};

use super::context::AudioBackend;
use super::synth::RenderedCue;
use crate::error::AudioError;

/// Plays cues on the default output device.
///
/// The device is acquired in `open`, so constructing the backend never
/// touches audio hardware.
#[derive(Debug, Default)]
pub struct RodioBackend {
    cues: Option<Sender<RenderedCue>>,
}

impl RodioBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioBackend for RodioBackend {
    fn open(&mut self, sample_rate: u32) -> Result<(), AudioError> {
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), String>>(1);
        let (cue_tx, cue_rx) = mpsc::channel::<RenderedCue>();

        thread::Builder::new()
            .name("questlayer-audio".into())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(err) => {
                        let _ = ready_tx.send(Err(err.to_string()));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));

                // One detached sink per cue, so overlapping cues mix.
                for cue in cue_rx {
                    match Sink::try_new(&handle) {
                        Ok(sink) => {
                            sink.append(SamplesBuffer::new(1, cue.sample_rate, cue.samples));
                            sink.detach();
                        }
                        Err(err) => tracing::debug!(error = %err, "audio sink unavailable"),
                    }
                }
            })
            .map_err(|e| AudioError::Unavailable(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                tracing::debug!(sample_rate, "speaker output ready");
                self.cues = Some(cue_tx);
                Ok(())
            }
            Ok(Err(message)) => Err(AudioError::Unavailable(message)),
            Err(_) => Err(AudioError::Unavailable("audio thread exited".into())),
        }
    }

    fn is_suspended(&self) -> bool {
        false
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn submit(&mut self, cue: &RenderedCue) -> Result<(), AudioError> {
        let cues = self
            .cues
            .as_ref()
            .ok_or_else(|| AudioError::Unavailable("output not opened".into()))?;
        cues.send(cue.clone())
            .map_err(|_| AudioError::PlaybackFailed("audio thread exited".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{render, SoundCue, DEFAULT_SAMPLE_RATE};

    #[test]
    fn submit_before_open_is_unavailable() {
        let mut backend = RodioBackend::new();
        let cue = render(SoundCue::Reward, DEFAULT_SAMPLE_RATE, 0.08);
        assert!(matches!(
            backend.submit(&cue),
            Err(AudioError::Unavailable(_))
        ));
    }

    #[test]
    fn missing_device_is_reported_not_raised() {
        // Headless machines have no device; either outcome is fine, but it
        // must come back as a value.
        let mut backend = RodioBackend::new();
        match backend.open(DEFAULT_SAMPLE_RATE) {
            Ok(()) => assert!(backend.cues.is_some()),
            Err(err) => {
                assert!(matches!(err, AudioError::Unavailable(_)));
                assert!(backend.cues.is_none());
            }
        }
    }
}
