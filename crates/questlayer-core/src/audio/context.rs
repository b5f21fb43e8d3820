//! Lazily-opened audio output shared by every cue in a session.

use std::sync::{Arc, Mutex};

use super::cue::SoundCue;
use super::synth::{self, RenderedCue, DEFAULT_MASTER_GAIN, DEFAULT_SAMPLE_RATE};
use crate::error::AudioError;

/// Sink for rendered cues.
pub trait AudioBackend: Send {
    /// Acquire the output device. Called at most once per successful open.
    fn open(&mut self, sample_rate: u32) -> Result<(), AudioError>;

    fn is_suspended(&self) -> bool;

    fn resume(&mut self) -> Result<(), AudioError>;

    /// Queue a rendered cue. Must not block for the length of the cue.
    fn submit(&mut self, cue: &RenderedCue) -> Result<(), AudioError>;
}

/// Discards everything. The default when no output device is wired up.
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn open(&mut self, _sample_rate: u32) -> Result<(), AudioError> {
        Ok(())
    }

    fn is_suspended(&self) -> bool {
        false
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn submit(&mut self, _cue: &RenderedCue) -> Result<(), AudioError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Recording {
    opens: u32,
    resumes: u32,
    suspended: bool,
    fail_open: bool,
    fail_submit: bool,
    played: Vec<SoundCue>,
}

/// Captures played cues. Clones share state, so a test can keep a handle
/// after moving one into the engine.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose device can never be opened.
    pub fn unavailable() -> Self {
        let backend = Self::default();
        backend.with(|r| r.fail_open = true);
        backend
    }

    pub fn set_fail_submit(&self, fail: bool) {
        self.with(|r| r.fail_submit = fail);
    }

    /// Simulate the platform suspending the output (e.g. tab backgrounded).
    pub fn suspend(&self) {
        self.with(|r| r.suspended = true);
    }

    pub fn played(&self) -> Vec<SoundCue> {
        self.with(|r| r.played.clone())
    }

    pub fn open_count(&self) -> u32 {
        self.with(|r| r.opens)
    }

    pub fn resume_count(&self) -> u32 {
        self.with(|r| r.resumes)
    }

    fn with<T>(&self, f: impl FnOnce(&mut Recording) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl AudioBackend for RecordingBackend {
    fn open(&mut self, _sample_rate: u32) -> Result<(), AudioError> {
        self.with(|r| {
            if r.fail_open {
                return Err(AudioError::Unavailable("no output device".into()));
            }
            r.opens += 1;
            Ok(())
        })
    }

    fn is_suspended(&self) -> bool {
        self.with(|r| r.suspended)
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        self.with(|r| {
            r.suspended = false;
            r.resumes += 1;
            Ok(())
        })
    }

    fn submit(&mut self, cue: &RenderedCue) -> Result<(), AudioError> {
        self.with(|r| {
            if r.fail_submit {
                return Err(AudioError::PlaybackFailed("device lost".into()));
            }
            r.played.push(cue.cue);
            Ok(())
        })
    }
}

/// Owner of the output device.
///
/// Nothing is opened until the first `ensure_ready`, which must come from a
/// user gesture. Once open the device is reused for the life of the context.
pub struct AudioContext {
    backend: Box<dyn AudioBackend>,
    opened: bool,
    sample_rate: u32,
    master_gain: f32,
}

impl AudioContext {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self::with_settings(backend, DEFAULT_SAMPLE_RATE, DEFAULT_MASTER_GAIN)
    }

    pub fn with_settings(backend: Box<dyn AudioBackend>, sample_rate: u32, master_gain: f32) -> Self {
        Self {
            backend,
            opened: false,
            sample_rate,
            master_gain,
        }
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Open on first use, resume if suspended. Idempotent.
    pub fn ensure_ready(&mut self) -> Result<(), AudioError> {
        if !self.opened {
            self.backend.open(self.sample_rate)?;
            self.opened = true;
            tracing::debug!(sample_rate = self.sample_rate, "audio output opened");
        }
        if self.backend.is_suspended() {
            self.backend.resume()?;
        }
        Ok(())
    }

    /// Fire-and-forget playback. Failures are logged and dropped.
    pub fn play(&mut self, cue: SoundCue) {
        if let Err(err) = self.try_play(cue) {
            tracing::debug!(%cue, error = %err, "audio cue dropped");
        }
    }

    fn try_play(&mut self, cue: SoundCue) -> Result<(), AudioError> {
        self.ensure_ready()?;
        let rendered = synth::render(cue, self.sample_rate, self.master_gain);
        self.backend.submit(&rendered)
    }
}

impl std::fmt::Debug for AudioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioContext")
            .field("opened", &self.opened)
            .field("sample_rate", &self.sample_rate)
            .field("master_gain", &self.master_gain)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_once_and_reuses() {
        let backend = RecordingBackend::new();
        let mut ctx = AudioContext::new(Box::new(backend.clone()));
        assert!(!ctx.is_open());
        assert_eq!(backend.open_count(), 0);

        ctx.ensure_ready().unwrap();
        ctx.play(SoundCue::Connect);
        ctx.play(SoundCue::Reward);
        assert_eq!(backend.open_count(), 1);
        assert_eq!(backend.played(), vec![SoundCue::Connect, SoundCue::Reward]);
    }

    #[test]
    fn resumes_when_suspended() {
        let backend = RecordingBackend::new();
        let mut ctx = AudioContext::new(Box::new(backend.clone()));
        ctx.ensure_ready().unwrap();
        backend.suspend();
        ctx.play(SoundCue::Fanfare);
        assert_eq!(backend.resume_count(), 1);
        assert_eq!(backend.open_count(), 1);
        assert_eq!(backend.played(), vec![SoundCue::Fanfare]);
    }

    #[test]
    fn failures_are_swallowed() {
        let backend = RecordingBackend::unavailable();
        let mut ctx = AudioContext::new(Box::new(backend.clone()));
        ctx.play(SoundCue::Reward);
        assert!(!ctx.is_open());
        assert!(backend.played().is_empty());

        let flaky = RecordingBackend::new();
        flaky.set_fail_submit(true);
        let mut ctx = AudioContext::new(Box::new(flaky.clone()));
        ctx.play(SoundCue::Reward);
        assert!(ctx.is_open());
        assert!(flaky.played().is_empty());
    }
}
