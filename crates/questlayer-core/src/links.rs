//! Opening external URLs (task links and share intents).
//!
//! Navigation is fire-and-forget: the engine logs a failed open and moves on.

use std::sync::{Arc, Mutex};

use crate::error::LinkError;

pub trait LinkOpener: Send {
    fn open(&mut self, url: &str) -> Result<(), LinkError>;
}

/// Opens URLs in the user's default browser.
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&mut self, url: &str) -> Result<(), LinkError> {
        open::that_detached(url).map_err(|source| LinkError::OpenFailed {
            url: url.to_string(),
            source,
        })
    }
}

/// Captures URLs instead of opening them. Clones share the captured list.
#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&mut self, url: &str) -> Result<(), LinkError> {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(url.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_opener_shares_history() {
        let recorder = RecordingOpener::new();
        let mut handle: Box<dyn LinkOpener> = Box::new(recorder.clone());
        handle.open("https://discord.com").unwrap();
        handle.open("https://discord.com").unwrap();
        assert_eq!(recorder.opened().len(), 2);
    }
}
