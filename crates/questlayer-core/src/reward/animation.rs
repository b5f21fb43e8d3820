//! Eased XP counter for the presentation layer.

use super::schedule::FrameLoop;

pub const DEFAULT_DURATION_MS: u64 = 1200;

/// Quadratic ease-out: fast start, settles gently.
pub fn ease_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// Displayed XP value, lagging the authoritative total while it animates.
#[derive(Debug, Clone)]
pub struct XpAnimation {
    displayed: u64,
    run: Option<Run>,
    duration_ms: u64,
}

#[derive(Debug, Clone)]
struct Run {
    from: u64,
    to: u64,
    started_ms: u64,
    frames: FrameLoop,
}

impl XpAnimation {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            displayed: 0,
            run: None,
            duration_ms,
        }
    }

    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Start easing from the current displayed value toward `target`.
    ///
    /// Retargeting mid-run restarts from whatever is on screen, so the shown
    /// value never jumps backwards.
    pub fn retarget(&mut self, target: u64, now_ms: u64) {
        if target == self.displayed {
            self.run = None;
            return;
        }
        if self.duration_ms == 0 {
            self.displayed = target;
            self.run = None;
            return;
        }
        self.run = Some(Run {
            from: self.displayed,
            to: target,
            started_ms: now_ms,
            frames: FrameLoop::start(now_ms),
        });
    }

    /// Cancel any run and show `value` immediately.
    pub fn snap(&mut self, value: u64) {
        self.run = None;
        self.displayed = value;
    }

    /// Sample one animation frame. Returns the new displayed value when a
    /// frame was due.
    pub fn on_frame(&mut self, now_ms: u64) -> Option<u64> {
        let duration_ms = self.duration_ms;
        let run = self.run.as_mut()?;
        if !run.frames.poll(now_ms) {
            return None;
        }
        let elapsed = now_ms.saturating_sub(run.started_ms);
        let progress = (elapsed as f64 / duration_ms as f64).min(1.0);
        let value = interpolate(run.from, run.to, ease_out_quad(progress));
        self.displayed = value;
        if progress >= 1.0 {
            self.displayed = run.to;
            self.run = None;
        }
        Some(self.displayed)
    }
}

/// Integer interpolation rounded toward `from`, so intermediate frames never
/// overshoot and only the final frame lands on `to`.
fn interpolate(from: u64, to: u64, eased: f64) -> u64 {
    if to >= from {
        from + ((to - from) as f64 * eased).floor() as u64
    } else {
        from - ((from - to) as f64 * eased).floor() as u64
    }
}
