//! Cancellable scheduled work.
//!
//! Each handle is a plain value retained by the engine; dropping it (or
//! replacing it with `None`) cancels it. Nothing runs until polled.

/// Browser-like animation frame period (~60 Hz).
pub const FRAME_MS: u64 = 16;

/// One-shot deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    due_ms: u64,
}

impl Timeout {
    pub fn after(now_ms: u64, delay_ms: u64) -> Self {
        Self {
            due_ms: now_ms.saturating_add(delay_ms),
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.due_ms
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.due_ms.saturating_sub(now_ms)
    }
}

/// Repeating timer. The first fire happens one period after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ms: u64,
    next_due_ms: u64,
}

impl Interval {
    pub fn every(now_ms: u64, period_ms: u64) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            next_due_ms: now_ms.saturating_add(period_ms),
        }
    }

    /// Number of periods that elapsed since the last poll.
    ///
    /// A host that stalls for several periods gets every missed fire, in
    /// order, on its next poll.
    pub fn poll(&mut self, now_ms: u64) -> u64 {
        if now_ms < self.next_due_ms {
            return 0;
        }
        let fires = (now_ms - self.next_due_ms) / self.period_ms + 1;
        self.next_due_ms += fires * self.period_ms;
        fires
    }
}

/// Per-frame callback loop. Fires at most once per frame period, and
/// coalesces missed frames into a single fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLoop {
    next_frame_ms: u64,
}

impl FrameLoop {
    /// The first frame is due immediately.
    pub fn start(now_ms: u64) -> Self {
        Self {
            next_frame_ms: now_ms,
        }
    }

    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_frame_ms {
            return false;
        }
        self.next_frame_ms = now_ms + FRAME_MS;
        true
    }
}
