//! Timed quest verification.
//!
//! There is no real verification: the countdown stands in for "the user
//! completed the external action".

use serde::Serialize;

use super::schedule::Interval;
use crate::task::TaskId;

pub const DEFAULT_COUNTDOWN_SECS: u32 = 10;
const TICK_MS: u64 = 1000;

/// Outcome of advancing a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Nothing due yet.
    Idle,
    /// One or more seconds elapsed; the attempt is still running.
    Ticked { remaining_secs: u32 },
    /// The countdown reached zero.
    Finished,
}

/// The single in-flight quest verification.
#[derive(Debug, Clone, Serialize)]
pub struct QuestAttempt {
    pub task_id: TaskId,
    pub xp: u64,
    pub remaining_secs: u32,
    #[serde(skip)]
    timer: Interval,
}

impl QuestAttempt {
    pub fn start(task_id: TaskId, xp: u64, countdown_secs: u32, now_ms: u64) -> Self {
        Self {
            task_id,
            xp,
            remaining_secs: countdown_secs,
            timer: Interval::every(now_ms, TICK_MS),
        }
    }

    pub fn advance(&mut self, now_ms: u64) -> CountdownStep {
        let fires = self.timer.poll(now_ms);
        if fires == 0 {
            return CountdownStep::Idle;
        }
        let fires = u32::try_from(fires).unwrap_or(u32::MAX);
        self.remaining_secs = self.remaining_secs.saturating_sub(fires);
        if self.remaining_secs == 0 {
            CountdownStep::Finished
        } else {
            CountdownStep::Ticked {
                remaining_secs: self.remaining_secs,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_ticks_finish() {
        let mut attempt = QuestAttempt::start(TaskId::Number(1), 500, 10, 0);
        for second in 1..10u64 {
            assert_eq!(
                attempt.advance(second * 1000),
                CountdownStep::Ticked {
                    remaining_secs: 10 - second as u32
                }
            );
        }
        assert_eq!(attempt.advance(10_000), CountdownStep::Finished);
    }

    #[test]
    fn stalled_host_catches_up() {
        let mut attempt = QuestAttempt::start(TaskId::Number(1), 500, 10, 0);
        assert_eq!(attempt.advance(500), CountdownStep::Idle);
        assert_eq!(
            attempt.advance(3_200),
            CountdownStep::Ticked { remaining_secs: 7 }
        );
        assert_eq!(attempt.advance(60_000), CountdownStep::Finished);
    }
}
