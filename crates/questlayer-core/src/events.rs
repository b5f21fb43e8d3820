use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reward::{Connection, SharePlatform};
use crate::task::TaskId;

/// Every state change in the reward engine produces an Event.
/// Hosts print or forward them; the engine never reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PanelOpened {
        at: DateTime<Utc>,
    },
    /// Panel closed; carries the quest abandoned by the close, if any.
    PanelClosed {
        abandoned_task: Option<TaskId>,
        at: DateTime<Utc>,
    },
    /// Simulated wallet handshake started.
    ConnectStarted {
        delay_ms: u64,
        at: DateTime<Utc>,
    },
    Connected {
        at: DateTime<Utc>,
    },
    /// Session torn down. Progression reset to its initial values.
    Disconnected {
        abandoned_task: Option<TaskId>,
        at: DateTime<Utc>,
    },
    DailyBonusClaimed {
        bonus_xp: u64,
        streak_before: u8,
        streak_after: u8,
        user_xp: u64,
        at: DateTime<Utc>,
    },
    /// Daily claim gate re-armed by the host.
    DayRolledOver {
        streak: u8,
        at: DateTime<Utc>,
    },
    QuestStarted {
        task_id: TaskId,
        link: String,
        countdown_secs: u32,
        at: DateTime<Utc>,
    },
    QuestTick {
        task_id: TaskId,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    QuestCompleted {
        task_id: TaskId,
        xp_awarded: u64,
        user_xp: u64,
        at: DateTime<Utc>,
    },
    /// Share intent opened. `xp_awarded` is 0 for an already-credited platform.
    Shared {
        platform: SharePlatform,
        url: String,
        xp_awarded: u64,
        user_xp: u64,
        at: DateTime<Utc>,
    },
    /// Displayed XP finished easing onto the authoritative total.
    XpSettled {
        visual_xp: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        connection: Connection,
        user_xp: u64,
        visual_xp: u64,
        level: u64,
        rank: String,
        progress_percent: u8,
        streak: u8,
        daily_claimed: bool,
        active_task: Option<TaskId>,
        remaining_secs: Option<u32>,
        /// Time left on the connect handshake, while connecting.
        connect_remaining_ms: Option<u64>,
        tasks_left: usize,
        at: DateTime<Utc>,
    },
}
