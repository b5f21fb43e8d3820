mod animation;
mod engine;
mod progression;
mod quest;
mod schedule;
mod share;

pub use animation::{ease_out_quad, XpAnimation, DEFAULT_DURATION_MS};
pub use engine::{Connection, EngineSettings, ProgressState, RewardEngine, WidgetView};
pub use progression::{
    daily_bonus, format_xp, next_streak, LevelInfo, Rank, BASE_DAILY_BONUS, MAX_STREAK,
    MIN_STREAK, XP_PER_LEVEL,
};
pub use quest::{CountdownStep, QuestAttempt, DEFAULT_COUNTDOWN_SECS};
pub use schedule::{FrameLoop, Interval, Timeout, FRAME_MS};
pub use share::{share_text, SharePlatform, DEFAULT_SHARE_BONUS_XP};
