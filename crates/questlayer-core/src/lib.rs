//! # QuestLayer Core Library
//!
//! This library provides the core logic behind the QuestLayer widget
//! builder: a marketer configures a project, a theme, and a list of reward
//! tasks; end users of the embedded widget earn XP by completing them.
//!
//! ## Architecture
//!
//! - **Reward Engine**: A tick-driven state machine for connection, quests,
//!   daily bonuses, shares, and the animated XP counter
//! - **Audio**: Synthesized feedback cues played through a lazily-opened
//!   output context
//! - **Storage**: TOML-based widget configuration
//! - **Embed**: Export of the configuration as an embeddable script snippet
//!
//! ## Key Components
//!
//! - [`RewardEngine`]: Core progression state machine
//! - [`Config`]: Widget configuration management
//! - [`Event`]: Every state change the engine reports
//! - [`Theme`]: Closed set of widget themes

pub mod audio;
pub mod clock;
pub mod embed;
pub mod error;
pub mod events;
pub mod links;
pub mod reward;
pub mod storage;
pub mod task;
pub mod theme;

pub use audio::{AudioBackend, AudioContext, RecordingBackend, SilentBackend, SoundCue};
#[cfg(feature = "device-audio")]
pub use audio::RodioBackend;
pub use clock::{Clock, ManualClock, SystemClock};
pub use embed::render_snippet;
pub use error::{AudioError, ConfigError, CoreError, LinkError, ValidationError};
pub use events::Event;
pub use links::{LinkOpener, RecordingOpener, SystemBrowser};
pub use reward::{
    Connection, EngineSettings, LevelInfo, ProgressState, Rank, RewardEngine, SharePlatform,
    WidgetView,
};
pub use storage::Config;
pub use task::{Task, TaskId};
pub use theme::{Position, Theme, ThemeStyle};
