//! Reward engine implementation.
//!
//! The reward engine is a tick-driven state machine. It does not use
//! internal threads - the host calls `tick()` about once per animation frame
//! and every scheduled piece of work (connect delay, quest countdown, XP
//! animation) is evaluated against the injected clock.
//!
//! ## State Transitions
//!
//! ```text
//! Disconnected -> Connecting -> Connected -> Disconnected
//! ```
//!
//! `disconnect()` returns to `Disconnected` from any state. Inside
//! `Connected`, at most one quest attempt runs at a time and the daily bonus
//! can be claimed once until the gate is re-armed.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = RewardEngine::new(&config);
//! engine.open_panel();
//! engine.connect();
//! // In a loop:
//! for event in engine.tick() { /* render */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::animation::{XpAnimation, DEFAULT_DURATION_MS};
use super::progression::{daily_bonus, format_xp, next_streak, LevelInfo, MIN_STREAK};
use super::quest::{CountdownStep, QuestAttempt, DEFAULT_COUNTDOWN_SECS};
use super::schedule::Timeout;
use super::share::{SharePlatform, DEFAULT_SHARE_BONUS_XP};
use crate::audio::{AudioBackend, AudioContext, SilentBackend, SoundCue, DEFAULT_SAMPLE_RATE};
use crate::clock::{Clock, SystemClock};
use crate::events::Event;
use crate::links::{LinkOpener, SystemBrowser};
use crate::storage::Config;
use crate::task::{Task, TaskId};
use crate::theme::{Position, Theme, ThemeStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connection {
    Disconnected,
    /// Simulated wallet handshake in flight.
    Connecting,
    Connected,
}

/// Authoritative progression for one widget session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub user_xp: u64,
    /// Day of the daily-bonus cycle, 1..=5.
    pub current_streak: u8,
    pub daily_claimed: bool,
    pub connected: bool,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            user_xp: 0,
            current_streak: MIN_STREAK,
            daily_claimed: false,
            connected: false,
        }
    }
}

/// Timing and reward knobs, stored in the `[engine]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default = "default_connect_delay_ms")]
    pub connect_delay_ms: u64,
    #[serde(default = "default_quest_countdown_secs")]
    pub quest_countdown_secs: u32,
    #[serde(default = "default_xp_animation_ms")]
    pub xp_animation_ms: u64,
    #[serde(default = "default_share_bonus_xp")]
    pub share_bonus_xp: u64,
    #[serde(default = "default_master_volume")]
    pub master_volume: f64,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_connect_delay_ms() -> u64 {
    1500
}
fn default_quest_countdown_secs() -> u32 {
    DEFAULT_COUNTDOWN_SECS
}
fn default_xp_animation_ms() -> u64 {
    DEFAULT_DURATION_MS
}
fn default_share_bonus_xp() -> u64 {
    DEFAULT_SHARE_BONUS_XP
}
fn default_master_volume() -> f64 {
    0.08
}
fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            connect_delay_ms: default_connect_delay_ms(),
            quest_countdown_secs: default_quest_countdown_secs(),
            xp_animation_ms: default_xp_animation_ms(),
            share_bonus_xp: default_share_bonus_xp(),
            master_volume: default_master_volume(),
            sample_rate: default_sample_rate(),
        }
    }
}

/// Everything the presentation layer needs to draw the widget.
///
/// Level, rank and progress follow the displayed XP so the bar and the
/// counter move together.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetView {
    pub project_name: String,
    pub connection: Connection,
    pub panel_open: bool,
    pub progress: ProgressState,
    pub visual_xp: u64,
    pub visual_xp_label: String,
    pub level: u64,
    pub rank_name: &'static str,
    pub progress_percent: u8,
    pub active_attempt: Option<QuestAttempt>,
    pub shared_platforms: Vec<SharePlatform>,
    pub tasks: Vec<Task>,
    pub theme: Theme,
    pub theme_style: ThemeStyle,
    pub accent_color: String,
    pub position: Position,
    pub anchor: &'static str,
}

/// Core reward engine.
///
/// Owns the session's progression and every scheduled handle. Dropping the
/// engine drops the handles, so nothing can fire after teardown.
pub struct RewardEngine {
    project_name: String,
    accent_color: String,
    position: Position,
    theme: Theme,
    share_origin: String,
    settings: EngineSettings,
    tasks: Vec<Task>,
    progress: ProgressState,
    connection: Connection,
    panel_open: bool,
    connect_timer: Option<Timeout>,
    attempt: Option<QuestAttempt>,
    shared: BTreeSet<SharePlatform>,
    xp_display: XpAnimation,
    audio: AudioContext,
    links: Box<dyn LinkOpener>,
    clock: Box<dyn Clock>,
}

impl RewardEngine {
    /// Create an engine from a configuration snapshot.
    ///
    /// Uses the wall clock, the system browser, and silent audio. The task
    /// list is copied; the engine never writes back to the config.
    pub fn new(config: &Config) -> Self {
        let settings = config.engine.clone();
        Self {
            project_name: config.project_name.clone(),
            accent_color: config.accent_color.clone(),
            position: config.position,
            theme: config.theme,
            share_origin: config.share.origin.clone(),
            tasks: config.tasks.clone(),
            progress: ProgressState::default(),
            connection: Connection::Disconnected,
            panel_open: false,
            connect_timer: None,
            attempt: None,
            shared: BTreeSet::new(),
            xp_display: XpAnimation::new(settings.xp_animation_ms),
            audio: audio_context(Box::new(SilentBackend), &settings),
            links: Box::new(SystemBrowser),
            clock: Box::new(SystemClock::new()),
            settings,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_links(mut self, links: impl LinkOpener + 'static) -> Self {
        self.links = Box::new(links);
        self
    }

    pub fn with_audio(mut self, backend: impl AudioBackend + 'static) -> Self {
        self.audio = audio_context(Box::new(backend), &self.settings);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn connection(&self) -> Connection {
        self.connection
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn user_xp(&self) -> u64 {
        self.progress.user_xp
    }

    pub fn visual_xp(&self) -> u64 {
        self.xp_display.displayed()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn active_attempt(&self) -> Option<&QuestAttempt> {
        self.attempt.as_ref()
    }

    pub fn shared_platforms(&self) -> Vec<SharePlatform> {
        self.shared.iter().copied().collect()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Level info for the authoritative XP total.
    pub fn level(&self) -> LevelInfo {
        LevelInfo::from_xp(self.progress.user_xp)
    }

    pub fn view(&self) -> WidgetView {
        let visual_xp = self.visual_xp();
        let shown = LevelInfo::from_xp(visual_xp);
        WidgetView {
            project_name: self.project_name.clone(),
            connection: self.connection,
            panel_open: self.panel_open,
            progress: self.progress,
            visual_xp,
            visual_xp_label: format_xp(visual_xp),
            level: shown.level,
            rank_name: shown.rank.name(),
            progress_percent: shown.progress_percent,
            active_attempt: self.attempt.clone(),
            shared_platforms: self.shared_platforms(),
            tasks: self.tasks.clone(),
            theme: self.theme,
            theme_style: self.theme.style(),
            accent_color: self.accent_color.clone(),
            position: self.position,
            anchor: self.position.anchor_classes(),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let level = self.level();
        Event::StateSnapshot {
            connection: self.connection,
            user_xp: self.progress.user_xp,
            visual_xp: self.visual_xp(),
            level: level.level,
            rank: level.rank.name().to_string(),
            progress_percent: level.progress_percent,
            streak: self.progress.current_streak,
            daily_claimed: self.progress.daily_claimed,
            active_task: self.attempt.as_ref().map(|a| a.task_id.clone()),
            remaining_secs: self.attempt.as_ref().map(|a| a.remaining_secs),
            connect_remaining_ms: self
                .connect_timer
                .map(|t| t.remaining_ms(self.clock.now_ms())),
            tasks_left: self.tasks.len(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Open the widget panel. The click doubles as the gesture that
    /// unlocks audio output.
    pub fn open_panel(&mut self) -> Option<Event> {
        if self.panel_open {
            return None;
        }
        self.panel_open = true;
        self.unlock_audio();
        Some(Event::PanelOpened { at: Utc::now() })
    }

    /// Close the panel, abandoning any quest countdown without reward. The
    /// XP counter stops animating and shows the real total.
    pub fn close_panel(&mut self) -> Option<Event> {
        if !self.panel_open {
            return None;
        }
        self.panel_open = false;
        let abandoned_task = self.abandon_attempt();
        self.xp_display.snap(self.progress.user_xp);
        Some(Event::PanelClosed {
            abandoned_task,
            at: Utc::now(),
        })
    }

    pub fn connect(&mut self) -> Option<Event> {
        if self.connection != Connection::Disconnected {
            return None;
        }
        self.unlock_audio();
        let now = self.clock.now_ms();
        self.connection = Connection::Connecting;
        self.connect_timer = Some(Timeout::after(now, self.settings.connect_delay_ms));
        tracing::debug!(delay_ms = self.settings.connect_delay_ms, "connecting");
        Some(Event::ConnectStarted {
            delay_ms: self.settings.connect_delay_ms,
            at: Utc::now(),
        })
    }

    /// Tear the session down: progression back to initial values, every
    /// scheduled handle cancelled, panel closed. Tasks already completed stay
    /// removed.
    pub fn disconnect(&mut self) -> Option<Event> {
        let idle = self.connection == Connection::Disconnected
            && !self.panel_open
            && self.attempt.is_none()
            && self.progress == ProgressState::default()
            && self.visual_xp() == 0;
        if idle {
            return None;
        }

        let abandoned_task = self.abandon_attempt();
        self.connection = Connection::Disconnected;
        self.connect_timer = None;
        self.progress = ProgressState::default();
        self.shared.clear();
        self.xp_display.snap(0);
        self.panel_open = false;
        tracing::info!("session disconnected");
        Some(Event::Disconnected {
            abandoned_task,
            at: Utc::now(),
        })
    }

    pub fn claim_daily_bonus(&mut self) -> Option<Event> {
        if self.connection != Connection::Connected || self.progress.daily_claimed {
            return None;
        }
        let streak_before = self.progress.current_streak;
        let bonus_xp = daily_bonus(streak_before);
        self.grant(bonus_xp);
        self.progress.current_streak = next_streak(streak_before);
        self.progress.daily_claimed = true;
        self.audio.play(SoundCue::Fanfare);
        tracing::info!(bonus_xp, streak_before, "daily bonus claimed");
        Some(Event::DailyBonusClaimed {
            bonus_xp,
            streak_before,
            streak_after: self.progress.current_streak,
            user_xp: self.progress.user_xp,
            at: Utc::now(),
        })
    }

    /// Re-arm the daily claim gate, keeping XP and streak.
    ///
    /// The engine has no calendar; a host that tracks days calls this when
    /// one passes.
    pub fn roll_over_day(&mut self) -> Option<Event> {
        if self.connection != Connection::Connected || !self.progress.daily_claimed {
            return None;
        }
        self.progress.daily_claimed = false;
        Some(Event::DayRolledOver {
            streak: self.progress.current_streak,
            at: Utc::now(),
        })
    }

    /// Open the task's link and start its verification countdown.
    ///
    /// Refused while another attempt runs, for unknown tasks, and for the
    /// share hub.
    pub fn launch_quest(&mut self, task_id: &TaskId) -> Option<Event> {
        if self.connection != Connection::Connected {
            return None;
        }
        if let Some(active) = &self.attempt {
            tracing::debug!(active = %active.task_id, requested = %task_id, "quest already in flight");
            return None;
        }
        let task = self
            .tasks
            .iter()
            .find(|t| &t.id == task_id && !t.is_share_hub())?
            .clone();

        self.unlock_audio();
        self.open_link(&task.link);
        let now = self.clock.now_ms();
        let countdown_secs = self.settings.quest_countdown_secs;
        self.attempt = Some(QuestAttempt::start(task.id.clone(), task.xp, countdown_secs, now));
        Some(Event::QuestStarted {
            task_id: task.id,
            link: task.link,
            countdown_secs,
            at: Utc::now(),
        })
    }

    /// Open the share intent for `platform`. Only the first share per
    /// platform in a session earns XP.
    pub fn share_to_platform(&mut self, platform: SharePlatform) -> Option<Event> {
        if self.connection != Connection::Connected {
            return None;
        }
        self.unlock_audio();
        let url = platform.share_url(&self.project_name, &self.share_origin);
        self.open_link(&url);

        let xp_awarded = if self.shared.insert(platform) {
            let bonus = self.settings.share_bonus_xp;
            self.grant(bonus);
            self.audio.play(SoundCue::Reward);
            bonus
        } else {
            0
        };
        Some(Event::Shared {
            platform,
            url,
            xp_awarded,
            user_xp: self.progress.user_xp,
            at: Utc::now(),
        })
    }

    /// Call periodically. Fires the connect delay, advances the quest
    /// countdown, and samples the XP animation.
    pub fn tick(&mut self) -> Vec<Event> {
        let now = self.clock.now_ms();
        let mut events = Vec::new();

        if let Some(event) = self.poll_connect(now) {
            events.push(event);
        }
        events.extend(self.poll_quest(now));
        if let Some(event) = self.poll_animation(now) {
            events.push(event);
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn poll_connect(&mut self, now: u64) -> Option<Event> {
        let timer = self.connect_timer?;
        if !timer.is_due(now) {
            return None;
        }
        self.connect_timer = None;
        self.connection = Connection::Connected;
        self.progress.connected = true;
        self.audio.play(SoundCue::Connect);
        tracing::info!("session connected");
        Some(Event::Connected { at: Utc::now() })
    }

    fn poll_quest(&mut self, now: u64) -> Option<Event> {
        let attempt = self.attempt.as_mut()?;
        match attempt.advance(now) {
            CountdownStep::Idle => None,
            CountdownStep::Ticked { remaining_secs } => Some(Event::QuestTick {
                task_id: attempt.task_id.clone(),
                remaining_secs,
                at: Utc::now(),
            }),
            CountdownStep::Finished => {
                let attempt = self.attempt.take()?;
                self.grant(attempt.xp);
                self.tasks.retain(|t| t.id != attempt.task_id);
                self.audio.play(SoundCue::Reward);
                tracing::info!(task = %attempt.task_id, xp = attempt.xp, "quest completed");
                Some(Event::QuestCompleted {
                    task_id: attempt.task_id,
                    xp_awarded: attempt.xp,
                    user_xp: self.progress.user_xp,
                    at: Utc::now(),
                })
            }
        }
    }

    fn poll_animation(&mut self, now: u64) -> Option<Event> {
        self.xp_display.on_frame(now)?;
        if self.xp_display.is_running() {
            return None;
        }
        Some(Event::XpSettled {
            visual_xp: self.xp_display.displayed(),
            at: Utc::now(),
        })
    }

    /// Authoritative XP moves at once; the display eases after it.
    fn grant(&mut self, xp: u64) {
        self.progress.user_xp = self.progress.user_xp.saturating_add(xp);
        let now = self.clock.now_ms();
        self.xp_display.retarget(self.progress.user_xp, now);
    }

    fn abandon_attempt(&mut self) -> Option<TaskId> {
        let attempt = self.attempt.take()?;
        tracing::debug!(
            task = %attempt.task_id,
            remaining_secs = attempt.remaining_secs,
            "quest abandoned"
        );
        Some(attempt.task_id)
    }

    fn unlock_audio(&mut self) {
        if let Err(err) = self.audio.ensure_ready() {
            tracing::debug!(error = %err, "audio unavailable");
        }
    }

    fn open_link(&mut self, url: &str) {
        if let Err(err) = self.links.open(url) {
            tracing::warn!(error = %err, "failed to open link");
        }
    }
}

fn audio_context(backend: Box<dyn AudioBackend>, settings: &EngineSettings) -> AudioContext {
    AudioContext::with_settings(backend, settings.sample_rate, settings.master_volume as f32)
}

impl std::fmt::Debug for RewardEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardEngine")
            .field("connection", &self.connection)
            .field("progress", &self.progress)
            .field("panel_open", &self.panel_open)
            .field("attempt", &self.attempt)
            .field("shared", &self.shared)
            .field("visual_xp", &self.xp_display.displayed())
            .field("tasks", &self.tasks.len())
            .field("audio", &self.audio)
            .finish()
    }
}
