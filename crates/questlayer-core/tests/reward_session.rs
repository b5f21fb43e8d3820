//! End-to-end reward sessions driven by a manual clock.
//!
//! Each test builds an engine from the default configuration, records audio
//! and opened links, and pumps `tick()` in 16 ms frames the way a host's
//! animation loop would.

use proptest::prelude::*;
use questlayer_core::reward::MAX_STREAK;
use questlayer_core::{
    Config, Connection, Event, ManualClock, RecordingBackend, RecordingOpener, RewardEngine,
    SharePlatform, SoundCue, TaskId,
};

// ============================================================================
// Test Helpers
// ============================================================================

struct Session {
    engine: RewardEngine,
    clock: ManualClock,
    audio: RecordingBackend,
    links: RecordingOpener,
}

impl Session {
    fn with_config(config: &Config) -> Self {
        let clock = ManualClock::new();
        let audio = RecordingBackend::new();
        let links = RecordingOpener::new();
        let engine = RewardEngine::new(config)
            .with_clock(clock.clone())
            .with_audio(audio.clone())
            .with_links(links.clone());
        Self {
            engine,
            clock,
            audio,
            links,
        }
    }

    fn connected() -> Self {
        let mut s = Self::with_config(&Config::default());
        s.engine.open_panel();
        s.engine.connect().expect("connect should start");
        s.run_for(1500);
        assert_eq!(s.engine.connection(), Connection::Connected);
        s
    }

    /// Advance the clock in animation frames, collecting every event.
    fn run_for(&mut self, ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        let mut left = ms;
        while left > 0 {
            let step = left.min(16);
            self.clock.advance(step);
            left -= step;
            events.extend(self.engine.tick());
        }
        events
    }

    fn has_task(&self, id: &TaskId) -> bool {
        self.engine.tasks().iter().any(|t| &t.id == id)
    }
}

fn quest_ticks(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::QuestTick { .. }))
        .count()
}

// ============================================================================
// Quests
// ============================================================================

#[test]
fn quest_completes_after_ten_seconds() {
    let mut s = Session::connected();
    let task = TaskId::Number(2);

    let started = s.engine.launch_quest(&task).unwrap();
    assert!(matches!(started, Event::QuestStarted { countdown_secs: 10, .. }));
    assert_eq!(s.links.opened(), vec!["https://discord.com".to_string()]);

    let events = s.run_for(9_000);
    assert_eq!(quest_ticks(&events), 9);
    assert_eq!(s.engine.user_xp(), 0);
    assert_eq!(s.engine.active_attempt().unwrap().remaining_secs, 1);

    let events = s.run_for(1_000);
    let completions: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, Event::QuestCompleted { .. }))
        .collect();
    assert_eq!(completions.len(), 1);
    assert_eq!(s.engine.user_xp(), 800);
    assert!(!s.has_task(&task));
    assert!(s.engine.active_attempt().is_none());
    assert_eq!(s.audio.played().last(), Some(&SoundCue::Reward));

    // Nothing else fires for the finished quest.
    let later = s.run_for(5_000);
    assert_eq!(quest_ticks(&later), 0);
    assert_eq!(s.engine.user_xp(), 800);
}

#[test]
fn second_launch_while_active_is_ignored() {
    let mut s = Session::connected();
    s.engine.launch_quest(&TaskId::Number(1)).unwrap();
    s.run_for(3_000);

    assert!(s.engine.launch_quest(&TaskId::Number(1)).is_none());
    assert!(s.engine.launch_quest(&TaskId::Number(4)).is_none());
    assert_eq!(s.links.opened().len(), 1);

    s.run_for(7_000);
    assert_eq!(s.engine.user_xp(), 500);
    assert!(s.has_task(&TaskId::Number(4)));

    // The finished quest is gone, so relaunching it does nothing.
    assert!(s.engine.launch_quest(&TaskId::Number(1)).is_none());
    assert!(s.engine.launch_quest(&TaskId::Number(4)).is_some());
}

#[test]
fn disconnect_mid_countdown_grants_nothing() {
    let mut s = Session::connected();
    let task = TaskId::Number(3);
    s.engine.launch_quest(&task).unwrap();
    s.run_for(6_000);

    let event = s.engine.disconnect().unwrap();
    assert!(matches!(
        event,
        Event::Disconnected { abandoned_task: Some(TaskId::Number(3)), .. }
    ));

    let after = s.run_for(10_000);
    assert_eq!(quest_ticks(&after), 0);
    assert!(after.iter().all(|e| !matches!(e, Event::QuestCompleted { .. })));
    assert_eq!(s.engine.user_xp(), 0);
    assert!(s.has_task(&task));
    assert!(s.engine.active_attempt().is_none());
}

#[test]
fn stalled_host_applies_all_elapsed_seconds() {
    let mut s = Session::connected();
    s.engine.launch_quest(&TaskId::Number(1)).unwrap();
    s.clock.advance(12_000);
    let events = s.engine.tick();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::QuestCompleted { xp_awarded: 500, .. })));
}

#[test]
fn countdown_length_comes_from_config() {
    let mut config = Config::default();
    config.engine.quest_countdown_secs = 3;
    config.engine.connect_delay_ms = 0;
    let mut s = Session::with_config(&config);
    s.engine.connect();
    s.run_for(16);
    assert_eq!(s.engine.connection(), Connection::Connected);

    s.engine.launch_quest(&TaskId::Number(1)).unwrap();
    s.run_for(3_000);
    assert_eq!(s.engine.user_xp(), 500);
}

// ============================================================================
// Daily bonus and streak
// ============================================================================

#[test]
fn daily_bonus_twice_is_noop() {
    let mut s = Session::connected();
    s.engine.claim_daily_bonus().unwrap();
    let progress = *s.engine.progress();
    assert_eq!(progress.user_xp, 100);
    assert_eq!(progress.current_streak, 2);
    assert!(progress.daily_claimed);

    assert!(s.engine.claim_daily_bonus().is_none());
    assert_eq!(*s.engine.progress(), progress);
}

#[test]
fn streak_cycles_through_five_days() {
    let mut s = Session::connected();
    let mut bonuses = Vec::new();
    let mut streaks = vec![s.engine.progress().current_streak];

    for _ in 0..6 {
        match s.engine.claim_daily_bonus().unwrap() {
            Event::DailyBonusClaimed {
                bonus_xp,
                streak_after,
                ..
            } => {
                bonuses.push(bonus_xp);
                streaks.push(streak_after);
            }
            other => panic!("Expected DailyBonusClaimed, got {other:?}"),
        }
        s.engine.roll_over_day().unwrap();
    }

    assert_eq!(bonuses, vec![100, 200, 400, 800, 1600, 100]);
    assert_eq!(streaks, vec![1, 2, 3, 4, 5, 1, 2]);
    assert!(streaks.iter().all(|d| (1..=MAX_STREAK).contains(d)));
    assert_eq!(s.engine.user_xp(), 3200);
    assert_eq!(s.engine.level().level, 2);
}

#[test]
fn roll_over_requires_a_claim() {
    let mut s = Session::connected();
    assert!(s.engine.roll_over_day().is_none());
    s.engine.claim_daily_bonus();
    assert!(s.engine.roll_over_day().is_some());
    assert!(s.engine.roll_over_day().is_none());
}

#[test]
fn reconnect_rearms_claim_from_day_one() {
    let mut s = Session::connected();
    s.engine.claim_daily_bonus();
    s.engine.claim_daily_bonus();
    s.engine.disconnect();

    s.engine.connect();
    s.run_for(1500);
    let event = s.engine.claim_daily_bonus().unwrap();
    assert!(matches!(
        event,
        Event::DailyBonusClaimed { bonus_xp: 100, streak_before: 1, .. }
    ));
}

// ============================================================================
// Sharing
// ============================================================================

#[test]
fn share_credits_each_platform_once() {
    let mut s = Session::connected();
    let first = s.engine.share_to_platform(SharePlatform::X).unwrap();
    let second = s.engine.share_to_platform(SharePlatform::X).unwrap();

    assert!(matches!(first, Event::Shared { xp_awarded: 100, .. }));
    assert!(matches!(second, Event::Shared { xp_awarded: 0, .. }));
    assert_eq!(s.engine.user_xp(), 100);
    assert_eq!(s.links.opened().len(), 2);
    assert!(s.links.opened()[0].starts_with("https://twitter.com/intent/tweet?text=Engage%20with%20Vortex%20Protocol"));

    s.engine.share_to_platform(SharePlatform::LinkedIn).unwrap();
    assert_eq!(s.engine.user_xp(), 200);
    assert_eq!(
        s.engine.shared_platforms(),
        vec![SharePlatform::X, SharePlatform::LinkedIn]
    );
}

#[test]
fn shares_reset_on_disconnect() {
    let mut s = Session::connected();
    s.engine.share_to_platform(SharePlatform::Telegram);
    s.engine.disconnect();
    assert!(s.engine.shared_platforms().is_empty());

    s.engine.connect();
    s.run_for(1500);
    let again = s.engine.share_to_platform(SharePlatform::Telegram).unwrap();
    assert!(matches!(again, Event::Shared { xp_awarded: 100, .. }));
}

// ============================================================================
// XP monotonicity and display
// ============================================================================

#[test]
fn visual_xp_converges_monotonically() {
    let mut s = Session::connected();
    s.engine.launch_quest(&TaskId::Number(2)).unwrap();
    s.run_for(10_000);
    s.engine.share_to_platform(SharePlatform::WhatsApp);
    s.engine.claim_daily_bonus();
    let target = s.engine.user_xp();
    assert_eq!(target, 1000);

    let mut last = s.engine.visual_xp();
    for _ in 0..120 {
        s.run_for(16);
        let now = s.engine.visual_xp();
        assert!(now >= last);
        assert!(now <= target);
        last = now;
    }
    assert_eq!(s.engine.visual_xp(), target);
    assert_eq!(s.engine.view().visual_xp_label, "1.0k");
}

#[test]
fn xp_never_decreases_until_disconnect() {
    let mut s = Session::connected();
    let mut last = 0;
    for step in 0..4 {
        match step {
            0 => {
                s.engine.claim_daily_bonus();
            }
            2 => {
                s.engine.launch_quest(&TaskId::Number(4));
            }
            _ => {
                s.engine.share_to_platform(SharePlatform::Facebook);
            }
        }
        s.run_for(11_000);
        assert!(s.engine.user_xp() >= last);
        last = s.engine.user_xp();
    }
    assert_eq!(last, 100 + 100 + 1200);

    s.engine.disconnect();
    assert_eq!(s.engine.user_xp(), 0);
    assert_eq!(s.engine.visual_xp(), 0);
}

// ============================================================================
// Audio and connection
// ============================================================================

#[test]
fn audio_failures_never_surface() {
    let audio = RecordingBackend::unavailable();
    let clock = ManualClock::new();
    let mut engine = RewardEngine::new(&Config::default())
        .with_clock(clock.clone())
        .with_audio(audio.clone())
        .with_links(RecordingOpener::new());

    engine.open_panel();
    engine.connect();
    clock.advance(1500);
    engine.tick();
    assert_eq!(engine.connection(), Connection::Connected);
    assert!(engine.claim_daily_bonus().is_some());
    assert!(audio.played().is_empty());
}

#[test]
fn audio_context_opens_once_per_session() {
    let mut s = Session::connected();
    s.engine.claim_daily_bonus();
    s.engine.share_to_platform(SharePlatform::X);
    s.engine.close_panel();
    s.engine.open_panel();
    assert_eq!(s.audio.open_count(), 1);
    assert_eq!(
        s.audio.played(),
        vec![SoundCue::Connect, SoundCue::Fanfare, SoundCue::Reward]
    );
}

#[test]
fn connect_while_connecting_keeps_first_deadline() {
    let mut s = Session::with_config(&Config::default());
    s.engine.connect().unwrap();
    s.run_for(1000);
    assert!(s.engine.connect().is_none());
    s.run_for(500);
    assert_eq!(s.engine.connection(), Connection::Connected);
    assert!(s.engine.connect().is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn random_action_sequences_keep_invariants(actions in prop::collection::vec(0u8..7, 1..40)) {
        let mut s = Session::connected();
        let mut last_xp = 0;
        for action in actions {
            match action {
                0 => { s.engine.claim_daily_bonus(); }
                1 => { s.engine.roll_over_day(); }
                2 => { s.engine.launch_quest(&TaskId::Number(1)); }
                3 => { s.engine.launch_quest(&TaskId::Number(3)); }
                4 => { s.engine.share_to_platform(SharePlatform::X); }
                5 => { s.run_for(2_500); }
                _ => {
                    s.engine.disconnect();
                    last_xp = 0;
                    s.engine.connect();
                    s.run_for(1_500);
                }
            }
            let progress = *s.engine.progress();
            prop_assert!(progress.user_xp >= last_xp);
            prop_assert!((1..=MAX_STREAK).contains(&progress.current_streak));
            prop_assert!(s.engine.visual_xp() <= progress.user_xp);
            last_xp = progress.user_xp;
        }
    }
}
