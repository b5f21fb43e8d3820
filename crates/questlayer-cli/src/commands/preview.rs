//! Drive a live widget session from the terminal.
//!
//! Actions run in order against a [`RewardEngine`] ticked once per frame.
//! Every event is printed to stdout as one JSON line.

use clap::Args;
use questlayer_core::reward::FRAME_MS;
use questlayer_core::task::find_by_display;
use questlayer_core::{
    Connection, Event, RecordingOpener, RewardEngine, RodioBackend, SharePlatform,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use super::load_config;

#[derive(Args)]
pub struct PreviewArgs {
    /// Actions: open, close, connect, disconnect, claim, new-day,
    /// quest:<id>, share:<platform>, wait:<secs>, status. Only connect and
    /// wait advance time.
    #[arg(required = true)]
    actions: Vec<Action>,
    /// Record links instead of opening them in the browser
    #[arg(long)]
    no_browser: bool,
    /// Keep cues off the speakers
    #[arg(long)]
    mute: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Open,
    Close,
    Connect,
    Disconnect,
    Claim,
    NewDay,
    /// Task id as typed; resolved against the session's task list.
    Quest(String),
    Share(SharePlatform),
    Wait(Duration),
    Status,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        match (name, arg) {
            ("open", None) => Ok(Action::Open),
            ("close", None) => Ok(Action::Close),
            ("connect", None) => Ok(Action::Connect),
            ("disconnect", None) => Ok(Action::Disconnect),
            ("claim", None) => Ok(Action::Claim),
            ("new-day", None) => Ok(Action::NewDay),
            ("status", None) => Ok(Action::Status),
            ("quest", Some(id)) if !id.is_empty() => Ok(Action::Quest(id.to_string())),
            ("share", Some(platform)) => platform
                .parse::<SharePlatform>()
                .map(Action::Share)
                .map_err(|e| e.to_string()),
            ("wait", Some(secs)) => {
                let secs: f64 = secs
                    .parse()
                    .map_err(|_| format!("invalid wait duration: {secs}"))?;
                if !secs.is_finite() || secs < 0.0 {
                    return Err(format!("invalid wait duration: {secs}"));
                }
                Ok(Action::Wait(Duration::from_secs_f64(secs)))
            }
            _ => Err(format!("unknown action: {s}")),
        }
    }
}

pub fn run(args: PreviewArgs, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(file)?;
    config.validate()?;
    let mut engine = RewardEngine::new(&config);
    if args.no_browser {
        engine = engine.with_links(RecordingOpener::new());
    }
    if !args.mute {
        engine = engine.with_audio(RodioBackend::new());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(session(engine, args.actions))
}

async fn session(
    mut engine: RewardEngine,
    actions: Vec<Action>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut frames = tokio::time::interval(Duration::from_millis(FRAME_MS));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    for action in actions {
        tracing::debug!(?action, "preview action");
        match action {
            Action::Open => emit_or_warn(engine.open_panel(), "open")?,
            Action::Close => emit_or_warn(engine.close_panel(), "close")?,
            Action::Connect => {
                emit_or_warn(engine.connect(), "connect")?;
                pump_while(&mut engine, &mut frames, |e| {
                    e.connection() == Connection::Connecting
                })
                .await?;
            }
            Action::Disconnect => emit_or_warn(engine.disconnect(), "disconnect")?,
            Action::Claim => emit_or_warn(engine.claim_daily_bonus(), "claim")?,
            Action::NewDay => emit_or_warn(engine.roll_over_day(), "new-day")?,
            Action::Quest(raw) => {
                let found = find_by_display(engine.tasks(), &raw).map(|t| t.id.clone());
                match found {
                    Some(id) => emit_or_warn(engine.launch_quest(&id), "quest")?,
                    None => tracing::warn!(task = %raw, "unknown task"),
                }
            }
            Action::Share(platform) => {
                emit_or_warn(engine.share_to_platform(platform), "share")?;
            }
            Action::Wait(duration) => {
                let deadline = Instant::now() + duration;
                pump_while(&mut engine, &mut frames, |_| Instant::now() < deadline).await?;
            }
            Action::Status => emit(&engine.snapshot())?,
        }
    }

    // Let a running countdown and the XP counter finish before the final snapshot.
    pump_while(&mut engine, &mut frames, |e| {
        e.active_attempt().is_some() || e.visual_xp() != e.user_xp()
    })
    .await?;
    emit(&engine.snapshot())?;
    Ok(())
}

/// Tick the engine once per frame until `busy` reports false.
async fn pump_while(
    engine: &mut RewardEngine,
    frames: &mut Interval,
    busy: impl Fn(&RewardEngine) -> bool,
) -> Result<(), serde_json::Error> {
    while busy(&*engine) {
        frames.tick().await;
        for event in engine.tick() {
            emit(&event)?;
        }
    }
    Ok(())
}

fn emit(event: &Event) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

fn emit_or_warn(event: Option<Event>, action: &str) -> Result<(), serde_json::Error> {
    match event {
        Some(event) => emit(&event),
        None => {
            tracing::warn!(action, "action had no effect");
            Ok(())
        }
    }
}
