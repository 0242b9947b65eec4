//! `pull-replay`: replay a scripted drag against a transition coordinator
//! and log every event it emits. Used to tune the interaction constants.
//!
//! ```text
//! RUST_LOG=info pull-replay script.toml [options.toml]
//! ```
//!
//! Script format:
//!
//! ```toml
//! operation = "push"
//! container = [390.0, 844.0]
//!
//! [[samples]]
//! phase = "begin"
//!
//! [[samples]]
//! phase = "change"
//! translation = [0.0, -40.0]
//! velocity = [0.0, -900.0]
//! dt_ms = 16
//!
//! [[samples]]
//! phase = "end"
//! velocity = [0.0, -900.0]
//! dt_ms = 16
//! ```

use std::path::Path;

use glam::Vec2;
use pull_transition::animation::TransitionOperation;
use pull_transition::context::{TransitionContext, ViewState};
use pull_transition::coordinator::{TransitionCoordinator, TransitionRequest};
use pull_transition::error::TransitionError;
use pull_transition::geometry::Rect;
use pull_transition::gesture::{
    GesturePhase, GestureSample, GestureSourceId, PanGesture, TrackingSurface,
};
use pull_transition::interaction::InteractiveTransition;
use pull_transition::options::TransitionOptions;
use serde::Deserialize;
use web_time::{Duration, Instant};

const SOURCE: GestureSourceId = GestureSourceId(1);

/// Give up on a run that has not come to rest after this many frames.
const MAX_SETTLE_FRAMES: u32 = 10_000;

#[derive(Debug, Deserialize)]
struct ReplayScript {
    operation: TransitionOperation,
    #[serde(default = "default_container")]
    container: Vec2,
    #[serde(default = "default_interactive")]
    interactive: bool,
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
    #[serde(default)]
    samples: Vec<ScriptSample>,
}

#[derive(Debug, Deserialize)]
struct ScriptSample {
    phase: GesturePhase,
    #[serde(default)]
    translation: Vec2,
    #[serde(default)]
    velocity: Vec2,
    #[serde(default)]
    position: Vec2,
    /// Time since the previous sample; the animation is ticked across it.
    #[serde(default)]
    dt_ms: u64,
}

fn default_container() -> Vec2 {
    Vec2::new(390.0, 844.0)
}

fn default_interactive() -> bool {
    true
}

fn default_frame_ms() -> u64 {
    16
}

fn load_script(path: &Path) -> Result<ReplayScript, TransitionError> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| TransitionError::OptionsParse(e.to_string()))
}

fn drain(coordinator: &mut TransitionCoordinator, now: Instant, t0: Instant) {
    let elapsed = now.saturating_duration_since(t0).as_millis();
    for event in coordinator.drain_events() {
        log::info!("[{elapsed:>5} ms] {event:?}");
    }
}

/// Tick the animation at frame rate across `span`.
fn advance(
    coordinator: &mut TransitionCoordinator,
    now: &mut Instant,
    span: Duration,
    frame: Duration,
) {
    let end = *now + span;
    while *now < end {
        *now = (*now + frame).min(end);
        let _ = coordinator.tick(*now);
    }
}

fn replay(script: &ReplayScript, options: TransitionOptions) {
    let frame = Duration::from_millis(script.frame_ms.max(1));
    let screen = Rect::from_size(script.container.x, script.container.y);
    let context = TransitionContext::new(screen)
        .with_views(ViewState::new(screen), ViewState::new(screen));

    let mut coordinator = TransitionCoordinator::new(options);
    let t0 = Instant::now();
    let mut now = t0;

    let gesture = script.interactive.then(|| PanGesture::active(SOURCE));
    let started = coordinator
        .start(TransitionRequest::new(script.operation, context), &gesture, now)
        .is_some();
    log::info!(
        "{:?} ({:?} mode) started, interactive: {started}",
        script.operation,
        coordinator.mode()
    );

    for sample in &script.samples {
        advance(&mut coordinator, &mut now, Duration::from_millis(sample.dt_ms), frame);
        drain(&mut coordinator, now, t0);

        let surface = coordinator
            .controller()
            .map_or(TrackingSurface::Source(SOURCE), InteractiveTransition::surface);
        let gesture_sample = GestureSample {
            phase: sample.phase,
            translation_delta: sample.translation,
            velocity: sample.velocity,
            position: sample.position,
        };
        if !coordinator.handle_gesture(surface, &gesture_sample, now) {
            log::warn!("{:?} sample was not consumed", sample.phase);
        }
        drain(&mut coordinator, now, t0);
    }

    let mut frames = 0;
    while coordinator.is_transitioning() && frames < MAX_SETTLE_FRAMES {
        advance(&mut coordinator, &mut now, frame, frame);
        frames += 1;
    }
    drain(&mut coordinator, now, t0);
    if coordinator.is_transitioning() {
        log::warn!("transition still in flight, the script never released the gesture");
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(script_path) = args.next() else {
        log::error!("Usage: pull-replay <script.toml> [options.toml]");
        std::process::exit(1);
    };

    let options = match args.next() {
        Some(path) => match TransitionOptions::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("Failed to load options from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => TransitionOptions::default(),
    };

    let script = match load_script(Path::new(&script_path)) {
        Ok(script) => script,
        Err(e) => {
            log::error!("Failed to load script {script_path}: {e}");
            std::process::exit(1);
        }
    };

    replay(&script, options);
}
