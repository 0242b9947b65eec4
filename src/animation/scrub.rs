//! Scrubbable animation primitive.
//!
//! A [`ScrubbableAnimation`] is driven two ways: scrubbed by hand while a
//! gesture is tracking (`set_fraction_complete`), then handed off to an
//! autonomous spring run (`continue_animation`) that carries it to either
//! end. The run reports its terminal position from [`tick`] exactly once.
//!
//! [`tick`]: ScrubbableAnimation::tick

use web_time::{Duration, Instant};

use super::spring::{SpringCurve, SpringTiming};

/// Run state of a scrubbable animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Created but never scrubbed or run; also the state after completion.
    #[default]
    Inactive,
    /// Scrubbed or running; owns the transition's visuals.
    Active,
}

/// Where an animation came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatingPosition {
    /// Fraction 0: the transition was cancelled.
    Start,
    /// Fraction 1: the transition completed.
    End,
}

/// An autonomous run from `from` toward `to`.
#[derive(Debug, Clone, Copy)]
struct ContinuationRun {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
    curve: SpringCurve,
}

impl ContinuationRun {
    fn fraction_at(&self, now: Instant) -> f32 {
        let t = now.saturating_duration_since(self.started).as_secs_f32();
        let progress = self.curve.value(t);
        (self.from + (self.to - self.from) * progress).clamp(0.0, 1.0)
    }

    fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    fn terminal(&self) -> AnimatingPosition {
        if self.to > 0.5 {
            AnimatingPosition::End
        } else {
            AnimatingPosition::Start
        }
    }
}

/// `duration * factor`, rounded to whole microseconds so that scaled runs
/// land on the tick that reaches their nominal end.
fn scale_duration(duration: Duration, factor: f32) -> Duration {
    let micros = (duration.as_micros() as f64 * f64::from(factor)).round();
    Duration::from_micros(micros as u64)
}

/// In-flight animation between the two end-states of a transition.
///
/// `fraction_complete` is always in [0, 1]; 0 is the start layout and 1 the
/// end layout regardless of [`is_reversed`](Self::is_reversed).
#[derive(Debug, Clone)]
pub struct ScrubbableAnimation {
    duration: Duration,
    fraction: f32,
    reversed: bool,
    state: AnimationState,
    run: Option<ContinuationRun>,
    finished: bool,
}

impl ScrubbableAnimation {
    /// An inactive animation with the given nominal duration.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            fraction: 0.0,
            reversed: false,
            state: AnimationState::Inactive,
            run: None,
            finished: false,
        }
    }

    /// Nominal duration of a full run.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current progress in [0, 1].
    #[must_use]
    pub fn fraction_complete(&self) -> f32 {
        self.fraction
    }

    /// Scrub to `fraction`, clamped to [0, 1]. Activates an inactive
    /// animation and pauses a running one.
    ///
    /// Returns `true` if the visual progress changed.
    pub fn set_fraction_complete(&mut self, fraction: f32) -> bool {
        let clamped = if fraction.is_nan() {
            self.fraction
        } else {
            fraction.clamp(0.0, 1.0)
        };
        if self.state != AnimationState::Active {
            self.state = AnimationState::Active;
        }
        self.run = None;
        let changed = clamped != self.fraction;
        self.fraction = clamped;
        changed
    }

    /// Whether the next run heads back to the start.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Set the direction of the next run.
    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    /// Current run state.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Whether an autonomous run is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Whether the animation already reported its terminal position.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run from the current fraction to the end (or the start, if
    /// reversed) over the full nominal duration.
    pub fn start_animation(&mut self, timing: SpringTiming, now: Instant) {
        self.continue_animation(timing, 1.0, now);
    }

    /// Hand off from scrubbing to an autonomous spring run.
    ///
    /// `duration_factor` scales the nominal duration (1 = full duration) and
    /// is clamped to [0, 1].
    pub fn continue_animation(
        &mut self,
        timing: SpringTiming,
        duration_factor: f32,
        now: Instant,
    ) {
        if self.finished {
            return;
        }
        let factor = if duration_factor.is_nan() {
            1.0
        } else {
            duration_factor.clamp(0.0, 1.0)
        };
        let duration = scale_duration(self.duration, factor);
        let to = if self.reversed { 0.0 } else { 1.0 };
        self.state = AnimationState::Active;
        self.run = Some(ContinuationRun {
            from: self.fraction,
            to,
            started: now,
            duration,
            curve: SpringCurve::new(timing, duration),
        });
    }

    /// Freeze a running animation at its current visual position so a new
    /// gesture can take over.
    pub fn pause(&mut self, now: Instant) {
        if let Some(run) = self.run.take() {
            self.fraction = run.fraction_at(now);
        }
    }

    /// Advance a running animation to `now`.
    ///
    /// Returns the terminal position exactly once, on the tick that reaches
    /// it; `None` otherwise.
    pub fn tick(&mut self, now: Instant) -> Option<AnimatingPosition> {
        let run = self.run?;
        if run.is_done(now) {
            self.run = None;
            self.fraction = run.to;
            self.state = AnimationState::Inactive;
            self.finished = true;
            return Some(run.terminal());
        }
        self.fraction = run.fraction_at(now);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anim() -> ScrubbableAnimation {
        ScrubbableAnimation::new(Duration::from_millis(600))
    }

    #[test]
    fn scrub_clamps_and_activates() {
        let mut a = anim();
        assert_eq!(a.state(), AnimationState::Inactive);
        assert!(a.set_fraction_complete(1.7));
        assert_eq!(a.fraction_complete(), 1.0);
        assert_eq!(a.state(), AnimationState::Active);
        assert!(a.set_fraction_complete(-3.0));
        assert_eq!(a.fraction_complete(), 0.0);
    }

    #[test]
    fn scrubbing_same_value_twice_is_idempotent() {
        let mut a = anim();
        assert!(a.set_fraction_complete(0.4));
        assert!(!a.set_fraction_complete(0.4));
        assert_eq!(a.fraction_complete(), 0.4);
    }

    #[test]
    fn nan_scrub_is_ignored() {
        let mut a = anim();
        let _ = a.set_fraction_complete(0.3);
        assert!(!a.set_fraction_complete(f32::NAN));
        assert_eq!(a.fraction_complete(), 0.3);
    }

    #[test]
    fn forward_run_reaches_end_once() {
        let mut a = anim();
        let _ = a.set_fraction_complete(0.5);
        let t0 = Instant::now();
        a.continue_animation(SpringTiming::default(), 0.5, t0);
        assert!(a.is_running());

        assert_eq!(a.tick(t0 + Duration::from_millis(100)), None);
        let mid = a.fraction_complete();
        assert!(mid > 0.5 && mid < 1.0);

        let end = t0 + Duration::from_millis(300);
        assert_eq!(a.tick(end), Some(AnimatingPosition::End));
        assert_eq!(a.fraction_complete(), 1.0);
        assert_eq!(a.state(), AnimationState::Inactive);
        assert_eq!(a.tick(end + Duration::from_millis(16)), None);
    }

    #[test]
    fn reversed_run_reaches_start() {
        let mut a = anim();
        let _ = a.set_fraction_complete(0.3);
        a.set_reversed(true);
        let t0 = Instant::now();
        a.continue_animation(SpringTiming::default(), 1.0, t0);
        let _ = a.tick(t0 + Duration::from_millis(50));
        assert!(a.fraction_complete() < 0.3);
        assert_eq!(
            a.tick(t0 + Duration::from_millis(600)),
            Some(AnimatingPosition::Start)
        );
        assert_eq!(a.fraction_complete(), 0.0);
    }

    #[test]
    fn scaled_runs_end_on_their_nominal_tick() {
        for (factor, ms) in [(1.0, 600), (0.5, 300), (0.1, 60), (0.35, 210)] {
            let mut a = anim();
            let t0 = Instant::now();
            a.continue_animation(SpringTiming::default(), factor, t0);
            assert_eq!(a.tick(t0 + Duration::from_millis(ms - 1)), None);
            assert_eq!(
                a.tick(t0 + Duration::from_millis(ms)),
                Some(AnimatingPosition::End),
                "factor {factor}"
            );
        }
    }

    #[test]
    fn strong_velocity_never_leaves_unit_range() {
        let mut a = anim();
        let _ = a.set_fraction_complete(0.9);
        let t0 = Instant::now();
        let timing = SpringTiming::new(0.4).with_initial_velocity(40.0);
        a.continue_animation(timing, 0.2, t0);
        for ms in 1..120 {
            let _ = a.tick(t0 + Duration::from_millis(ms));
            let f = a.fraction_complete();
            assert!((0.0..=1.0).contains(&f));
        }
    }

    #[test]
    fn pause_freezes_mid_run() {
        let mut a = anim();
        let t0 = Instant::now();
        a.start_animation(SpringTiming::default(), t0);
        a.pause(t0 + Duration::from_millis(120));
        assert!(!a.is_running());
        let frozen = a.fraction_complete();
        assert!(frozen > 0.0 && frozen < 1.0);
        assert_eq!(a.tick(t0 + Duration::from_secs(5)), None);
        assert_eq!(a.fraction_complete(), frozen);
        assert_eq!(a.state(), AnimationState::Active);
    }
}
