//! The animated half of a pull transition.
//!
//! [`PullAnimator`] owns the scrubbable animation for one navigation leg,
//! lays out both views for the current [`TransitionOperation`] and runs the
//! completion side effects when the animation comes to rest. The coordinator
//! keeps one animator per forward/backward pair and flips its operation
//! instead of reallocating it for the backward leg.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use super::layout::{TransitionKeyframes, TransitionMode};
use super::scrub::{AnimatingPosition, AnimationState, ScrubbableAnimation};
use super::spring::SpringTiming;
use crate::context::{TransitionContext, ViewKey};
use crate::error::ContractViolation;
use crate::event::TransitionEvent;
use crate::options::AnimationOptions;

/// Navigation direction of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Entering new content (present, push).
    Forward,
    /// Leaving it again (dismiss, pop).
    Backward,
}

/// The navigation operation a transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionOperation {
    /// Modal presentation.
    Present,
    /// Modal dismissal.
    Dismiss,
    /// Navigation stack push.
    Push,
    /// Navigation stack pop.
    Pop,
}

impl TransitionOperation {
    /// Whether the operation enters new content.
    #[must_use]
    pub fn is_forward(self) -> bool {
        matches!(self, Self::Present | Self::Push)
    }

    /// Whether the operation is a modal presentation or dismissal.
    #[must_use]
    pub fn is_modal(self) -> bool {
        matches!(self, Self::Present | Self::Dismiss)
    }

    /// Forward or backward.
    #[must_use]
    pub fn direction(self) -> Direction {
        if self.is_forward() {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// The other leg of the same navigation pair.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Present => Self::Dismiss,
            Self::Dismiss => Self::Present,
            Self::Push => Self::Pop,
            Self::Pop => Self::Push,
        }
    }
}

/// Callback fired once per transition after it visually completes, with
/// whether it landed on the end state.
pub type CompletionHook = Box<dyn FnMut(bool)>;

/// Animates one leg of a pull transition.
pub struct PullAnimator {
    serial: u64,
    mode: TransitionMode,
    operation: TransitionOperation,
    options: AnimationOptions,
    /// Memoized for the lifetime of one transition context.
    animation: Option<ScrubbableAnimation>,
    /// `None` while the no-op fallback animation is in use.
    keyframes: Option<TransitionKeyframes>,
    /// Scroll offset at which the pull was expected to begin.
    start_position: Vec2,
    /// How far past `start_position` the gesture actually was.
    offset_error: f32,
    /// Offset to restore, animated, if the run lands back at the start.
    pending_reset: Option<Vec2>,
    interactive: bool,
    on_complete: Option<CompletionHook>,
}

impl PullAnimator {
    /// An animator for `operation` with no transition in flight.
    #[must_use]
    pub fn new(
        mode: TransitionMode,
        operation: TransitionOperation,
        options: AnimationOptions,
    ) -> Self {
        Self {
            serial: 0,
            mode,
            operation,
            options,
            animation: None,
            keyframes: None,
            start_position: Vec2::ZERO,
            offset_error: 0.0,
            pending_reset: None,
            interactive: true,
            on_complete: None,
        }
    }

    /// Tag the animator with an identity (builder pattern).
    #[must_use]
    pub(crate) fn with_serial(mut self, serial: u64) -> Self {
        self.serial = serial;
        self
    }

    /// Identity assigned by the coordinator that created this animator.
    #[must_use]
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Visual style.
    #[must_use]
    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    /// Operation of the current (or next) transition.
    #[must_use]
    pub fn operation(&self) -> TransitionOperation {
        self.operation
    }

    /// Retarget the animator at the other leg of its pair.
    pub fn set_operation(&mut self, operation: TransitionOperation) {
        self.operation = operation;
    }

    /// Install the completion hook.
    pub fn set_on_complete(&mut self, hook: impl FnMut(bool) + 'static) {
        self.on_complete = Some(Box::new(hook));
    }

    /// The in-flight animation, if any.
    #[must_use]
    pub fn animation(&self) -> Option<&ScrubbableAnimation> {
        self.animation.as_ref()
    }

    /// Whether an animation exists and is in the `Active` state.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|a| a.state() == AnimationState::Active)
    }

    /// Current fraction of the in-flight animation.
    #[must_use]
    pub fn fraction_complete(&self) -> Option<f32> {
        self.animation
            .as_ref()
            .map(ScrubbableAnimation::fraction_complete)
    }

    /// Whether the current transition is driven by a gesture.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Whether the no-op fallback is animating instead of real views.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.animation.is_some() && self.keyframes.is_none()
    }

    /// Recorded drag origin: `(start_position, offset_error)`.
    #[must_use]
    pub fn drag_origin(&self) -> (Vec2, f32) {
        (self.start_position, self.offset_error)
    }

    /// Record where the pull was expected to begin and how far past it the
    /// gesture was when the transition fired.
    pub fn record_drag_origin(&mut self, start_position: Vec2, offset_error: f32) {
        self.start_position = start_position;
        self.offset_error = offset_error;
    }

    /// Lay out both views for the current operation and return the
    /// transition's animation, creating it on first use.
    ///
    /// Later calls within the same transition return the same animation.
    /// Without both view handles the animation still runs for the nominal
    /// duration but moves nothing.
    pub fn begin(&mut self, ctx: &mut TransitionContext) -> &mut ScrubbableAnimation {
        if self.animation.is_none() {
            self.keyframes = self.layout(ctx);
            log::debug!(
                "begin {:?} transition #{} ({:?})",
                self.operation,
                self.serial,
                self.mode
            );
        }
        let duration = self.options.duration();
        self.animation
            .get_or_insert_with(|| ScrubbableAnimation::new(duration))
    }

    fn layout(&self, ctx: &mut TransitionContext) -> Option<TransitionKeyframes> {
        let (Some(outgoing), Some(incoming)) = (
            ctx.view(ViewKey::Outgoing).map(|v| v.frame()),
            ctx.view(ViewKey::Incoming).map(|v| v.frame()),
        ) else {
            log::warn!(
                "transition #{} has no view pair, falling back to a no-op animation",
                self.serial
            );
            return None;
        };
        let keyframes = TransitionKeyframes::compute(
            self.mode,
            self.operation.is_forward(),
            outgoing,
            incoming,
        );
        ctx.set_incoming_above(keyframes.incoming_above);
        // In scroll mode the host slides a snapshot in place of the live
        // incoming view until the run comes to rest.
        if let Some(view) = ctx.view_mut(ViewKey::Incoming) {
            view.set_hidden(self.mode == TransitionMode::Scroll);
        }
        keyframes.apply(0.0, ctx);
        Some(keyframes)
    }

    /// Scrub the animation to `fraction` (clamped) and update the views.
    ///
    /// Returns `true` if the visual progress changed.
    pub fn set_fraction_complete(
        &mut self,
        fraction: f32,
        ctx: &mut TransitionContext,
    ) -> bool {
        let changed = self.begin(ctx).set_fraction_complete(fraction);
        if changed {
            self.apply_layout(ctx);
        }
        changed
    }

    fn apply_layout(&self, ctx: &mut TransitionContext) {
        if let (Some(keyframes), Some(animation)) =
            (self.keyframes.as_ref(), self.animation.as_ref())
        {
            keyframes.apply(animation.fraction_complete(), ctx);
        }
    }

    /// Run the transition to its end without a gesture.
    pub fn animate(&mut self, ctx: &mut TransitionContext, now: Instant) {
        self.interactive = false;
        let timing = SpringTiming::new(self.options.damping_ratio);
        self.begin(ctx).start_animation(timing, now);
    }

    /// Hand off from scrubbing to a spring run toward the start
    /// (`reversed`) or the end.
    ///
    /// `velocity` is the damped release velocity in container coordinates;
    /// only its component along the transition's travel axis seeds the
    /// spring.
    pub fn continue_animation(
        &mut self,
        velocity: Vec2,
        duration_factor: f32,
        reversed: bool,
        now: Instant,
    ) -> Result<(), ContractViolation> {
        let forward = self.operation.is_forward();
        let damping_ratio = self.options.damping_ratio;
        let animation =
            self.animation.as_mut().ok_or(ContractViolation::NoAnimation)?;
        animation.set_reversed(reversed);

        // Upward travel advances forward transitions.
        let progress_velocity = if forward { -velocity.y } else { velocity.y };
        let toward_target = if reversed {
            -progress_velocity
        } else {
            progress_velocity
        };
        let timing =
            SpringTiming::new(damping_ratio).with_initial_velocity(toward_target);
        animation.continue_animation(timing, duration_factor, now);
        Ok(())
    }

    /// Freeze a running animation so a new gesture can scrub it.
    ///
    /// Returns the frozen fraction, or `None` if nothing was running.
    pub fn pause(&mut self, now: Instant, ctx: &mut TransitionContext) -> Option<f32> {
        let animation = self.animation.as_mut()?;
        if !animation.is_running() {
            return None;
        }
        animation.pause(now);
        animation.set_reversed(false);
        let fraction = animation.fraction_complete();
        self.apply_layout(ctx);
        Some(fraction)
    }

    /// Correct the driving scroll surface after a reversed interactive run.
    ///
    /// Fast pulls fire the transition a little past the intended origin.
    /// When the run heads back to the start, jump the surface to where the
    /// gesture really was and, once the run lands, ease it back to the
    /// recorded origin. No-op when no origin was recorded.
    pub fn reset_correction(&mut self, events: &mut Vec<TransitionEvent>) {
        if self.start_position == Vec2::ZERO && self.offset_error == 0.0 {
            return;
        }
        let start = self.start_position;
        events.push(TransitionEvent::ScrollOffset {
            offset: Vec2::new(start.x, start.y - self.offset_error),
            animated: false,
        });
        self.pending_reset = Some(start);
        self.start_position = Vec2::ZERO;
        self.offset_error = 0.0;
    }

    /// Advance the animation to `now`, updating the views and, when it comes
    /// to rest, running the completion side effects.
    ///
    /// Returns `true` while the animation is still running.
    pub fn tick(
        &mut self,
        now: Instant,
        ctx: &mut TransitionContext,
        events: &mut Vec<TransitionEvent>,
    ) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        let terminal = animation.tick(now);
        self.apply_layout(ctx);
        match terminal {
            Some(position) => {
                self.complete(position, ctx, events);
                false
            }
            None => self.animation.as_ref().is_some_and(ScrubbableAnimation::is_running),
        }
    }

    fn complete(
        &mut self,
        position: AnimatingPosition,
        ctx: &mut TransitionContext,
        events: &mut Vec<TransitionEvent>,
    ) {
        let completed = position == AnimatingPosition::End;
        for key in [ViewKey::Outgoing, ViewKey::Incoming] {
            if let Some(view) = ctx.view_mut(key) {
                view.set_hidden(false);
                view.set_interaction_enabled(true);
            }
        }
        if let Some(offset) = self.pending_reset.take() {
            if position == AnimatingPosition::Start {
                events.push(TransitionEvent::ScrollOffset {
                    offset,
                    animated: true,
                });
            }
        }
        self.start_position = Vec2::ZERO;
        self.offset_error = 0.0;

        log::debug!(
            "{:?} transition #{} came to rest at {:?}",
            self.operation,
            self.serial,
            position
        );
        events.push(TransitionEvent::VisuallyCompleted { completed });

        self.animation = None;
        self.keyframes = None;
        self.interactive = true;
        if let Some(hook) = self.on_complete.as_mut() {
            hook(completed);
        }
    }
}

impl std::fmt::Debug for PullAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PullAnimator")
            .field("serial", &self.serial)
            .field("mode", &self.mode)
            .field("operation", &self.operation)
            .field("animation", &self.animation)
            .field("interactive", &self.interactive)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use web_time::Duration;

    use super::*;
    use crate::context::ViewState;
    use crate::geometry::Rect;

    fn screen() -> Rect {
        Rect::from_size(320.0, 640.0)
    }

    fn context() -> TransitionContext {
        TransitionContext::new(screen())
            .with_views(ViewState::new(screen()), ViewState::new(screen()))
    }

    fn animator(operation: TransitionOperation) -> PullAnimator {
        PullAnimator::new(
            TransitionMode::Scroll,
            operation,
            AnimationOptions::default(),
        )
    }

    fn run_to_rest(
        a: &mut PullAnimator,
        ctx: &mut TransitionContext,
        t0: Instant,
    ) -> Vec<TransitionEvent> {
        let mut events = Vec::new();
        for ms in (0..=1000).step_by(16) {
            if !a.tick(t0 + Duration::from_millis(ms), ctx, &mut events) {
                break;
            }
        }
        events
    }

    #[test]
    fn operation_predicates() {
        assert!(TransitionOperation::Present.is_forward());
        assert!(TransitionOperation::Push.is_forward());
        assert!(!TransitionOperation::Pop.is_forward());
        assert!(TransitionOperation::Dismiss.is_modal());
        assert!(!TransitionOperation::Push.is_modal());
        assert_eq!(TransitionOperation::Pop.direction(), Direction::Backward);
        assert_eq!(
            TransitionOperation::Present.opposite(),
            TransitionOperation::Dismiss
        );
    }

    #[test]
    fn begin_is_memoized() {
        let mut ctx = context();
        let mut a = animator(TransitionOperation::Push);
        let _ = a.begin(&mut ctx).set_fraction_complete(0.3);
        assert_eq!(a.begin(&mut ctx).fraction_complete(), 0.3);
    }

    #[test]
    fn begin_lays_out_incoming_below() {
        let mut ctx = context();
        let mut a = animator(TransitionOperation::Push);
        let _ = a.begin(&mut ctx);
        let incoming = ctx.view(ViewKey::Incoming).unwrap().frame();
        assert_eq!(incoming.origin.y, 640.0);
        assert!(ctx.incoming_above());
        assert!(!a.is_fallback());
    }

    #[test]
    fn scroll_mode_hides_incoming_until_rest() {
        let mut ctx = context();
        let mut a = animator(TransitionOperation::Push);
        let t0 = Instant::now();
        a.animate(&mut ctx, t0);
        assert!(ctx.view(ViewKey::Incoming).unwrap().is_hidden());
        assert!(!ctx.view(ViewKey::Outgoing).unwrap().is_hidden());

        let _ = run_to_rest(&mut a, &mut ctx, t0);
        assert!(!ctx.view(ViewKey::Incoming).unwrap().is_hidden());
    }

    #[test]
    fn overlay_mode_keeps_incoming_visible() {
        let mut ctx = context();
        let mut a = PullAnimator::new(
            TransitionMode::Overlay,
            TransitionOperation::Present,
            AnimationOptions::default(),
        );
        let _ = a.begin(&mut ctx);
        assert!(!ctx.view(ViewKey::Incoming).unwrap().is_hidden());
    }

    #[test]
    fn scrub_moves_views() {
        let mut ctx = context();
        let mut a = animator(TransitionOperation::Push);
        assert!(a.set_fraction_complete(0.5, &mut ctx));
        assert!(!a.set_fraction_complete(0.5, &mut ctx));
        let outgoing = ctx.view(ViewKey::Outgoing).unwrap().frame();
        assert_eq!(outgoing.origin.y, -320.0);
        assert!(a.is_active());
    }

    #[test]
    fn missing_views_fall_back_to_noop() {
        let mut ctx = TransitionContext::new(screen());
        let mut a = animator(TransitionOperation::Present);
        let t0 = Instant::now();
        a.animate(&mut ctx, t0);
        assert!(a.is_fallback());
        assert!(!a.is_interactive());

        let events = run_to_rest(&mut a, &mut ctx, t0);
        assert_eq!(
            events.last(),
            Some(&TransitionEvent::VisuallyCompleted { completed: true })
        );
        assert!(a.animation().is_none());
        assert!(a.is_interactive());
    }

    #[test]
    fn completion_restores_interaction_and_fires_hook_once() {
        let mut ctx = context();
        ctx.set_views_interaction_enabled(false);
        let fired = Rc::new(Cell::new(0));
        let seen = Rc::clone(&fired);
        let mut a = animator(TransitionOperation::Push);
        a.set_on_complete(move |_| seen.set(seen.get() + 1));

        let t0 = Instant::now();
        let _ = a.set_fraction_complete(0.5, &mut ctx);
        a.continue_animation(Vec2::ZERO, 0.5, false, t0).unwrap();
        let events = run_to_rest(&mut a, &mut ctx, t0);

        assert_eq!(fired.get(), 1);
        let completions = events
            .iter()
            .filter(|e| matches!(e, TransitionEvent::VisuallyCompleted { .. }))
            .count();
        assert_eq!(completions, 1);
        assert!(ctx.view(ViewKey::Outgoing).unwrap().is_interaction_enabled());
        assert!(ctx.view(ViewKey::Incoming).unwrap().is_interaction_enabled());
        assert!(!ctx.view(ViewKey::Incoming).unwrap().is_hidden());
        assert_eq!(ctx.view(ViewKey::Incoming).unwrap().frame(), screen());
    }

    #[test]
    fn continue_without_animation_is_a_violation() {
        let mut a = animator(TransitionOperation::Push);
        let err = a
            .continue_animation(Vec2::ZERO, 1.0, false, Instant::now())
            .unwrap_err();
        assert_eq!(err, ContractViolation::NoAnimation);
    }

    #[test]
    fn reversed_run_corrects_scroll_offset() {
        let mut ctx = context();
        let mut a = animator(TransitionOperation::Dismiss);
        a.record_drag_origin(Vec2::new(0.0, -64.0), 30.0);

        let t0 = Instant::now();
        let _ = a.set_fraction_complete(0.1, &mut ctx);
        a.continue_animation(Vec2::ZERO, 0.5, true, t0).unwrap();
        let mut events = Vec::new();
        a.reset_correction(&mut events);
        assert_eq!(
            events,
            vec![TransitionEvent::ScrollOffset {
                offset: Vec2::new(0.0, -94.0),
                animated: false,
            }]
        );
        assert_eq!(a.drag_origin(), (Vec2::ZERO, 0.0));

        let events = run_to_rest(&mut a, &mut ctx, t0);
        assert_eq!(
            events,
            vec![
                TransitionEvent::ScrollOffset {
                    offset: Vec2::new(0.0, -64.0),
                    animated: true,
                },
                TransitionEvent::VisuallyCompleted { completed: false },
            ]
        );
    }

    #[test]
    fn correction_without_origin_is_noop() {
        let mut a = animator(TransitionOperation::Pop);
        let mut events = Vec::new();
        a.reset_correction(&mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn pause_freezes_running_animation() {
        let mut ctx = context();
        let mut a = animator(TransitionOperation::Push);
        let t0 = Instant::now();
        let _ = a.set_fraction_complete(0.4, &mut ctx);
        a.continue_animation(Vec2::ZERO, 0.6, false, t0).unwrap();
        let frozen = a.pause(t0 + Duration::from_millis(50), &mut ctx).unwrap();
        assert!(frozen > 0.4);
        assert!(a.pause(t0 + Duration::from_millis(60), &mut ctx).is_none());
        assert!(a.is_active());
    }
}
