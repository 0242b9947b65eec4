//! Top-level entry point: one coordinator per navigation pair.
//!
//! The coordinator owns the animator shared by the two legs of a
//! present/dismiss or push/pop pair, the controller of the transition in
//! flight and its context, and the outbox of [`TransitionEvent`]s the host
//! drains after every call.

use glam::Vec2;
use web_time::Instant;

use crate::animation::{PullAnimator, TransitionMode, TransitionOperation};
use crate::context::TransitionContext;
use crate::event::TransitionEvent;
use crate::gesture::{GestureSample, TrackingSurface, TransitionPanning};
use crate::interaction::{CompletionPolicy, InteractiveTransition, TransitionScope};
use crate::options::TransitionOptions;

/// What the host asks the coordinator to animate.
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    /// Navigation operation to animate.
    pub operation: TransitionOperation,
    /// Container and view pair for the lifetime of the transition.
    pub context: TransitionContext,
}

impl TransitionRequest {
    /// A request for `operation` over `context`.
    #[must_use]
    pub fn new(operation: TransitionOperation, context: TransitionContext) -> Self {
        Self { operation, context }
    }
}

/// Owns the animator pair and the transition currently in flight.
pub struct TransitionCoordinator {
    options: TransitionOptions,
    /// One instance per forward/backward pair; backward legs retarget it.
    animator: Option<PullAnimator>,
    controller: Option<InteractiveTransition>,
    /// Present from `start` until the animation comes to rest.
    context: Option<TransitionContext>,
    events: Vec<TransitionEvent>,
    next_serial: u64,
}

impl TransitionCoordinator {
    /// A coordinator with no transition in flight.
    #[must_use]
    pub fn new(options: TransitionOptions) -> Self {
        Self {
            options,
            animator: None,
            controller: None,
            context: None,
            events: Vec::new(),
            next_serial: 0,
        }
    }

    /// Visual style, fixed at construction.
    #[must_use]
    pub fn mode(&self) -> TransitionMode {
        self.options.mode
    }

    /// Options the coordinator was built with.
    #[must_use]
    pub fn options(&self) -> &TransitionOptions {
        &self.options
    }

    /// Whether an animation exists and is in the `Active` run state.
    ///
    /// Hosts check this before starting a transition.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.animator.as_ref().is_some_and(PullAnimator::is_active)
    }

    /// Whether a transition was started and has not yet come to rest.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.context.is_some()
    }

    /// The shared animator, if one was created.
    #[must_use]
    pub fn animator(&self) -> Option<&PullAnimator> {
        self.animator.as_ref()
    }

    /// Mutable access to the shared animator, e.g. to install a completion
    /// hook.
    pub fn animator_mut(&mut self) -> Option<&mut PullAnimator> {
        self.animator.as_mut()
    }

    /// Controller of the interactive transition in flight.
    #[must_use]
    pub fn controller(&self) -> Option<&InteractiveTransition> {
        self.controller.as_ref()
    }

    /// Context of the transition in flight.
    #[must_use]
    pub fn context(&self) -> Option<&TransitionContext> {
        self.context.as_ref()
    }

    /// Scrub fraction of the transition in flight.
    #[must_use]
    pub fn fraction_complete(&self) -> Option<f32> {
        self.animator
            .as_ref()
            .and_then(PullAnimator::fraction_complete)
    }

    /// Record the drag origin on the shared animator.
    ///
    /// See [`PullAnimator::record_drag_origin`].
    pub fn record_drag_origin(&mut self, start_position: Vec2, offset_error: f32) {
        if let Some(animator) = self.animator.as_mut() {
            animator.record_drag_origin(start_position, offset_error);
        }
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a transition.
    ///
    /// Forward operations get a fresh animator; backward operations reuse
    /// the one left by the forward leg with its operation flipped. The
    /// panning capability is queried once: with a gesture the returned
    /// controller tracks it, without one the transition runs on its own
    /// and `None` is returned.
    ///
    /// Starting while a transition is in flight is ignored and returns
    /// `None`.
    pub fn start(
        &mut self,
        request: TransitionRequest,
        panning: &dyn TransitionPanning,
        now: Instant,
    ) -> Option<&InteractiveTransition> {
        let TransitionRequest {
            operation,
            mut context,
        } = request;
        if self.is_active() || self.is_transitioning() {
            log::debug!("start of {operation:?} ignored, a transition is in flight");
            return None;
        }

        if operation.is_forward() || self.animator.is_none() {
            self.next_serial += 1;
            let animator = PullAnimator::new(
                self.options.mode,
                operation,
                self.options.animation.clone(),
            )
            .with_serial(self.next_serial);
            self.animator = Some(animator);
        } else if let Some(animator) = self.animator.as_mut() {
            animator.set_operation(operation);
        }
        let animator = self.animator.as_mut()?;

        let controller = if let Some(gesture) = panning.pan_gesture() {
            let policy = CompletionPolicy::new(self.options.interaction.clone());
            let mut controller =
                InteractiveTransition::new(operation, gesture.source, policy);
            let mut scope = TransitionScope {
                animator,
                context: &mut context,
                events: &mut self.events,
            };
            controller.start(gesture, &mut scope, now);
            Some(controller)
        } else {
            log::debug!("{operation:?} has no gesture, running non-interactively");
            animator.animate(&mut context, now);
            None
        };

        self.context = Some(context);
        self.controller = controller;
        self.controller.as_ref()
    }

    /// Feed one gesture sample from `surface` to the transition in flight.
    ///
    /// Returns `true` if the sample was consumed. Contract violations are
    /// logged and leave the transition untouched.
    pub fn handle_gesture(
        &mut self,
        surface: TrackingSurface,
        sample: &GestureSample,
        now: Instant,
    ) -> bool {
        let (Some(controller), Some(animator), Some(context)) = (
            self.controller.as_mut(),
            self.animator.as_mut(),
            self.context.as_mut(),
        ) else {
            log::debug!("{:?} sample with no interactive transition", sample.phase);
            return false;
        };
        let mut scope = TransitionScope {
            animator,
            context,
            events: &mut self.events,
        };
        match controller.handle_sample(surface, sample, &mut scope, now) {
            Ok(()) => true,
            Err(violation) => {
                log::error!(
                    "{:?} sample rejected by {:?} transition: {violation}",
                    sample.phase,
                    controller.operation()
                );
                false
            }
        }
    }

    /// Advance the animation in flight to `now`.
    ///
    /// Returns `true` while a momentum or non-interactive run is still
    /// moving. When the animation comes to rest the context and controller
    /// are released.
    pub fn tick(&mut self, now: Instant) -> bool {
        let (Some(animator), Some(context)) =
            (self.animator.as_mut(), self.context.as_mut())
        else {
            return false;
        };
        let running = animator.tick(now, context, &mut self.events);
        if animator.animation().is_none() {
            if let Some(controller) = self.controller.as_mut() {
                controller.finish();
            }
            self.controller = None;
            self.context = None;
        }
        running
    }
}

impl Default for TransitionCoordinator {
    fn default() -> Self {
        Self::new(TransitionOptions::default())
    }
}

impl std::fmt::Debug for TransitionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionCoordinator")
            .field("mode", &self.options.mode)
            .field("animator", &self.animator)
            .field("controller", &self.controller)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}
