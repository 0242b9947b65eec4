//! Interactive transition controller.
//!
//! Maps a stream of drag samples onto the animator's scrub fraction, decides
//! on release whether the transition completes or cancels, and hands off to
//! a momentum run that a new drag can interrupt.
//!
//! ```text
//! Idle ──Begin──▶ Tracking ──End/Cancel──▶ Deciding ──▶ Committing(Start|End)
//!                    ▲                                        │
//!                    └──────── Begin on container ────────────┘
//!
//! Idle ──start with an ended gesture──▶ Autonomous
//! ```
//!
//! The controller owns no views and no animation. Every call borrows them
//! through a [`TransitionScope`] that lives only as long as the call.

use web_time::Instant;

use super::policy::{CompletionPolicy, CompletionPosition};
use super::session::InteractionSession;
use crate::animation::{AnimationState, PullAnimator, TransitionOperation};
use crate::context::TransitionContext;
use crate::error::ContractViolation;
use crate::event::TransitionEvent;
use crate::gesture::{
    GesturePhase, GestureSample, GestureSourceId, PanGesture, TrackingSurface,
};

/// Borrowed handles a controller needs for one call.
pub struct TransitionScope<'a> {
    /// Animator of the transition being driven.
    pub animator: &'a mut PullAnimator,
    /// Views and container of the transition.
    pub context: &'a mut TransitionContext,
    /// Outbox for host notifications.
    pub events: &'a mut Vec<TransitionEvent>,
}

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerPhase {
    /// No gesture owns the transition.
    #[default]
    Idle,
    /// A gesture is scrubbing the transition.
    Tracking,
    /// The gesture ended and the completion policy is running.
    Deciding,
    /// A momentum run is carrying the transition to a terminal position.
    Committing(CompletionPosition),
    /// The gesture ended before the transition attached; the run goes to
    /// the end on its own and no sample can take it over.
    Autonomous,
}

/// Drives one transition from gesture samples.
#[derive(Debug, Clone)]
pub struct InteractiveTransition {
    operation: TransitionOperation,
    policy: CompletionPolicy,
    source: GestureSourceId,
    surface: TrackingSurface,
    interruption_attached: bool,
    session: Option<InteractionSession>,
    phase: ControllerPhase,
    last_decision: Option<CompletionPosition>,
}

impl InteractiveTransition {
    /// A controller listening to `source`.
    #[must_use]
    pub fn new(
        operation: TransitionOperation,
        source: GestureSourceId,
        policy: CompletionPolicy,
    ) -> Self {
        Self {
            operation,
            policy,
            source,
            surface: TrackingSurface::Source(source),
            interruption_attached: false,
            session: None,
            phase: ControllerPhase::Idle,
            last_decision: None,
        }
    }

    /// Operation being driven.
    #[must_use]
    pub fn operation(&self) -> TransitionOperation {
        self.operation
    }

    /// The gesture source the controller was created for.
    #[must_use]
    pub fn source(&self) -> GestureSourceId {
        self.source
    }

    /// Surface whose samples are currently accepted.
    #[must_use]
    pub fn surface(&self) -> TrackingSurface {
        self.surface
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    /// The active session, while tracking.
    #[must_use]
    pub fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    /// Decision of the most recent commit.
    #[must_use]
    pub fn last_decision(&self) -> Option<CompletionPosition> {
        self.last_decision
    }

    /// Whether samples from `surface` reach this controller.
    #[must_use]
    pub fn accepts(&self, surface: TrackingSurface) -> bool {
        self.surface == surface
    }

    /// Attach to a transition that has just started.
    ///
    /// A gesture that already ended before the transition could attach
    /// (very short swipes) kicks off a non-interactive run instead.
    pub fn start(
        &mut self,
        gesture: PanGesture,
        scope: &mut TransitionScope<'_>,
        now: Instant,
    ) {
        let _ = scope.animator.begin(scope.context);
        if gesture.already_ended() {
            log::debug!(
                "{:?}: gesture ended before attach, running non-interactively",
                self.operation
            );
            scope.animator.animate(scope.context, now);
            scope.context.set_interactive(false);
            self.phase = ControllerPhase::Autonomous;
            return;
        }
        self.open_session(scope.context);
    }

    /// Consume one sample from `surface`.
    pub fn handle_sample(
        &mut self,
        surface: TrackingSurface,
        sample: &GestureSample,
        scope: &mut TransitionScope<'_>,
        now: Instant,
    ) -> Result<(), ContractViolation> {
        if self.phase == ControllerPhase::Autonomous {
            return Err(ContractViolation::NotTracking);
        }
        if !self.accepts(surface) {
            return Err(ContractViolation::UnboundSurface);
        }
        match sample.phase {
            GesturePhase::Begin => self.begin(scope, now),
            GesturePhase::Change => self.update(sample, scope),
            GesturePhase::End | GesturePhase::Cancel => {
                self.end(sample, scope, now)
            }
        }
    }

    /// Return to `Idle` once the transition has visually completed.
    pub fn finish(&mut self) {
        self.session = None;
        self.phase = ControllerPhase::Idle;
    }

    fn open_session(&mut self, ctx: &mut TransitionContext) {
        self.session = Some(InteractionSession::new(ctx.container(), self.operation));
        ctx.set_interactive(true);
        ctx.set_cancelled(false);
        self.phase = ControllerPhase::Tracking;
        log::debug!("{:?}: tracking on {:?}", self.operation, self.surface);
    }

    fn begin(
        &mut self,
        scope: &mut TransitionScope<'_>,
        now: Instant,
    ) -> Result<(), ContractViolation> {
        match self.phase {
            ControllerPhase::Tracking => {
                if let Some(session) = self.session.as_mut() {
                    session.restart();
                }
                Ok(())
            }
            ControllerPhase::Committing(_) => {
                let Some(fraction) = scope.animator.pause(now, scope.context) else {
                    return Err(ContractViolation::NotTracking);
                };
                log::debug!(
                    "{:?}: momentum run interrupted at {fraction:.3}",
                    self.operation
                );
                scope.events.push(TransitionEvent::Interrupted { fraction });
                self.open_session(scope.context);
                Ok(())
            }
            ControllerPhase::Idle => {
                if scope.animator.is_active() {
                    log::debug!(
                        "{:?}: begin ignored, a transition is already active",
                        self.operation
                    );
                    return Ok(());
                }
                let _ = scope.animator.begin(scope.context);
                self.open_session(scope.context);
                Ok(())
            }
            ControllerPhase::Deciding | ControllerPhase::Autonomous => {
                Err(ContractViolation::NotTracking)
            }
        }
    }

    fn update(
        &mut self,
        sample: &GestureSample,
        scope: &mut TransitionScope<'_>,
    ) -> Result<(), ContractViolation> {
        if self.phase != ControllerPhase::Tracking {
            return Err(ContractViolation::NotTracking);
        }
        let session = self
            .session
            .as_mut()
            .filter(|s| s.is_interactive())
            .ok_or(ContractViolation::NotTracking)?;
        session.record_update();
        let step = session.progress_step(sample.translation_delta);

        let current = scope.animator.fraction_complete().unwrap_or(0.0);
        let _ = scope
            .animator
            .set_fraction_complete(current + step, scope.context);
        let fraction = scope.animator.fraction_complete().unwrap_or(0.0);
        scope.events.push(TransitionEvent::Progress(fraction));
        Ok(())
    }

    fn end(
        &mut self,
        sample: &GestureSample,
        scope: &mut TransitionScope<'_>,
        now: Instant,
    ) -> Result<(), ContractViolation> {
        if self.phase != ControllerPhase::Tracking {
            return Err(ContractViolation::NotTracking);
        }
        if !scope.context.is_interactive() {
            log::error!(
                "{:?}: transition context must be interactive while tracking",
                self.operation
            );
            return Err(ContractViolation::NotInteractive);
        }
        let session = self.session.as_mut().ok_or(ContractViolation::NotTracking)?;
        session.finish()?;
        let update_count = session.update_count();
        self.phase = ControllerPhase::Deciding;

        let fraction = scope.animator.fraction_complete().unwrap_or(0.0);
        let velocity = sample.velocity;
        let decision =
            self.policy
                .decide(update_count, fraction, velocity, self.operation);
        let run = self
            .policy
            .continuation(decision, fraction, velocity, self.operation);
        log::debug!(
            "{:?}: released at {fraction:.3} after {update_count} updates, \
             v={velocity}, heading to {decision:?}",
            self.operation
        );

        // Releases before the first Change never activated the animation.
        let inactive = scope
            .animator
            .animation()
            .is_none_or(|a| a.state() == AnimationState::Inactive);
        if inactive {
            let _ = scope
                .animator
                .set_fraction_complete(run.fraction, scope.context);
        }
        scope.animator.continue_animation(
            run.velocity,
            run.duration_factor,
            run.reversed,
            now,
        )?;
        if run.reversed {
            scope.animator.reset_correction(scope.events);
        }

        let completed = decision == CompletionPosition::End;
        scope.context.set_interactive(false);
        scope.context.set_cancelled(!completed);
        scope.events.push(TransitionEvent::Finished { completed });

        self.session = None;
        self.phase = ControllerPhase::Committing(decision);
        self.last_decision = Some(decision);
        self.attach_interruption_surface(scope.context);
        Ok(())
    }

    /// Rebind to the container so a new drag can interrupt the momentum
    /// run. Touches to both views are blocked until the run completes.
    fn attach_interruption_surface(&mut self, ctx: &mut TransitionContext) {
        if self.interruption_attached {
            return;
        }
        self.interruption_attached = true;
        self.surface = TrackingSurface::Container;
        ctx.set_views_interaction_enabled(false);
    }
}
