//! Pull-to-dismiss and pull-to-pop detection.
//!
//! A [`PullTrigger`] watches the scroll surface of the screen being left.
//! Pulling the content down past its resting inset starts the backward leg
//! of the navigation pair, and the same drag goes on to scrub it.

use glam::Vec2;
use web_time::Instant;

use crate::animation::TransitionOperation;
use crate::context::TransitionContext;
use crate::coordinator::{TransitionCoordinator, TransitionRequest};
use crate::event::TransitionEvent;
use crate::gesture::{GestureSourceId, PanGesture, TransitionPanning};
use crate::options::PullOptions;

/// Scroll state of the driving surface, sampled on every scroll callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current content offset; negative `y` means pulled down past the top.
    pub content_offset: Vec2,
    /// Velocity of the finger dragging the surface.
    pub velocity: Vec2,
    /// Whether the surface is coasting after the finger lifted.
    pub is_decelerating: bool,
}

/// Starts a backward transition when the user pulls the content down.
pub struct PullTrigger {
    operation: TransitionOperation,
    source: GestureSourceId,
    options: PullOptions,
    is_transitioning: bool,
    interactive_enabled: bool,
    on_will_pull: Option<Box<dyn FnMut(TransitionOperation)>>,
}

impl PullTrigger {
    /// A trigger that starts `operation` (dismiss or pop) with drags from
    /// `source`.
    #[must_use]
    pub fn new(
        operation: TransitionOperation,
        source: GestureSourceId,
        options: PullOptions,
    ) -> Self {
        if operation.is_forward() {
            log::warn!("pull trigger configured with forward operation {operation:?}");
        }
        Self {
            operation,
            source,
            options,
            is_transitioning: false,
            interactive_enabled: false,
            on_will_pull: None,
        }
    }

    /// Run `hook` right after a pull has started a transition (builder
    /// pattern).
    #[must_use]
    pub fn with_on_will_pull(
        mut self,
        hook: impl FnMut(TransitionOperation) + 'static,
    ) -> Self {
        self.on_will_pull = Some(Box::new(hook));
        self
    }

    /// Operation started by a pull.
    #[must_use]
    pub fn operation(&self) -> TransitionOperation {
        self.operation
    }

    /// Thresholds in use.
    #[must_use]
    pub fn options(&self) -> &PullOptions {
        &self.options
    }

    /// Whether a transition started by this trigger is still in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    /// How far the content is pulled past the trigger inset.
    #[must_use]
    pub fn pulled_distance(&self, metrics: &ScrollMetrics) -> f32 {
        -metrics.content_offset.y - self.options.trigger_threshold
    }

    /// Inspect a scroll update and start the transition if it is a pull.
    ///
    /// `context` is only built when the pull fires. Returns the offset at
    /// which the host should stop the scroll surface, or `None` if nothing
    /// started.
    pub fn scroll_did_scroll(
        &mut self,
        metrics: &ScrollMetrics,
        coordinator: &mut TransitionCoordinator,
        context: impl FnOnce() -> TransitionContext,
        now: Instant,
    ) -> Option<Vec2> {
        if self.is_transitioning {
            return None;
        }
        let pulled = self.pulled_distance(metrics);
        let is_pull = pulled > self.options.travel_threshold
            && metrics.velocity.y > 0.0
            && !metrics.is_decelerating;
        if !is_pull || coordinator.is_active() || coordinator.is_transitioning() {
            self.interactive_enabled = false;
            return None;
        }

        // The gesture is offered only while the start is being resolved.
        self.interactive_enabled = true;
        let request = TransitionRequest::new(self.operation, context());
        let _ = coordinator.start(request, &*self, now);
        if !coordinator.is_transitioning() {
            self.interactive_enabled = false;
            return None;
        }

        // Content offsets lag the finger, so the pull usually fires a little
        // past the inset. Remember by how much.
        let start = Vec2::new(0.0, -self.options.trigger_threshold);
        coordinator.record_drag_origin(start, pulled);
        log::debug!(
            "pull of {pulled:.1} started {:?} from offset {:?}",
            self.operation,
            metrics.content_offset
        );

        self.is_transitioning = true;
        if let Some(hook) = self.on_will_pull.as_mut() {
            hook(self.operation);
        }
        Some(metrics.content_offset)
    }

    /// Reset after the transition this trigger started came to rest.
    ///
    /// A completed dismissal leaves the scroll surface pulled down; the
    /// returned event eases it back to its resting inset.
    pub fn transition_ended(&mut self, completed: bool) -> Option<TransitionEvent> {
        if !self.is_transitioning {
            return None;
        }
        self.is_transitioning = false;
        self.interactive_enabled = false;
        (completed && self.operation.is_modal()).then(|| TransitionEvent::ScrollOffset {
            offset: Vec2::new(0.0, -self.options.trigger_threshold),
            animated: true,
        })
    }
}

impl TransitionPanning for PullTrigger {
    fn pan_gesture(&self) -> Option<PanGesture> {
        self.interactive_enabled
            .then(|| PanGesture::active(self.source))
    }
}

impl std::fmt::Debug for PullTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PullTrigger")
            .field("operation", &self.operation)
            .field("source", &self.source)
            .field("options", &self.options)
            .field("is_transitioning", &self.is_transitioning)
            .finish_non_exhaustive()
    }
}
