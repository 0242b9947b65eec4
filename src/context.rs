//! Per-transition context: the container geometry and the two view handles
//! a transition moves between.
//!
//! A [`TransitionContext`] is created by the host for exactly one
//! transition, handed to the coordinator at start, and dropped when the
//! transition visually completes. Controllers only ever borrow it for the
//! duration of a single call.

use crate::geometry::Rect;

/// Which of the two views a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKey {
    /// The view being transitioned away from.
    Outgoing,
    /// The view being transitioned to.
    Incoming,
}

/// Host-visible state of one view taking part in the transition.
///
/// The animator writes frames here while scrubbing and running; the host
/// applies them to its real views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    frame: Rect,
    hidden: bool,
    interaction_enabled: bool,
}

impl ViewState {
    /// A visible, interactive view at `frame`.
    #[must_use]
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            hidden: false,
            interaction_enabled: true,
        }
    }

    /// Current frame.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Move the view.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    /// Whether the view is hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Show or hide the view.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Whether the view receives touches.
    #[must_use]
    pub fn is_interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    /// Enable or disable touch delivery to the view.
    pub fn set_interaction_enabled(&mut self, enabled: bool) {
        self.interaction_enabled = enabled;
    }
}

/// State shared between the host and the transition for one navigation
/// leg.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionContext {
    container: Rect,
    outgoing: Option<ViewState>,
    incoming: Option<ViewState>,
    incoming_above: bool,
    interactive: bool,
    cancelled: bool,
}

impl TransitionContext {
    /// A context for `container` with no views attached yet.
    #[must_use]
    pub fn new(container: Rect) -> Self {
        Self {
            container,
            outgoing: None,
            incoming: None,
            incoming_above: true,
            interactive: false,
            cancelled: false,
        }
    }

    /// Attach both views (builder pattern).
    #[must_use]
    pub fn with_views(mut self, outgoing: ViewState, incoming: ViewState) -> Self {
        self.outgoing = Some(outgoing);
        self.incoming = Some(incoming);
        self
    }

    /// Container bounds; their height normalizes drag travel.
    #[must_use]
    pub fn container(&self) -> Rect {
        self.container
    }

    /// Handle for one of the two views, if the host supplied it.
    #[must_use]
    pub fn view(&self, key: ViewKey) -> Option<&ViewState> {
        match key {
            ViewKey::Outgoing => self.outgoing.as_ref(),
            ViewKey::Incoming => self.incoming.as_ref(),
        }
    }

    /// Mutable handle for one of the two views.
    pub fn view_mut(&mut self, key: ViewKey) -> Option<&mut ViewState> {
        match key {
            ViewKey::Outgoing => self.outgoing.as_mut(),
            ViewKey::Incoming => self.incoming.as_mut(),
        }
    }

    /// Whether both view handles are available.
    #[must_use]
    pub fn has_views(&self) -> bool {
        self.outgoing.is_some() && self.incoming.is_some()
    }

    /// Whether the incoming view is stacked above the outgoing one.
    #[must_use]
    pub fn incoming_above(&self) -> bool {
        self.incoming_above
    }

    pub(crate) fn set_incoming_above(&mut self, above: bool) {
        self.incoming_above = above;
    }

    /// Whether a gesture is currently scrubbing the transition.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub(crate) fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Whether the last commit cancelled the transition.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub(crate) fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }

    /// Enable or disable touches on whichever views are present.
    pub(crate) fn set_views_interaction_enabled(&mut self, enabled: bool) {
        for view in [self.outgoing.as_mut(), self.incoming.as_mut()]
            .into_iter()
            .flatten()
        {
            view.set_interaction_enabled(enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> TransitionContext {
        let bounds = Rect::from_size(320.0, 640.0);
        TransitionContext::new(bounds)
            .with_views(ViewState::new(bounds), ViewState::new(bounds))
    }

    #[test]
    fn views_default_to_visible_and_interactive() {
        let ctx = context();
        let view = ctx.view(ViewKey::Outgoing).unwrap();
        assert!(!view.is_hidden());
        assert!(view.is_interaction_enabled());
        assert!(ctx.has_views());
    }

    #[test]
    fn interaction_toggles_both_views() {
        let mut ctx = context();
        ctx.set_views_interaction_enabled(false);
        assert!(!ctx.view(ViewKey::Outgoing).unwrap().is_interaction_enabled());
        assert!(!ctx.view(ViewKey::Incoming).unwrap().is_interaction_enabled());
    }

    #[test]
    fn bare_context_has_no_views() {
        let ctx = TransitionContext::new(Rect::from_size(10.0, 10.0));
        assert!(!ctx.has_views());
        assert!(ctx.view(ViewKey::Incoming).is_none());
    }
}
