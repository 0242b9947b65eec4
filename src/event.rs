//! Notifications a transition sends back to the host.

use glam::Vec2;

/// Side effects of driving a transition, drained by the host from the
/// [`TransitionCoordinator`](crate::coordinator::TransitionCoordinator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionEvent {
    /// The scrub fraction changed in response to a Change sample.
    Progress(f32),
    /// The gesture ended and the transition committed.
    ///
    /// Sent synchronously at commit time, before the momentum run has
    /// finished. `completed` is `false` when the transition cancels.
    Finished {
        /// Whether the transition will land on its end state.
        completed: bool,
    },
    /// A new drag caught the momentum run mid-flight and took over.
    Interrupted {
        /// Fraction at which the run was frozen.
        fraction: f32,
    },
    /// The animation reached its terminal state and released its views.
    VisuallyCompleted {
        /// Whether it came to rest at the end state.
        completed: bool,
    },
    /// Move the driving scroll surface to `offset`.
    ScrollOffset {
        /// Target content offset.
        offset: Vec2,
        /// Whether the host should animate the change.
        animated: bool,
    },
}
