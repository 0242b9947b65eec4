//! Mutable state of one interactive transition attempt.

use glam::Vec2;

use crate::animation::TransitionOperation;
use crate::error::ContractViolation;
use crate::geometry::Rect;

/// One gesture's worth of interactive control over a transition.
///
/// Created when tracking begins, mutated by every Change sample and consumed
/// when the gesture ends.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionSession {
    update_count: u32,
    container: Rect,
    operation: TransitionOperation,
    interactive: bool,
}

impl InteractionSession {
    /// A fresh interactive session over `container`.
    #[must_use]
    pub fn new(container: Rect, operation: TransitionOperation) -> Self {
        Self {
            update_count: 0,
            container,
            operation,
            interactive: true,
        }
    }

    /// Number of Change samples observed.
    #[must_use]
    pub fn update_count(&self) -> u32 {
        self.update_count
    }

    /// Container bounds that normalize drag travel.
    #[must_use]
    pub fn container(&self) -> Rect {
        self.container
    }

    /// Size of the container that normalizes drag travel.
    #[must_use]
    pub fn container_extent(&self) -> Vec2 {
        self.container.size
    }

    /// Operation being scrubbed.
    #[must_use]
    pub fn operation(&self) -> TransitionOperation {
        self.operation
    }

    /// Whether the gesture still owns the transition.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Count a Change sample. Ignored once the session is no longer
    /// interactive.
    pub fn record_update(&mut self) {
        if self.interactive {
            self.update_count = self.update_count.saturating_add(1);
        }
    }

    /// Forget earlier samples when the gesture restarts.
    pub fn restart(&mut self) {
        self.update_count = 0;
    }

    /// Progress change for a translation: vertical travel as a fraction of
    /// half the container height. Upward travel advances forward
    /// operations, downward travel advances backward ones.
    ///
    /// A zero-height container saturates: any travel in the advancing
    /// direction yields `1.0`, any travel against it `-1.0`.
    #[must_use]
    pub fn progress_step(&self, translation: Vec2) -> f32 {
        let travel = if self.operation.is_forward() {
            -translation.y
        } else {
            translation.y
        };
        let half = self.container.half_height();
        if half > 0.0 && half.is_finite() {
            travel / half
        } else if travel > 0.0 {
            1.0
        } else if travel < 0.0 {
            -1.0
        } else {
            0.0
        }
    }

    /// Leave interactive control. Succeeds exactly once per session.
    pub fn finish(&mut self) -> Result<(), ContractViolation> {
        if !self.interactive {
            return Err(ContractViolation::NotInteractive);
        }
        self.interactive = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(operation: TransitionOperation) -> InteractionSession {
        InteractionSession::new(Rect::from_size(320.0, 640.0), operation)
    }

    #[test]
    fn forward_progress_follows_upward_travel() {
        let s = session(TransitionOperation::Push);
        assert_eq!(s.progress_step(Vec2::new(0.0, -32.0)), 0.1);
        assert_eq!(s.progress_step(Vec2::new(0.0, 32.0)), -0.1);
    }

    #[test]
    fn backward_progress_follows_downward_travel() {
        let s = session(TransitionOperation::Dismiss);
        assert_eq!(s.progress_step(Vec2::new(0.0, 160.0)), 0.5);
    }

    #[test]
    fn full_travel_is_half_the_container_height() {
        let container = Rect::new(Vec2::new(0.0, 120.0), Vec2::new(320.0, 500.0));
        let s = InteractionSession::new(container, TransitionOperation::Present);
        assert_eq!(s.container(), container);
        assert_eq!(s.container_extent(), Vec2::new(320.0, 500.0));
        let full = Vec2::new(0.0, -container.half_height());
        assert_eq!(s.progress_step(full), 1.0);
    }

    #[test]
    fn horizontal_travel_is_ignored() {
        let s = session(TransitionOperation::Push);
        assert_eq!(s.progress_step(Vec2::new(200.0, 0.0)), 0.0);
    }

    #[test]
    fn zero_height_container_saturates() {
        let s = InteractionSession::new(
            Rect::from_size(320.0, 0.0),
            TransitionOperation::Pop,
        );
        assert_eq!(s.progress_step(Vec2::new(0.0, 5.0)), 1.0);
        assert_eq!(s.progress_step(Vec2::new(0.0, -5.0)), -1.0);
        assert_eq!(s.progress_step(Vec2::ZERO), 0.0);
    }

    #[test]
    fn finishes_exactly_once() {
        let mut s = session(TransitionOperation::Push);
        s.record_update();
        assert_eq!(s.finish(), Ok(()));
        assert_eq!(s.finish(), Err(ContractViolation::NotInteractive));
        s.record_update();
        assert_eq!(s.update_count(), 1);
    }
}
