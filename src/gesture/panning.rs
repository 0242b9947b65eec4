//! Capability through which a screen offers its drag gesture.

use super::event::PanGesture;

/// Implemented by screens that can drive an interactive transition.
///
/// The coordinator queries this once, when the transition starts. A screen
/// that returns `None` (or does not implement the capability at all) gets a
/// non-interactive transition.
pub trait TransitionPanning {
    /// The gesture that should scrub the transition, if any.
    fn pan_gesture(&self) -> Option<PanGesture>;
}

impl TransitionPanning for Option<PanGesture> {
    fn pan_gesture(&self) -> Option<PanGesture> {
        *self
    }
}

impl TransitionPanning for PanGesture {
    fn pan_gesture(&self) -> Option<PanGesture> {
        Some(*self)
    }
}
