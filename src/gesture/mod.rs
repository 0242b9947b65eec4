//! Gesture input: the sample stream a host feeds into the transition
//! controller, and the capability through which a screen offers its drag
//! gesture for interactive transitions.

/// Gesture phases, samples and tracking surfaces.
pub mod event;
/// Capability interface for screens that can drive a transition.
pub mod panning;

pub use event::{
    GesturePhase, GestureSample, GestureSourceId, PanGesture, TrackingSurface,
};
pub use panning::TransitionPanning;
