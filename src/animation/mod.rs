//! Animation system for scrubbable, interruptible view transitions.

pub mod layout;
pub mod scrub;
pub mod spring;
pub mod transition;

pub use layout::{FrameTrack, TransitionKeyframes, TransitionMode};
pub use scrub::{AnimatingPosition, AnimationState, ScrubbableAnimation};
pub use spring::{SpringCurve, SpringTiming};
pub use transition::{
    CompletionHook, Direction, PullAnimator, TransitionOperation,
};
