//! Gesture-driven control of a transition.
//!
//! - [`session`]: per-gesture bookkeeping and progress mapping
//! - [`policy`]: completion decision and momentum shaping on release
//! - [`controller`]: the state machine tying both to an animator

pub mod controller;
pub mod policy;
pub mod session;

pub use controller::{ControllerPhase, InteractiveTransition, TransitionScope};
pub use policy::{CompletionPolicy, CompletionPosition, Continuation};
pub use session::InteractionSession;
