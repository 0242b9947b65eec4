use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Phase of a continuous drag gesture.
///
/// Serde serializes as `snake_case` strings so replay scripts stay readable:
/// ```toml
/// [[samples]]
/// phase = "change"
/// translation = [0.0, -12.0]
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// Finger went down and the drag was recognized.
    #[default]
    Begin,
    /// The drag moved.
    Change,
    /// The finger lifted.
    End,
    /// The platform cancelled the gesture.
    Cancel,
}

impl GesturePhase {
    /// Whether the gesture is over (ended or cancelled).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::End | Self::Cancel)
    }
}

/// One pointer update delivered by the host.
///
/// `translation_delta` has delta semantics: it is the travel since the
/// previously consumed sample, in container coordinates. The controller
/// consumes it exactly once, so a host backed by an absolute-translation
/// recognizer must zero its translation after each delivered sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSample {
    /// Gesture phase for this update.
    pub phase: GesturePhase,
    /// Travel since the last consumed sample.
    pub translation_delta: Vec2,
    /// Instantaneous velocity in points per second.
    pub velocity: Vec2,
    /// Pointer position in container coordinates.
    pub position: Vec2,
}

impl GestureSample {
    /// A `Begin` sample at `position`.
    #[must_use]
    pub fn begin(position: Vec2) -> Self {
        Self {
            phase: GesturePhase::Begin,
            position,
            ..Self::default()
        }
    }

    /// A `Change` sample moving by `delta` with the given velocity.
    #[must_use]
    pub fn change(delta: Vec2, velocity: Vec2) -> Self {
        Self {
            phase: GesturePhase::Change,
            translation_delta: delta,
            velocity,
            position: Vec2::ZERO,
        }
    }

    /// An `End` sample releasing with the given velocity.
    #[must_use]
    pub fn end(velocity: Vec2) -> Self {
        Self {
            phase: GesturePhase::End,
            velocity,
            ..Self::default()
        }
    }

    /// A `Cancel` sample with the given velocity.
    #[must_use]
    pub fn cancel(velocity: Vec2) -> Self {
        Self {
            phase: GesturePhase::Cancel,
            velocity,
            ..Self::default()
        }
    }
}

/// Host-assigned identifier of a gesture source (e.g. a scroll view's pan
/// recognizer).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct GestureSourceId(pub u32);

/// The surface a controller currently accepts samples from.
///
/// A controller starts bound to the gesture that triggered the transition.
/// Once the interactive phase ends it rebinds to the transition's container
/// so a fresh drag can interrupt the momentum run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingSurface {
    /// The triggering gesture source.
    Source(GestureSourceId),
    /// The transition container itself.
    Container,
}

/// A gesture source offered for an interactive transition, with the phase it
/// was in when the transition started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanGesture {
    /// Identifier the host will tag samples with.
    pub source: GestureSourceId,
    /// Phase at the moment the transition was requested.
    pub phase: GesturePhase,
}

impl PanGesture {
    /// A gesture that is still in progress.
    #[must_use]
    pub fn active(source: GestureSourceId) -> Self {
        Self {
            source,
            phase: GesturePhase::Change,
        }
    }

    /// Whether the gesture finished before the transition could attach to
    /// it (very short swipes).
    #[must_use]
    pub fn already_ended(&self) -> bool {
        !matches!(self.phase, GesturePhase::Begin | GesturePhase::Change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_phases() {
        assert!(GesturePhase::End.is_terminal());
        assert!(GesturePhase::Cancel.is_terminal());
        assert!(!GesturePhase::Change.is_terminal());
    }

    #[test]
    fn already_ended_only_after_release() {
        let id = GestureSourceId(1);
        assert!(!PanGesture::active(id).already_ended());
        let ended = PanGesture {
            source: id,
            phase: GesturePhase::End,
        };
        assert!(ended.already_ended());
    }

    #[test]
    fn phase_uses_snake_case() {
        let json = serde_json::to_string(&GesturePhase::Change).unwrap();
        assert_eq!(json, "\"change\"");
    }
}
