//! Start and end layouts of a pull transition.
//!
//! Both views travel vertically. The incoming view always comes to rest on
//! the outgoing view's original frame; what the outgoing view does depends
//! on the [`TransitionMode`]:
//!
//! | mode    | forward                     | backward                  |
//! |---------|-----------------------------|---------------------------|
//! | scroll  | incoming rises from below, outgoing scrolls up | incoming drops from above, outgoing scrolls down |
//! | overlay | incoming rises over a static outgoing | outgoing slides down, revealing incoming |

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::context::{TransitionContext, ViewKey};
use crate::geometry::Rect;

/// Visual style of a pull transition.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// The incoming view slides over (or out from under) the outgoing one.
    Overlay,
    /// Both views move together like one continuous scroll.
    #[default]
    Scroll,
}

/// Start and end frame of one view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTrack {
    /// Frame at fraction 0.
    pub start: Rect,
    /// Frame at fraction 1.
    pub end: Rect,
}

impl FrameTrack {
    /// A track that does not move.
    #[must_use]
    pub fn fixed(frame: Rect) -> Self {
        Self {
            start: frame,
            end: frame,
        }
    }

    /// Frame at `fraction`.
    #[must_use]
    pub fn at(&self, fraction: f32) -> Rect {
        self.start.lerp(self.end, fraction)
    }
}

/// Keyframes for both views of one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionKeyframes {
    /// Track of the view being left.
    pub outgoing: FrameTrack,
    /// Track of the view being entered.
    pub incoming: FrameTrack,
    /// Whether the incoming view is stacked above the outgoing one.
    pub incoming_above: bool,
}

impl TransitionKeyframes {
    /// Compute keyframes from the views' current frames.
    #[must_use]
    pub fn compute(
        mode: TransitionMode,
        forward: bool,
        outgoing: Rect,
        incoming: Rect,
    ) -> Self {
        let h = outgoing.height();
        let entry = outgoing.offset_y(if forward { h } else { -h });
        let exit = outgoing.offset_y(if forward { -h } else { h });

        let incoming_start = match (mode, forward) {
            (TransitionMode::Overlay, false) => incoming,
            _ => entry,
        };
        let outgoing_end = match (mode, forward) {
            (TransitionMode::Scroll, _) => exit,
            (TransitionMode::Overlay, true) => outgoing,
            (TransitionMode::Overlay, false) => outgoing.offset_y(h),
        };

        Self {
            outgoing: FrameTrack {
                start: outgoing,
                end: outgoing_end,
            },
            incoming: FrameTrack {
                start: incoming_start,
                end: outgoing,
            },
            incoming_above: forward,
        }
    }

    /// Write the frames for `fraction` into the context's views.
    pub fn apply(&self, fraction: f32, ctx: &mut TransitionContext) {
        if let Some(view) = ctx.view_mut(ViewKey::Outgoing) {
            view.set_frame(self.outgoing.at(fraction));
        }
        if let Some(view) = ctx.view_mut(ViewKey::Incoming) {
            view.set_frame(self.incoming.at(fraction));
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn screen() -> Rect {
        Rect::from_size(320.0, 640.0)
    }

    #[test]
    fn scroll_forward_moves_both_views_up() {
        let k = TransitionKeyframes::compute(
            TransitionMode::Scroll,
            true,
            screen(),
            screen(),
        );
        assert_eq!(k.incoming.start.origin, Vec2::new(0.0, 640.0));
        assert_eq!(k.incoming.end, screen());
        assert_eq!(k.outgoing.end.origin, Vec2::new(0.0, -640.0));
        assert!(k.incoming_above);
    }

    #[test]
    fn scroll_backward_moves_both_views_down() {
        let k = TransitionKeyframes::compute(
            TransitionMode::Scroll,
            false,
            screen(),
            screen(),
        );
        assert_eq!(k.incoming.start.origin, Vec2::new(0.0, -640.0));
        assert_eq!(k.outgoing.end.origin, Vec2::new(0.0, 640.0));
        assert!(!k.incoming_above);
    }

    #[test]
    fn overlay_forward_keeps_outgoing_still() {
        let k = TransitionKeyframes::compute(
            TransitionMode::Overlay,
            true,
            screen(),
            screen(),
        );
        assert_eq!(k.outgoing, FrameTrack::fixed(screen()));
        assert_eq!(k.incoming.start.origin.y, 640.0);
    }

    #[test]
    fn overlay_backward_reveals_incoming_in_place() {
        let k = TransitionKeyframes::compute(
            TransitionMode::Overlay,
            false,
            screen(),
            screen(),
        );
        assert_eq!(k.incoming, FrameTrack::fixed(screen()));
        assert_eq!(k.outgoing.end.origin.y, 640.0);
    }

    #[test]
    fn track_interpolates_halfway() {
        let track = FrameTrack {
            start: screen(),
            end: screen().offset_y(-640.0),
        };
        assert_eq!(track.at(0.5).origin.y, -320.0);
    }
}
