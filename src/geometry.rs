//! Axis-aligned rectangles for view frames and container bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in container coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// A rectangle with the given origin and size.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// A rectangle anchored at the origin with the given size.
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            size: Vec2::new(width, height),
        }
    }

    /// Height of the rectangle.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Half the height: the distance a drag must travel for a full
    /// transition.
    #[inline]
    #[must_use]
    pub fn half_height(&self) -> f32 {
        self.size.y * 0.5
    }

    /// The same rectangle shifted vertically by `dy`.
    #[must_use]
    pub fn offset_y(self, dy: f32) -> Self {
        Self {
            origin: Vec2::new(self.origin.x, self.origin.y + dy),
            size: self.size,
        }
    }

    /// Linear interpolation between two rectangles.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            origin: self.origin.lerp(other.origin, t),
            size: self.size.lerp(other.size, t),
        }
    }
}
