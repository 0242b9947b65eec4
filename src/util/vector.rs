//! 2D vector helpers for gesture velocities and translations.
//!
//! Thin naming layer over [`glam::Vec2`] so velocity checks read the way the
//! completion policy is stated (magnitude, scaled by a damping constant).

use glam::Vec2;

/// Magnitude and scaling helpers for gesture vectors.
pub trait VectorExt {
    /// Euclidean length of the vector.
    fn magnitude(self) -> f32;

    /// Component-wise scale by `scale`.
    #[must_use]
    fn scaled(self, scale: f32) -> Self;
}

impl VectorExt for Vec2 {
    #[inline]
    fn magnitude(self) -> f32 {
        self.x.hypot(self.y)
    }

    #[inline]
    fn scaled(self, scale: f32) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }
}
