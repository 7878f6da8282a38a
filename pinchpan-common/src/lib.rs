//! Common types and utilities shared by the pinchpan crates.
//!
//! This crate provides the small set of types used across the gesture and
//! camera implementation:
//! - [`Bounds`] - axis-aligned rectangle in world coordinates
//! - [`lerp`] and [`clamp01`] - scalar interpolation helpers
//! - re-exports of the `glam` vectors used for screen and world points

pub use glam::{IVec3, Vec2, Vec3};

/// An axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Create a new rectangle from its edges.
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Build a rectangle around `center` extending `half_extents` on each side.
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(
            center.x - half_extents.x,
            center.x + half_extents.x,
            center.y - half_extents.y,
            center.y + half_extents.y,
        )
    }

    /// Horizontal extent (max_x - min_x).
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Vertical extent (max_y - min_y).
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Check if a point lies inside the rectangle. Edges are inclusive.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Check if `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Bounds) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// True when both extents are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
    }
}

/// Clamp `t` to `[0, 1]`. NaN maps to 0.
pub fn clamp01(t: f32) -> f32 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Linear interpolation between `a` and `b`. `t` is not clamped.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
