//! Axis-aligned bounding box collision
//!
//! Every arcade entity - ships, bullets, falling shapes, the catcher paddle -
//! is collision-tested as an axis-aligned rectangle around its center.

use glam::Vec2;

/// An axis-aligned box described by its center and half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    /// Box with explicit width and height
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size / 2.0,
        }
    }

    /// Square box (ships, bullets, shapes)
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::new(center, Vec2::splat(size))
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Rectangle overlap test. Touching edges count as overlap, matching the
    /// generous hit detection arcade players expect.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (amin, amax) = (self.min(), self.max());
        let (bmin, bmax) = (other.min(), other.max());
        !(amax.x < bmin.x || amin.x > bmax.x || amax.y < bmin.y || amin.y > bmax.y)
    }
}
