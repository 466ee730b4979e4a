//! Overlap and landing tests
//!
//! Everything in the world is an axis-aligned box in screen space
//! (y grows downward).

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from a top-left corner and a size
    pub fn from_rect(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict horizontal overlap (touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }

    /// Strict vertical overlap (touching edges don't count)
    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.min.y < other.max.y && self.max.y > other.min.y
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// Vertical half of the landing test.
///
/// A body lands when its feet were at or above the surface (within
/// `threshold`) before this frame's step, are at or below it after the step,
/// and it is not moving upward. Comparing the pre-step position against the
/// post-step one separates "came down onto it" from "was already inside it".
#[inline]
pub fn landing_contact(
    prev_bottom: f32,
    bottom: f32,
    vel_y: f32,
    surface_y: f32,
    threshold: f32,
) -> bool {
    prev_bottom <= surface_y + threshold && bottom >= surface_y && vel_y >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::from_rect(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_rect(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
        let c = Aabb::from_rect(Vec2::new(9.0, 9.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn landing_from_above() {
        // Feet were at 490, now at 497, surface at 490
        assert!(landing_contact(490.0, 497.0, 7.0, 490.0, 5.0));
        // Feet were 5px into the surface: still counts (oscillation slack)
        assert!(landing_contact(495.0, 500.0, 5.0, 490.0, 5.0));
    }

    #[test]
    fn no_landing_when_already_below_surface() {
        assert!(!landing_contact(496.0, 500.0, 4.0, 490.0, 5.0));
    }

    #[test]
    fn no_landing_while_rising() {
        assert!(!landing_contact(490.0, 491.0, -0.5, 490.0, 5.0));
    }

    #[test]
    fn no_landing_before_reaching_surface() {
        assert!(!landing_contact(480.0, 489.0, 9.0, 490.0, 5.0));
    }
}
