//! Geometry and timing utilities shared by the core and the host

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_FRAME_SCALE, NOMINAL_FRAME_SECS};

/// Axis-aligned rectangle in screen coordinates (top-left origin, +y down)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Same size, moved so its center sits at `center`
    pub fn with_center(&self, center: Vec2) -> Self {
        Self::from_center(center, self.size)
    }

    /// True if `self` lies entirely inside `bounds` (edges inclusive)
    pub fn is_within(&self, bounds: &Aabb) -> bool {
        let max = self.max();
        let bounds_max = bounds.max();
        self.min.x >= bounds.min.x
            && self.min.y >= bounds.min.y
            && max.x <= bounds_max.x
            && max.y <= bounds_max.y
    }
}

/// AABB overlap test. Edges are inclusive: rectangles that only touch overlap.
pub fn rectangles_overlap(a: &Aabb, b: &Aabb) -> bool {
    let a_max = a.max();
    let b_max = b.max();
    !(a_max.x < b.min.x || b_max.x < a.min.x || a_max.y < b.min.y || b_max.y < a.min.y)
}

/// Strict distance test (a point exactly on the radius is outside)
pub fn point_within_radius(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

/// Convert elapsed seconds into a tick multiplier.
/// Non-finite or negative input yields 0; long hitches are capped.
pub fn frame_scale(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    (dt / NOMINAL_FRAME_SECS).min(MAX_FRAME_SCALE)
}

/// Advance a value that sweeps back and forth between `min` and `max`.
/// Reversal is a hard clamp-and-flip: the value lands on the boundary and the
/// direction reverses on the same step.
pub fn oscillate(value: f32, direction: f32, step: f32, min: f32, max: f32) -> (f32, f32) {
    let next = value + direction * step;
    if next >= max {
        (max, -1.0)
    } else if next <= min {
        (min, 1.0)
    } else {
        (next, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_and_separation() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(rectangles_overlap(&a, &rect(5.0, 5.0, 10.0, 10.0)));
        assert!(!rectangles_overlap(&a, &rect(11.0, 0.0, 5.0, 5.0)));
        assert!(!rectangles_overlap(&a, &rect(0.0, -6.0, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(rectangles_overlap(&a, &rect(10.0, 0.0, 5.0, 5.0)));
        assert!(rectangles_overlap(&a, &rect(10.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(40.0, 40.0, 5.0, 5.0);
        assert!(rectangles_overlap(&outer, &inner));
        assert!(rectangles_overlap(&inner, &outer));
        assert!(inner.is_within(&outer));
        assert!(!outer.is_within(&inner));
    }

    #[test]
    fn test_radius_is_strict() {
        let center = Vec2::new(0.0, 0.0);
        assert!(point_within_radius(Vec2::new(3.0, 0.0), center, 5.0));
        assert!(!point_within_radius(Vec2::new(3.0, 4.0), center, 5.0));
    }

    #[test]
    fn test_frame_scale() {
        assert_eq!(frame_scale(NOMINAL_FRAME_SECS), 1.0);
        assert_eq!(frame_scale(0.0), 0.0);
        assert_eq!(frame_scale(-1.0), 0.0);
        assert_eq!(frame_scale(f32::NAN), 0.0);
        assert_eq!(frame_scale(10.0), MAX_FRAME_SCALE);
    }

    #[test]
    fn test_oscillate_flips_at_boundary() {
        assert_eq!(oscillate(0.5, 1.0, 0.25, 0.0, 1.0), (0.75, 1.0));
        assert_eq!(oscillate(0.75, 1.0, 0.25, 0.0, 1.0), (1.0, -1.0));
        // Overshoot clamps instead of bouncing back
        assert_eq!(oscillate(0.9, 1.0, 0.25, 0.0, 1.0), (1.0, -1.0));
        assert_eq!(oscillate(0.1, -1.0, 0.25, 0.0, 1.0), (0.0, 1.0));
    }

    #[test]
    fn test_aabb_center_round_trip() {
        let a = Aabb::from_center(Vec2::new(100.0, 50.0), Vec2::new(40.0, 20.0));
        assert_eq!(a.min, Vec2::new(80.0, 40.0));
        assert_eq!(a.center(), Vec2::new(100.0, 50.0));
        assert_eq!(a.with_center(Vec2::ZERO).min, Vec2::new(-20.0, -10.0));
    }
}
