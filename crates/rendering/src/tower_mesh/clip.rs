//! Vertical half-space clipping for the cutaway view.
//!
//! The clip plane always contains the tower's vertical axis, so it reduces to
//! a 2D half-plane test on (x, z). Geometry on the side the normal points to
//! is removed.

use bevy::prelude::*;

const EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    /// Unit normal in the XZ plane, pointing at the removed half.
    pub normal: Vec2,
}

impl ClipPlane {
    /// Plane removing the half that faces `toward` (x, z). Falls back to +Z
    /// for a zero vector.
    pub fn facing(toward: Vec2) -> Self {
        Self {
            normal: toward.try_normalize().unwrap_or(Vec2::Y),
        }
    }

    fn distance(&self, p: Vec2) -> f32 {
        self.normal.dot(p)
    }

    pub fn keeps(&self, p: Vec2) -> bool {
        self.distance(p) <= EPSILON
    }

    /// Sutherland–Hodgman against a single half-plane. The result of
    /// clipping a convex polygon is convex and keeps its winding.
    pub fn clip_polygon(&self, polygon: &[Vec2]) -> Vec<Vec2> {
        let mut out = Vec::with_capacity(polygon.len() + 2);
        let n = polygon.len();
        for k in 0..n {
            let a = polygon[k];
            let b = polygon[(k + 1) % n];
            let da = self.distance(a);
            let db = self.distance(b);
            if da <= EPSILON {
                out.push(a);
            }
            if (da < -EPSILON && db > EPSILON) || (da > EPSILON && db < -EPSILON) {
                let t = da / (da - db);
                out.push(a.lerp(b, t));
            }
        }
        if out.len() < 3 {
            out.clear();
        }
        out
    }

    /// Clips a 3D segment by its (x, z) projection. `None` when the whole
    /// segment lies in the removed half.
    pub fn clip_segment(&self, a: Vec3, b: Vec3) -> Option<(Vec3, Vec3)> {
        let da = self.distance(Vec2::new(a.x, a.z));
        let db = self.distance(Vec2::new(b.x, b.z));
        match (da <= EPSILON, db <= EPSILON) {
            (true, true) => Some((a, b)),
            (false, false) => None,
            (true, false) => Some((a, a.lerp(b, da / (da - db)))),
            (false, true) => Some((a.lerp(b, da / (da - db)), b)),
        }
    }
}

/// Applies an optional clip to a polygon.
pub fn clip_polygon(clip: Option<&ClipPlane>, polygon: Vec<Vec2>) -> Vec<Vec2> {
    match clip {
        Some(plane) => plane.clip_polygon(&polygon),
        None => polygon,
    }
}

/// Applies an optional clip to a segment.
pub fn clip_segment(clip: Option<&ClipPlane>, a: Vec3, b: Vec3) -> Option<(Vec3, Vec3)> {
    match clip {
        Some(plane) => plane.clip_segment(a, b),
        None => Some((a, b)),
    }
}
