//! Cross-section profiles.
//!
//! Every layer of a floor (slab, facade, inner ring, insulation ring,
//! mechanical block) is extruded from the same profile so the tower reads as
//! one shape. Polygons live in the XZ plane, wound counter-clockwise when
//! viewed from above, with unit "radius" before the floor scale is applied.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use bevy::math::Vec2;

use crate::assessment::Archetype;

/// Segment count used to approximate the circular profile.
pub const CIRCLE_SEGMENTS: usize = 32;

/// Number of radial column positions on a circular profile.
pub const CIRCULAR_COLUMN_COUNT: usize = 8;

/// Footprint depth of the rectangular profile relative to its width.
pub const RECTANGLE_ASPECT: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileShape {
    Circular,
    Hexagonal,
    Triangular,
    SquarePyramidal,
    /// Triangle turned half a revolution relative to [`ProfileShape::Triangular`].
    TriangularPrism,
    Rectangular,
}

impl Archetype {
    pub fn profile(self) -> ProfileShape {
        match self {
            Archetype::Cylinder => ProfileShape::Circular,
            Archetype::Hexagon => ProfileShape::Hexagonal,
            Archetype::Triangle => ProfileShape::Triangular,
            Archetype::Pyramid => ProfileShape::SquarePyramidal,
            Archetype::Prism => ProfileShape::TriangularPrism,
            Archetype::Box => ProfileShape::Rectangular,
        }
    }

    /// Number of corner columns for polygonal profiles; radial positions for
    /// the circular one.
    pub fn corner_count(self) -> usize {
        self.profile().column_count()
    }
}

impl ProfileShape {
    pub fn column_count(self) -> usize {
        match self {
            ProfileShape::Circular => CIRCULAR_COLUMN_COUNT,
            _ => self.corners().len(),
        }
    }

    fn corners(self) -> Vec<Vec2> {
        match self {
            ProfileShape::Circular => regular_polygon(CIRCLE_SEGMENTS, 0.0),
            ProfileShape::Hexagonal => regular_polygon(6, 0.0),
            ProfileShape::Triangular => regular_polygon(3, FRAC_PI_2),
            ProfileShape::SquarePyramidal => regular_polygon(4, FRAC_PI_4),
            ProfileShape::TriangularPrism => regular_polygon(3, FRAC_PI_2 + PI),
            ProfileShape::Rectangular => vec![
                Vec2::new(1.0, RECTANGLE_ASPECT),
                Vec2::new(-1.0, RECTANGLE_ASPECT),
                Vec2::new(-1.0, -RECTANGLE_ASPECT),
                Vec2::new(1.0, -RECTANGLE_ASPECT),
            ],
        }
    }
}

fn regular_polygon(sides: usize, phase: f32) -> Vec<Vec2> {
    (0..sides)
        .map(|k| {
            let angle = phase + TAU * k as f32 / sides as f32;
            Vec2::new(angle.cos(), angle.sin())
        })
        .collect()
}

/// Outline of `shape` scaled by `radius` and turned by `rotation` radians.
///
/// The returned vertices are (x, z) pairs; positive rotation turns the
/// outline counter-clockwise when viewed from +Y.
pub fn profile_polygon(shape: ProfileShape, radius: f32, rotation: f32) -> Vec<Vec2> {
    let turn = Vec2::from_angle(rotation);
    shape
        .corners()
        .into_iter()
        .map(|p| turn.rotate(p * radius))
        .collect()
}

/// Positions where vertical members meet a floor.
///
/// Circular profiles get evenly spaced radial anchors; polygonal profiles put
/// one anchor at each corner. `inset` pulls anchors toward the centre so
/// columns sit just inside the facade.
pub fn column_anchors(shape: ProfileShape, radius: f32, rotation: f32, inset: f32) -> Vec<Vec2> {
    match shape {
        ProfileShape::Circular => {
            let ring = regular_polygon(CIRCULAR_COLUMN_COUNT, 0.0);
            let turn = Vec2::from_angle(rotation);
            ring.into_iter()
                .map(|p| turn.rotate(p * radius * inset))
                .collect()
        }
        _ => profile_polygon(shape, radius * inset, rotation),
    }
}

/// Signed area of a polygon in the XZ plane. Positive for counter-clockwise
/// winding.
pub fn signed_area(polygon: &[Vec2]) -> f32 {
    let n = polygon.len();
    (0..n)
        .map(|i| polygon[i].perp_dot(polygon[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}
