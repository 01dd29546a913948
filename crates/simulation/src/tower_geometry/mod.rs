//! Floor stack generation.
//!
//! [`generate_floors`] is a pure function of [`GeometryParams`]: the same
//! parameters always produce the same descriptors, so a parameter change
//! simply regenerates the whole stack instead of patching it.

pub mod profile;

pub use profile::{column_anchors, profile_polygon, ProfileShape};

use std::f32::consts::PI;

use crate::assessment::GeometryParams;
use crate::config::{
    BALCONY_FLOOR_INTERVAL, DIAGRID_NODE_INTERVAL, FLOOR_COUNT, FLOOR_HEIGHT, FLOOR_STACKING,
    MECHANICAL_FLOOR_INTERVAL,
};

/// Placement and flags for one floor of the tower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorDescriptor {
    pub index: usize,
    /// Height of the floor base above the ground plane.
    pub vertical_offset: f32,
    /// Horizontal scale relative to the ground floor, in [taper, 1].
    pub scale_factor: f32,
    /// Accumulated twist about the vertical axis.
    pub rotation_radians: f32,
    pub is_mechanical_floor: bool,
    pub is_balcony_floor: bool,
    pub is_diagrid_node: bool,
}

impl FloorDescriptor {
    /// World-space y of the floor's vertical midpoint.
    pub fn mid_height(&self) -> f32 {
        self.vertical_offset + FLOOR_HEIGHT * 0.5
    }
}

/// Builds the descriptor for floor `index` of a `count`-floor stack.
pub fn floor_descriptor(params: &GeometryParams, index: usize, count: usize) -> FloorDescriptor {
    let progress = if count == 0 {
        0.0
    } else {
        index as f32 / count as f32
    };
    let twist_total = params.twist * PI / 180.0;

    FloorDescriptor {
        index,
        vertical_offset: index as f32 * FLOOR_HEIGHT * FLOOR_STACKING,
        scale_factor: 1.0 - (1.0 - params.taper) * progress,
        rotation_radians: twist_total * progress,
        is_mechanical_floor: index > 0 && index % MECHANICAL_FLOOR_INTERVAL == 0,
        is_balcony_floor: index > 0 && index % BALCONY_FLOOR_INTERVAL == 0,
        is_diagrid_node: index % DIAGRID_NODE_INTERVAL == 0,
    }
}

/// Generates the full floor stack. Out-of-range parameters are sanitized
/// first, so the result is always a valid tower.
pub fn generate_floors(params: &GeometryParams) -> Vec<FloorDescriptor> {
    let params = params.sanitized();
    (0..FLOOR_COUNT)
        .map(|i| floor_descriptor(&params, i, FLOOR_COUNT))
        .collect()
}

/// Height of the top of the last floor.
pub fn stack_height(floors: &[FloorDescriptor]) -> f32 {
    floors
        .last()
        .map(|f| f.vertical_offset + FLOOR_HEIGHT)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Archetype;

    fn params(taper: f32, twist: f32) -> GeometryParams {
        GeometryParams {
            archetype: Archetype::Cylinder,
            height: 300.0,
            taper,
            twist,
            segments: Some(30),
        }
    }

    #[test]
    fn test_fixed_floor_count() {
        assert_eq!(generate_floors(&params(0.6, 90.0)).len(), FLOOR_COUNT);
        // The segment hint does not change the stack.
        let mut hinted = params(0.6, 90.0);
        hinted.segments = Some(80);
        assert_eq!(generate_floors(&hinted).len(), FLOOR_COUNT);
    }

    #[test]
    fn test_ground_floor_is_untransformed() {
        for (taper, twist) in [(0.6, 90.0), (1.0, 0.0), (0.2, -45.0), (0.9, 720.0)] {
            let floors = generate_floors(&params(taper, twist));
            assert_eq!(floors[0].scale_factor, 1.0);
            assert_eq!(floors[0].rotation_radians, 0.0);
            assert_eq!(floors[0].vertical_offset, 0.0);
        }
    }

    #[test]
    fn test_reference_tower_top_floor() {
        let floors = generate_floors(&params(0.6, 90.0));
        let top = &floors[29];
        assert!(
            (top.scale_factor - 0.61333).abs() < 1e-3,
            "scale was {}",
            top.scale_factor
        );
        assert!(
            (top.rotation_radians - 1.5184).abs() < 1e-3,
            "rotation was {}",
            top.rotation_radians
        );
    }

    #[test]
    fn test_taper_is_non_increasing() {
        let floors = generate_floors(&params(0.4, 0.0));
        for pair in floors.windows(2) {
            assert!(pair[1].scale_factor <= pair[0].scale_factor);
        }
        assert!(floors.iter().all(|f| f.scale_factor >= 0.4));
    }

    #[test]
    fn test_no_taper_keeps_unit_scale() {
        let floors = generate_floors(&params(1.0, 30.0));
        assert!(floors.iter().all(|f| f.scale_factor == 1.0));
    }

    #[test]
    fn test_twist_is_linear() {
        let floors = generate_floors(&params(1.0, 60.0));
        let step = floors[1].rotation_radians;
        assert!(step > 0.0);
        for f in &floors {
            let expected = step * f.index as f32;
            assert!((f.rotation_radians - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_vertical_offsets_stack_evenly() {
        let floors = generate_floors(&params(0.6, 90.0));
        for pair in floors.windows(2) {
            let gap = pair[1].vertical_offset - pair[0].vertical_offset;
            assert!((gap - FLOOR_HEIGHT * FLOOR_STACKING).abs() < 1e-5);
        }
    }

    #[test]
    fn test_floor_flags() {
        let floors = generate_floors(&params(0.6, 90.0));
        let mechanical: Vec<usize> = floors
            .iter()
            .filter(|f| f.is_mechanical_floor)
            .map(|f| f.index)
            .collect();
        assert_eq!(mechanical, vec![15]);

        let balconies: Vec<usize> = floors
            .iter()
            .filter(|f| f.is_balcony_floor)
            .map(|f| f.index)
            .collect();
        assert_eq!(balconies, vec![5, 10, 15, 20, 25]);

        assert!(floors[0].is_diagrid_node, "floor 0 is a diagrid node");
        assert!(!floors[0].is_balcony_floor);
        assert!(!floors[0].is_mechanical_floor);
        assert_eq!(floors.iter().filter(|f| f.is_diagrid_node).count(), 8);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let p = params(0.75, 33.0);
        assert_eq!(generate_floors(&p), generate_floors(&p));
    }

    #[test]
    fn test_invalid_taper_is_sanitized() {
        let floors = generate_floors(&params(-2.0, f32::NAN));
        assert!(floors.iter().all(|f| f.scale_factor == 1.0));
        assert!(floors.iter().all(|f| f.rotation_radians == 0.0));
    }

    #[test]
    fn test_stack_height() {
        let floors = generate_floors(&params(1.0, 0.0));
        let expected = 29.0 * FLOOR_HEIGHT * FLOOR_STACKING + FLOOR_HEIGHT;
        assert!((stack_height(&floors) - expected).abs() < 1e-4);
        assert_eq!(stack_height(&[]), 0.0);
    }
}
