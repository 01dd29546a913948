//! Column and bracing placement (Structural Topology Renderer).
//!
//! Each floor gets exactly one column style, picked by priority from the
//! resolved [`StructuralTopology`]:
//!
//! 1. **Diagrid**: diagonal members whose tilt alternates with anchor parity
//! 2. **Mega columns**: large-radius verticals
//! 3. **Standard**: ordinary verticals
//!
//! Outrigger belt trusses are an overlay on top of whichever style is active:
//! every [`OUTRIGGER_FLOOR_INTERVAL`]th floor gets a horizontal ring around the
//! perimeter when the topology has outriggers.
//!
//! Members are plain data in model space; meshing happens in
//! [`crate::tower_mesh`].

use bevy::prelude::*;

use simulation::building_plan::BuildingPlan;
use simulation::config::{FLOOR_HEIGHT, FLOOR_PITCH, FOOTPRINT_RADIUS, OUTRIGGER_FLOOR_INTERVAL};
use simulation::style_resolver::StructuralTopology;
use simulation::tower_geometry::{column_anchors, profile_polygon, FloorDescriptor};

/// Anchors sit this fraction of the floor radius out from the axis.
pub const COLUMN_INSET: f32 = 0.85;
/// Belt trusses wrap just outside the facade.
pub const BELT_OUTSET: f32 = 1.03;

pub const STANDARD_COLUMN_RADIUS: f32 = 0.05;
pub const MEGA_COLUMN_RADIUS: f32 = 0.14;
pub const DIAGRID_RADIUS: f32 = 0.045;
pub const DIAGRID_NODE_RADIUS: f32 = 0.08;
pub const BELT_TRUSS_RADIUS: f32 = 0.06;

/// Half-height of the collar marking a diagrid node.
const NODE_HALF_HEIGHT: f32 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnStyle {
    Diagrid,
    MegaColumn,
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Diagrid,
    DiagridNode,
    MegaColumn,
    Column,
    BeltTruss,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructuralMember {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
    pub kind: MemberKind,
    pub floor: usize,
}

/// Highest-priority column style for a topology.
pub fn column_style(topology: &StructuralTopology) -> ColumnStyle {
    if topology.has_diagrid {
        ColumnStyle::Diagrid
    } else if topology.has_thick_columns {
        ColumnStyle::MegaColumn
    } else {
        ColumnStyle::Standard
    }
}

fn anchors_for(plan: &BuildingPlan, floor: &FloorDescriptor) -> Vec<Vec2> {
    column_anchors(
        plan.shape,
        FOOTPRINT_RADIUS * floor.scale_factor,
        floor.rotation_radians,
        COLUMN_INSET,
    )
}

fn lift(p: Vec2, y: f32) -> Vec3 {
    Vec3::new(p.x, y, p.y)
}

/// Members for one floor, spanning from its base to the next floor's base.
pub fn floor_members(plan: &BuildingPlan, index: usize) -> Vec<StructuralMember> {
    let Some(floor) = plan.floors.get(index) else {
        return Vec::new();
    };
    let upper = plan.floors.get(index + 1).unwrap_or(floor);
    let y0 = floor.vertical_offset;
    let y1 = y0 + FLOOR_PITCH;

    let lower_anchors = anchors_for(plan, floor);
    let upper_anchors = anchors_for(plan, upper);
    let n = lower_anchors.len();
    let mut members = Vec::with_capacity(n * 2);

    match column_style(&plan.topology) {
        ColumnStyle::Diagrid => {
            for (k, anchor) in lower_anchors.iter().enumerate() {
                // Even anchors lean toward the next anchor, odd ones toward
                // the previous, so neighbours cross into a diamond grid.
                let target = if k % 2 == 0 { (k + 1) % n } else { (k + n - 1) % n };
                members.push(StructuralMember {
                    start: lift(*anchor, y0),
                    end: lift(upper_anchors[target], y1),
                    radius: DIAGRID_RADIUS,
                    kind: MemberKind::Diagrid,
                    floor: index,
                });
                if floor.is_diagrid_node {
                    members.push(StructuralMember {
                        start: lift(*anchor, y0 - NODE_HALF_HEIGHT),
                        end: lift(*anchor, y0 + NODE_HALF_HEIGHT),
                        radius: DIAGRID_NODE_RADIUS,
                        kind: MemberKind::DiagridNode,
                        floor: index,
                    });
                }
            }
        }
        style @ (ColumnStyle::MegaColumn | ColumnStyle::Standard) => {
            let (radius, kind) = if style == ColumnStyle::MegaColumn {
                (MEGA_COLUMN_RADIUS, MemberKind::MegaColumn)
            } else {
                (STANDARD_COLUMN_RADIUS, MemberKind::Column)
            };
            for anchor in &lower_anchors {
                members.push(StructuralMember {
                    start: lift(*anchor, y0),
                    end: lift(*anchor, y1),
                    radius,
                    kind,
                    floor: index,
                });
            }
        }
    }

    if plan.topology.has_outriggers && index % OUTRIGGER_FLOOR_INTERVAL == 0 {
        let ring = profile_polygon(
            plan.shape,
            FOOTPRINT_RADIUS * floor.scale_factor * BELT_OUTSET,
            floor.rotation_radians,
        );
        let y = y0 + FLOOR_HEIGHT * 0.5;
        for (k, a) in ring.iter().enumerate() {
            let b = ring[(k + 1) % ring.len()];
            members.push(StructuralMember {
                start: lift(*a, y),
                end: lift(b, y),
                radius: BELT_TRUSS_RADIUS,
                kind: MemberKind::BeltTruss,
                floor: index,
            });
        }
    }

    members
}

/// Members for the whole tower.
pub fn place_members(plan: &BuildingPlan) -> Vec<StructuralMember> {
    (0..plan.floors.len())
        .flat_map(|i| floor_members(plan, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::assessment::{Archetype, RiskAssessmentResult};
    use std::collections::HashSet;

    fn plan(structure: &str, archetype: Archetype) -> BuildingPlan {
        let mut result = RiskAssessmentResult::demo();
        result.recommendations.structure = structure.to_string();
        result.geometry_params.archetype = archetype;
        BuildingPlan::from_assessment(&result)
    }

    fn vertical_kinds(members: &[StructuralMember]) -> HashSet<MemberKind> {
        members
            .iter()
            .filter(|m| !matches!(m.kind, MemberKind::BeltTruss | MemberKind::DiagridNode))
            .map(|m| m.kind)
            .collect()
    }

    #[test]
    fn test_style_priority() {
        let all = StructuralTopology {
            has_diagrid: true,
            has_thick_columns: true,
            has_outriggers: true,
        };
        assert_eq!(column_style(&all), ColumnStyle::Diagrid);
        let thick = StructuralTopology {
            has_thick_columns: true,
            ..Default::default()
        };
        assert_eq!(column_style(&thick), ColumnStyle::MegaColumn);
        assert_eq!(column_style(&StructuralTopology::default()), ColumnStyle::Standard);
    }

    #[test]
    fn test_each_floor_has_exactly_one_column_style() {
        let p = plan("Helical Diagrid on Mega Tube", Archetype::Cylinder);
        for i in 0..p.floors.len() {
            let kinds = vertical_kinds(&floor_members(&p, i));
            assert_eq!(kinds.len(), 1, "floor {i} mixes column styles: {kinds:?}");
            assert!(kinds.contains(&MemberKind::Diagrid));
        }
    }

    #[test]
    fn test_mega_columns_are_thicker() {
        let mega = plan("Bundled Tube", Archetype::Box);
        let standard = plan("Shear Wall Frame", Archetype::Box);
        let m = floor_members(&mega, 3);
        let s = floor_members(&standard, 3);
        assert!(m.iter().all(|c| c.kind == MemberKind::MegaColumn));
        assert!(s.iter().all(|c| c.kind == MemberKind::Column));
        assert!(m[0].radius > s[0].radius);
        // Vertical: same x/z at both ends.
        assert!((m[0].start.x - m[0].end.x).abs() < 1e-6);
        assert!((m[0].start.z - m[0].end.z).abs() < 1e-6);
    }

    #[test]
    fn test_anchor_counts_follow_archetype() {
        for archetype in [Archetype::Cylinder, Archetype::Triangle, Archetype::Box, Archetype::Hexagon] {
            let p = plan("Shear Wall Frame", archetype);
            assert_eq!(floor_members(&p, 0).len(), archetype.corner_count());
        }
    }

    #[test]
    fn test_diagrid_tilt_alternates_by_parity() {
        let p = plan("Diagrid Exoskeleton", Archetype::Pyramid);
        let members: Vec<_> = floor_members(&p, 1)
            .into_iter()
            .filter(|m| m.kind == MemberKind::Diagrid)
            .collect();
        assert_eq!(members.len(), 4);

        let sweep = |m: &StructuralMember| {
            let a = Vec2::new(m.start.x, m.start.z);
            let b = Vec2::new(m.end.x, m.end.z);
            a.perp_dot(b).signum()
        };
        for pair in members.windows(2) {
            assert_ne!(sweep(&pair[0]), sweep(&pair[1]), "neighbouring diagonals must lean opposite ways");
        }
    }

    #[test]
    fn test_diagrid_nodes_on_node_floors_only() {
        let p = plan("Diagrid Exoskeleton", Archetype::Cylinder);
        for i in 0..p.floors.len() {
            let nodes = floor_members(&p, i)
                .iter()
                .filter(|m| m.kind == MemberKind::DiagridNode)
                .count();
            let expected = if p.floors[i].is_diagrid_node { 8 } else { 0 };
            assert_eq!(nodes, expected, "floor {i}");
        }
    }

    #[test]
    fn test_outrigger_floors() {
        let p = plan("Diagrid Exoskeleton with Outrigger Belts", Archetype::Cylinder);
        let belt_floors: HashSet<usize> = place_members(&p)
            .iter()
            .filter(|m| m.kind == MemberKind::BeltTruss)
            .map(|m| m.floor)
            .collect();
        assert_eq!(belt_floors, HashSet::from([0, 10, 20]));

        let without = plan("Diagrid Exoskeleton", Archetype::Cylinder);
        assert!(place_members(&without).iter().all(|m| m.kind != MemberKind::BeltTruss));
    }

    #[test]
    fn test_outriggers_overlay_any_column_style() {
        let p = plan("Mega Tube with Outriggers", Archetype::Box);
        let members = floor_members(&p, 10);
        assert!(members.iter().any(|m| m.kind == MemberKind::MegaColumn));
        assert_eq!(
            members.iter().filter(|m| m.kind == MemberKind::BeltTruss).count(),
            4
        );
    }

    #[test]
    fn test_out_of_range_floor_is_empty() {
        let p = plan("Diagrid", Archetype::Box);
        assert!(floor_members(&p, 999).is_empty());
    }
}
