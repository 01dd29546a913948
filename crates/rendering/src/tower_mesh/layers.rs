use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use simulation::building_plan::BuildingPlan;
use simulation::config::{
    FLOOR_HEIGHT, FOOTPRINT_RADIUS, INSULATION_FLOOR_INTERVAL, SLAB_THICKNESS,
};
use simulation::tower_geometry::{profile_polygon, FloorDescriptor};

use super::clip::{clip_polygon, clip_segment, ClipPlane};
use super::mesh_data::TowerMeshData;
use crate::structure_members::{place_members, MemberKind};

pub const CORE_RIB_COUNT: usize = 4;
/// Radius of the inner material ring relative to the floor outline.
pub const INNER_RING_SCALE: f32 = 0.55;
/// Radius of the insulation / damping ring relative to the floor outline.
pub const INSULATION_RING_SCALE: f32 = 0.7;

const CORE_RIB_INNER: f32 = 0.08;
const CORE_RIB_OUTER: f32 = 0.5;
const MECHANICAL_SCALE: f32 = 0.97;
const BALCONY_SCALE: f32 = 1.12;
const BALCONY_THICKNESS: f32 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TowerLayer {
    Slab,
    Facade,
    Columns,
    Outriggers,
    MechanicalBlock,
    Balcony,
    CoreRibs,
    InnerRing,
    InsulationRing,
}

impl TowerLayer {
    pub const ALL: [TowerLayer; 9] = [
        TowerLayer::Slab,
        TowerLayer::Facade,
        TowerLayer::Columns,
        TowerLayer::Outriggers,
        TowerLayer::MechanicalBlock,
        TowerLayer::Balcony,
        TowerLayer::CoreRibs,
        TowerLayer::InnerRing,
        TowerLayer::InsulationRing,
    ];

    /// Layers that only exist while the tower is cut open.
    pub fn is_internal(self) -> bool {
        matches!(
            self,
            TowerLayer::CoreRibs | TowerLayer::InnerRing | TowerLayer::InsulationRing
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

fn outline(plan: &BuildingPlan, floor: &FloorDescriptor, scale: f32) -> Vec<Vec2> {
    profile_polygon(
        plan.shape,
        FOOTPRINT_RADIUS * floor.scale_factor * scale,
        floor.rotation_radians,
    )
}

/// Walls along every edge of `polygon` that survives the clip. The cut edge
/// itself gets no wall, which is what leaves the ring open.
fn add_ring(data: &mut TowerMeshData, polygon: &[Vec2], y0: f32, y1: f32, clip: Option<&ClipPlane>) {
    for (k, a) in polygon.iter().enumerate() {
        let b = polygon[(k + 1) % polygon.len()];
        let a3 = Vec3::new(a.x, 0.0, a.y);
        let b3 = Vec3::new(b.x, 0.0, b.y);
        if let Some((ca, cb)) = clip_segment(clip, a3, b3) {
            data.add_wall(Vec2::new(ca.x, ca.z), Vec2::new(cb.x, cb.z), y0, y1);
        }
    }
}

fn add_floor_shell(
    layers: &mut [TowerMeshData],
    plan: &BuildingPlan,
    floor: &FloorDescriptor,
    clip: Option<&ClipPlane>,
) {
    let y0 = floor.vertical_offset;
    let y1 = y0 + FLOOR_HEIGHT;
    let shell = outline(plan, floor, 1.0);

    let slab = clip_polygon(clip, shell.clone());
    layers[TowerLayer::Slab.index()].add_prism(&slab, y0, y0 + SLAB_THICKNESS);

    add_ring(
        &mut layers[TowerLayer::Facade.index()],
        &shell,
        y0 + SLAB_THICKNESS,
        y1,
        clip,
    );

    if floor.is_mechanical_floor {
        let block = clip_polygon(clip, outline(plan, floor, MECHANICAL_SCALE));
        layers[TowerLayer::MechanicalBlock.index()].add_prism(&block, y0 + SLAB_THICKNESS, y1);
    }

    // Balconies would hide the exposed section, so the cutaway drops them.
    if floor.is_balcony_floor && clip.is_none() {
        let deck = outline(plan, floor, BALCONY_SCALE);
        layers[TowerLayer::Balcony.index()].add_prism(&deck, y0, y0 + BALCONY_THICKNESS);
    }
}

fn add_floor_interior(
    layers: &mut [TowerMeshData],
    plan: &BuildingPlan,
    floor: &FloorDescriptor,
    clip: Option<&ClipPlane>,
) {
    let y0 = floor.vertical_offset + SLAB_THICKNESS;
    let y1 = floor.vertical_offset + FLOOR_HEIGHT;
    let radius = FOOTPRINT_RADIUS * floor.scale_factor;

    for k in 0..CORE_RIB_COUNT {
        let angle = floor.rotation_radians + FRAC_PI_2 * k as f32;
        let dir = Vec2::from_angle(angle);
        let inner = dir * radius * CORE_RIB_INNER;
        let outer = dir * radius * CORE_RIB_OUTER;
        if let Some((a, b)) = clip_segment(
            clip,
            Vec3::new(inner.x, 0.0, inner.y),
            Vec3::new(outer.x, 0.0, outer.y),
        ) {
            layers[TowerLayer::CoreRibs.index()].add_wall(
                Vec2::new(a.x, a.z),
                Vec2::new(b.x, b.z),
                y0,
                y1,
            );
        }
    }

    add_ring(
        &mut layers[TowerLayer::InnerRing.index()],
        &outline(plan, floor, INNER_RING_SCALE),
        y0,
        y1,
        clip,
    );

    if floor.index % INSULATION_FLOOR_INTERVAL == 0 {
        add_ring(
            &mut layers[TowerLayer::InsulationRing.index()],
            &outline(plan, floor, INSULATION_RING_SCALE),
            y0,
            y1,
            clip,
        );
    }
}

/// Accumulates vertex data for every layer, including empty ones.
pub(super) fn accumulate_layers(
    plan: &BuildingPlan,
    clip: Option<&ClipPlane>,
) -> Vec<(TowerLayer, TowerMeshData)> {
    let mut layers: Vec<TowerMeshData> = TowerLayer::ALL
        .iter()
        .map(|_| TowerMeshData::new())
        .collect();

    for floor in &plan.floors {
        add_floor_shell(&mut layers, plan, floor, clip);
        if clip.is_some() {
            add_floor_interior(&mut layers, plan, floor, clip);
        }
    }

    for member in place_members(plan) {
        let Some((start, end)) = clip_segment(clip, member.start, member.end) else {
            continue;
        };
        let layer = match member.kind {
            MemberKind::BeltTruss => TowerLayer::Outriggers,
            _ => TowerLayer::Columns,
        };
        layers[layer.index()].add_strut(start, end, member.radius);
    }

    TowerLayer::ALL.into_iter().zip(layers).collect()
}

/// Builds one mesh per non-empty layer.
///
/// `clip` is `Some` exactly when the cutaway view is active: every solid is
/// cut by the plane and the internal layers (core ribs, inner ring,
/// insulation ring) are generated.
pub fn build_tower_layers(plan: &BuildingPlan, clip: Option<ClipPlane>) -> Vec<(TowerLayer, Mesh)> {
    accumulate_layers(plan, clip.as_ref())
        .into_iter()
        .filter(|(_, data)| !data.is_empty())
        .map(|(layer, data)| (layer, data.into_mesh()))
        .collect()
}
