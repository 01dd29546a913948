//! Unit tests for tower layer meshes.

use bevy::prelude::*;

use simulation::assessment::{Archetype, RiskAssessmentResult};
use simulation::building_plan::BuildingPlan;
use simulation::config::{FLOOR_PITCH, INSULATION_FLOOR_INTERVAL};

use super::layers::accumulate_layers;
use super::*;

fn demo_plan() -> BuildingPlan {
    BuildingPlan::from_assessment(&RiskAssessmentResult::demo())
}

fn layer_set(meshes: &[(TowerLayer, Mesh)]) -> Vec<TowerLayer> {
    meshes.iter().map(|(layer, _)| *layer).collect()
}

#[test]
fn test_exterior_layers_without_cutaway() {
    let meshes = build_tower_layers(&demo_plan(), None);
    let layers = layer_set(&meshes);
    for expected in [
        TowerLayer::Slab,
        TowerLayer::Facade,
        TowerLayer::Columns,
        TowerLayer::Outriggers,
        TowerLayer::MechanicalBlock,
        TowerLayer::Balcony,
    ] {
        assert!(layers.contains(&expected), "missing {expected:?}");
    }
    assert!(
        layers.iter().all(|l| !l.is_internal()),
        "internal layers only appear in the cutaway"
    );
    for (layer, mesh) in &meshes {
        assert!(mesh.count_vertices() > 0, "{layer:?} mesh should have vertices");
        assert!(mesh.indices().is_some(), "{layer:?} mesh should be indexed");
    }
}

#[test]
fn test_cutaway_adds_internal_layers_and_drops_balconies() {
    let clip = ClipPlane::facing(Vec2::new(0.0, 1.0));
    let layers = layer_set(&build_tower_layers(&demo_plan(), Some(clip)));
    assert!(layers.contains(&TowerLayer::CoreRibs));
    assert!(layers.contains(&TowerLayer::InnerRing));
    assert!(layers.contains(&TowerLayer::InsulationRing));
    assert!(!layers.contains(&TowerLayer::Balcony));
    assert!(layers.contains(&TowerLayer::MechanicalBlock));
}

#[test]
fn test_cutaway_removes_near_half() {
    let clip = ClipPlane::facing(Vec2::new(1.0, 1.0));
    for archetype in [Archetype::Cylinder, Archetype::Box, Archetype::Triangle] {
        let mut result = RiskAssessmentResult::demo();
        result.geometry_params.archetype = archetype;
        let plan = BuildingPlan::from_assessment(&result);

        for (layer, data) in accumulate_layers(&plan, Some(&clip)) {
            // Struts keep their radius around a clipped centreline.
            let tolerance = match layer {
                TowerLayer::Columns | TowerLayer::Outriggers => 0.15,
                _ => 1e-4,
            };
            for p in data.positions() {
                let d = clip.normal.dot(Vec2::new(p[0], p[2]));
                assert!(
                    d <= tolerance,
                    "{archetype:?} {layer:?} vertex {p:?} lies in the removed half"
                );
            }
        }
    }
}

#[test]
fn test_insulation_ring_every_third_floor() {
    let clip = ClipPlane::facing(Vec2::X);
    let layers = accumulate_layers(&demo_plan(), Some(&clip));
    let (_, insulation) = layers
        .iter()
        .find(|(l, _)| *l == TowerLayer::InsulationRing)
        .unwrap();
    assert!(!insulation.is_empty());
    for p in insulation.positions() {
        let floor = (p[1] / FLOOR_PITCH).floor() as usize;
        assert_eq!(
            floor % INSULATION_FLOOR_INTERVAL,
            0,
            "insulation vertex at y={} belongs to floor {floor}",
            p[1]
        );
    }
}

#[test]
fn test_plain_tower_has_no_outriggers() {
    let mut result = RiskAssessmentResult::demo();
    result.recommendations.structure = "Reinforced Core".to_string();
    let plan = BuildingPlan::from_assessment(&result);
    let layers = layer_set(&build_tower_layers(&plan, None));
    assert!(!layers.contains(&TowerLayer::Outriggers));
    assert!(layers.contains(&TowerLayer::Columns));
}

#[test]
fn test_layers_are_deterministic() {
    let plan = demo_plan();
    let a: Vec<usize> = build_tower_layers(&plan, None)
        .iter()
        .map(|(_, m)| m.count_vertices())
        .collect();
    let b: Vec<usize> = build_tower_layers(&plan, None)
        .iter()
        .map(|(_, m)| m.count_vertices())
        .collect();
    assert_eq!(a, b);
}
