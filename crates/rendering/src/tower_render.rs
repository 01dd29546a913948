//! Spawns the tower entity tree and rebuilds it when its inputs change.
//!
//! The tower is a [`TowerRoot`] entity (carrying the hazard pose) with one
//! child per [`TowerLayer`] mesh. It is rebuilt from scratch, never patched,
//! when:
//!
//! - the [`BuildingPlan`] is replaced (new assessment),
//! - the cutaway view is toggled,
//! - the camera orbits far enough in cutaway that the cut no longer faces it.

use bevy::prelude::*;
use std::collections::HashMap;

use simulation::building_plan::BuildingPlan;
use simulation::config::{CALLOUT_FLOOR, FLOOR_HEIGHT, FOOTPRINT_RADIUS};
use simulation::hazard_sim::{CutawayMode, HazardController};
use simulation::style_resolver::MaterialStyle;

use crate::camera::OrbitCamera;
use crate::hazard_visuals::tower_rotation;
use crate::tower_mesh::{
    build_tower_layers, ClipPlane, TowerLayer, INNER_RING_SCALE, INSULATION_RING_SCALE,
};

/// Re-cut once the camera has swung this far (cosine of ~12°) from the
/// direction the current cut was made for.
const CLIP_REFRESH_COS: f32 = 0.978;

// =============================================================================
// Components & resources
// =============================================================================

#[derive(Component)]
pub struct TowerRoot;

#[derive(Component, Debug, Clone, Copy)]
pub struct TowerLayerMesh(pub TowerLayer);

/// Material handles for the current plan, plus the emissive each
/// fire-reactive material returns to when the fire is out.
#[derive(Resource, Default)]
pub struct TowerMaterials {
    pub layers: HashMap<TowerLayer, Handle<StandardMaterial>>,
    pub fire_targets: Vec<(Handle<StandardMaterial>, LinearRgba)>,
}

/// The clip plane the current tower meshes were cut with.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct CutawayClip(pub Option<ClipPlane>);

#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub title: &'static str,
    pub detail: String,
    /// Model-space point the label points at.
    pub anchor: Vec3,
}

/// Labels for the exposed layers at the reference floor. Empty unless the
/// cutaway is active.
#[derive(Resource, Default, Debug, Clone)]
pub struct CutawayCallouts(pub Vec<Callout>);

// =============================================================================
// Helpers
// =============================================================================

fn scaled_emissive(style: &MaterialStyle) -> LinearRgba {
    let c = LinearRgba::from(style.emissive_color);
    let k = style.emissive_intensity;
    LinearRgba::new(c.red * k, c.green * k, c.blue * k, 1.0)
}

fn darken(color: Color, factor: f32) -> Color {
    let c = color.to_srgba();
    Color::srgb(c.red * factor, c.green * factor, c.blue * factor)
}

fn layer_material(layer: TowerLayer, style: &MaterialStyle) -> StandardMaterial {
    let emissive = scaled_emissive(style);
    let base = StandardMaterial {
        double_sided: true,
        cull_mode: None,
        ..default()
    };
    match layer {
        TowerLayer::Facade => StandardMaterial {
            base_color: style.base_color,
            perceptual_roughness: style.roughness,
            metallic: style.metalness,
            emissive,
            ..base
        },
        TowerLayer::Slab => StandardMaterial {
            base_color: darken(style.base_color, 0.7),
            perceptual_roughness: 0.8,
            ..base
        },
        TowerLayer::Columns => StandardMaterial {
            base_color: darken(style.base_color, 0.55),
            perceptual_roughness: style.roughness.max(0.2),
            metallic: style.metalness,
            emissive,
            ..base
        },
        TowerLayer::Outriggers => StandardMaterial {
            base_color: Color::srgb(0.85, 0.55, 0.2),
            perceptual_roughness: 0.4,
            metallic: 0.8,
            ..base
        },
        TowerLayer::MechanicalBlock => StandardMaterial {
            base_color: Color::srgb(0.2, 0.22, 0.25),
            perceptual_roughness: 0.7,
            metallic: 0.3,
            ..base
        },
        TowerLayer::Balcony => StandardMaterial {
            base_color: Color::srgb(0.78, 0.8, 0.82),
            perceptual_roughness: 0.6,
            ..base
        },
        TowerLayer::CoreRibs => StandardMaterial {
            base_color: Color::srgb(0.55, 0.6, 0.68),
            perceptual_roughness: 0.3,
            metallic: 0.9,
            ..base
        },
        TowerLayer::InnerRing => StandardMaterial {
            base_color: style.interior_color(),
            perceptual_roughness: style.roughness,
            metallic: style.metalness,
            emissive,
            ..base
        },
        TowerLayer::InsulationRing => StandardMaterial {
            base_color: Color::srgb(0.95, 0.75, 0.3),
            perceptual_roughness: 0.9,
            ..base
        },
    }
}

/// Layers whose emissive follows the fire simulation.
fn is_fire_reactive(layer: TowerLayer) -> bool {
    matches!(
        layer,
        TowerLayer::Facade | TowerLayer::Columns | TowerLayer::InnerRing
    )
}

/// Clip plane facing the camera, expressed in the tower's model space.
pub fn clip_for_view(camera_yaw: f32, model_yaw: f32) -> ClipPlane {
    let relative = camera_yaw - model_yaw;
    ClipPlane::facing(Vec2::new(relative.sin(), relative.cos()))
}

/// Callout anchors sit on the cut face, alternating sides of the axis so the
/// labels do not overlap.
pub fn build_callouts(plan: &BuildingPlan, clip: &ClipPlane) -> Vec<Callout> {
    let Some(floor) = plan.floors.get(CALLOUT_FLOOR) else {
        return Vec::new();
    };
    let along_cut = clip.normal.perp();
    let radius = FOOTPRINT_RADIUS * floor.scale_factor;
    let y = floor.mid_height();
    let at = |side: f32, scale: f32, dy: f32| {
        let p = along_cut * side * radius * scale;
        Vec3::new(p.x, y + dy, p.y)
    };

    vec![
        Callout {
            title: "Core Ribs",
            detail: "Steel-composite spine".to_string(),
            anchor: at(1.0, 0.3, 0.0),
        },
        Callout {
            title: "Inner Layer",
            detail: plan.style.display_name.to_string(),
            anchor: at(-1.0, INNER_RING_SCALE, 0.0),
        },
        Callout {
            title: "Insulation",
            detail: "Viscoelastic damping layer".to_string(),
            anchor: at(1.0, INSULATION_RING_SCALE, FLOOR_HEIGHT * 2.0),
        },
        Callout {
            title: "Facade Skin",
            detail: format!("{} envelope", plan.archetype.label()),
            anchor: at(-1.0, 1.0, FLOOR_HEIGHT * 2.0),
        },
    ]
}

// =============================================================================
// Systems
// =============================================================================

fn rebuild_materials(
    plan: &BuildingPlan,
    materials: &mut Assets<StandardMaterial>,
    tower_materials: &mut TowerMaterials,
) {
    tower_materials.layers.clear();
    tower_materials.fire_targets.clear();
    for layer in TowerLayer::ALL {
        let material = layer_material(layer, &plan.style);
        let emissive = material.emissive;
        let handle = materials.add(material);
        if is_fire_reactive(layer) {
            tower_materials.fire_targets.push((handle.clone(), emissive));
        }
        tower_materials.layers.insert(layer, handle);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn rebuild_tower(
    mut commands: Commands,
    plan: Res<BuildingPlan>,
    cutaway: Res<CutawayMode>,
    controller: Res<HazardController>,
    orbit: Res<OrbitCamera>,
    mut clip_state: ResMut<CutawayClip>,
    mut callouts: ResMut<CutawayCallouts>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut tower_materials: ResMut<TowerMaterials>,
    roots: Query<Entity, With<TowerRoot>>,
) {
    let visuals = &controller.visuals;
    let wanted_clip = cutaway
        .is_active()
        .then(|| clip_for_view(orbit.yaw, visuals.model_yaw + visuals.torsion));

    let clip_stale = match (clip_state.0, wanted_clip) {
        (Some(current), Some(wanted)) => current.normal.dot(wanted.normal) < CLIP_REFRESH_COS,
        (None, None) => false,
        _ => true,
    };
    if !plan.is_changed() && !cutaway.is_changed() && !clip_stale && !roots.is_empty() {
        return;
    }

    if plan.is_changed() || tower_materials.layers.is_empty() {
        rebuild_materials(&plan, &mut materials, &mut tower_materials);
    }

    for entity in &roots {
        commands.entity(entity).despawn_recursive();
    }

    let layers = build_tower_layers(&plan, wanted_clip);
    let layer_count = layers.len();
    commands
        .spawn((
            TowerRoot,
            Transform::from_rotation(tower_rotation(visuals)),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for (layer, mesh) in layers {
                let Some(material) = tower_materials.layers.get(&layer) else {
                    continue;
                };
                parent.spawn((
                    TowerLayerMesh(layer),
                    Mesh3d(meshes.add(mesh)),
                    MeshMaterial3d(material.clone()),
                ));
            }
        });

    clip_state.0 = wanted_clip;
    callouts.0 = wanted_clip
        .map(|clip| build_callouts(&plan, &clip))
        .unwrap_or_default();

    debug!(
        "Rebuilt tower (generation {}, {} layer meshes, cutaway {})",
        plan.generation,
        layer_count,
        wanted_clip.is_some()
    );
}

pub struct TowerRenderPlugin;

impl Plugin for TowerRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TowerMaterials>()
            .init_resource::<CutawayClip>()
            .init_resource::<CutawayCallouts>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::assessment::{LoadAssessment, RiskAssessmentResult};
    use simulation::hazard_sim::ToggleCutaway;
    use std::collections::HashSet;
    use std::f32::consts::FRAC_PI_2;

    fn tower_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<Assets<Mesh>>();
        app.init_resource::<Assets<StandardMaterial>>();
        app.init_resource::<OrbitCamera>();
        app.add_plugins((simulation::SimulationPlugin, TowerRenderPlugin));
        app.add_systems(Update, rebuild_tower.after(simulation::TowerSet::Tick));
        app
    }

    fn tower_root(app: &mut App) -> Entity {
        let mut query = app
            .world_mut()
            .query_filtered::<Entity, With<TowerRoot>>();
        let roots: Vec<Entity> = query.iter(app.world()).collect();
        assert_eq!(roots.len(), 1, "exactly one tower instance");
        roots[0]
    }

    fn layers(app: &mut App) -> HashSet<TowerLayer> {
        let mut query = app.world_mut().query::<&TowerLayerMesh>();
        query.iter(app.world()).map(|l| l.0).collect()
    }

    fn callout_count(app: &App) -> usize {
        app.world().resource::<CutawayCallouts>().0.len()
    }

    #[test]
    fn test_clip_faces_camera_in_model_space() {
        let clip = clip_for_view(0.0, 0.0);
        assert!((clip.normal - Vec2::Y).length() < 1e-5);

        // Camera and model turned by the same amount: same cut.
        let turned = clip_for_view(1.0, 1.0);
        assert!((turned.normal - Vec2::Y).length() < 1e-5);

        let quarter = clip_for_view(FRAC_PI_2, 0.0);
        assert!((quarter.normal - Vec2::X).length() < 1e-5);
    }

    #[test]
    fn test_callouts_cover_all_layers() {
        let plan = BuildingPlan::from_assessment(&RiskAssessmentResult::demo());
        let callouts = build_callouts(&plan, &ClipPlane::facing(Vec2::Y));
        let titles: Vec<&str> = callouts.iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Core Ribs", "Inner Layer", "Insulation", "Facade Skin"]);
        assert_eq!(callouts[1].detail, "Smart Nano-Structure");
    }

    #[test]
    fn test_callouts_sit_on_the_cut_face() {
        let plan = BuildingPlan::from_assessment(&RiskAssessmentResult::demo());
        let clip = ClipPlane::facing(Vec2::new(0.6, 0.8));
        let floor = &plan.floors[CALLOUT_FLOOR];
        for callout in build_callouts(&plan, &clip) {
            let xz = Vec2::new(callout.anchor.x, callout.anchor.z);
            assert!(clip.normal.dot(xz).abs() < 1e-4, "{} is off the cut", callout.title);
            assert!(callout.anchor.y >= floor.vertical_offset);
        }
    }

    #[test]
    fn test_new_assessment_replaces_tower_instance() {
        let mut app = tower_app();
        app.update();
        let placeholder = tower_root(&mut app);

        app.update();
        assert_eq!(tower_root(&mut app), placeholder, "unchanged inputs keep the tower");

        app.world_mut()
            .send_event(LoadAssessment(RiskAssessmentResult::demo()));
        app.update();
        assert_ne!(tower_root(&mut app), placeholder);
        assert_eq!(app.world().resource::<BuildingPlan>().generation, 1);
    }

    #[test]
    fn test_cutaway_toggle_rebuilds_layers() {
        let mut app = tower_app();
        app.world_mut()
            .send_event(LoadAssessment(RiskAssessmentResult::demo()));
        app.update();
        let shell = layers(&mut app);
        assert!(shell.contains(&TowerLayer::Balcony));
        assert!(!shell.contains(&TowerLayer::CoreRibs));
        assert_eq!(callout_count(&app), 0);

        app.world_mut().send_event(ToggleCutaway);
        app.update();
        let cut = layers(&mut app);
        assert!(cut.contains(&TowerLayer::CoreRibs));
        assert!(cut.contains(&TowerLayer::InnerRing));
        assert!(!cut.contains(&TowerLayer::Balcony));
        assert_eq!(callout_count(&app), 4);
        assert!(app.world().resource::<CutawayClip>().0.is_some());

        app.world_mut().send_event(ToggleCutaway);
        app.update();
        assert_eq!(callout_count(&app), 0);
        assert!(!layers(&mut app).contains(&TowerLayer::CoreRibs));
        assert!(app.world().resource::<CutawayClip>().0.is_none());
    }

    #[test]
    fn test_orbiting_in_cutaway_recuts_tower() {
        let mut app = tower_app();
        app.world_mut().send_event(ToggleCutaway);
        app.update();
        let first = tower_root(&mut app);
        let first_cut = app.world().resource::<CutawayClip>().0.unwrap();

        // A small orbit keeps the existing cut.
        app.world_mut().resource_mut::<OrbitCamera>().yaw += 0.05;
        app.update();
        assert_eq!(tower_root(&mut app), first);

        // Past the refresh angle the tower is cut again, facing the camera.
        let yaw = {
            let mut orbit = app.world_mut().resource_mut::<OrbitCamera>();
            orbit.yaw += 0.5;
            orbit.yaw
        };
        app.update();
        assert_ne!(tower_root(&mut app), first);
        let cut = app.world().resource::<CutawayClip>().0.unwrap();
        assert!(cut.normal.dot(first_cut.normal) < CLIP_REFRESH_COS);
        let visuals = app.world().resource::<HazardController>().visuals;
        let expected = clip_for_view(yaw, visuals.model_yaw + visuals.torsion);
        assert!(cut.normal.dot(expected.normal) > 0.999);
    }

    #[test]
    fn test_fire_reactive_layers() {
        assert!(is_fire_reactive(TowerLayer::Facade));
        assert!(is_fire_reactive(TowerLayer::InnerRing));
        assert!(!is_fire_reactive(TowerLayer::CoreRibs));
        assert!(!is_fire_reactive(TowerLayer::Balcony));
    }

    #[test]
    fn test_core_ribs_ignore_material_style() {
        let plan = BuildingPlan::default();
        let demo = BuildingPlan::from_assessment(&RiskAssessmentResult::demo());
        let a = layer_material(TowerLayer::CoreRibs, &plan.style);
        let b = layer_material(TowerLayer::CoreRibs, &demo.style);
        assert_eq!(a.base_color, b.base_color);

        let inner_a = layer_material(TowerLayer::InnerRing, &plan.style);
        let inner_b = layer_material(TowerLayer::InnerRing, &demo.style);
        assert_ne!(inner_a.base_color, inner_b.base_color);
    }
}
