//! Projects the hazard controller's interpolated state onto the scene.
//!
//! Nothing here decides anything: each system copies one field of
//! [`HazardVisuals`] into a transform or material every frame.

use bevy::prelude::*;

use simulation::config::FLOOD_REST_HEIGHT;
use simulation::hazard_sim::{HazardController, HazardVisuals};

use crate::tower_render::{TowerMaterials, TowerRoot};

/// Size of the square flood plane around the tower.
const FLOOD_PLANE_SIZE: f32 = 40.0;
/// Below this opacity the flood plane is hidden outright.
const FLOOD_VISIBLE_OPACITY: f32 = 0.01;

const FLOOD_COLOR: Srgba = Srgba {
    red: 0.12,
    green: 0.38,
    blue: 0.72,
    alpha: 0.0,
};
/// Emissive the fire simulation drives structural surfaces toward.
pub const HAZARD_RED: LinearRgba = LinearRgba {
    red: 4.0,
    green: 0.45,
    blue: 0.05,
    alpha: 1.0,
};

#[derive(Component)]
pub struct FloodPlane;

/// Whole-model rotation: turntable and torsion about Y, then quake pitch
/// and roll.
pub fn tower_rotation(visuals: &HazardVisuals) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        visuals.model_yaw + visuals.torsion,
        visuals.pitch,
        visuals.roll,
    )
}

/// Linear blend of two emissive colours, `t` in [0, 1].
pub fn fire_emissive(base: LinearRgba, glow: f32) -> LinearRgba {
    let t = glow.clamp(0.0, 1.0);
    let mix = |a: f32, b: f32| a + (b - a) * t;
    LinearRgba::new(
        mix(base.red, HAZARD_RED.red),
        mix(base.green, HAZARD_RED.green),
        mix(base.blue, HAZARD_RED.blue),
        base.alpha,
    )
}

pub fn spawn_flood_plane(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        FloodPlane,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOD_PLANE_SIZE, FLOOD_PLANE_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: FLOOD_COLOR.into(),
            alpha_mode: AlphaMode::Blend,
            perceptual_roughness: 0.15,
            metallic: 0.2,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::from_xyz(0.0, FLOOD_REST_HEIGHT, 0.0),
        Visibility::Hidden,
    ));
}

pub fn project_tower_pose(
    controller: Res<HazardController>,
    mut roots: Query<&mut Transform, With<TowerRoot>>,
) {
    let rotation = tower_rotation(&controller.visuals);
    for mut transform in &mut roots {
        transform.rotation = rotation;
    }
}

pub fn project_flood_plane(
    controller: Res<HazardController>,
    mut planes: Query<
        (
            &mut Transform,
            &mut Visibility,
            &MeshMaterial3d<StandardMaterial>,
        ),
        With<FloodPlane>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let visuals = &controller.visuals;
    for (mut transform, mut visibility, material) in &mut planes {
        transform.translation.y = visuals.flood_height;

        let visible = visuals.flood_opacity >= FLOOD_VISIBLE_OPACITY;
        let wanted = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
        if !visible {
            continue;
        }
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color = Srgba {
                alpha: visuals.flood_opacity,
                ..FLOOD_COLOR
            }
            .into();
        }
    }
}

/// Recolours every fire-reactive material from its resting emissive.
/// Skips the asset writes while the glow value and material set are
/// unchanged.
pub fn project_fire_glow(
    controller: Res<HazardController>,
    tower_materials: Res<TowerMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut last_glow: Local<Option<f32>>,
) {
    let glow = controller.visuals.fire_glow;
    if *last_glow == Some(glow) && !tower_materials.is_changed() {
        return;
    }
    for (handle, base) in &tower_materials.fire_targets {
        if let Some(mat) = materials.get_mut(handle) {
            mat.emissive = fire_emissive(*base, glow);
        }
    }
    *last_glow = Some(glow);
}

pub struct HazardVisualsPlugin;

impl Plugin for HazardVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_flood_plane);
    }
}
