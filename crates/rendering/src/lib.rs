use bevy::prelude::*;

use simulation::TowerSet;

pub mod camera;
pub mod egui_input_guard;
pub mod hazard_visuals;
pub mod snapshot;
pub mod structure_members;
pub mod tower_mesh;
pub mod tower_render;

use camera::{CameraOrbitDrag, OrbitCamera};

/// Diameter of the ground disc under the tower.
const GROUND_SIZE: f32 = 60.0;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitCamera>()
            .init_resource::<CameraOrbitDrag>()
            .add_systems(Startup, (camera::setup_camera, setup_lighting, spawn_ground))
            .add_systems(
                Update,
                (
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::frame_tower,
                    camera::apply_orbit_camera,
                )
                    .chain(),
            )
            // Rebuild first, then project the state this frame's tick produced.
            .add_systems(
                Update,
                (
                    tower_render::rebuild_tower,
                    (
                        hazard_visuals::project_tower_pose,
                        hazard_visuals::project_flood_plane,
                        hazard_visuals::project_fire_glow,
                    ),
                )
                    .chain()
                    .after(TowerSet::Tick)
                    .after(camera::apply_orbit_camera),
            );

        app.add_plugins(tower_render::TowerRenderPlugin);
        app.add_plugins(hazard_visuals::HazardVisualsPlugin);

        // Snapshot capability (F12 or report generator request)
        app.add_plugins(snapshot::SnapshotPlugin);
    }
}

fn setup_lighting(mut commands: Commands) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    // Directional light (sun) angled from above
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4, // 45 degrees down
            std::f32::consts::FRAC_PI_6,  // slight rotation
            0.0,
        )),
    ));
}

fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Circle::new(GROUND_SIZE * 0.5).mesh().resolution(64))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.16, 0.18, 0.2),
            perceptual_roughness: 0.95,
            ..default()
        })),
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
    ));
}
