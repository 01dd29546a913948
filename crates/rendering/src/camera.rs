use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use simulation::building_plan::BuildingPlan;

use crate::egui_input_guard::egui_wants_pointer;

const ZOOM_SPEED: f32 = 0.12;
const MIN_DISTANCE: f32 = 4.0;
const MAX_DISTANCE: f32 = 60.0;
const MIN_PITCH: f32 = -10.0 * std::f32::consts::PI / 180.0; // slightly below the base
const MAX_PITCH: f32 = 80.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
/// Framing distance as a multiple of the tower height.
const FRAMING_FACTOR: f32 = 1.6;

/// Orbital camera model: the camera circles a focus point on the tower axis.
#[derive(Resource, Debug, Clone, Copy)]
pub struct OrbitCamera {
    /// Point on the tower axis the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians (clamped between MIN_PITCH and MAX_PITCH)
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::new(0.0, 6.5, 0.0),
            yaw: 0.6,
            pitch: 20.0_f32.to_radians(),
            distance: 22.0,
        }
    }
}

impl OrbitCamera {
    /// Centres the view on a tower of `height`, keeping the current angles.
    pub fn frame_height(&mut self, height: f32) {
        self.focus = Vec3::new(0.0, height * 0.5, 0.0);
        self.distance = (height * FRAMING_FACTOR).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Camera position and look-at target.
    pub fn eye_and_target(&self) -> (Vec3, Vec3) {
        // Spherical to cartesian offset from focus
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        (self.focus + Vec3::new(x, y, z), self.focus)
    }
}

#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

pub fn setup_camera(mut commands: Commands, orbit: Res<OrbitCamera>) {
    let (pos, look_at) = orbit.eye_and_target();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(pos).looking_at(look_at, Vec3::Y),
    ));
}

/// Re-frames the camera whenever a new plan is loaded.
pub fn frame_tower(plan: Res<BuildingPlan>, mut orbit: ResMut<OrbitCamera>) {
    if !plan.is_changed() {
        return;
    }
    orbit.frame_height(plan.total_height());
}

/// System: apply OrbitCamera state to the actual camera Transform each frame.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let (pos, look_at) = orbit.eye_and_target();
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(pos).looking_at(look_at, Vec3::Y);
}

/// Right-mouse drag: orbit (horizontal = yaw, vertical = pitch).
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drag: ResMut<CameraOrbitDrag>,
    mut orbit: ResMut<OrbitCamera>,
    mut contexts: EguiContexts,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Right) && !egui_wants_pointer(&mut contexts) {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }

    if buttons.just_released(MouseButton::Right) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            if delta != Vec2::ZERO {
                orbit.yaw -= delta.x * ORBIT_SENSITIVITY;
                orbit.pitch =
                    (orbit.pitch + delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
                drag.last_pos = pos;
            }
        }
    }
}

/// Scroll wheel: zoom (change distance).
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    mut orbit: ResMut<OrbitCamera>,
    mut contexts: EguiContexts,
) {
    if egui_wants_pointer(&mut contexts) {
        scroll_evts.clear();
        return;
    }
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        let factor = 1.0 - dy * ZOOM_SPEED;
        orbit.distance = (orbit.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_sits_at_distance_from_focus() {
        let orbit = OrbitCamera::default();
        let (eye, target) = orbit.eye_and_target();
        assert_eq!(target, orbit.focus);
        assert!(((eye - target).length() - orbit.distance).abs() < 1e-4);
    }

    #[test]
    fn test_zero_yaw_looks_down_negative_z() {
        let orbit = OrbitCamera {
            yaw: 0.0,
            pitch: 0.0,
            ..OrbitCamera::default()
        };
        let (eye, target) = orbit.eye_and_target();
        let dir = (eye - target).normalize();
        assert!((dir - Vec3::Z).length() < 1e-5, "camera sits on +Z at yaw 0");
    }

    #[test]
    fn test_frame_height_centres_and_clamps() {
        let mut orbit = OrbitCamera::default();
        orbit.frame_height(13.0);
        assert!((orbit.focus.y - 6.5).abs() < 1e-5);
        assert!(orbit.distance >= MIN_DISTANCE && orbit.distance <= MAX_DISTANCE);

        orbit.frame_height(1000.0);
        assert_eq!(orbit.distance, MAX_DISTANCE);
    }
}
