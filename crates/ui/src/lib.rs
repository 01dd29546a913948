use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod assessment_panel;
pub mod callout_labels;
pub mod hazard_controls;
pub mod simulation_hud;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_tower_theme)
            .add_systems(
                Update,
                hazard_controls::hazard_keybinds.before(simulation::TowerSet::Input),
            )
            // Panels first so the side/bottom bars shrink the central area the
            // overlays are placed in.
            .add_systems(
                Update,
                (
                    hazard_controls::hazard_controls_ui,
                    assessment_panel::assessment_panel_ui,
                    simulation_hud::simulation_hud_ui,
                    callout_labels::callout_labels_ui,
                )
                    .chain()
                    .after(simulation::TowerSet::Tick),
            );
    }
}
