//! Hazard Simulation Controller.
//!
//! Three mutually exclusive hazard visualisations (quake sway, flood
//! inundation, fire glow) plus the independent cutaway flag. The controller
//! is plain data advanced once per frame by [`tick_hazard_controller`]; the
//! rendering crate projects [`HazardVisuals`] onto the scene afterwards.
//!
//! User input never mutates the controller directly. Buttons and shortcuts
//! send [`ToggleSimulation`] / [`ToggleCutaway`] events, which are applied in
//! [`crate::TowerSet::Input`] before the tick runs, so a toggle always lands
//! between two frames.

mod controller;
mod severity;
mod systems;

pub use controller::{
    smooth_toward, CutawayMode, HazardController, HazardKind, HazardVisuals, SimulationState,
};
pub use severity::SeverityTier;
pub use systems::{apply_hazard_toggles, tick_hazard_controller};

use bevy::prelude::*;

/// Select (or deselect) a hazard simulation.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleSimulation(pub HazardKind);

/// Flip the cutaway cross-section view.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ToggleCutaway;

pub struct HazardSimPlugin;

impl Plugin for HazardSimPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ToggleSimulation>()
            .add_event::<ToggleCutaway>()
            .init_resource::<HazardController>()
            .init_resource::<CutawayMode>()
            .add_systems(
                Update,
                (
                    apply_hazard_toggles.in_set(crate::TowerSet::Input),
                    tick_hazard_controller.in_set(crate::TowerSet::Tick),
                ),
            );
    }
}
