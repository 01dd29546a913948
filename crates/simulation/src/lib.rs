//! Render-free core of the tower viewer: the assessment record, style
//! resolution, floor generation and the hazard simulation state machine.

use bevy::prelude::*;

pub mod assessment;
pub mod building_plan;
pub mod config;
pub mod hazard_sim;
pub mod style_resolver;
pub mod tower_geometry;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

#[cfg(test)]
mod integration_tests;

/// Per-frame ordering of the tower systems.
///
/// A replaced assessment is applied first, then user toggles, then the hazard
/// tick, so every change is visible in full to the frame that follows it.
/// Rendering systems run after [`TowerSet::Tick`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TowerSet {
    Load,
    Input,
    Tick,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (TowerSet::Load, TowerSet::Input, TowerSet::Tick).chain(),
        );

        app.add_plugins((
            building_plan::BuildingPlanPlugin,
            hazard_sim::HazardSimPlugin,
        ));
    }
}
