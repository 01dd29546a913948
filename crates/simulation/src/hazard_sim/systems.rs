use bevy::prelude::*;

use super::{CutawayMode, HazardController, ToggleCutaway, ToggleSimulation};

/// Drains this frame's toggle events into the controller and cutaway flag.
pub fn apply_hazard_toggles(
    mut sim_events: EventReader<ToggleSimulation>,
    mut cutaway_events: EventReader<ToggleCutaway>,
    mut controller: ResMut<HazardController>,
    mut cutaway: ResMut<CutawayMode>,
) {
    for ToggleSimulation(kind) in sim_events.read() {
        let state = controller.toggle(*kind);
        debug!("Hazard toggle {:?} -> {:?}", kind, state);
    }

    for _ in cutaway_events.read() {
        cutaway.toggle();
        debug!("Cutaway view {}", if cutaway.0 { "on" } else { "off" });
    }
}

/// Advances the hazard interpolation by one frame.
pub fn tick_hazard_controller(
    time: Res<Time>,
    cutaway: Res<CutawayMode>,
    mut controller: ResMut<HazardController>,
) {
    controller.tick(time.elapsed_secs(), cutaway.is_active());
}
