//! Heads-up overlay shown while a hazard simulation runs.
//!
//! Echoes the assessment's `simulation_params` exactly as received. Nothing
//! is recomputed or reformatted here.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::assessment::{ActiveAssessment, DisplayValue, SimulationParams};
use simulation::hazard_sim::{HazardController, HazardKind, SimulationState};

use crate::theme::{hazard_color, FONT_BODY, FONT_HEADING, MUTED_TEXT};

/// Shown in place of a figure the assessment did not provide.
const MISSING: &str = "n/a";

#[derive(Debug, Clone, PartialEq)]
pub struct HudReadout {
    pub kind: HazardKind,
    pub rows: Vec<(&'static str, String)>,
}

fn shown(value: &Option<DisplayValue>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| MISSING.to_string())
}

/// HUD content for `state`, or `None` while idle.
pub fn hud_readout(state: SimulationState, params: &SimulationParams) -> Option<HudReadout> {
    let (kind, rows) = match state {
        SimulationState::Idle => return None,
        SimulationState::Quake => (
            HazardKind::Quake,
            vec![
                ("Peak ground acceleration", shown(&params.quake_pga)),
                ("Magnitude", shown(&params.quake_magnitude)),
            ],
        ),
        SimulationState::Flood => (
            HazardKind::Flood,
            vec![("Flood level", shown(&params.flood_level))],
        ),
        SimulationState::Fire => (
            HazardKind::Fire,
            vec![("Fire temperature", shown(&params.fire_temp))],
        ),
    };
    Some(HudReadout { kind, rows })
}

pub fn simulation_hud_ui(
    mut contexts: EguiContexts,
    controller: Res<HazardController>,
    assessment: Res<ActiveAssessment>,
) {
    let Some(readout) = hud_readout(controller.state(), &assessment.0.simulation_params) else {
        return;
    };

    egui::Area::new(egui::Id::new("simulation_hud"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 12.0))
        .interactable(false)
        .show(contexts.ctx_mut(), |ui| {
            egui::Frame::popup(ui.style())
                .fill(egui::Color32::from_rgba_premultiplied(14, 16, 22, 220))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(format!("{} simulation", readout.kind.label()))
                            .color(hazard_color(readout.kind))
                            .size(FONT_HEADING)
                            .strong(),
                    );
                    egui::Grid::new("simulation_hud_rows")
                        .num_columns(2)
                        .spacing([16.0, 4.0])
                        .show(ui, |ui| {
                            for (label, value) in &readout.rows {
                                ui.label(egui::RichText::new(*label).color(MUTED_TEXT));
                                ui.label(egui::RichText::new(value).size(FONT_BODY).strong());
                                ui.end_row();
                            }
                        });
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimulationParams {
        SimulationParams {
            quake_pga: Some(DisplayValue::from("0.90g")),
            quake_magnitude: Some(DisplayValue::from(7.4)),
            flood_level: Some(DisplayValue::from("2.5m")),
            fire_temp: None,
        }
    }

    #[test]
    fn test_idle_shows_nothing() {
        assert_eq!(hud_readout(SimulationState::Idle, &params()), None);
    }

    #[test]
    fn test_quake_values_pass_through_verbatim() {
        let readout = hud_readout(SimulationState::Quake, &params()).unwrap();
        assert_eq!(readout.kind, HazardKind::Quake);
        assert_eq!(readout.rows[0].1, "0.90g");
        assert_eq!(readout.rows[1].1, "7.4");
    }

    #[test]
    fn test_flood_shows_only_flood_level() {
        let readout = hud_readout(SimulationState::Flood, &params()).unwrap();
        assert_eq!(readout.rows, vec![("Flood level", "2.5m".to_string())]);
    }

    #[test]
    fn test_missing_value_is_marked() {
        let readout = hud_readout(SimulationState::Fire, &params()).unwrap();
        assert_eq!(readout.rows[0].1, MISSING);
    }
}
