//! Hazard toolbar and keyboard shortcuts.
//!
//! Buttons and keys both go through [`ControlEvents`], so every toggle is an
//! event applied by the simulation before its next tick.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::egui_input_guard::egui_wants_keyboard;
use rendering::snapshot::{RequestSnapshot, SnapshotCapability};
use simulation::hazard_sim::{
    CutawayMode, HazardController, HazardKind, ToggleCutaway, ToggleSimulation,
};

use crate::theme::{hazard_color, FONT_BODY, MUTED_TEXT};

// =============================================================================
// Actions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Cutaway,
    Hazard(HazardKind),
    Snapshot,
}

/// Keyboard binding for each control.
pub fn shortcut_action(key: KeyCode) -> Option<ControlAction> {
    match key {
        KeyCode::KeyC => Some(ControlAction::Cutaway),
        KeyCode::Digit1 => Some(ControlAction::Hazard(HazardKind::Quake)),
        KeyCode::Digit2 => Some(ControlAction::Hazard(HazardKind::Flood)),
        KeyCode::Digit3 => Some(ControlAction::Hazard(HazardKind::Fire)),
        KeyCode::F12 => Some(ControlAction::Snapshot),
        _ => None,
    }
}

pub fn shortcut_hint(action: ControlAction) -> &'static str {
    match action {
        ControlAction::Cutaway => "C",
        ControlAction::Hazard(HazardKind::Quake) => "1",
        ControlAction::Hazard(HazardKind::Flood) => "2",
        ControlAction::Hazard(HazardKind::Fire) => "3",
        ControlAction::Snapshot => "F12",
    }
}

#[derive(SystemParam)]
pub struct ControlEvents<'w> {
    hazards: EventWriter<'w, ToggleSimulation>,
    cutaway: EventWriter<'w, ToggleCutaway>,
    snapshot: EventWriter<'w, RequestSnapshot>,
}

impl ControlEvents<'_> {
    pub fn send(&mut self, action: ControlAction) {
        match action {
            ControlAction::Cutaway => {
                self.cutaway.send(ToggleCutaway);
            }
            ControlAction::Hazard(kind) => {
                self.hazards.send(ToggleSimulation(kind));
            }
            ControlAction::Snapshot => {
                self.snapshot.send(RequestSnapshot);
            }
        }
    }
}

// =============================================================================
// Systems
// =============================================================================

const KEYS: [KeyCode; 5] = [
    KeyCode::KeyC,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::F12,
];

pub fn hazard_keybinds(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut events: ControlEvents,
) {
    if egui_wants_keyboard(&mut contexts) {
        return;
    }
    for key in KEYS {
        if keyboard.just_pressed(key) {
            if let Some(action) = shortcut_action(key) {
                events.send(action);
            }
        }
    }
}

fn control_button(
    ui: &mut egui::Ui,
    label: &str,
    action: ControlAction,
    selected: bool,
    highlight: Option<egui::Color32>,
) -> bool {
    let mut text = egui::RichText::new(label).size(FONT_BODY);
    if let (true, Some(color)) = (selected, highlight) {
        text = text.color(color).strong();
    }
    ui.selectable_label(selected, text)
        .on_hover_text(format!("Shortcut: {}", shortcut_hint(action)))
        .clicked()
}

pub fn hazard_controls_ui(
    mut contexts: EguiContexts,
    controller: Res<HazardController>,
    cutaway: Res<CutawayMode>,
    snapshot: Res<SnapshotCapability>,
    mut events: ControlEvents,
) {
    let state = controller.state();
    let mut pressed = None;

    egui::TopBottomPanel::bottom("hazard_controls").show(contexts.ctx_mut(), |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Simulate").color(MUTED_TEXT));
            for kind in HazardKind::ALL {
                let action = ControlAction::Hazard(kind);
                let active = state == kind.state();
                if control_button(ui, kind.label(), action, active, Some(hazard_color(kind))) {
                    pressed = Some(action);
                }
            }

            ui.separator();
            if control_button(
                ui,
                "Cutaway",
                ControlAction::Cutaway,
                cutaway.is_active(),
                None,
            ) {
                pressed = Some(ControlAction::Cutaway);
            }

            ui.separator();
            let label = if snapshot.is_pending() {
                "Capturing..."
            } else {
                "Snapshot"
            };
            if control_button(ui, label, ControlAction::Snapshot, false, None) {
                pressed = Some(ControlAction::Snapshot);
            }
        });
    });

    if let Some(action) = pressed {
        events.send(action);
    }
}
