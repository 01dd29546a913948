//! Screen-space labels for the cutaway callouts.
//!
//! Anchors live in tower model space, so they are pushed through the tower
//! root's transform (which carries the hazard pose) and then the camera.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::tower_render::{CutawayCallouts, TowerRoot};

use crate::theme::{ACCENT, FONT_BODY, FONT_SMALL, MUTED_TEXT};

const LEADER_LENGTH: f32 = 90.0;
const LEADER_RISE: f32 = 18.0;

/// Leader line end relative to the anchor. Callouts alternate sides of the
/// cut, so their labels do too.
pub fn leader_offset(index: usize) -> egui::Vec2 {
    let side = if index % 2 == 0 { 1.0 } else { -1.0 };
    egui::vec2(side * LEADER_LENGTH, -LEADER_RISE)
}

pub fn callout_labels_ui(
    mut contexts: EguiContexts,
    callouts: Res<CutawayCallouts>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    roots: Query<&GlobalTransform, With<TowerRoot>>,
) {
    if callouts.0.is_empty() {
        return;
    }
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let Ok(root) = roots.get_single() else {
        return;
    };

    let ctx = contexts.ctx_mut();
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("cutaway_callouts"),
    ));

    for (index, callout) in callouts.0.iter().enumerate() {
        let world = root.transform_point(callout.anchor);
        let Ok(screen) = camera.world_to_viewport(camera_transform, world) else {
            continue;
        };
        let anchor = egui::pos2(screen.x, screen.y);
        let label_at = anchor + leader_offset(index);
        let align = if label_at.x >= anchor.x {
            egui::Align2::LEFT_BOTTOM
        } else {
            egui::Align2::RIGHT_BOTTOM
        };

        painter.circle_filled(anchor, 3.5, ACCENT);
        painter.line_segment([anchor, label_at], egui::Stroke::new(1.0, ACCENT));
        painter.text(
            label_at,
            align,
            callout.title,
            egui::FontId::proportional(FONT_BODY),
            egui::Color32::WHITE,
        );
        painter.text(
            label_at + egui::vec2(0.0, FONT_SMALL + 2.0),
            align,
            &callout.detail,
            egui::FontId::proportional(FONT_SMALL),
            MUTED_TEXT,
        );
    }
}
