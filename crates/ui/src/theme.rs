use bevy_egui::{egui, EguiContexts};

use simulation::hazard_sim::HazardKind;

pub const FONT_SMALL: f32 = 12.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_HEADING: f32 = 17.0;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(100, 160, 220);
pub const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(150, 158, 172);

/// Highlight colour for a hazard's button and HUD header.
pub fn hazard_color(kind: HazardKind) -> egui::Color32 {
    match kind {
        HazardKind::Quake => egui::Color32::from_rgb(230, 170, 60),
        HazardKind::Flood => egui::Color32::from_rgb(70, 150, 235),
        HazardKind::Fire => egui::Color32::from_rgb(235, 80, 50),
    }
}

pub fn apply_tower_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    // Cool slate background so the emissive hazard colours stand out
    let panel = egui::Color32::from_rgba_unmultiplied(24, 28, 36, 235);
    let inactive = egui::Color32::from_rgb(44, 50, 62);
    let hover = egui::Color32::from_rgb(62, 74, 94);

    style.visuals.widgets.noninteractive.bg_fill = panel;
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = ACCENT;

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.extreme_bg_color = egui::Color32::from_rgb(18, 21, 27);
    style.visuals.faint_bg_color = egui::Color32::from_rgb(30, 34, 44);

    // Selected toggle buttons
    style.visuals.selection.bg_fill = ACCENT;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);

    // egui 0.31+ uses CornerRadius with u8 values
    let window_rounding = egui::CornerRadius::same(6);
    let widget_rounding = egui::CornerRadius::same(4);

    style.visuals.window_corner_radius = window_rounding;
    style.visuals.widgets.noninteractive.corner_radius = widget_rounding;
    style.visuals.widgets.inactive.corner_radius = widget_rounding;
    style.visuals.widgets.hovered.corner_radius = widget_rounding;
    style.visuals.widgets.active.corner_radius = widget_rounding;

    ctx.set_style(style);
}
