//! Egui input guard: keeps pointer and keyboard input meant for a panel from
//! also reaching the 3D view.
//!
//! Camera orbit/zoom check [`egui_wants_pointer`]; keyboard shortcuts check
//! [`egui_wants_keyboard`] so typing into a text field never toggles a hazard.

use bevy_egui::EguiContexts;

/// Returns `true` when the cursor is over an egui area or egui is handling a
/// drag/click.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

/// Returns `true` when an egui widget has keyboard focus.
#[inline]
pub fn egui_wants_keyboard(contexts: &mut EguiContexts) -> bool {
    contexts.ctx_mut().wants_keyboard_input()
}
