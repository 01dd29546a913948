//! Hazard toggles and the per-frame interpolation driven through the app.

use crate::config::{FIRE_BASE_GLOW, FIRE_FLICKER, FLOOD_REST_HEIGHT};
use crate::hazard_sim::{HazardKind, SimulationState};
use crate::test_harness::TestTower;

#[test]
fn test_starts_idle_and_at_rest() {
    let tower = TestTower::with_demo();
    tower.assert_state(SimulationState::Idle);
    tower.assert_at_rest();
}

#[test]
fn test_reselecting_active_hazard_returns_to_idle() {
    let mut tower = TestTower::with_demo();
    for kind in HazardKind::ALL {
        tower.toggle(kind).tick();
        tower.assert_state(kind.state());
        tower.toggle(kind).tick();
        tower.assert_state(SimulationState::Idle);
    }
}

#[test]
fn test_switching_hazards_goes_direct() {
    let mut tower = TestTower::with_demo();
    tower.toggle(HazardKind::Quake).tick();
    tower.toggle(HazardKind::Fire).tick();
    tower.assert_state(SimulationState::Fire);
    tower.toggle(HazardKind::Flood).tick();
    tower.assert_state(SimulationState::Flood);
}

#[test]
fn test_toggle_takes_effect_on_the_next_frame() {
    let mut tower = TestTower::with_demo();
    tower.toggle(HazardKind::Fire).tick();
    let glow = tower.visuals().fire_glow;
    assert!(
        glow >= FIRE_BASE_GLOW - FIRE_FLICKER - 1e-5,
        "fire glow should be fully on in the toggle frame, got {glow}"
    );

    tower.toggle(HazardKind::Fire).tick();
    assert_eq!(tower.visuals().fire_glow, 0.0);
}

#[test]
fn test_quake_sway_decays_after_switch_to_flood() {
    let mut tower = TestTower::with_demo();
    tower.toggle(HazardKind::Quake);

    let mut peak: f32 = 0.0;
    for _ in 0..60 {
        tower.tick();
        peak = peak.max(tower.visuals().roll.abs());
    }
    assert!(peak > 0.0, "quake should sway the tower");

    tower.toggle(HazardKind::Flood).tick();
    let sway = tower.visuals().roll.abs();
    tower.tick_n(200);
    let v = tower.visuals();
    assert!(v.roll.abs() < 1e-5 && v.pitch.abs() < 1e-5);
    assert!(v.roll.abs() <= sway);
    assert!(v.flood_height > FLOOD_REST_HEIGHT, "flood is rising meanwhile");
}

#[test]
fn test_flood_rises_then_recedes() {
    let mut tower = TestTower::with_demo();
    let target = tower.plan().flood_tier.flood_target();
    tower.toggle(HazardKind::Flood);

    let mut last = tower.visuals().flood_height;
    for _ in 0..300 {
        tower.tick();
        let h = tower.visuals().flood_height;
        assert!(h >= last && h <= target);
        last = h;
    }
    assert!(last > FLOOD_REST_HEIGHT + 1.0);

    tower.toggle(HazardKind::Flood);
    for _ in 0..300 {
        tower.tick();
        let h = tower.visuals().flood_height;
        assert!(h <= last && h >= FLOOD_REST_HEIGHT);
        last = h;
    }
    assert!((last - FLOOD_REST_HEIGHT).abs() < 1e-3);
}

#[test]
fn test_switching_hazards_keeps_floor_stack() {
    let mut tower = TestTower::with_demo();
    let floors = tower.plan().floors.clone();
    for kind in [HazardKind::Quake, HazardKind::Flood, HazardKind::Fire] {
        tower.toggle(kind);
        tower.tick_n(20);
        assert_eq!(tower.plan().floors, floors, "{kind:?} must not touch floors");
    }
}
