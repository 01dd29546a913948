//! Integration tests for the tower simulation using the `TestTower` harness.
//!
//! These run the full load → toggle → tick pipeline in a headless Bevy App
//! and check the behaviour the renderer relies on.

mod hazard_cycle_tests;
