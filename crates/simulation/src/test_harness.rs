//! # TestTower: headless harness for the tower simulation
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + `SimulationPlugin` so the
//! load → toggle → tick pipeline can be exercised without a window or GPU.

use bevy::app::App;
use bevy::prelude::*;

use crate::assessment::{ActiveAssessment, LoadAssessment, RiskAssessmentResult};
use crate::building_plan::BuildingPlan;
use crate::hazard_sim::{
    CutawayMode, HazardController, HazardKind, HazardVisuals, SimulationState, ToggleCutaway,
    ToggleSimulation,
};
use crate::SimulationPlugin;

/// One displayed frame at 60 Hz.
const FRAME: std::time::Duration = std::time::Duration::from_micros(16_667);

pub struct TestTower {
    app: App,
}

impl Default for TestTower {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTower {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A tower built from the empty assessment (rectangular, untapered).
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SimulationPlugin);
        app.update();
        Self { app }
    }

    /// Loads `result` through the same event path the application uses.
    pub fn with_assessment(mut self, result: RiskAssessmentResult) -> Self {
        self.load(result);
        self
    }

    /// The built-in demo tower.
    pub fn with_demo() -> Self {
        Self::new().with_assessment(RiskAssessmentResult::demo())
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Sends a replacement assessment and runs one frame so it is applied.
    pub fn load(&mut self, result: RiskAssessmentResult) {
        self.app.world_mut().send_event(LoadAssessment(result));
        self.tick();
    }

    /// Queues a hazard toggle. It is applied on the next `tick`.
    pub fn toggle(&mut self, kind: HazardKind) -> &mut Self {
        self.app.world_mut().send_event(ToggleSimulation(kind));
        self
    }

    /// Queues a cutaway toggle. It is applied on the next `tick`.
    pub fn toggle_cutaway(&mut self) -> &mut Self {
        self.app.world_mut().send_event(ToggleCutaway);
        self
    }

    /// Advances virtual time by one frame and runs the schedule once.
    pub fn tick(&mut self) {
        self.app
            .world_mut()
            .resource_mut::<Time<Virtual>>()
            .advance_by(FRAME);
        self.app.update();
    }

    pub fn tick_n(&mut self, n: u32) {
        for _ in 0..n {
            self.tick();
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn plan(&self) -> &BuildingPlan {
        self.resource::<BuildingPlan>()
    }

    pub fn assessment(&self) -> &RiskAssessmentResult {
        &self.resource::<ActiveAssessment>().0
    }

    pub fn state(&self) -> SimulationState {
        self.resource::<HazardController>().state()
    }

    pub fn visuals(&self) -> HazardVisuals {
        self.resource::<HazardController>().visuals
    }

    pub fn cutaway(&self) -> bool {
        self.resource::<CutawayMode>().is_active()
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_state(&self, expected: SimulationState) {
        assert_eq!(
            self.state(),
            expected,
            "expected simulation state {expected:?}"
        );
    }

    /// Every hazard modifier is at its resting value. The idle turntable
    /// angle is not a hazard modifier and is ignored.
    pub fn assert_at_rest(&self) {
        let rest = HazardVisuals {
            model_yaw: self.visuals().model_yaw,
            ..HazardVisuals::default()
        };
        assert_eq!(self.visuals(), rest, "hazard visuals should be at rest");
    }
}
