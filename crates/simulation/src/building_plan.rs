//! The derived, render-ready description of the current tower.
//!
//! [`BuildingPlan`] bundles everything the renderer needs (resolved style,
//! topology, profile, floor stack) so it never has to look at the raw
//! assessment. It is rebuilt in full whenever a [`LoadAssessment`] arrives.

use bevy::prelude::*;

use crate::assessment::{ActiveAssessment, Archetype, GeometryParams, LoadAssessment, RiskAssessmentResult};
use crate::hazard_sim::{CutawayMode, HazardController, SeverityTier};
use crate::style_resolver::{self, MaterialStyle, StructuralTopology};
use crate::tower_geometry::{self, FloorDescriptor, ProfileShape};

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BuildingPlan {
    pub style: MaterialStyle,
    pub topology: StructuralTopology,
    pub archetype: Archetype,
    pub shape: ProfileShape,
    pub floors: Vec<FloorDescriptor>,
    /// Sanitized copy of the geometry the floors were generated from.
    pub geometry: GeometryParams,
    pub seismic_tier: SeverityTier,
    pub flood_tier: SeverityTier,
    /// Incremented on every replacement; 0 is the placeholder plan.
    pub generation: u64,
}

impl Default for BuildingPlan {
    fn default() -> Self {
        Self::from_assessment(&RiskAssessmentResult::default())
    }
}

impl BuildingPlan {
    pub fn from_assessment(result: &RiskAssessmentResult) -> Self {
        let (style, topology) = style_resolver::resolve(
            &result.recommendations.material,
            &result.recommendations.structure,
        );
        let geometry = result.geometry_params.sanitized();
        let archetype = geometry.archetype;
        Self {
            style,
            topology,
            archetype,
            shape: archetype.profile(),
            floors: tower_geometry::generate_floors(&geometry),
            geometry,
            seismic_tier: SeverityTier::from_zone_text(result.profile.seismic_zone.as_deref()),
            flood_tier: SeverityTier::from_flood_text(result.profile.flood_risk.as_deref()),
            generation: 0,
        }
    }

    /// Model-space height of the tower top.
    pub fn total_height(&self) -> f32 {
        tower_geometry::stack_height(&self.floors)
    }
}

/// Replaces the active assessment wholesale.
///
/// Only the last event of a frame is applied. The plan is recomputed, the
/// hazard controller is recreated at rest and the cutaway view is switched
/// off, so no interpolation state carries over between analyses.
pub fn apply_loaded_assessment(
    mut events: EventReader<LoadAssessment>,
    mut active: ResMut<ActiveAssessment>,
    mut plan: ResMut<BuildingPlan>,
    mut controller: ResMut<HazardController>,
    mut cutaway: ResMut<CutawayMode>,
) {
    let Some(LoadAssessment(result)) = events.read().last() else {
        return;
    };

    let generation = plan.generation + 1;
    let mut next = BuildingPlan::from_assessment(result);
    next.generation = generation;

    info!(
        "Loaded assessment for {} ({} profile, {} floors, {} / {})",
        result.location_name(),
        next.archetype.label(),
        next.floors.len(),
        next.style.display_name,
        next.topology.summary(),
    );

    *controller = HazardController::new(next.seismic_tier, next.flood_tier);
    *cutaway = CutawayMode::default();
    *plan = next;
    active.0 = result.clone();
}

pub struct BuildingPlanPlugin;

impl Plugin for BuildingPlanPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LoadAssessment>()
            .init_resource::<ActiveAssessment>()
            .init_resource::<BuildingPlan>()
            .add_systems(
                Update,
                apply_loaded_assessment.in_set(crate::TowerSet::Load),
            );
    }
}
