//! The externally supplied risk assessment record and its loading path.
//!
//! A [`RiskAssessmentResult`] is produced by the hazard-analysis backend and
//! handed to this crate as JSON. Every field is optional on the wire: missing
//! or `null` values fall back to documented defaults so a partial record still
//! renders the base tower.

pub mod demo;
pub mod error;
pub mod types;

pub use error::AssessmentError;
pub use types::{
    AiConfidence, Alternatives, Archetype, DesignStats, DisplayValue, GeometryParams,
    HazardProfile, Location, Recommendations, RiskAssessmentResult, SimulationParams, Wellness,
};

use bevy::prelude::*;

/// The assessment currently driving the tower view.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveAssessment(pub RiskAssessmentResult);

/// Replaces the active assessment wholesale. The tower, its simulation state
/// and all interpolated visuals are rebuilt from scratch.
#[derive(Event, Debug, Clone)]
pub struct LoadAssessment(pub RiskAssessmentResult);
