//! Procedural tower meshes.
//!
//! The tower is drawn as one mesh per [`TowerLayer`], built in model space
//! from the [`BuildingPlan`](simulation::building_plan::BuildingPlan). In the
//! cutaway view every layer is clipped against a single vertical half-space
//! ([`ClipPlane`]) and the internal layers are added.

mod clip;
mod layers;
mod mesh_data;

#[cfg(test)]
mod tests;

pub use clip::ClipPlane;
pub use layers::{build_tower_layers, TowerLayer, CORE_RIB_COUNT, INNER_RING_SCALE, INSULATION_RING_SCALE};
