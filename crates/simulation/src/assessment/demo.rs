//! Built-in sample assessment used when no document is supplied.

use super::types::{
    AiConfidence, Archetype, DisplayValue, GeometryParams, HazardProfile, Location,
    Recommendations, RiskAssessmentResult, SimulationParams, Wellness,
};

impl RiskAssessmentResult {
    /// A representative high-seismic coastal site with a tapered, twisted
    /// cylindrical tower.
    pub fn demo() -> Self {
        Self {
            location: Location {
                name: Some("Tokyo, Japan".to_string()),
                description: Some(
                    "Dense coastal capital on an active subduction margin with typhoon exposure."
                        .to_string(),
                ),
                latitude: Some(35.6762),
                longitude: Some(139.6503),
            },
            profile: HazardProfile {
                seismic_zone: Some("High".to_string()),
                flood_risk: Some("Moderate".to_string()),
                max_wind_speed: Some(DisplayValue::from("96 km/h")),
                precipitation: Some(DisplayValue::from("4.4 mm/day")),
                flood_explanation: Some(
                    "Low-lying bay frontage with moderate storm-surge exposure.".to_string(),
                ),
                elevation: Some(DisplayValue::from("40m")),
            },
            recommendations: Recommendations {
                structure: "Diagrid Exoskeleton with Outrigger Belts".to_string(),
                material: "Self-Healing Graphene Composite".to_string(),
                features: vec![
                    "Aerodynamic Tapering".to_string(),
                    "Vortex-Shedding Twist Geometry".to_string(),
                ],
            },
            geometry_params: GeometryParams {
                archetype: Archetype::Cylinder,
                height: 300.0,
                taper: 0.6,
                twist: 90.0,
                segments: Some(30),
            },
            simulation_params: SimulationParams {
                quake_pga: Some(DisplayValue::from("0.90g")),
                quake_magnitude: Some(DisplayValue::from("M7.5")),
                flood_level: Some(DisplayValue::from("4.0m")),
                fire_temp: Some(DisplayValue::from("1200°C")),
            },
            safety_score: Some(DisplayValue::Number(92.0)),
            wellness: Some(Wellness {
                score: Some(DisplayValue::Number(80.0)),
                grade: Some("B+".to_string()),
                label: Some("Inhabitant Health".to_string()),
            }),
            longevity: Some(DisplayValue::from("212 Years")),
            alternatives: None,
            ai_confidence: Some(AiConfidence {
                structure_score: Some(DisplayValue::Number(88.5)),
                explanation: Some(
                    "Selected based on seismic resistance priority for this location.".to_string(),
                ),
            }),
            stats: None,
            amenities: vec![
                "Seismic Safe Rooms (Every 10 Floors)".to_string(),
                "Real-Time Structural Health Monitoring".to_string(),
            ],
        }
    }
}
