//! Wire types for the risk assessment record.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::DEFAULT_BUILDING_HEIGHT;

use super::error::AssessmentError;

// =============================================================================
// Lenient field helpers
// =============================================================================

/// Deserializes `null` as the type's default instead of failing.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_height() -> f32 {
    DEFAULT_BUILDING_HEIGHT
}

fn default_taper() -> f32 {
    1.0
}

fn lenient_height<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(DEFAULT_BUILDING_HEIGHT))
}

fn lenient_taper<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(1.0))
}

// =============================================================================
// DisplayValue
// =============================================================================

/// A value the backend may send either as text ("120 km/h", "0.90g") or as a
/// bare number. It is only ever displayed, exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Number(n) => write!(f, "{n}"),
            DisplayValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        DisplayValue::Text(value.to_string())
    }
}

impl From<f64> for DisplayValue {
    fn from(value: f64) -> Self {
        DisplayValue::Number(value)
    }
}

// =============================================================================
// Record sections
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardProfile {
    pub seismic_zone: Option<String>,
    pub flood_risk: Option<String>,
    pub max_wind_speed: Option<DisplayValue>,
    pub precipitation: Option<DisplayValue>,
    pub flood_explanation: Option<String>,
    pub elevation: Option<DisplayValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendations {
    #[serde(deserialize_with = "null_as_default")]
    pub structure: String,
    #[serde(deserialize_with = "null_as_default")]
    pub material: String,
    #[serde(deserialize_with = "null_as_default")]
    pub features: Vec<String>,
}

/// Cross-section archetype of the tower. Anything the renderer does not know
/// (including the legacy `tapered`/`twisted` labels) collapses to `Box`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Cylinder,
    Hexagon,
    Triangle,
    Pyramid,
    Prism,
    #[default]
    #[serde(other)]
    Box,
}

impl Archetype {
    pub fn label(self) -> &'static str {
        match self {
            Archetype::Cylinder => "Cylindrical",
            Archetype::Hexagon => "Hexagonal",
            Archetype::Triangle => "Triangular",
            Archetype::Pyramid => "Square Pyramidal",
            Archetype::Prism => "Triangular Prism",
            Archetype::Box => "Rectangular",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParams {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub archetype: Archetype,
    #[serde(default = "default_height", deserialize_with = "lenient_height")]
    pub height: f32,
    #[serde(default = "default_taper", deserialize_with = "lenient_taper")]
    pub taper: f32,
    #[serde(deserialize_with = "null_as_default")]
    pub twist: f32,
    /// Floor-count hint from the backend. Informational only.
    pub segments: Option<u32>,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            archetype: Archetype::Box,
            height: default_height(),
            taper: default_taper(),
            twist: 0.0,
            segments: None,
        }
    }
}

impl GeometryParams {
    /// Returns a copy with every numeric field forced into its valid range.
    ///
    /// Taper must lie in (0, 1]; values above 1 clamp to 1 and non-positive or
    /// non-finite values fall back to 1 (no taper). Non-finite twist becomes 0
    /// and a non-positive height falls back to the default height.
    pub fn sanitized(&self) -> Self {
        let taper = if self.taper.is_finite() && self.taper > 0.0 {
            self.taper.min(1.0)
        } else {
            1.0
        };
        let twist = if self.twist.is_finite() { self.twist } else { 0.0 };
        let height = if self.height.is_finite() && self.height > 0.0 {
            self.height
        } else {
            DEFAULT_BUILDING_HEIGHT
        };
        Self {
            archetype: self.archetype,
            height,
            taper,
            twist,
            segments: self.segments,
        }
    }
}

/// Display-only hazard figures, echoed verbatim by the simulation HUD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub quake_pga: Option<DisplayValue>,
    pub quake_magnitude: Option<DisplayValue>,
    pub flood_level: Option<DisplayValue>,
    pub fire_temp: Option<DisplayValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wellness {
    pub score: Option<DisplayValue>,
    pub grade: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alternatives {
    pub structure: Option<String>,
    pub material: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfidence {
    pub structure_score: Option<DisplayValue>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignStats {
    pub resilience: Option<DisplayValue>,
    pub durability: Option<DisplayValue>,
    pub stress_load: Option<DisplayValue>,
}

// =============================================================================
// RiskAssessmentResult
// =============================================================================

/// One complete analysis result for a location.
///
/// Immutable for the lifetime of a tower view: a new analysis arrives as a
/// whole new value through [`super::LoadAssessment`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAssessmentResult {
    #[serde(deserialize_with = "null_as_default")]
    pub location: Location,
    #[serde(deserialize_with = "null_as_default")]
    pub profile: HazardProfile,
    #[serde(deserialize_with = "null_as_default")]
    pub recommendations: Recommendations,
    #[serde(deserialize_with = "null_as_default")]
    pub geometry_params: GeometryParams,
    #[serde(deserialize_with = "null_as_default")]
    pub simulation_params: SimulationParams,
    pub safety_score: Option<DisplayValue>,
    pub wellness: Option<Wellness>,
    pub longevity: Option<DisplayValue>,
    pub alternatives: Option<Alternatives>,
    pub ai_confidence: Option<AiConfidence>,
    pub stats: Option<DesignStats>,
    #[serde(deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
}

impl RiskAssessmentResult {
    /// Parses a JSON document. Blank input is rejected; missing fields are not.
    pub fn from_json_str(json: &str) -> Result<Self, AssessmentError> {
        if json.trim().is_empty() {
            return Err(AssessmentError::Empty);
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AssessmentError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Display name for the location, falling back to a generic label.
    pub fn location_name(&self) -> &str {
        self.location.name.as_deref().unwrap_or("Unnamed Site")
    }
}

// =============================================================================
// Tests
// =============================================================================
