//! Two-tier hazard severity derived from free-text hazard descriptions.

use crate::config::{FLOOD_HIGH_TARGET, FLOOD_LOW_TARGET, QUAKE_HIGH_SCALE, QUAKE_LOW_SCALE};

/// Words that put a hazard description into the high tier.
const HIGH_TIER_KEYWORDS: &[&str] = &["high", "severe", "extreme"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SeverityTier {
    #[default]
    Low,
    High,
}

impl SeverityTier {
    fn from_text(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return SeverityTier::Low;
        };
        let text = text.to_lowercase();
        if HIGH_TIER_KEYWORDS.iter().any(|k| text.contains(k)) {
            SeverityTier::High
        } else {
            SeverityTier::Low
        }
    }

    /// Classifies a seismic zone description such as "High" or "Very Low".
    /// Missing text is the low tier.
    pub fn from_zone_text(zone: Option<&str>) -> Self {
        Self::from_text(zone)
    }

    /// Classifies a flood risk description such as "Extreme" or
    /// "Low-Moderate". Missing text is the low tier.
    pub fn from_flood_text(risk: Option<&str>) -> Self {
        Self::from_text(risk)
    }

    /// Multiplier applied to the base quake sway amplitude.
    pub fn quake_scale(self) -> f32 {
        match self {
            SeverityTier::High => QUAKE_HIGH_SCALE,
            SeverityTier::Low => QUAKE_LOW_SCALE,
        }
    }

    /// Water height the flood plane rises toward.
    pub fn flood_target(self) -> f32 {
        match self {
            SeverityTier::High => FLOOD_HIGH_TARGET,
            SeverityTier::Low => FLOOD_LOW_TARGET,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeverityTier::High => "High",
            SeverityTier::Low => "Low",
        }
    }
}
