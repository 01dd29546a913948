//! Classifies free-text material and structure recommendations into a visual
//! style and a structural topology.
//!
//! Both classifiers are explicit rule tables evaluated top to bottom with
//! case-insensitive substring matching:
//!
//! - **Material**: first matching rule wins; no match yields
//!   [`StyleCategory::HybridComposite`], so resolution never fails.
//! - **Structure**: every flag is tested on its own; a tower can carry a
//!   diagrid, mega columns and outrigger belts at the same time.

use bevy::prelude::*;

// =============================================================================
// Types
// =============================================================================

/// Discrete visual family a material recommendation falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleCategory {
    BioSkin,
    CompositeAlloy,
    SmartNano,
    Geopolymer,
    HybridComposite,
}

/// Surface appearance derived from a material recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialStyle {
    pub category: StyleCategory,
    pub base_color: Color,
    /// Perceptual roughness in [0, 1].
    pub roughness: f32,
    /// Metalness in [0, 1].
    pub metalness: f32,
    pub emissive_color: Color,
    pub emissive_intensity: f32,
    pub display_name: &'static str,
}

impl StyleCategory {
    pub fn style(self) -> MaterialStyle {
        match self {
            StyleCategory::BioSkin => MaterialStyle {
                category: self,
                base_color: Color::srgb(0.24, 0.55, 0.28),
                roughness: 0.9,
                metalness: 0.1,
                emissive_color: Color::srgb(0.05, 0.25, 0.08),
                emissive_intensity: 0.3,
                display_name: "Eco-Resilient Bio-Skin",
            },
            StyleCategory::CompositeAlloy => MaterialStyle {
                category: self,
                base_color: Color::srgb(0.17, 0.18, 0.21),
                roughness: 0.2,
                metalness: 0.85,
                emissive_color: Color::srgb(0.12, 0.14, 0.2),
                emissive_intensity: 0.1,
                display_name: "Advanced Composite Alloy",
            },
            StyleCategory::SmartNano => MaterialStyle {
                category: self,
                base_color: Color::srgb(0.29, 0.22, 0.68),
                roughness: 0.08,
                metalness: 0.95,
                emissive_color: Color::srgb(0.35, 0.25, 0.9),
                emissive_intensity: 0.8,
                display_name: "Smart Nano-Structure",
            },
            StyleCategory::Geopolymer => MaterialStyle {
                category: self,
                base_color: Color::srgb(0.58, 0.58, 0.56),
                roughness: 0.85,
                metalness: 0.1,
                emissive_color: Color::BLACK,
                emissive_intensity: 0.0,
                display_name: "UHPC Geopolymer",
            },
            StyleCategory::HybridComposite => MaterialStyle {
                category: self,
                base_color: Color::srgb(0.44, 0.5, 0.56),
                roughness: 0.5,
                metalness: 0.7,
                emissive_color: Color::BLACK,
                emissive_intensity: 0.0,
                display_name: "Resilient Hybrid Composite",
            },
        }
    }
}

impl MaterialStyle {
    /// Brighter variant used for internal layers exposed by the cutaway.
    pub fn interior_color(&self) -> Color {
        let srgba = self.base_color.to_srgba();
        let lift = |c: f32| (c * 1.4 + 0.12).min(1.0);
        Color::srgb(lift(srgba.red), lift(srgba.green), lift(srgba.blue))
    }
}

/// Structural features present in a structure recommendation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StructuralTopology {
    pub has_diagrid: bool,
    pub has_thick_columns: bool,
    pub has_outriggers: bool,
}

impl StructuralTopology {
    /// Short human-readable list of the active features.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.has_diagrid {
            parts.push("Diagrid bracing");
        }
        if self.has_thick_columns {
            parts.push("Mega columns");
        }
        if self.has_outriggers {
            parts.push("Outrigger belts");
        }
        if parts.is_empty() {
            "Standard frame".to_string()
        } else {
            parts.join(" + ")
        }
    }
}

// =============================================================================
// Rule tables
// =============================================================================

struct MaterialRule {
    keywords: &'static [&'static str],
    category: StyleCategory,
}

/// Evaluated top to bottom, first match wins. `self-healing` alone is checked
/// ahead of the composite family so "Self-Healing Graphene" reads as a smart
/// structure; the other smart keywords rank below composites.
const MATERIAL_RULES: [MaterialRule; 5] = [
    MaterialRule {
        keywords: &["living", "bio", "moss", "forest", "algae", "timber", "bamboo"],
        category: StyleCategory::BioSkin,
    },
    MaterialRule {
        keywords: &["self-healing"],
        category: StyleCategory::SmartNano,
    },
    MaterialRule {
        keywords: &["carbon", "graphene", "titanium", "alloy", "fiber"],
        category: StyleCategory::CompositeAlloy,
    },
    MaterialRule {
        keywords: &["smart", "kinetic", "memory", "nanopolymer"],
        category: StyleCategory::SmartNano,
    },
    MaterialRule {
        keywords: &["concrete", "uhpc", "geopolymer", "ceramic"],
        category: StyleCategory::Geopolymer,
    },
];

const DIAGRID_KEYWORDS: &[&str] = &["diagrid", "exoskeleton", "helical"];
const THICK_COLUMN_KEYWORDS: &[&str] = &["tube", "mega", "buttressed"];
const OUTRIGGER_KEYWORDS: &[&str] = &["outrigger", "belt"];

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

// =============================================================================
// Resolution
// =============================================================================

/// Picks the style category for a material description.
pub fn classify_material(material_text: &str) -> StyleCategory {
    let text = material_text.to_lowercase();
    MATERIAL_RULES
        .iter()
        .find(|rule| contains_any(&text, rule.keywords))
        .map(|rule| rule.category)
        .unwrap_or(StyleCategory::HybridComposite)
}

/// Tests each structural feature independently.
pub fn classify_structure(structure_text: &str) -> StructuralTopology {
    let text = structure_text.to_lowercase();
    StructuralTopology {
        has_diagrid: contains_any(&text, DIAGRID_KEYWORDS),
        has_thick_columns: contains_any(&text, THICK_COLUMN_KEYWORDS),
        has_outriggers: contains_any(&text, OUTRIGGER_KEYWORDS),
    }
}

/// Resolves both recommendation strings. Pure and total.
pub fn resolve(material_text: &str, structure_text: &str) -> (MaterialStyle, StructuralTopology) {
    (
        classify_material(material_text).style(),
        classify_structure(structure_text),
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_healing_graphene_is_smart_nano() {
        let (style, topology) = resolve(
            "Self-Healing Graphene Composite",
            "Diagrid Exoskeleton with Outrigger Belts",
        );
        assert_eq!(style.category, StyleCategory::SmartNano);
        assert_eq!(style.display_name, "Smart Nano-Structure");
        assert!(style.metalness > 0.9);
        assert!(topology.has_diagrid);
        assert!(topology.has_outriggers);
        assert!(!topology.has_thick_columns);
    }

    #[test]
    fn test_each_material_family() {
        let cases = [
            ("Cross-Laminated Living Moss Timber", StyleCategory::BioSkin),
            ("Engineered Bamboo-Polymer Matrix", StyleCategory::BioSkin),
            ("Graphene-Enhanced Titanium Composite", StyleCategory::CompositeAlloy),
            ("High-Ductility Graphene Steel", StyleCategory::CompositeAlloy),
            ("Kinetic Facade Panels", StyleCategory::SmartNano),
            ("Carbon-Fiber Reinforced Nanopolymer", StyleCategory::CompositeAlloy),
            ("Self-Healing Shape-Memory Alloy", StyleCategory::SmartNano),
            ("Self-Healing Graphene Composite", StyleCategory::SmartNano),
            ("Ultra-High Performance Concrete (UHPC)", StyleCategory::Geopolymer),
            ("Carbon-Sequestering Geopolymer", StyleCategory::CompositeAlloy),
            ("Structural Glass", StyleCategory::HybridComposite),
        ];
        for (text, expected) in cases {
            assert_eq!(classify_material(text), expected, "material `{text}`");
        }
    }

    #[test]
    fn test_bio_rule_outranks_concrete() {
        assert_eq!(
            classify_material("Self-Cleaning Bio-Concrete"),
            StyleCategory::BioSkin
        );
    }

    #[test]
    fn test_empty_text_yields_defaults() {
        let (style, topology) = resolve("", "");
        assert_eq!(style.category, StyleCategory::HybridComposite);
        assert_eq!(style.display_name, "Resilient Hybrid Composite");
        assert_eq!(topology, StructuralTopology::default());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify_material("TIMBER"), StyleCategory::BioSkin);
        let topology = classify_structure("BUNDLED TUBE WITH BELT TRUSSES");
        assert!(topology.has_thick_columns);
        assert!(topology.has_outriggers);
    }

    #[test]
    fn test_structure_flags_are_independent() {
        let topology = classify_structure("Helical Diagrid on Buttressed Mega Core with Outriggers");
        assert!(topology.has_diagrid);
        assert!(topology.has_thick_columns);
        assert!(topology.has_outriggers);

        let plain = classify_structure("Reinforced Concrete Shear Wall");
        assert_eq!(plain, StructuralTopology::default());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let a = resolve("Bio-Mineralized Algae Composite", "Composite Mega-Columns");
        let b = resolve("Bio-Mineralized Algae Composite", "Composite Mega-Columns");
        assert_eq!(a, b);
        // Interleaving other calls does not disturb the result.
        let _ = resolve("Titanium", "Diagrid");
        assert_eq!(resolve("Bio-Mineralized Algae Composite", "Composite Mega-Columns"), a);
    }

    #[test]
    fn test_styles_stay_in_unit_range() {
        for category in [
            StyleCategory::BioSkin,
            StyleCategory::CompositeAlloy,
            StyleCategory::SmartNano,
            StyleCategory::Geopolymer,
            StyleCategory::HybridComposite,
        ] {
            let style = category.style();
            assert!((0.0..=1.0).contains(&style.roughness));
            assert!((0.0..=1.0).contains(&style.metalness));
            assert_eq!(style.category, category);
        }
    }

    #[test]
    fn test_topology_summary() {
        assert_eq!(StructuralTopology::default().summary(), "Standard frame");
        let topology = StructuralTopology {
            has_diagrid: true,
            has_thick_columns: false,
            has_outriggers: true,
        };
        assert_eq!(topology.summary(), "Diagrid bracing + Outrigger belts");
    }

    #[test]
    fn test_interior_color_is_brighter() {
        let style = StyleCategory::CompositeAlloy.style();
        let base = style.base_color.to_srgba();
        let inner = style.interior_color().to_srgba();
        assert!(inner.red > base.red);
        assert!(inner.green > base.green);
        assert!(inner.blue > base.blue);
    }
}
