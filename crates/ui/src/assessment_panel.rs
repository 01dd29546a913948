//! Right-side panel summarising the active assessment and what the resolver
//! made of it.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::assessment::{ActiveAssessment, DisplayValue, RiskAssessmentResult};
use simulation::building_plan::BuildingPlan;
use simulation::config::FLOOR_COUNT;
use simulation::style_resolver::StructuralTopology;

use crate::theme::{ACCENT, FONT_HEADING, FONT_SMALL, MUTED_TEXT};

const UNKNOWN: &str = "Unknown";

fn text_or_unknown(value: Option<&str>) -> &str {
    value.filter(|s| !s.trim().is_empty()).unwrap_or(UNKNOWN)
}

fn value_or_unknown(value: &Option<DisplayValue>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Topology flags in display order.
pub fn topology_flags(topology: &StructuralTopology) -> [(&'static str, bool); 3] {
    [
        ("Diagrid bracing", topology.has_diagrid),
        ("Mega columns", topology.has_thick_columns),
        ("Outrigger belts", topology.has_outriggers),
    ]
}

/// Hazard profile rows as (label, value) pairs.
pub fn hazard_rows(result: &RiskAssessmentResult, plan: &BuildingPlan) -> Vec<(&'static str, String)> {
    let profile = &result.profile;
    vec![
        (
            "Seismic zone",
            format!(
                "{} ({} tier)",
                text_or_unknown(profile.seismic_zone.as_deref()),
                plan.seismic_tier.label()
            ),
        ),
        (
            "Flood risk",
            format!(
                "{} ({} tier)",
                text_or_unknown(profile.flood_risk.as_deref()),
                plan.flood_tier.label()
            ),
        ),
        ("Max wind speed", value_or_unknown(&profile.max_wind_speed)),
        ("Precipitation", value_or_unknown(&profile.precipitation)),
        ("Elevation", value_or_unknown(&profile.elevation)),
    ]
}

fn key_value_grid(ui: &mut egui::Ui, id: &str, rows: &[(&str, String)]) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([12.0, 3.0])
        .show(ui, |ui| {
            for (label, value) in rows {
                ui.label(egui::RichText::new(*label).color(MUTED_TEXT));
                ui.label(value);
                ui.end_row();
            }
        });
}

fn bullet_list(ui: &mut egui::Ui, items: &[String]) {
    if items.is_empty() {
        ui.label(egui::RichText::new("None listed").color(MUTED_TEXT).size(FONT_SMALL));
        return;
    }
    for item in items {
        ui.label(format!("• {item}"));
    }
}

pub fn assessment_panel_ui(
    mut contexts: EguiContexts,
    assessment: Res<ActiveAssessment>,
    plan: Res<BuildingPlan>,
) {
    let result = &assessment.0;

    egui::SidePanel::right("assessment_panel")
        .default_width(260.0)
        .show(contexts.ctx_mut(), |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label(
                    egui::RichText::new(result.location_name())
                        .size(FONT_HEADING)
                        .strong(),
                );
                if let Some(description) = result.location.description.as_deref() {
                    ui.label(egui::RichText::new(description).color(MUTED_TEXT).size(FONT_SMALL));
                }
                if let (Some(lat), Some(lon)) = (result.location.latitude, result.location.longitude) {
                    ui.label(
                        egui::RichText::new(format!("{lat:.4}, {lon:.4}"))
                            .color(MUTED_TEXT)
                            .size(FONT_SMALL),
                    );
                }
                ui.separator();

                egui::CollapsingHeader::new("Hazard profile")
                    .default_open(true)
                    .show(ui, |ui| {
                        key_value_grid(ui, "hazard_rows", &hazard_rows(result, &plan));
                        if let Some(explanation) = result.profile.flood_explanation.as_deref() {
                            ui.label(egui::RichText::new(explanation).size(FONT_SMALL));
                        }
                    });

                egui::CollapsingHeader::new("Design")
                    .default_open(true)
                    .show(ui, |ui| {
                        let recs = &result.recommendations;
                        let rows = [
                            ("Structure", text_or_unknown(Some(&recs.structure)).to_string()),
                            ("Material", text_or_unknown(Some(&recs.material)).to_string()),
                            ("Rendered as", plan.style.display_name.to_string()),
                            ("Profile", plan.archetype.label().to_string()),
                            ("Floors", FLOOR_COUNT.to_string()),
                            ("Height", format!("{} m", plan.geometry.height)),
                            ("Taper", format!("{:.2}", plan.geometry.taper)),
                            ("Twist", format!("{}°", plan.geometry.twist)),
                        ];
                        key_value_grid(ui, "design_rows", &rows);

                        ui.add_space(4.0);
                        for (label, present) in topology_flags(&plan.topology) {
                            let color = if present { ACCENT } else { MUTED_TEXT };
                            let mark = if present { "●" } else { "○" };
                            ui.colored_label(color, format!("{mark} {label}"));
                        }
                    });

                egui::CollapsingHeader::new("Features")
                    .default_open(false)
                    .show(ui, |ui| bullet_list(ui, &result.recommendations.features));

                egui::CollapsingHeader::new("Amenities")
                    .default_open(false)
                    .show(ui, |ui| bullet_list(ui, &result.amenities));

                egui::CollapsingHeader::new("Scores")
                    .default_open(true)
                    .show(ui, |ui| {
                        let mut rows = vec![
                            ("Safety score", value_or_unknown(&result.safety_score)),
                            ("Longevity", value_or_unknown(&result.longevity)),
                        ];
                        if let Some(wellness) = &result.wellness {
                            rows.push((
                                "Wellness",
                                format!(
                                    "{} {}",
                                    value_or_unknown(&wellness.score),
                                    wellness.grade.as_deref().unwrap_or_default()
                                )
                                .trim_end()
                                .to_string(),
                            ));
                        }
                        if let Some(stats) = &result.stats {
                            rows.push(("Resilience", value_or_unknown(&stats.resilience)));
                            rows.push(("Durability", value_or_unknown(&stats.durability)));
                            rows.push(("Stress load", value_or_unknown(&stats.stress_load)));
                        }
                        if let Some(confidence) = &result.ai_confidence {
                            rows.push(("Confidence", value_or_unknown(&confidence.structure_score)));
                        }
                        key_value_grid(ui, "score_rows", &rows);
                    });

                if let Some(alternatives) = &result.alternatives {
                    egui::CollapsingHeader::new("Alternatives")
                        .default_open(false)
                        .show(ui, |ui| {
                            let rows = [
                                ("Structure", text_or_unknown(alternatives.structure.as_deref()).to_string()),
                                ("Material", text_or_unknown(alternatives.material.as_deref()).to_string()),
                            ];
                            key_value_grid(ui, "alternative_rows", &rows);
                            if let Some(note) = alternatives.note.as_deref() {
                                ui.label(egui::RichText::new(note).size(FONT_SMALL));
                            }
                        });
                }
            });
        });
}
