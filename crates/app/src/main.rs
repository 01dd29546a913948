use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy::window::{FileDragAndDrop, PresentMode};
use bevy::winit::{UpdateMode, WinitSettings};

use rendering::snapshot::{decode_png_data_url, RequestSnapshot, SnapshotReady};
use simulation::assessment::{LoadAssessment, RiskAssessmentResult};

/// Environment fallback for the assessment path when no CLI argument is given.
const ASSESSMENT_ENV: &str = "TOWER_ASSESSMENT";
/// When set, capture one snapshot to this PNG path and exit.
const SNAPSHOT_ENV: &str = "TOWER_SNAPSHOT";
/// Frames to let the tower build and the camera frame it before capturing.
const SNAPSHOT_SETTLE_FRAMES: u32 = 120;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Resilient Tower".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .add_plugins((
        simulation::SimulationPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    let source = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(ASSESSMENT_ENV).ok())
        .map(PathBuf::from);
    app.insert_resource(AssessmentSource(source))
        .add_systems(Startup, load_initial_assessment)
        .add_systems(
            Update,
            load_dropped_assessment.before(simulation::TowerSet::Load),
        );

    // Snapshot mode: renders the tower, writes one PNG and exits
    if let Ok(path) = std::env::var(SNAPSHOT_ENV) {
        app.insert_resource(SnapshotExport {
            path: PathBuf::from(path),
            frame: 0,
        });
        app.add_systems(Update, drive_snapshot_export);
    }

    app.run();
}

// ---------------------------------------------------------------------------
// Assessment loading
// ---------------------------------------------------------------------------

#[derive(Resource)]
struct AssessmentSource(Option<PathBuf>);

fn read_assessment(path: &Path) -> RiskAssessmentResult {
    match RiskAssessmentResult::from_path(path) {
        Ok(result) => {
            info!("Read assessment from {}", path.display());
            result
        }
        Err(e) => {
            warn!(
                "Could not load assessment {}: {e}; using the built-in demo",
                path.display()
            );
            RiskAssessmentResult::demo()
        }
    }
}

fn load_initial_assessment(source: Res<AssessmentSource>, mut loads: EventWriter<LoadAssessment>) {
    let result = match &source.0 {
        Some(path) => read_assessment(path),
        None => RiskAssessmentResult::demo(),
    };
    loads.send(LoadAssessment(result));
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Dropping a `.json` file on the window replaces the active assessment.
fn load_dropped_assessment(
    mut drops: EventReader<FileDragAndDrop>,
    mut loads: EventWriter<LoadAssessment>,
) {
    for drop in drops.read() {
        let FileDragAndDrop::DroppedFile { path_buf, .. } = drop else {
            continue;
        };
        if !is_json(path_buf) {
            warn!("Ignoring dropped file {}: not JSON", path_buf.display());
            continue;
        }
        match RiskAssessmentResult::from_path(path_buf) {
            Ok(result) => {
                loads.send(LoadAssessment(result));
            }
            Err(e) => warn!("Could not load dropped assessment {}: {e}", path_buf.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot export
// ---------------------------------------------------------------------------

#[derive(Resource)]
struct SnapshotExport {
    path: PathBuf,
    frame: u32,
}

fn drive_snapshot_export(
    mut export: ResMut<SnapshotExport>,
    mut requests: EventWriter<RequestSnapshot>,
    mut ready: EventReader<SnapshotReady>,
    mut exit: EventWriter<AppExit>,
) {
    export.frame += 1;
    if export.frame == SNAPSHOT_SETTLE_FRAMES {
        requests.send(RequestSnapshot);
    }

    let Some(SnapshotReady(url)) = ready.read().last() else {
        return;
    };
    let Some(png) = url.as_deref().and_then(decode_png_data_url) else {
        warn!("No snapshot available, nothing written");
        exit.send(AppExit::error());
        return;
    };
    match std::fs::write(&export.path, &png) {
        Ok(()) => {
            info!("Snapshot written to {} ({} bytes)", export.path.display(), png.len());
            exit.send(AppExit::Success);
        }
        Err(e) => {
            warn!("Could not write snapshot {}: {e}", export.path.display());
            exit.send(AppExit::error());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_extension_check() {
        assert!(is_json(Path::new("tokyo.json")));
        assert!(is_json(Path::new("/tmp/SITE.JSON")));
        assert!(!is_json(Path::new("tower.png")));
        assert!(!is_json(Path::new("json")));
    }

    #[test]
    fn test_unreadable_assessment_falls_back_to_demo() {
        let result = read_assessment(Path::new("/nonexistent/assessment.json"));
        assert_eq!(result, RiskAssessmentResult::demo());
    }
}
