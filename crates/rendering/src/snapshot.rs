//! Snapshot capability: captures the displayed frame as a PNG data URL for
//! external report generators.
//!
//! Capture is asynchronous. A [`RequestSnapshot`] event spawns a screenshot of
//! the primary window; when the GPU readback lands, the frame is encoded and
//! answered with a [`SnapshotReady`] event. [`SnapshotCapability`] also keeps
//! the last capture of the scene on screen: it is dropped as soon as the plan,
//! the hazard or the cutaway changes, and retaken once the new scene has
//! settled. Every failure is reported as `None`, never as a fault.

use std::fmt;
use std::io::Cursor;

use base64::Engine;
use bevy::prelude::*;
use bevy::render::view::screenshot::{Screenshot, ScreenshotCaptured};
use bevy::window::PrimaryWindow;

use simulation::building_plan::BuildingPlan;
use simulation::hazard_sim::{CutawayMode, HazardController, SimulationState};

const DATA_URL_PREFIX: &str = "data:image/png;base64,";
/// Frames a new scene is left to render before it is captured for the cache.
const SCENE_SETTLE_FRAMES: u32 = 10;
/// A capture with no readback after this many frames is given up on.
const CAPTURE_TIMEOUT_FRAMES: u32 = 60;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SnapshotError {
    /// No primary window exists to capture.
    NoSurface,
    /// The window exists but has not presented a frame yet.
    NoFrameRendered,
    /// The captured frame could not be converted to PNG.
    Encode(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::NoSurface => write!(f, "no render surface to capture"),
            SnapshotError::NoFrameRendered => write!(f, "no frame has been rendered yet"),
            SnapshotError::Encode(e) => write!(f, "PNG encoding failed: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

// ---------------------------------------------------------------------------
// Resource & events
// ---------------------------------------------------------------------------

/// What is on screen, as far as a snapshot is concerned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SceneKey {
    generation: u64,
    cutaway: bool,
    state: SimulationState,
}

#[derive(Debug, Clone, Copy)]
struct PendingCapture {
    ticket: u64,
    scene: SceneKey,
    frames_waited: u32,
    /// Someone sent a [`RequestSnapshot`] and waits for a [`SnapshotReady`].
    requested: bool,
}

#[derive(Resource, Debug, Default)]
pub struct SnapshotCapability {
    frames_rendered: u64,
    scene: SceneKey,
    frames_since_change: u32,
    next_ticket: u64,
    pending: Option<PendingCapture>,
    latest: Option<String>,
}

impl SnapshotCapability {
    /// The displayed scene as a `data:image/png;base64,...` string, or `None`
    /// when nothing has been rendered yet or the current scene has not been
    /// captured yet. Never returns an image of an earlier plan, hazard or
    /// cutaway state.
    pub fn capture_snapshot(&self) -> Option<String> {
        if self.frames_rendered == 0 {
            return None;
        }
        self.latest.clone()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// A capture is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn check_ready(&self, has_surface: bool) -> Result<(), SnapshotError> {
        if !has_surface {
            return Err(SnapshotError::NoSurface);
        }
        if self.frames_rendered == 0 {
            return Err(SnapshotError::NoFrameRendered);
        }
        Ok(())
    }

    /// Records the scene on screen. A different scene drops the cached image.
    fn observe_scene(&mut self, scene: SceneKey) -> bool {
        if scene == self.scene {
            self.frames_since_change = self.frames_since_change.saturating_add(1);
            return false;
        }
        self.scene = scene;
        self.frames_since_change = 0;
        self.latest = None;
        true
    }

    fn needs_refresh(&self) -> bool {
        self.latest.is_none()
            && self.pending.is_none()
            && self.frames_rendered > 0
            && self.frames_since_change >= SCENE_SETTLE_FRAMES
    }

    fn begin_capture(&mut self, requested: bool) -> u64 {
        self.next_ticket += 1;
        self.pending = Some(PendingCapture {
            ticket: self.next_ticket,
            scene: self.scene,
            frames_waited: 0,
            requested,
        });
        self.next_ticket
    }

    /// Ages the pending capture. Returns it once it has timed out.
    fn expire_pending(&mut self) -> Option<PendingCapture> {
        let pending = self.pending.as_mut()?;
        pending.frames_waited += 1;
        if pending.frames_waited <= CAPTURE_TIMEOUT_FRAMES {
            return None;
        }
        self.pending.take()
    }

    /// Settles capture `ticket`, caching `url` if the scene is unchanged since
    /// the capture began. Returns whether a requester is waiting, or `None`
    /// for a capture that was already given up on.
    fn settle_capture(&mut self, ticket: u64, url: Option<&String>) -> Option<bool> {
        if self.pending.map(|p| p.ticket) != Some(ticket) {
            return None;
        }
        let pending = self.pending.take()?;
        if pending.scene == self.scene {
            if let Some(url) = url {
                self.latest = Some(url.clone());
            }
        }
        Some(pending.requested)
    }
}

/// Marks the screenshot entity spawned for a capture.
#[derive(Component, Debug, Clone, Copy)]
struct SnapshotTicket(u64);

/// Asks for a capture of the next displayed frame.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RequestSnapshot;

/// Result of a [`RequestSnapshot`]: the PNG data URL, or `None` when no image
/// is available.
#[derive(Event, Debug, Clone)]
pub struct SnapshotReady(pub Option<String>);

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

pub(crate) fn encode_png_data_url(image: Image) -> Result<String, SnapshotError> {
    let dynamic = image
        .try_into_dynamic()
        .map_err(|e| SnapshotError::Encode(e.to_string()))?;
    let mut png = Vec::new();
    dynamic
        .to_rgba8()
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| SnapshotError::Encode(e.to_string()))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&png);
    Ok(format!("{DATA_URL_PREFIX}{encoded}"))
}

/// Splits a data URL produced by [`encode_png_data_url`] back into PNG bytes.
pub fn decode_png_data_url(url: &str) -> Option<Vec<u8>> {
    let payload = url.strip_prefix(DATA_URL_PREFIX)?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Counts frames presented to the primary window.
fn count_rendered_frames(
    windows: Query<(), With<PrimaryWindow>>,
    mut capability: ResMut<SnapshotCapability>,
) {
    if windows.get_single().is_ok() {
        capability.frames_rendered += 1;
    }
}

fn track_scene(
    plan: Res<BuildingPlan>,
    cutaway: Res<CutawayMode>,
    controller: Res<HazardController>,
    mut capability: ResMut<SnapshotCapability>,
) {
    let scene = SceneKey {
        generation: plan.generation,
        cutaway: cutaway.is_active(),
        state: controller.state(),
    };
    if capability.observe_scene(scene) {
        debug!("Scene changed, cached snapshot dropped");
    }
}

fn expire_stalled_capture(
    mut capability: ResMut<SnapshotCapability>,
    mut ready: EventWriter<SnapshotReady>,
) {
    let Some(pending) = capability.expire_pending() else {
        return;
    };
    warn!(
        "Snapshot unavailable: no frame captured after {} frames",
        CAPTURE_TIMEOUT_FRAMES
    );
    if pending.requested {
        ready.send(SnapshotReady(None));
    }
}

fn spawn_capture(commands: &mut Commands, capability: &mut SnapshotCapability, requested: bool) {
    let ticket = capability.begin_capture(requested);
    commands
        .spawn((Screenshot::primary_window(), SnapshotTicket(ticket)))
        .observe(store_captured_frame);
}

fn handle_snapshot_requests(
    mut commands: Commands,
    mut requests: EventReader<RequestSnapshot>,
    windows: Query<(), With<PrimaryWindow>>,
    mut capability: ResMut<SnapshotCapability>,
    mut ready: EventWriter<SnapshotReady>,
) {
    if requests.is_empty() {
        return;
    }
    // Several requests in one frame all resolve to the same capture.
    requests.clear();

    if let Err(e) = capability.check_ready(windows.get_single().is_ok()) {
        warn!("Snapshot unavailable: {e}");
        ready.send(SnapshotReady(None));
        return;
    }
    if let Some(pending) = capability.pending.as_mut() {
        pending.requested = true;
        return;
    }

    spawn_capture(&mut commands, &mut capability, true);
    info!("Snapshot requested");
}

/// Retakes the cached image once a new scene has settled.
fn refresh_snapshot(
    mut commands: Commands,
    windows: Query<(), With<PrimaryWindow>>,
    mut capability: ResMut<SnapshotCapability>,
) {
    if windows.get_single().is_err() || !capability.needs_refresh() {
        return;
    }
    spawn_capture(&mut commands, &mut capability, false);
}

fn store_captured_frame(
    trigger: Trigger<ScreenshotCaptured>,
    tickets: Query<&SnapshotTicket>,
    mut capability: ResMut<SnapshotCapability>,
    mut ready: EventWriter<SnapshotReady>,
) {
    let Ok(&SnapshotTicket(ticket)) = tickets.get(trigger.entity()) else {
        return;
    };
    let url = match encode_png_data_url(trigger.event().0.clone()) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Snapshot unavailable: {e}");
            None
        }
    };
    let Some(requested) = capability.settle_capture(ticket, url.as_ref()) else {
        debug!("Dropping late snapshot capture {ticket}");
        return;
    };
    if let Some(url) = &url {
        info!("Snapshot captured ({} bytes)", url.len());
    }
    if requested {
        ready.send(SnapshotReady(url));
    }
}

pub struct SnapshotPlugin;

impl Plugin for SnapshotPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SnapshotCapability>()
            .add_event::<RequestSnapshot>()
            .add_event::<SnapshotReady>()
            .add_systems(
                Update,
                (
                    track_scene,
                    expire_stalled_capture,
                    handle_snapshot_requests,
                    refresh_snapshot,
                )
                    .chain()
                    .after(simulation::TowerSet::Tick),
            )
            .add_systems(Last, count_rendered_frames);
    }
}
