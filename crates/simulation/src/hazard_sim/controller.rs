//! Hazard state machine and its per-frame interpolation.
//!
//! The controller owns only visual modifier values. Nothing here touches the
//! floor stack, so switching hazards never disturbs the generated geometry.

use bevy::prelude::*;

use crate::config::{
    FIRE_BASE_GLOW, FIRE_FLICKER, FIRE_FLICKER_FREQUENCY, FLOOD_MAX_OPACITY, FLOOD_RECEDE_RATE,
    FLOOD_REST_HEIGHT, FLOOD_RISE_RATE, IDLE_SPIN_PER_FRAME, QUAKE_BASE_AMPLITUDE,
    QUAKE_PITCH_FREQUENCY, QUAKE_ROLL_FREQUENCY, QUAKE_TORSION_AMPLITUDE,
    QUAKE_TORSION_FREQUENCY, SWAY_DECAY,
};

use super::severity::SeverityTier;

/// The hazard currently being visualised. Exactly one is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SimulationState {
    #[default]
    Idle,
    Quake,
    Flood,
    Fire,
}

/// A user-selectable hazard simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HazardKind {
    Quake,
    Flood,
    Fire,
}

impl HazardKind {
    pub const ALL: [HazardKind; 3] = [HazardKind::Quake, HazardKind::Flood, HazardKind::Fire];

    pub fn state(self) -> SimulationState {
        match self {
            HazardKind::Quake => SimulationState::Quake,
            HazardKind::Flood => SimulationState::Flood,
            HazardKind::Fire => SimulationState::Fire,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HazardKind::Quake => "Earthquake",
            HazardKind::Flood => "Flood",
            HazardKind::Fire => "Fire",
        }
    }
}

impl SimulationState {
    /// State after the user selects `kind`: re-selecting the active hazard
    /// returns to idle, anything else switches directly.
    pub fn toggled(self, kind: HazardKind) -> Self {
        if self == kind.state() {
            SimulationState::Idle
        } else {
            kind.state()
        }
    }

    pub fn is_idle(self) -> bool {
        self == SimulationState::Idle
    }
}

/// Cross-section view flag. Independent of [`SimulationState`].
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CutawayMode(pub bool);

impl CutawayMode {
    pub fn toggle(&mut self) {
        self.0 = !self.0;
    }

    pub fn is_active(self) -> bool {
        self.0
    }
}

/// Interpolated values the renderer projects onto the scene every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardVisuals {
    /// Turntable rotation of the whole model (radians about +Y).
    pub model_yaw: f32,
    /// Quake sway about the Z axis.
    pub roll: f32,
    /// Quake sway about the X axis.
    pub pitch: f32,
    /// Extra quake twist about +Y, added on top of `model_yaw`.
    pub torsion: f32,
    pub flood_height: f32,
    pub flood_opacity: f32,
    /// Blend factor toward the hazard-red emissive, in [0, 1].
    pub fire_glow: f32,
}

impl Default for HazardVisuals {
    fn default() -> Self {
        Self {
            model_yaw: 0.0,
            roll: 0.0,
            pitch: 0.0,
            torsion: 0.0,
            flood_height: FLOOD_REST_HEIGHT,
            flood_opacity: 0.0,
            fire_glow: 0.0,
        }
    }
}

/// Moves `current` a fraction `rate` of the way toward `target`.
///
/// For `rate` in (0, 1] the result never passes `target`.
pub fn smooth_toward(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}

#[derive(Resource, Debug, Clone, Default)]
pub struct HazardController {
    state: SimulationState,
    seismic_tier: SeverityTier,
    flood_tier: SeverityTier,
    pub visuals: HazardVisuals,
}

impl HazardController {
    /// Fresh controller at rest in the idle state.
    pub fn new(seismic_tier: SeverityTier, flood_tier: SeverityTier) -> Self {
        Self {
            seismic_tier,
            flood_tier,
            ..Default::default()
        }
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Applies a user toggle. Returns the new state.
    pub fn toggle(&mut self, kind: HazardKind) -> SimulationState {
        self.state = self.state.toggled(kind);
        self.state
    }

    /// Advances every visual modifier by one frame.
    ///
    /// `elapsed_secs` is the render clock, used as the phase of the quake and
    /// fire oscillators. Smoothing rates are per call, so this must run once
    /// per displayed frame.
    pub fn tick(&mut self, elapsed_secs: f32, cutaway: bool) {
        let t = elapsed_secs;
        let v = &mut self.visuals;

        if self.state.is_idle() && !cutaway {
            v.model_yaw = (v.model_yaw + IDLE_SPIN_PER_FRAME) % std::f32::consts::TAU;
        }

        // Quake
        if self.state == SimulationState::Quake {
            let amplitude = QUAKE_BASE_AMPLITUDE * self.seismic_tier.quake_scale();
            v.roll = amplitude * (t * QUAKE_ROLL_FREQUENCY).sin();
            v.pitch = amplitude * (t * QUAKE_PITCH_FREQUENCY).sin();
            if cutaway {
                v.torsion = smooth_toward(v.torsion, 0.0, SWAY_DECAY);
            } else {
                v.torsion = QUAKE_TORSION_AMPLITUDE
                    * self.seismic_tier.quake_scale()
                    * (t * QUAKE_TORSION_FREQUENCY).sin();
            }
        } else {
            v.roll = smooth_toward(v.roll, 0.0, SWAY_DECAY);
            v.pitch = smooth_toward(v.pitch, 0.0, SWAY_DECAY);
            v.torsion = smooth_toward(v.torsion, 0.0, SWAY_DECAY);
        }

        // Flood
        if self.state == SimulationState::Flood {
            v.flood_height =
                smooth_toward(v.flood_height, self.flood_tier.flood_target(), FLOOD_RISE_RATE);
            v.flood_opacity = smooth_toward(v.flood_opacity, FLOOD_MAX_OPACITY, FLOOD_RISE_RATE);
        } else {
            v.flood_height = smooth_toward(v.flood_height, FLOOD_REST_HEIGHT, FLOOD_RECEDE_RATE);
            v.flood_opacity = smooth_toward(v.flood_opacity, 0.0, FLOOD_RECEDE_RATE);
        }

        // Fire is recomputed outright every frame.
        v.fire_glow = if self.state == SimulationState::Fire {
            (FIRE_BASE_GLOW + FIRE_FLICKER * (t * FIRE_FLICKER_FREQUENCY).sin()).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }
}
