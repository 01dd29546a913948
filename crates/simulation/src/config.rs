//! Tower-wide constants shared by the geometry, hazard and rendering layers.

/// Number of floors generated for every tower, regardless of the requested
/// building height.
pub const FLOOR_COUNT: usize = 30;

/// Height of a single floor band in world units.
pub const FLOOR_HEIGHT: f32 = 0.4;

/// Multiplier applied on top of `FLOOR_HEIGHT` to leave a visible gap between
/// stacked floors.
pub const FLOOR_STACKING: f32 = 1.1;

/// Vertical distance between the bases of two consecutive floors.
pub const FLOOR_PITCH: f32 = FLOOR_HEIGHT * FLOOR_STACKING;

/// Thickness of a floor slab.
pub const SLAB_THICKNESS: f32 = 0.08;

/// Radius of the ground-floor footprint before taper is applied.
pub const FOOTPRINT_RADIUS: f32 = 2.0;

/// Fallback building height (metres) when the assessment omits it.
pub const DEFAULT_BUILDING_HEIGHT: f32 = 300.0;

pub const MECHANICAL_FLOOR_INTERVAL: usize = 15;
pub const BALCONY_FLOOR_INTERVAL: usize = 5;
pub const DIAGRID_NODE_INTERVAL: usize = 4;
pub const OUTRIGGER_FLOOR_INTERVAL: usize = 10;
pub const INSULATION_FLOOR_INTERVAL: usize = 3;

/// Floor carrying the cutaway callout labels (the midpoint of the stack).
pub const CALLOUT_FLOOR: usize = FLOOR_COUNT / 2;

// ---------------------------------------------------------------------------
// Hazard simulation tuning (all rates are per rendered frame)
// ---------------------------------------------------------------------------

/// Idle turntable rotation in radians per frame.
pub const IDLE_SPIN_PER_FRAME: f32 = 0.002;

/// Fraction of the remaining sway removed each frame once a quake stops.
pub const SWAY_DECAY: f32 = 0.1;

/// Peak roll/pitch in radians before the seismic tier scale is applied.
pub const QUAKE_BASE_AMPLITUDE: f32 = 0.02;
pub const QUAKE_HIGH_SCALE: f32 = 2.5;
pub const QUAKE_LOW_SCALE: f32 = 1.0;

/// Angular frequencies (rad/s) of the roll and pitch terms. Kept distinct so
/// the two axes never move in lockstep.
pub const QUAKE_ROLL_FREQUENCY: f32 = 14.0;
pub const QUAKE_PITCH_FREQUENCY: f32 = 11.0;
pub const QUAKE_TORSION_FREQUENCY: f32 = 7.0;
pub const QUAKE_TORSION_AMPLITUDE: f32 = 0.01;

pub const FLOOD_RISE_RATE: f32 = 0.02;
pub const FLOOD_RECEDE_RATE: f32 = 0.05;

/// Resting height of the flood plane, just below the ground.
pub const FLOOD_REST_HEIGHT: f32 = -0.5;
pub const FLOOD_HIGH_TARGET: f32 = 6.0;
pub const FLOOD_LOW_TARGET: f32 = 2.5;
pub const FLOOD_MAX_OPACITY: f32 = 0.6;

/// Fire glow is `FIRE_BASE_GLOW ± FIRE_FLICKER` while the fire simulation runs.
pub const FIRE_BASE_GLOW: f32 = 0.85;
pub const FIRE_FLICKER: f32 = 0.15;
pub const FIRE_FLICKER_FREQUENCY: f32 = 9.0;
