//! Tuning constants for the simulation, the gesture classifier and the
//! terminal front end.
//!
//! The simulation works in a 400x600 logical canvas with the origin at the
//! top-left corner and y growing downward. These values are part of the
//! observable behavior of the game and are not configurable at runtime.

// Canvas geometry
pub const CANVAS_WIDTH: f64 = 400.0;
pub const CANVAS_HEIGHT: f64 = 600.0;
pub const GROUND_HEIGHT: f64 = 50.0;
/// y coordinate of the ground line (top edge of the ground strip).
pub const GROUND_Y: f64 = CANVAS_HEIGHT - GROUND_HEIGHT;

// Bird
pub const BIRD_X: f64 = 100.0;
pub const BIRD_SIZE: f64 = 30.0;
pub const BIRD_HALF: f64 = BIRD_SIZE / 2.0;
pub const BIRD_START_Y: f64 = CANVAS_HEIGHT / 2.0;

// Physics (per tick, 60 ticks/sec)
pub const GRAVITY: f64 = 0.5;
pub const FLAP_STRENGTH: f64 = -9.0;
pub const MAX_VELOCITY: f64 = 10.0;
/// A flap is accepted only when more than this many ticks have elapsed
/// since the last accepted flap.
pub const FLAP_COOLDOWN_TICKS: u64 = 15;

// Rotation (degrees, presentation only)
pub const ROTATION_PER_VELOCITY: f64 = 3.0;
pub const MIN_ROTATION_DEG: f64 = -30.0;
pub const MAX_ROTATION_DEG: f64 = 90.0;

// Pipes
pub const PIPE_COUNT: usize = 3;
pub const PIPE_WIDTH: f64 = 60.0;
pub const PIPE_GAP: f64 = 180.0;
pub const PIPE_SPEED: f64 = 2.0;
/// Fresh-game pipe layout as (x, gap_top) pairs.
pub const INITIAL_PIPES: [(f64, f64); PIPE_COUNT] = [
    (CANVAS_WIDTH, 200.0),
    (CANVAS_WIDTH + 250.0, 300.0),
    (CANVAS_WIDTH + 500.0, 250.0),
];
/// Recycled gaps start at least this far below the ceiling.
pub const PIPE_GAP_MARGIN_TOP: f64 = 50.0;
/// Width of the band a recycled gap top is drawn from.
pub const PIPE_GAP_RANGE: f64 = CANVAS_HEIGHT - GROUND_HEIGHT - PIPE_GAP - 100.0;

// Gesture thresholds (normalized landmark units)
pub const FIST_THRESHOLD: f64 = 0.08;
pub const OPEN_THRESHOLD: f64 = 0.18;

// Front-end timing
pub const DEFAULT_FPS: u32 = 60;
/// How long an emulated fist stays closed after a key press, in ms. Longer
/// than the usual terminal repeat delay (250-600 ms) so a held key never
/// opens the hand between repeats.
pub const KEY_HOLD_MS: u64 = 650;
