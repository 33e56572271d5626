//! Simulation constants and tuning parameters.

// --- Cadences (virtual milliseconds) ---

/// Frame tick period. Drives starfield advancement and snapshot sampling.
pub const GAME_SPEED_MS: u64 = 40;

/// Fire-trigger sampling period.
pub const SHOOTING_FREQ_MS: u64 = 200;

/// Enemy spawn period.
pub const ENEMY_FREQ_MS: u64 = 1500;

/// Lower bound of an enemy's own shot-timer period (inclusive).
pub const ENEMY_SHOT_MIN_MS: u64 = 700;

/// Upper bound of an enemy's own shot-timer period (inclusive).
pub const ENEMY_SHOT_MAX_MS: u64 = 800;

// --- Kinematics (canvas units per tick) ---

/// Shot travel per tick: upward for hero shots, downward for enemy shots.
pub const SHOOTING_SPEED: f64 = 15.0;

/// Enemy downward drift per tick, applied only while alive.
pub const ENEMY_DRIFT: f64 = 5.0;

/// Enemy lateral jitter bound per tick (inclusive, integer units).
pub const ENEMY_JITTER: i32 = 15;

// --- Geometry ---

/// Enemies spawn this far above the visible area.
pub const ENEMY_SPAWN_Y: f64 = -30.0;

/// Ship baseline offset from the bottom edge.
pub const HERO_MARGIN: f64 = 30.0;

/// Axis-aligned collision half-extent, identical for every entity pair.
pub const COLLISION_HALF_EXTENT: f64 = 20.0;

/// Cull margin outside each canvas edge; entities beyond it are removed
/// by their owning track.
pub const CULL_MARGIN: f64 = 40.0;

/// Where a hit shot is parked until the next filter pass removes it.
pub const RETIRED_SHOT_POS: f64 = -100.0;

/// Default canvas size for headless runs and tests.
pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

// --- Starfield ---

/// Number of background stars; the set never grows or shrinks.
pub const STAR_COUNT: usize = 250;

/// Star size range [min, max). Size doubles as fall speed per tick.
pub const STAR_MIN_SIZE: f64 = 1.0;
pub const STAR_MAX_SIZE: f64 = 4.0;

// --- Scoring ---

/// Base score for a confirmed kill.
pub const SCORE_INCREASE: u64 = 10;

/// Extra score when a kill lands inside the rapid-kill window.
pub const RAPID_KILL_BONUS: u64 = 5;

/// Rapid-kill window in whole seconds between consecutive kills.
pub const RAPID_KILL_WINDOW_SECS: u64 = 3;
