//! Logo Runner - a side-scrolling runner-and-shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `highscore`: Best-score persistence (LocalStorage on web, stub on native)
//!
//! The crate owns no rendering, audio, or input handling. A host collects
//! abstract commands, calls [`sim::tick`] once per 60 Hz frame, draws from the
//! resulting [`sim::GameState`], and forwards the returned [`sim::GameEvent`]s
//! to its presentation collaborators.

pub mod highscore;
pub mod sim;

pub use sim::{GameEvent, GameState, ObstacleKind, RunPhase, TickInput, tick};

/// Game configuration constants
///
/// Every gameplay tunable lives here under one name; the simulation never
/// hard-codes a literal that a designer might want to retune.
pub mod consts {
    /// Simulation frame rate the frame-counter clock is calibrated to
    pub const FRAMES_PER_SECOND: u32 = 60;
    /// Milliseconds represented by one frame (used by the shot rate limit)
    pub const FRAME_MS: f32 = 1000.0 / FRAMES_PER_SECOND as f32;

    /// Play-field dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 320.0;
    /// Absolute ground line: obstacles stand on it, the player lands on it
    pub const FLOOR_Y: f32 = 280.0;

    /// Player sprite box
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Player top-left y while standing on the ground
    pub const PLAYER_GROUND_Y: f32 = FLOOR_Y - PLAYER_HEIGHT;
    /// Spawn x at run start; the player eases right from here
    pub const PLAYER_START_X: f32 = 50.0;
    /// On-screen x the player eases toward and then holds
    pub const PLAYER_TARGET_X: f32 = 260.0;
    /// Horizontal ease speed toward the target x (units/frame)
    pub const PLAYER_FORWARD_SPEED: f32 = 2.0;

    /// Downward acceleration (units/frame²); lower = longer airtime
    pub const GRAVITY: f32 = 0.72;
    /// Instantaneous jump velocity (negative = upward)
    pub const JUMP_VELOCITY: f32 = -14.5;
    /// Jump budget per airtime; 2 allows one mid-air double jump
    pub const MAX_JUMPS: u32 = 2;

    /// Frames a jump command stays buffered (~160 ms)
    pub const JUMP_BUFFER_FRAMES: u32 = 10;
    /// Frames after leaving the ground during which a jump still counts
    /// as grounded (~150 ms)
    pub const COYOTE_FRAMES: u32 = 9;

    /// Horizontal shrink of the player hitbox on each side
    pub const HITBOX_INSET_X: f32 = 6.0;
    /// Vertical shrink of the player hitbox on each side
    pub const HITBOX_INSET_Y: f32 = 4.0;
    /// Overlaps with an obstacle top no deeper than this are not lethal
    pub const VERTICAL_GRACE: f32 = 6.0;

    /// Bullet box and speed (units/frame, rightward)
    pub const BULLET_WIDTH: f32 = 16.0;
    pub const BULLET_HEIGHT: f32 = 6.0;
    pub const BULLET_SPEED: f32 = 8.0;
    /// Shot rate limit; commands inside the interval are dropped
    pub const MAX_SHOTS_PER_SECOND: u32 = 5;

    /// Base leftward obstacle speed (units/frame) before the difficulty ramp
    pub const BASE_OBSTACLE_SPEED: f32 = 5.0;
    /// Discrete speed levels unlocked across the difficulty ramp
    pub const MAX_SPEED_LEVEL: u32 = 4;
    /// Speed added per unlocked level (units/frame)
    pub const SPEED_PER_LEVEL: f32 = 1.0;
    /// Score at which difficulty reaches 1.0
    pub const SCORE_FOR_MAX_DIFFICULTY: u64 = 100;

    /// Spawn countdown range at difficulty 0 (frames)
    pub const SPAWN_BASE_MIN: u32 = 60;
    pub const SPAWN_BASE_MAX: u32 = 110;
    /// Countdown reduction at difficulty 1
    pub const SPAWN_MAX_REDUCTION: u32 = 40;
    /// Hard floor for the countdown minimum
    pub const SPAWN_MIN_GAP: u32 = 30;
    /// Minimum span kept between countdown min and max
    pub const SPAWN_MIN_SPAN: u32 = 5;
    /// Horizontal jitter added to the spawn x past the right edge
    pub const SPAWN_X_JITTER: f32 = 80.0;

    /// Recent spawns considered when balancing ground vs air
    pub const SPAWN_HISTORY_LEN: usize = 6;
    /// Longest run of same-family spawns allowed
    pub const MAX_SAME_FAMILY_STREAK: u32 = 2;
    /// Air probability bounds after history adjustment
    pub const AIR_PROBABILITY_MIN: f64 = 0.35;
    pub const AIR_PROBABILITY_MAX: f64 = 0.65;
    /// Every Nth air spawn is forced large, N drawn from this range per cycle
    pub const LARGE_AIR_CYCLE_MIN: u32 = 6;
    pub const LARGE_AIR_CYCLE_MAX: u32 = 8;

    /// Air lane the oscillating obstacles are clamped into
    pub const AIR_LANE_TOP: f32 = 90.0;
    /// Clearance kept between an air obstacle and the ground line
    pub const AIR_LANE_FLOOR_CLEARANCE: f32 = 10.0;

    /// World distance per score point (distance-based scoring)
    pub const DISTANCE_PER_POINT: f32 = 60.0;
    /// Destroy bonus for an oscillating air obstacle
    pub const SCORE_AIR_DESTROY: u64 = 5;
    /// Destroy bonus for a large static air obstacle
    pub const SCORE_AIR_LARGE_DESTROY: u64 = 15;
}

/// Minimum frames between two accepted shots, derived from the rate limit
#[inline]
pub fn min_shot_interval_frames() -> u64 {
    let interval_ms = 1000.0 / consts::MAX_SHOTS_PER_SECOND as f32;
    (interval_ms / consts::FRAME_MS).ceil() as u64
}
