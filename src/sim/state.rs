//! Game state and core simulation types
//!
//! The whole world lives in one explicit [`GameState`] value with a single
//! writer (the tick loop); hosts read it as the render snapshot between
//! ticks and it is replaced wholesale on reset.

use glam::Vec2;
use serde::Serialize;

use super::collision::Rect;
use super::spawn::SpawnPolicy;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunPhase {
    /// Before the first start command
    Idle,
    /// Active run
    Running,
    /// Run ended by a collision; waiting for restart
    GameOver,
}

/// Obstacle variant tag
///
/// `Ground` and the two air variants form the two spawn-balancing families;
/// only air variants can be shot down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObstacleKind {
    Ground,
    AirOscillating,
    AirStaticLarge,
}

impl ObstacleKind {
    pub fn is_air(&self) -> bool {
        !matches!(self, ObstacleKind::Ground)
    }

    /// Score bonus for destroying this variant with a bullet
    pub fn destroy_bonus(&self) -> u64 {
        match self {
            ObstacleKind::Ground => 0,
            ObstacleKind::AirOscillating => SCORE_AIR_DESTROY,
            ObstacleKind::AirStaticLarge => SCORE_AIR_LARGE_DESTROY,
        }
    }
}

/// Variant-specific vertical/cosmetic motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Motion {
    /// Holds its spawn y (ground obstacles)
    Fixed,
    /// Bobs around a base line, clamped to the air lane
    Oscillate {
        base_y: f32,
        amplitude: f32,
        phase: f32,
        phase_speed: f32,
    },
    /// Holds y but shakes horizontally; the offset shifts the effective
    /// bounds, not the logical x
    Shake {
        phase: f32,
        speed: f32,
        amplitude: f32,
    },
}

/// An obstacle entity scrolling leftward toward the player
#[derive(Debug, Clone, Serialize)]
pub struct Obstacle {
    /// Logical top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed (units/frame), fixed at spawn time
    pub speed: f32,
    pub kind: ObstacleKind,
    pub motion: Motion,
}

impl Obstacle {
    /// Advance one frame: scroll left and run the variant motion
    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
        match &mut self.motion {
            Motion::Fixed => {}
            Motion::Oscillate {
                base_y,
                amplitude,
                phase,
                phase_speed,
            } => {
                *phase += *phase_speed;
                let lane_bottom = FLOOR_Y - self.size.y - AIR_LANE_FLOOR_CLEARANCE;
                self.pos.y = (*base_y + *amplitude * phase.sin()).clamp(AIR_LANE_TOP, lane_bottom);
            }
            Motion::Shake { phase, speed, .. } => {
                *phase += *speed;
            }
        }
    }

    /// Horizontal display offset from the shake motion (0 for other variants)
    pub fn shake_offset(&self) -> f32 {
        match self.motion {
            Motion::Shake {
                phase, amplitude, ..
            } => phase.sin() * amplitude,
            _ => 0.0,
        }
    }

    /// Bounds used for both rendering and collision
    ///
    /// Includes the shake offset: collision must match the on-screen box,
    /// not the unshaken logical x.
    pub fn effective_bounds(&self) -> Rect {
        Rect::new(self.pos + Vec2::new(self.shake_offset(), 0.0), self.size)
    }

    /// Fully past the left edge, due for removal
    pub fn off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// A player bullet travelling rightward
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Bullet {
    /// Top-left corner; x is monotonically increasing
    pub pos: Vec2,
}

impl Bullet {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }
}

/// The auto-running player
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Top-left of the sprite box
    pub pos: Vec2,
    /// Vertical velocity (units/frame, positive = downward)
    pub vel_y: f32,
    pub grounded: bool,
    /// Jumps spent since last grounded; resets to 0 only on landing
    pub jump_count: u32,
    /// Cosmetic run-cycle counter, advances only while grounded
    pub run_phase: u32,
}

impl Player {
    fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_GROUND_Y),
            vel_y: 0.0,
            grounded: true,
            jump_count: 0,
            run_phase: 0,
        }
    }

    /// Full sprite box
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    /// Collision box, inset from the sprite on all sides
    pub fn hitbox(&self) -> Rect {
        self.bounds().inset(HITBOX_INSET_X, HITBOX_INSET_Y)
    }

    /// Apply an instantaneous jump impulse and spend one jump
    pub fn jump(&mut self) {
        self.vel_y = JUMP_VELOCITY;
        self.grounded = false;
        self.jump_count += 1;
    }
}

/// Discrete per-tick event for presentation/audio collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    /// A shoot command passed the rate limit and spawned a bullet
    ShotFired,
    /// A bullet destroyed an air obstacle
    ObstacleDestroyed { kind: ObstacleKind },
    /// Score changed this tick (at most one per tick, final value)
    ScoreChanged { score: u64 },
    /// The run ended; `new_high_score` is true if `final_score` beat the
    /// session best (the host persists it)
    GameOver {
        final_score: u64,
        new_high_score: bool,
    },
}

/// Complete game state (single writer: the tick loop)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed driving the spawn policy RNG
    pub seed: u64,
    pub phase: RunPhase,
    /// Frames elapsed in the current run (the simulation clock)
    pub frame: u64,
    pub score: u64,
    /// Session best; loaded from persistence by the host at startup
    pub hi_score: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub bullets: Vec<Bullet>,
    /// Frames until the next obstacle spawn
    pub spawn_countdown: u32,
    /// Fractional world distance toward the next score point
    pub distance_progress: f32,
    /// Frames a requested jump stays pending
    pub jump_buffer_frames: u32,
    /// Frames since leaving the ground during which a jump still counts
    /// as grounded
    pub coyote_frames: u32,
    /// Frame of the last accepted shot, for rate limiting
    pub last_shot_frame: Option<u64>,
    #[serde(skip)]
    pub spawner: SpawnPolicy,
}

impl GameState {
    /// Create an idle session with the given seed and persisted best score
    pub fn new(seed: u64, hi_score: u64) -> Self {
        let mut spawner = SpawnPolicy::new(seed);
        let spawn_countdown = spawner.next_countdown(0.0);
        Self {
            seed,
            phase: RunPhase::Idle,
            frame: 0,
            score: 0,
            hi_score,
            player: Player::new(),
            obstacles: Vec::new(),
            bullets: Vec::new(),
            spawn_countdown,
            distance_progress: 0.0,
            jump_buffer_frames: 0,
            coyote_frames: 0,
            last_shot_frame: None,
            spawner,
        }
    }

    /// Replace the run state wholesale and enter `Running`
    ///
    /// The seed and session best survive; everything else is rebuilt.
    pub fn reset(&mut self) {
        *self = Self::new(self.seed, self.hi_score);
        self.phase = RunPhase::Running;
    }

    /// Normalized difficulty in [0, 1], driven by score
    pub fn difficulty(&self) -> f32 {
        (self.score as f32 / SCORE_FOR_MAX_DIFFICULTY as f32).min(1.0)
    }

    /// Current obstacle speed: stepped level ramp plus a small per-5-score
    /// multiplicative bonus
    pub fn obstacle_speed(&self) -> f32 {
        let level = (self.difficulty() * MAX_SPEED_LEVEL as f32).floor();
        let stepped = BASE_OBSTACLE_SPEED + level * SPEED_PER_LEVEL;
        stepped * (1.0 + (self.score / 5) as f32 * 0.01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_grounded() {
        let state = GameState::new(7, 0);
        assert_eq!(state.phase, RunPhase::Idle);
        assert!(state.player.grounded);
        assert_eq!(state.player.pos.y, PLAYER_GROUND_Y);
        assert!(state.obstacles.is_empty());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_reset_enters_running_and_clears_run_state() {
        let mut state = GameState::new(7, 42);
        state.score = 99;
        state.bullets.push(Bullet {
            pos: Vec2::new(100.0, 100.0),
        });
        state.reset();
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.hi_score, 42);
        assert!(state.bullets.is_empty());
        assert!(state.spawn_countdown >= SPAWN_MIN_GAP);
    }

    #[test]
    fn test_difficulty_clamps_at_one() {
        let mut state = GameState::new(1, 0);
        state.score = SCORE_FOR_MAX_DIFFICULTY * 3;
        assert_eq!(state.difficulty(), 1.0);
    }

    #[test]
    fn test_obstacle_speed_ramp() {
        let mut state = GameState::new(1, 0);
        assert_eq!(state.obstacle_speed(), BASE_OBSTACLE_SPEED);

        state.score = SCORE_FOR_MAX_DIFFICULTY;
        let maxed = state.obstacle_speed();
        let stepped = BASE_OBSTACLE_SPEED + MAX_SPEED_LEVEL as f32 * SPEED_PER_LEVEL;
        let bonus = 1.0 + (state.score / 5) as f32 * 0.01;
        assert!((maxed - stepped * bonus).abs() < 1e-4);
    }

    #[test]
    fn test_shake_offset_moves_effective_bounds_only() {
        let obstacle = Obstacle {
            pos: Vec2::new(400.0, 150.0),
            size: Vec2::new(80.0, 70.0),
            speed: 5.0,
            kind: ObstacleKind::AirStaticLarge,
            motion: Motion::Shake {
                phase: std::f32::consts::FRAC_PI_2,
                speed: 0.1,
                amplitude: 6.0,
            },
        };
        assert!((obstacle.shake_offset() - 6.0).abs() < 1e-4);
        assert!((obstacle.effective_bounds().min.x - 406.0).abs() < 1e-4);
        // Logical x is unshaken
        assert_eq!(obstacle.pos.x, 400.0);
    }

    #[test]
    fn test_oscillation_clamped_to_air_lane() {
        let mut obstacle = Obstacle {
            pos: Vec2::new(400.0, 150.0),
            size: Vec2::new(50.0, 40.0),
            speed: 5.0,
            kind: ObstacleKind::AirOscillating,
            motion: Motion::Oscillate {
                base_y: 100.0,
                amplitude: 500.0,
                phase: 0.0,
                phase_speed: 0.3,
            },
        };
        for _ in 0..100 {
            obstacle.advance();
            assert!(obstacle.pos.y >= AIR_LANE_TOP);
            assert!(obstacle.pos.y + obstacle.size.y <= FLOOR_Y - AIR_LANE_FLOOR_CLEARANCE);
        }
    }
}
