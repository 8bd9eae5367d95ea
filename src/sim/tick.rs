//! Per-frame simulation tick
//!
//! One call advances the world by exactly one 60 Hz frame. The frame counter
//! is the only clock: physics constants are per-frame, and the shot rate
//! limit is expressed in frames.

use glam::Vec2;

use super::collision::lethal_overlap;
use super::state::{Bullet, GameEvent, GameState, RunPhase};
use crate::consts::*;
use crate::min_shot_interval_frames;

/// Commands collected by the host since the previous tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Buffer a jump (Running only)
    pub jump: bool,
    /// Fire a bullet, subject to the rate limit (Running only)
    pub shoot: bool,
    /// Begin a run (Idle only)
    pub start: bool,
    /// Reset and begin a new run (GameOver only)
    pub restart: bool,
}

/// Advance the game by one frame and return the events it produced
///
/// Never panics and never touches rendering, audio, or storage; invalid
/// commands for the current phase are silently dropped.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        RunPhase::Idle => {
            if input.start {
                state.reset();
                log::info!("run started (seed {})", state.seed);
            }
            return events;
        }
        RunPhase::GameOver => {
            if input.restart {
                state.reset();
                log::info!("run restarted (seed {})", state.seed);
            }
            return events;
        }
        RunPhase::Running => {}
    }

    state.frame += 1;
    let score_before = state.score;

    // Commands first: jumps buffer, shots are rate limited
    if input.jump {
        state.jump_buffer_frames = JUMP_BUFFER_FRAMES;
    }
    if input.shoot && shot_allowed(state) {
        state.last_shot_frame = Some(state.frame);
        state.bullets.push(Bullet {
            pos: Vec2::new(
                state.player.pos.x + PLAYER_WIDTH,
                state.player.pos.y + PLAYER_HEIGHT / 2.0 - BULLET_HEIGHT / 2.0,
            ),
        });
        events.push(GameEvent::ShotFired);
    }

    // 1. Jump-assist bookkeeping
    if state.player.grounded {
        state.coyote_frames = COYOTE_FRAMES;
    } else {
        state.coyote_frames = state.coyote_frames.saturating_sub(1);
    }
    state.jump_buffer_frames = state.jump_buffer_frames.saturating_sub(1);

    // 2. Consume a buffered jump before the physics step
    try_consume_jump(state);

    // 3. Vertical physics with ground clamp
    state.player.vel_y += GRAVITY;
    state.player.pos.y += state.player.vel_y;
    if state.player.pos.y > PLAYER_GROUND_Y {
        state.player.pos.y = PLAYER_GROUND_Y;
        state.player.vel_y = 0.0;
        state.player.grounded = true;
        state.player.jump_count = 0;
    }

    // 4. A jump buffered just before landing fires immediately (bunny hop)
    if state.player.grounded {
        try_consume_jump(state);
    }

    // 5. Ease toward the on-screen x; advance the run cycle while grounded
    if state.player.pos.x < PLAYER_TARGET_X {
        state.player.pos.x = (state.player.pos.x + PLAYER_FORWARD_SPEED).min(PLAYER_TARGET_X);
    }
    if state.player.grounded {
        state.player.run_phase = state.player.run_phase.wrapping_add(1);
    }

    // 6. Bullets advance; drop any past the right edge
    for bullet in &mut state.bullets {
        bullet.pos.x += BULLET_SPEED;
    }
    state.bullets.retain(|b| b.pos.x < WORLD_WIDTH);

    // 7. Spawn on countdown expiry
    state.spawn_countdown = state.spawn_countdown.saturating_sub(1);
    if state.spawn_countdown == 0 {
        let difficulty = state.difficulty();
        let speed = state.obstacle_speed();
        let obstacle = state.spawner.spawn(difficulty, speed);
        log::debug!(
            "spawned {:?} at x {:.0} (difficulty {:.2})",
            obstacle.kind,
            obstacle.pos.x,
            difficulty
        );
        state.obstacles.push(obstacle);
        state.spawn_countdown = state.spawner.next_countdown(difficulty);
    }

    // 8. Obstacles advance (scroll + variant motion)
    for obstacle in &mut state.obstacles {
        obstacle.advance();
    }

    // 9. Player collision against effective (shaken) bounds
    let hitbox = state.player.hitbox();
    let game_over = state
        .obstacles
        .iter()
        .any(|o| lethal_overlap(&hitbox, &o.effective_bounds()));

    // 10. Bullet hits: air obstacles die with the bullet, ground obstacles
    // absorb it. Mark first, remove after, so no index skew mid-scan.
    let mut dead_bullets = vec![false; state.bullets.len()];
    let mut dead_obstacles = vec![false; state.obstacles.len()];
    for (oi, obstacle) in state.obstacles.iter().enumerate() {
        let bounds = obstacle.effective_bounds();
        for (bi, bullet) in state.bullets.iter().enumerate() {
            if dead_bullets[bi] || dead_obstacles[oi] {
                continue;
            }
            if bullet.bounds().overlaps(&bounds) {
                dead_bullets[bi] = true;
                if obstacle.kind.is_air() {
                    dead_obstacles[oi] = true;
                    state.score += obstacle.kind.destroy_bonus();
                    events.push(GameEvent::ObstacleDestroyed {
                        kind: obstacle.kind,
                    });
                    log::debug!("destroyed {:?}", obstacle.kind);
                }
            }
        }
    }
    retain_by_index(&mut state.bullets, &dead_bullets);
    retain_by_index(&mut state.obstacles, &dead_obstacles);

    // 11. Off-screen cleanup (no score; distance scoring covers progress)
    state.obstacles.retain(|o| !o.off_screen());

    // 12. Distance-based scoring
    state.distance_progress += state.obstacle_speed();
    while state.distance_progress >= DISTANCE_PER_POINT {
        state.distance_progress -= DISTANCE_PER_POINT;
        state.score += 1;
    }
    if state.score != score_before {
        events.push(GameEvent::ScoreChanged { score: state.score });
    }

    // 13. Game-over finalize
    if game_over {
        state.phase = RunPhase::GameOver;
        let new_high_score = state.score > state.hi_score;
        if new_high_score {
            state.hi_score = state.score;
        }
        events.push(GameEvent::GameOver {
            final_score: state.score,
            new_high_score,
        });
        log::info!(
            "game over at frame {} with score {} (best {})",
            state.frame,
            state.score,
            state.hi_score
        );
    }

    events
}

/// A buffered jump fires when the budget allows: airborne double jumps are
/// always available, ground jumps also within the coyote window
fn try_consume_jump(state: &mut GameState) {
    if state.jump_buffer_frames == 0 || state.player.jump_count >= MAX_JUMPS {
        return;
    }
    let airborne_budget = state.player.jump_count > 0;
    if airborne_budget || state.player.grounded || state.coyote_frames > 0 {
        let first_jump = state.player.jump_count == 0;
        state.player.jump();
        state.jump_buffer_frames = 0;
        // A spent ground jump must not leave a stale grace window behind
        if first_jump {
            state.coyote_frames = 0;
        }
    }
}

fn shot_allowed(state: &GameState) -> bool {
    // Rate limit measured on the frame clock; `frame` is already this tick's
    let this_frame = state.frame;
    match state.last_shot_frame {
        None => true,
        Some(last) => this_frame.saturating_sub(last) >= min_shot_interval_frames(),
    }
}

fn retain_by_index<T>(items: &mut Vec<T>, dead: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !dead[index];
        index += 1;
        keep
    });
}
