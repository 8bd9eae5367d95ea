//! Logo Runner headless demo driver
//!
//! Runs the simulation without a renderer: a small reactive autoplayer jumps
//! over incoming ground obstacles and shoots at air obstacles on its flight
//! line. Useful as a soak test for the sim loop and as a host example.

use logo_runner::consts::*;
use logo_runner::highscore;
use logo_runner::sim::{GameEvent, GameState, ObstacleKind, RunPhase, TickInput, tick};

/// Frames to simulate across all runs (ten minutes of play at 60 Hz)
const DEMO_FRAMES: u64 = 36_000;

fn main() {
    env_logger::init();

    let seed: u64 = rand::random();
    let mut state = GameState::new(seed, highscore::load());
    log::info!("demo starting with seed {seed}");

    let mut runs = 0u32;
    for _ in 0..DEMO_FRAMES {
        let input = autoplay(&state);
        for event in tick(&mut state, &input) {
            match event {
                GameEvent::GameOver {
                    final_score,
                    new_high_score,
                } => {
                    runs += 1;
                    log::info!("run {runs} over: score {final_score}");
                    if new_high_score {
                        highscore::save(final_score);
                    }
                }
                GameEvent::ObstacleDestroyed { kind } => {
                    log::debug!("shot down {kind:?}");
                }
                _ => {}
            }
        }
    }

    println!("{runs} runs, best score {}", state.hi_score);
}

/// Reactive policy: start/restart immediately, jump at close ground
/// obstacles, shoot when an air obstacle crosses the bullet line
fn autoplay(state: &GameState) -> TickInput {
    match state.phase {
        RunPhase::Idle => TickInput {
            start: true,
            ..Default::default()
        },
        RunPhase::GameOver => TickInput {
            restart: true,
            ..Default::default()
        },
        RunPhase::Running => {
            let player_right = state.player.pos.x + PLAYER_WIDTH;
            let bullet_line = state.player.pos.y + PLAYER_HEIGHT / 2.0;

            let jump = state.player.grounded
                && state.obstacles.iter().any(|o| {
                    o.kind == ObstacleKind::Ground
                        && o.pos.x > player_right
                        && o.pos.x - player_right < 14.0 * o.speed
                });
            let shoot = state.obstacles.iter().any(|o| {
                o.kind.is_air()
                    && o.pos.x > player_right
                    && bullet_line >= o.pos.y
                    && bullet_line <= o.pos.y + o.size.y
            });

            TickInput {
                jump,
                shoot,
                ..Default::default()
            }
        }
    }
}
