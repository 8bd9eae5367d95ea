//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-counter clock only (one `tick` = one 60 Hz frame)
//! - Seeded RNG only
//! - No rendering, audio, or storage dependencies
//!
//! The host is the single writer's driver: it calls [`tick`] to completion
//! before scheduling the next frame and only reads the state in between.

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, lethal_overlap};
pub use spawn::SpawnPolicy;
pub use state::{Bullet, GameEvent, GameState, Motion, Obstacle, ObstacleKind, Player, RunPhase};
pub use tick::{TickInput, tick};
