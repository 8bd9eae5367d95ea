//! Obstacle spawn policy
//!
//! Decides the next obstacle's family (ground vs air) and, within air, its
//! variant, while avoiding monotonous repetition: a bounded spawn history
//! nudges the air probability back toward balance, a hard cap breaks
//! same-family streaks, and an independent cycle guarantees a large static
//! air obstacle every few air spawns.
//!
//! The policy owns its own seeded RNG so whole runs replay deterministically
//! from a seed. It never fails; out-of-range draws are clamped.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Motion, Obstacle, ObstacleKind};
use crate::consts::*;

/// Chance a non-forced air spawn comes out large anyway
const LARGE_AIR_PROBABILITY: f64 = 0.15;

/// Coarse spawn category used for balancing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Ground,
    Air,
}

impl Family {
    fn opposite(self) -> Self {
        match self {
            Family::Ground => Family::Air,
            Family::Air => Family::Ground,
        }
    }
}

/// Stateful spawn decision helper
#[derive(Debug, Clone)]
pub struct SpawnPolicy {
    rng: Pcg32,
    /// Most recent spawn families, newest last, bounded length
    history: VecDeque<Family>,
    streak_family: Option<Family>,
    streak_len: u32,
    /// Air spawns since the last large one
    air_since_large: u32,
    /// Air spawns after which the next one is forced large
    large_interval: u32,
}

impl SpawnPolicy {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let large_interval = rng.random_range(LARGE_AIR_CYCLE_MIN..=LARGE_AIR_CYCLE_MAX);
        Self {
            rng,
            history: VecDeque::with_capacity(SPAWN_HISTORY_LEN),
            streak_family: None,
            streak_len: 0,
            air_since_large: 0,
            large_interval,
        }
    }

    /// Draw the frames until the next spawn; the range shrinks with
    /// difficulty but never below the minimum gap
    pub fn next_countdown(&mut self, difficulty: f32) -> u32 {
        let reduction = (difficulty * SPAWN_MAX_REDUCTION as f32).floor() as u32;
        let min = SPAWN_BASE_MIN.saturating_sub(reduction).max(SPAWN_MIN_GAP);
        let max = SPAWN_BASE_MAX.saturating_sub(reduction).max(min + SPAWN_MIN_SPAN);
        self.rng.random_range(min..=max)
    }

    /// Create the next obstacle, spawned just past the right edge
    pub fn spawn(&mut self, difficulty: f32, speed: f32) -> Obstacle {
        let family = self.pick_family(difficulty);
        self.record(family);

        let x = WORLD_WIDTH + self.rng.random_range(0.0..=SPAWN_X_JITTER);
        match family {
            Family::Ground => self.spawn_ground(x, speed),
            Family::Air => self.spawn_air(x, speed),
        }
    }

    /// Air probability: slight ground bias at high difficulty, corrected by
    /// the recent-history air ratio, clamped to a sane band
    fn air_probability(&self, difficulty: f32) -> f64 {
        let mut p = 0.5 - 0.1 * difficulty as f64;
        if !self.history.is_empty() {
            let air = self.history.iter().filter(|f| **f == Family::Air).count();
            let ratio = air as f64 / self.history.len() as f64;
            if ratio > 0.6 {
                p -= 0.15;
            } else if ratio < 0.4 {
                p += 0.15;
            }
        }
        p.clamp(AIR_PROBABILITY_MIN, AIR_PROBABILITY_MAX)
    }

    fn pick_family(&mut self, difficulty: f32) -> Family {
        let p = self.air_probability(difficulty);
        let mut family = if self.rng.random_bool(p) {
            Family::Air
        } else {
            Family::Ground
        };
        // Never extend a same-family streak past the cap
        if self.streak_family == Some(family) && self.streak_len >= MAX_SAME_FAMILY_STREAK {
            family = family.opposite();
        }
        family
    }

    fn record(&mut self, family: Family) {
        if self.streak_family == Some(family) {
            self.streak_len += 1;
        } else {
            self.streak_family = Some(family);
            self.streak_len = 1;
        }
        if self.history.len() == SPAWN_HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(family);
    }

    fn spawn_ground(&mut self, x: f32, speed: f32) -> Obstacle {
        let width = self.rng.random_range(35.0..=60.0);
        let base_height: f32 = self.rng.random_range(30.0..=60.0);
        // Trimmed height keeps single jumps viable
        let height = (base_height * 0.8).round().max(12.0);
        Obstacle {
            pos: Vec2::new(x, FLOOR_Y - height),
            size: Vec2::new(width, height),
            speed,
            kind: ObstacleKind::Ground,
            motion: Motion::Fixed,
        }
    }

    fn spawn_air(&mut self, x: f32, speed: f32) -> Obstacle {
        self.air_since_large += 1;
        let forced_large = self.air_since_large >= self.large_interval;
        let large = forced_large || self.rng.random_bool(LARGE_AIR_PROBABILITY);
        if large {
            self.air_since_large = 0;
            self.large_interval = self
                .rng
                .random_range(LARGE_AIR_CYCLE_MIN..=LARGE_AIR_CYCLE_MAX);
            self.spawn_air_large(x, speed)
        } else {
            self.spawn_air_oscillating(x, speed)
        }
    }

    fn spawn_air_oscillating(&mut self, x: f32, speed: f32) -> Obstacle {
        let width = self.rng.random_range(35.0..=60.0);
        let height = self.rng.random_range(30.0..=60.0);
        let base_y = self.rng.random_range(120.0..=180.0);
        Obstacle {
            pos: Vec2::new(x, base_y),
            size: Vec2::new(width, height),
            speed,
            kind: ObstacleKind::AirOscillating,
            motion: Motion::Oscillate {
                base_y,
                amplitude: self.rng.random_range(15.0..=35.0),
                phase: self.rng.random_range(0.0..TAU),
                phase_speed: self.rng.random_range(0.05..=0.12),
            },
        }
    }

    fn spawn_air_large(&mut self, x: f32, speed: f32) -> Obstacle {
        let width = self.rng.random_range(70.0..=100.0);
        let height: f32 = self.rng.random_range(60.0..=90.0);
        let lane_bottom = FLOOR_Y - height - AIR_LANE_FLOOR_CLEARANCE;
        let y = self.rng.random_range(AIR_LANE_TOP..=lane_bottom.max(AIR_LANE_TOP));
        Obstacle {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            speed,
            kind: ObstacleKind::AirStaticLarge,
            motion: Motion::Shake {
                phase: self.rng.random_range(0.0..TAU),
                speed: self.rng.random_range(0.08..=0.15),
                amplitude: self.rng.random_range(4.0..=9.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn family_of(obstacle: &Obstacle) -> Family {
        if obstacle.kind.is_air() {
            Family::Air
        } else {
            Family::Ground
        }
    }

    #[test]
    fn test_streak_never_exceeds_cap() {
        let mut policy = SpawnPolicy::new(0xC0FFEE);
        let mut streak = 0u32;
        let mut last = None;
        for _ in 0..1000 {
            let family = family_of(&policy.spawn(0.5, 5.0));
            if last == Some(family) {
                streak += 1;
            } else {
                streak = 1;
                last = Some(family);
            }
            assert!(streak <= MAX_SAME_FAMILY_STREAK);
        }
    }

    #[test]
    fn test_large_air_appears_every_cycle() {
        let mut policy = SpawnPolicy::new(42);
        let mut air_since_large = 0u32;
        for _ in 0..1000 {
            let obstacle = policy.spawn(0.3, 5.0);
            match obstacle.kind {
                ObstacleKind::AirStaticLarge => air_since_large = 0,
                ObstacleKind::AirOscillating => {
                    air_since_large += 1;
                    assert!(air_since_large < LARGE_AIR_CYCLE_MAX);
                }
                ObstacleKind::Ground => {}
            }
        }
    }

    #[test]
    fn test_both_families_well_represented() {
        let mut policy = SpawnPolicy::new(7);
        let total = 1000;
        let air = (0..total)
            .filter(|_| policy.spawn(0.0, 5.0).kind.is_air())
            .count();
        let ratio = air as f64 / total as f64;
        assert!(ratio > 0.3 && ratio < 0.7, "air ratio {ratio}");
    }

    #[test]
    fn test_countdown_shrinks_with_difficulty_but_keeps_floor() {
        let mut policy = SpawnPolicy::new(9);
        for _ in 0..200 {
            let easy = policy.next_countdown(0.0);
            assert!((SPAWN_BASE_MIN..=SPAWN_BASE_MAX).contains(&easy));
            let hard = policy.next_countdown(1.0);
            assert!(hard >= SPAWN_MIN_GAP);
            assert!(hard <= SPAWN_BASE_MAX - SPAWN_MAX_REDUCTION);
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = SpawnPolicy::new(1234);
        let mut b = SpawnPolicy::new(1234);
        for _ in 0..50 {
            let oa = a.spawn(0.2, 6.0);
            let ob = b.spawn(0.2, 6.0);
            assert_eq!(oa.kind, ob.kind);
            assert_eq!(oa.pos, ob.pos);
            assert_eq!(oa.size, ob.size);
        }
    }

    proptest! {
        #[test]
        fn prop_spawns_inside_world_bands(seed in any::<u64>(), difficulty in 0.0f32..=1.0) {
            let mut policy = SpawnPolicy::new(seed);
            for _ in 0..100 {
                let obstacle = policy.spawn(difficulty, 5.0);
                prop_assert!(obstacle.pos.x >= WORLD_WIDTH);
                prop_assert!(obstacle.pos.x <= WORLD_WIDTH + SPAWN_X_JITTER);
                match obstacle.kind {
                    ObstacleKind::Ground => {
                        prop_assert!((obstacle.pos.y + obstacle.size.y - FLOOR_Y).abs() < 1e-3);
                        prop_assert!(obstacle.size.y >= 12.0);
                    }
                    _ => {
                        prop_assert!(obstacle.pos.y >= AIR_LANE_TOP);
                        prop_assert!(
                            obstacle.pos.y + obstacle.size.y
                                <= FLOOR_Y - AIR_LANE_FLOOR_CLEARANCE + 1e-3
                        );
                    }
                }
            }
        }
    }
}
