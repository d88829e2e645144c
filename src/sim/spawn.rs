//! Spawn policy for falling drops and carrots
//!
//! Entities are never destroyed. When one leaves the bottom of the screen
//! (or a carrot is picked up) it is moved back above the top with a fresh
//! position and fall speed.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kinematics::Body;

/// Inclusive ranges a (re)spawned entity is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnWindow {
    /// Horizontal position range
    pub x: (i32, i32),
    /// Vertical position range, above the visible area
    pub y: (i32, i32),
    /// Downward speed range
    pub vy: (i32, i32),
}

/// Uniform integer in `[lo, hi]`
#[inline]
pub fn uniform<R: Rng>(rng: &mut R, (lo, hi): (i32, i32)) -> i32 {
    rng.random_range(lo..=hi)
}

/// Place a body somewhere inside the spawn window, falling straight down
pub fn respawn<R: Rng>(body: &mut Body, window: &SpawnWindow, rng: &mut R) {
    body.pos.x = uniform(rng, window.x);
    body.pos.y = uniform(rng, window.y);
    body.vel.x = 0;
    body.vel.y = uniform(rng, window.vy);
}

/// Seed for the run RNG, taken once per process from the wall clock
pub fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}
