//! Game state and core simulation types
//!
//! One `GameState` value owns everything that changes during a run. The loop
//! driver passes it by reference into `tick`; nothing else mutates it.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::InputMapper;
use super::kinematics::Body;
use super::spawn::{SpawnWindow, respawn};
use crate::consts::{MAX_CARROTS, MAX_RAINS};
use crate::settings::Settings;

/// How the run stands. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Playing,
    Won,
    Lost,
}

/// Fixed geometry consulted every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
    /// Inclusive range for the player's x
    pub player_x: (i32, i32),
    /// Inclusive range for the player's y
    pub player_y: (i32, i32),
    /// Where recycled drops and carrots reappear
    pub respawn: SpawnWindow,
}

impl Playfield {
    /// Whether a player top-left corner is inside the allowed ranges
    pub fn player_in_bounds(&self, pos: IVec2) -> bool {
        (self.player_x.0..=self.player_x.1).contains(&pos.x)
            && (self.player_y.0..=self.player_y.1).contains(&pos.y)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed, logged so a run can be replayed
    pub seed: u64,
    pub playfield: Playfield,
    /// The rabbit
    pub player: Body,
    /// Falling drops; touching one loses the game
    pub hazards: [Body; MAX_RAINS],
    /// Falling carrots; touching one scores a point
    pub rewards: [Body; MAX_CARROTS],
    pub score: u32,
    /// Last elapsed-seconds value reported by the clock (HUD only)
    pub elapsed_secs: u32,
    pub outcome: Outcome,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    pub input: InputMapper,
    pub(super) rng: Pcg32,
}

impl GameState {
    /// Create a new game with entities scattered above the screen.
    ///
    /// `settings` must have passed [`Settings::validate`]; inverted spawn
    /// ranges panic in the RNG.
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let (px, py) = settings.player_start;
        let (pw, ph) = settings.player_size;
        let hazard = Body::new(IVec2::ZERO, settings.hazard_size.into());
        let reward = Body::new(IVec2::ZERO, settings.reward_size.into());

        let mut state = Self {
            seed,
            playfield: settings.playfield(),
            player: Body::new(IVec2::new(px, py), IVec2::new(pw, ph)),
            hazards: [hazard; MAX_RAINS],
            rewards: [reward; MAX_CARROTS],
            score: 0,
            elapsed_secs: 0,
            outcome: Outcome::Playing,
            time_ticks: 0,
            input: InputMapper::new(settings.speed_delta.into(), settings.ignore_key_repeat),
            rng: Pcg32::seed_from_u64(seed),
        };

        for body in state.hazards.iter_mut().chain(state.rewards.iter_mut()) {
            respawn(body, &settings.initial_spawn, &mut state.rng);
        }

        state
    }
}
