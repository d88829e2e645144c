//! Rabbit Dodge - a falling-hazard arcade game
//!
//! Core modules:
//! - `sim`: Pure simulation (kinematics, collisions, spawning, game state)
//! - `renderer`: Drawing seam and frame/end-screen composition
//! - `platform`: Terminal and headless collaborators, elapsed-time clock
//! - `persistence`: Append-only score log
//! - `game`: Loop driver tying the collaborators to the simulation

pub mod error;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{GameError, Result};
pub use game::{Game, GameEnd};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 1024;
    pub const SCREEN_HEIGHT: i32 = 768;

    /// Player start position
    pub const PLAYER_START: (i32, i32) = (425, 638);
    /// Allowed player x range (inclusive)
    pub const PLAYER_X_RANGE: (i32, i32) = (0, 874);
    /// Allowed player y range (inclusive)
    pub const PLAYER_Y_RANGE: (i32, i32) = (450, 638);
    /// Player sprite box
    pub const PLAYER_SIZE: (i32, i32) = (150, 130);

    /// Number of falling drops
    pub const MAX_RAINS: usize = 5;
    /// Number of falling carrots
    pub const MAX_CARROTS: usize = 5;
    /// Shared drop sprite box
    pub const HAZARD_SIZE: (i32, i32) = (40, 64);
    /// Shared carrot sprite box
    pub const REWARD_SIZE: (i32, i32) = (64, 64);

    /// Velocity change per arrow key press (pixels/tick)
    pub const VXD: i32 = 5;
    pub const VYD: i32 = 5;

    /// Fall speed range (pixels/tick, inclusive)
    pub const FALL_SPEED: (i32, i32) = (2, 5);
    /// Spawn window used when the game starts
    pub const INITIAL_SPAWN_X: (i32, i32) = (0, 1024);
    pub const INITIAL_SPAWN_Y: (i32, i32) = (-300, -100);
    /// Spawn window used when an entity is recycled mid-game
    pub const RESPAWN_X: (i32, i32) = (0, 924);
    pub const RESPAWN_Y: (i32, i32) = (-200, -100);

    /// The game is won once elapsed seconds exceed this
    pub const WIN_AFTER_SECS: u32 = 10;
    /// End screen display durations (ms)
    pub const WIN_SCREEN_MS: u64 = 7000;
    pub const LOSE_SCREEN_MS: u64 = 3000;
    /// Sleep at the end of every tick (ms)
    pub const TICK_SLEEP_MS: u64 = 10;
}
