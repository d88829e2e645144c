//! Game settings
//!
//! Loaded from an optional JSON file at startup. Every field has a default
//! matching the shipped game, so partial files are fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};
use crate::sim::{Playfield, SpawnWindow};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: i32,
    pub screen_height: i32,

    // === Player ===
    pub player_start: (i32, i32),
    /// Inclusive x range the player's top-left corner may occupy
    pub player_x_range: (i32, i32),
    /// Inclusive y range the player's top-left corner may occupy
    pub player_y_range: (i32, i32),
    pub player_size: (i32, i32),
    /// Velocity delta per key press (x, y)
    pub speed_delta: (i32, i32),

    // === Falling entities ===
    pub hazard_size: (i32, i32),
    pub reward_size: (i32, i32),
    pub initial_spawn: SpawnWindow,
    pub respawn: SpawnWindow,

    // === Timing ===
    pub win_after_secs: u32,
    pub win_screen_ms: u64,
    pub lose_screen_ms: u64,
    pub tick_sleep_ms: u64,

    // === Misc ===
    pub score_log_path: PathBuf,
    /// Window/terminal title
    pub caption: String,
    /// Drop auto-repeated key-downs instead of stacking their velocity
    pub ignore_key_repeat: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_start: PLAYER_START,
            player_x_range: PLAYER_X_RANGE,
            player_y_range: PLAYER_Y_RANGE,
            player_size: PLAYER_SIZE,
            speed_delta: (VXD, VYD),

            hazard_size: HAZARD_SIZE,
            reward_size: REWARD_SIZE,
            initial_spawn: SpawnWindow {
                x: INITIAL_SPAWN_X,
                y: INITIAL_SPAWN_Y,
                vy: FALL_SPEED,
            },
            respawn: SpawnWindow {
                x: RESPAWN_X,
                y: RESPAWN_Y,
                vy: FALL_SPEED,
            },

            win_after_secs: WIN_AFTER_SECS,
            win_screen_ms: WIN_SCREEN_MS,
            lose_screen_ms: LOSE_SCREEN_MS,
            tick_sleep_ms: TICK_SLEEP_MS,

            score_log_path: PathBuf::from("fixes.log"),
            caption: "Rabbit".to_string(),
            ignore_key_repeat: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Call [`Settings::validate`] once any
    /// overrides have been applied.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            GameError::resource_init(format!("settings file {}", path.display()), e)
        })?;
        let settings: Settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON (for `--dump-settings`)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject layouts the simulation can't honour
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GameError::InvalidSettings(msg));

        if self.screen_width <= 0 || self.screen_height <= 0 {
            return invalid(format!(
                "screen must be non-empty, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }

        for (name, (w, h)) in [
            ("player_size", self.player_size),
            ("hazard_size", self.hazard_size),
            ("reward_size", self.reward_size),
        ] {
            if w <= 0 || h <= 0 {
                return invalid(format!("{name} must be positive, got {w}x{h}"));
            }
        }

        let (x_lo, x_hi) = self.player_x_range;
        let (y_lo, y_hi) = self.player_y_range;
        if x_lo > x_hi || x_lo < 0 || x_hi > self.screen_width {
            return invalid(format!("player_x_range {:?} outside screen", self.player_x_range));
        }
        if y_lo > y_hi || y_lo < 0 || y_hi > self.screen_height {
            return invalid(format!("player_y_range {:?} outside screen", self.player_y_range));
        }

        let (sx, sy) = self.player_start;
        if !(x_lo..=x_hi).contains(&sx) || !(y_lo..=y_hi).contains(&sy) {
            return invalid(format!("player_start {:?} outside player range", self.player_start));
        }

        for (name, window) in [("initial_spawn", &self.initial_spawn), ("respawn", &self.respawn)] {
            if window.x.0 > window.x.1 || window.y.0 > window.y.1 || window.vy.0 > window.vy.1 {
                return invalid(format!("{name} has an inverted range"));
            }
            if window.x.0 < 0 || window.x.1 > self.screen_width {
                return invalid(format!("{name} x range {:?} outside screen", window.x));
            }
            // Spawned entities must start above the screen and fall into view
            if window.y.1 >= 0 || window.vy.0 <= 0 {
                return invalid(format!("{name} must spawn above the screen moving down"));
            }
        }

        Ok(())
    }

    /// Geometry the simulation needs each tick
    pub fn playfield(&self) -> Playfield {
        Playfield {
            width: self.screen_width,
            height: self.screen_height,
            player_x: self.player_x_range,
            player_y: self.player_y_range,
            respawn: self.respawn,
        }
    }
}
