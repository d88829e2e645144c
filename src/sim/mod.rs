//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Integer pixels, one step per tick
//! - Seeded RNG only, owned by `GameState`
//! - Stable iteration order (array index)
//! - No rendering, timing or platform dependencies

pub mod collision;
pub mod input;
pub mod kinematics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use input::{Control, InputEvent, InputMapper, Key};
pub use kinematics::{Body, advance};
pub use spawn::{SpawnWindow, respawn, seed_from_clock};
pub use state::{GameState, Outcome, Playfield};
pub use tick::{TickInput, TickStatus, move_player, step, tick};
