//! Rendering seam
//!
//! The game only knows how to ask for sprites and text at playfield pixel
//! positions. Backends live in `platform`.

pub mod frame;

pub use frame::{draw_frame, draw_lose_screen, draw_win_screen, format_clock};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sprites the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Background,
    Player,
    Hazard,
    Reward,
}

/// Drawing surface the loop renders into
pub trait Renderer {
    /// Blank the back buffer
    fn clear(&mut self) -> Result<()>;

    /// Draw a sprite with its top-left corner at (x, y)
    fn draw_sprite(&mut self, sprite: SpriteId, x: i32, y: i32) -> Result<()>;

    /// Draw a line of text; returns the height it took up in pixels
    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<i32>;

    /// Show the back buffer
    fn present(&mut self) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }

    fn draw_sprite(&mut self, sprite: SpriteId, x: i32, y: i32) -> Result<()> {
        (**self).draw_sprite(sprite, x, y)
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<i32> {
        (**self).draw_text(text, x, y)
    }

    fn present(&mut self) -> Result<()> {
        (**self).present()
    }
}
