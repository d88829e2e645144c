//! Frame and end-screen composition

use super::{Renderer, SpriteId};
use crate::error::Result;
use crate::sim::GameState;

/// Distance of the score readout from the right edge
const SCORE_RIGHT_INSET: i32 = 190;

/// Lose message position
const LOSE_TEXT_POS: (i32, i32) = (420, 350);

/// Elapsed seconds as `MM:SS`
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Draw one gameplay frame
pub fn draw_frame<R: Renderer + ?Sized>(renderer: &mut R, state: &GameState) -> Result<()> {
    renderer.clear()?;
    renderer.draw_sprite(SpriteId::Background, 0, 0)?;

    let player = state.player.pos;
    renderer.draw_sprite(SpriteId::Player, player.x, player.y)?;

    for hazard in &state.hazards {
        renderer.draw_sprite(SpriteId::Hazard, hazard.pos.x, hazard.pos.y)?;
    }
    for reward in &state.rewards {
        renderer.draw_sprite(SpriteId::Reward, reward.pos.x, reward.pos.y)?;
    }

    let score = format!("Score: {}", state.score);
    renderer.draw_text(&score, state.playfield.width - SCORE_RIGHT_INSET, 0)?;
    renderer.draw_text(&format_clock(state.elapsed_secs), 0, 0)?;

    renderer.present()
}

/// Win screen: the message, then the previous and current results stacked below
pub fn draw_win_screen<R: Renderer + ?Sized>(
    renderer: &mut R,
    previous: Option<&str>,
    current: &str,
) -> Result<()> {
    renderer.clear()?;
    renderer.draw_sprite(SpriteId::Background, 0, 0)?;

    let mut y = renderer.draw_text("You won", 0, 0)?;
    y += renderer.draw_text(previous.unwrap_or(" "), 0, y)?;
    renderer.draw_text(current, 0, y)?;

    renderer.present()
}

pub fn draw_lose_screen<R: Renderer + ?Sized>(renderer: &mut R) -> Result<()> {
    renderer.clear()?;
    renderer.draw_sprite(SpriteId::Background, 0, 0)?;
    renderer.draw_text("You lost!", LOSE_TEXT_POS.0, LOSE_TEXT_POS.1)?;
    renderer.present()
}
