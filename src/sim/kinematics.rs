//! Axis-aligned bodies and their per-tick motion

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// A moving sprite: top-left position, velocity in pixels/tick, sprite box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Body {
    pub pos: IVec2,
    pub vel: IVec2,
    pub size: IVec2,
}

impl Body {
    pub fn new(pos: IVec2, size: IVec2) -> Self {
        Self {
            pos,
            vel: IVec2::ZERO,
            size,
        }
    }

    /// Bounding box at the current position
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Where the body would be after one step
    #[inline]
    pub fn next_pos(&self) -> IVec2 {
        self.pos + self.vel
    }
}

/// Move a body by one tick of its velocity. Bounds are the caller's business.
#[inline]
pub fn advance(body: &mut Body) {
    body.pos += body.vel;
}
