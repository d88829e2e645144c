//! Collision detection between axis-aligned sprite boxes
//!
//! Everything is integer pixels. Boxes that merely touch along an edge do
//! not collide.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub min: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(min: IVec2, size: IVec2) -> Self {
        Self { min, size }
    }

    /// Exclusive bottom-right corner
    #[inline]
    pub fn max(&self) -> IVec2 {
        self.min + self.size
    }
}

/// Strict AABB overlap: each box's min must be below the other's max on both axes
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a_max.x > b.min.x && a.min.x < b_max.x && a_max.y > b.min.y && a.min.y < b_max.y
}
