//! Keyboard events to player velocity
//!
//! Arrow keys work as "hold to move": a key-down adds a velocity delta and
//! the matching key-up removes it again, so opposite keys cancel out.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    Other,
}

/// A discrete input event delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Window closed / terminal asked us to stop
    Quit,
}

/// What the loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Applies input events to the player's velocity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputMapper {
    /// Velocity change per press
    pub delta: IVec2,
    /// When set, a key already held ignores further key-downs and a key not
    /// held ignores key-ups. Off by default: auto-repeat stacks velocity.
    pub ignore_key_repeat: bool,
    held: [bool; 4],
}

impl InputMapper {
    pub fn new(delta: IVec2, ignore_key_repeat: bool) -> Self {
        Self {
            delta,
            ignore_key_repeat,
            held: [false; 4],
        }
    }

    /// Velocity contribution of a pressed key
    fn key_delta(&self, key: Key) -> Option<IVec2> {
        match key {
            Key::Left => Some(IVec2::new(-self.delta.x, 0)),
            Key::Right => Some(IVec2::new(self.delta.x, 0)),
            Key::Up => Some(IVec2::new(0, -self.delta.y)),
            Key::Down => Some(IVec2::new(0, self.delta.y)),
            Key::Escape | Key::Other => None,
        }
    }

    fn held_slot(key: Key) -> Option<usize> {
        match key {
            Key::Left => Some(0),
            Key::Right => Some(1),
            Key::Up => Some(2),
            Key::Down => Some(3),
            Key::Escape | Key::Other => None,
        }
    }

    /// Apply one event to `vel`
    pub fn apply(&mut self, vel: &mut IVec2, event: InputEvent) -> Control {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => Control::Quit,
            InputEvent::KeyDown(key) => {
                if let Some(delta) = self.key_delta(key) {
                    if self.press(key, true) {
                        *vel += delta;
                    }
                }
                Control::Continue
            }
            InputEvent::KeyUp(key) => {
                if let Some(delta) = self.key_delta(key) {
                    if self.press(key, false) {
                        *vel -= delta;
                    }
                }
                Control::Continue
            }
        }
    }

    /// Record a press/release; returns whether the event should take effect
    fn press(&mut self, key: Key, down: bool) -> bool {
        let Some(slot) = Self::held_slot(key) else {
            return false;
        };
        if self.ignore_key_repeat && self.held[slot] == down {
            return false;
        }
        self.held[slot] = down;
        true
    }
}
