//! Platform abstraction layer
//!
//! Handles everything outside the simulation:
//! - Elapsed time (a background clock thread)
//! - Input events
//! - Concrete renderers (terminal, headless)

pub mod clock;
pub mod headless;
pub mod terminal;

pub use clock::{ManualClock, ThreadClock};
pub use headless::{DrawCall, RecordingRenderer, ScriptedInput};
pub use terminal::{TerminalInput, TerminalRenderer};

use crate::error::Result;
use crate::sim::InputEvent;

/// Source of elapsed game time
pub trait Timer {
    /// Whole seconds since the run started
    fn elapsed_secs(&self) -> u32;

    /// Whether the win threshold has been passed
    fn time_limit_reached(&self) -> bool;
}

/// Source of discrete input events.
///
/// The loop calls `next_event` until it returns `None` once per tick; the
/// next call after that starts a fresh batch.
pub trait InputSource {
    fn next_event(&mut self) -> Result<Option<InputEvent>>;

    /// Drain everything pending into `out`
    fn drain_into(&mut self, out: &mut Vec<InputEvent>) -> Result<()> {
        while let Some(event) = self.next_event()? {
            out.push(event);
        }
        Ok(())
    }
}

impl<T: Timer + ?Sized> Timer for &T {
    fn elapsed_secs(&self) -> u32 {
        (**self).elapsed_secs()
    }

    fn time_limit_reached(&self) -> bool {
        (**self).time_limit_reached()
    }
}
