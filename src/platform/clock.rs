//! Elapsed-time clocks
//!
//! `ThreadClock` counts seconds on its own thread and hands them to the game
//! loop through atomics. The loop only ever reads.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Sender, select};

use super::Timer;
use crate::error::{GameError, Result};

#[derive(Debug, Default)]
struct ClockShared {
    elapsed: AtomicU32,
    limit_reached: AtomicBool,
}

/// Background clock adding one second per `interval`
#[derive(Debug)]
pub struct ThreadClock {
    shared: Arc<ClockShared>,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ThreadClock {
    /// Start counting. The limit flag is raised once elapsed seconds exceed
    /// `win_after_secs`.
    pub fn start(interval: Duration, win_after_secs: u32) -> Result<Self> {
        let shared = Arc::new(ClockShared::default());
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);

        let thread_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("game-clock".into())
            .spawn(move || {
                let ticker = crossbeam_channel::tick(interval);
                loop {
                    select! {
                        recv(ticker) -> _ => {
                            let secs = thread_shared.elapsed.fetch_add(1, Ordering::AcqRel) + 1;
                            if secs > win_after_secs {
                                thread_shared.limit_reached.store(true, Ordering::Release);
                            }
                        }
                        // Sender dropped: stop
                        recv(stop_rx) -> _ => break,
                    }
                }
            })
            .map_err(|e| GameError::resource_init("clock thread", e))?;

        log::debug!("Clock started ({:?} per second, limit {}s)", interval, win_after_secs);
        Ok(Self {
            shared,
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop the clock thread and wait for it
    pub fn stop(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Clock thread panicked");
            }
        }
    }
}

impl Timer for ThreadClock {
    fn elapsed_secs(&self) -> u32 {
        self.shared.elapsed.load(Ordering::Acquire)
    }

    fn time_limit_reached(&self) -> bool {
        self.shared.limit_reached.load(Ordering::Acquire)
    }
}

impl Drop for ThreadClock {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Fixed clock for tests and replays
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    pub elapsed: u32,
    pub win_after_secs: u32,
}

impl ManualClock {
    pub fn new(elapsed: u32, win_after_secs: u32) -> Self {
        Self {
            elapsed,
            win_after_secs,
        }
    }
}

impl Timer for ManualClock {
    fn elapsed_secs(&self) -> u32 {
        self.elapsed
    }

    fn time_limit_reached(&self) -> bool {
        self.elapsed > self.win_after_secs
    }
}
