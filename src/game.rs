//! Game loop driver
//!
//! Owns the collaborators and the `GameState`, and pumps them once per tick:
//! drain input, read the clock, advance the simulation (which draws the
//! frame), then pace. End screens are shown here as well.

use std::thread;
use std::time::Duration;

use crate::error::Result;
use crate::persistence::{ScoreLog, format_result, timestamp_now};
use crate::platform::{InputSource, Timer};
use crate::renderer::{Renderer, draw_frame, draw_lose_screen, draw_win_screen};
use crate::settings::Settings;
use crate::sim::{GameState, InputEvent, TickInput, TickStatus, tick};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Won { score: u32 },
    Lost { score: u32 },
    /// Escape or window close; no end screen was shown
    Quit { score: u32 },
}

/// Game instance holding state and collaborators
pub struct Game<R, I, T, L> {
    state: GameState,
    settings: Settings,
    // Dropped before the renderer, which owns the terminal screen
    input: I,
    renderer: R,
    timer: T,
    score_log: L,
    events: Vec<InputEvent>,
}

impl<R, I, T, L> Game<R, I, T, L>
where
    R: Renderer,
    I: InputSource,
    T: Timer,
    L: ScoreLog,
{
    /// Set up a run; fails if `settings` don't validate
    pub fn new(
        settings: Settings,
        seed: u64,
        renderer: R,
        input: I,
        timer: T,
        score_log: L,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            state: GameState::new(&settings, seed),
            settings,
            input,
            renderer,
            timer,
            score_log,
            events: Vec::with_capacity(8),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for scenario setup before `run`
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Play until the game is won, lost or abandoned
    pub fn run(&mut self) -> Result<GameEnd> {
        log::info!("Run started (seed {})", self.state.seed);

        loop {
            let status = self.step()?;
            let score = self.state.score;
            match status {
                TickStatus::Running => pause(self.settings.tick_sleep_ms),
                TickStatus::Quit => {
                    log::info!("Run abandoned after {} ticks", self.state.time_ticks);
                    return Ok(GameEnd::Quit { score });
                }
                TickStatus::Won => {
                    self.show_win()?;
                    return Ok(GameEnd::Won { score });
                }
                TickStatus::Lost => {
                    self.show_loss()?;
                    return Ok(GameEnd::Lost { score });
                }
            }
        }
    }

    /// One tick of the loop, without pacing
    pub fn step(&mut self) -> Result<TickStatus> {
        self.events.clear();

        let time_limit_reached = self.timer.time_limit_reached();
        if !time_limit_reached {
            self.input.drain_into(&mut self.events)?;
        }

        let input = TickInput {
            events: &self.events,
            elapsed_secs: self.timer.elapsed_secs(),
            time_limit_reached,
        };
        let renderer = &mut self.renderer;
        tick(&mut self.state, &input, |state| draw_frame(renderer, state))
    }

    fn show_win(&mut self) -> Result<()> {
        let score = self.state.score;
        log::info!("You won with score {}", score);

        let previous = self.score_log.read_last_result()?;
        let timestamp = timestamp_now();
        let current = format_result(&timestamp, score);

        draw_win_screen(&mut self.renderer, previous.as_deref(), &current)?;
        self.score_log.append_result(&timestamp, score)?;
        pause(self.settings.win_screen_ms);
        Ok(())
    }

    fn show_loss(&mut self) -> Result<()> {
        log::info!("You lost with score {}", self.state.score);
        draw_lose_screen(&mut self.renderer)?;
        pause(self.settings.lose_screen_ms);
        Ok(())
    }
}

/// Blocking sleep, skipped for zero
fn pause(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::persistence::MemoryScoreLog;
    use crate::platform::{DrawCall, ManualClock, RecordingRenderer, ScriptedInput};
    use crate::sim::Key;
    use glam::IVec2;

    fn fast_settings() -> Settings {
        Settings {
            tick_sleep_ms: 0,
            win_screen_ms: 0,
            lose_screen_ms: 0,
            ..Default::default()
        }
    }

    fn park_sky(state: &mut GameState) {
        for body in state.hazards.iter_mut().chain(state.rewards.iter_mut()) {
            body.pos = IVec2::new(0, -100_000);
            body.vel = IVec2::new(0, 1);
        }
    }

    #[test]
    fn test_win_shows_previous_and_appends() {
        let mut renderer = RecordingRenderer::new(40);
        let mut log = MemoryScoreLog {
            lines: vec!["Sun Oct 18 10:00:00 2026 3".to_string()],
        };
        let mut game = Game::new(
            fast_settings(),
            1,
            &mut renderer,
            ScriptedInput::idle(),
            ManualClock::new(11, 10),
            &mut log,
        )
        .unwrap();
        game.state_mut().score = 4;

        assert_eq!(game.run().unwrap(), GameEnd::Won { score: 4 });
        drop(game);

        let texts = renderer.last_texts();
        assert_eq!(texts[0], "You won");
        assert_eq!(texts[1], "Sun Oct 18 10:00:00 2026 3");
        assert!(texts[2].ends_with(" 4"));
        assert_eq!(log.lines.len(), 2);
        assert_eq!(log.lines[1], texts[2]);
    }

    #[test]
    fn test_first_win_has_blank_previous() {
        let mut renderer = RecordingRenderer::new(40);
        let mut game = Game::new(
            fast_settings(),
            1,
            &mut renderer,
            ScriptedInput::idle(),
            ManualClock::new(11, 10),
            MemoryScoreLog::default(),
        )
        .unwrap();
        game.run().unwrap();
        drop(game);
        assert_eq!(renderer.last_texts()[1], " ");
    }

    #[test]
    fn test_quit_skips_end_screen_and_log() {
        let mut renderer = RecordingRenderer::new(40);
        let mut log = MemoryScoreLog::default();
        let input = ScriptedInput::new([vec![], vec![InputEvent::KeyDown(Key::Escape)]]);
        let mut game = Game::new(
            fast_settings(),
            1,
            &mut renderer,
            input,
            ManualClock::new(0, 10),
            &mut log,
        )
        .unwrap();
        park_sky(game.state_mut());

        assert_eq!(game.run().unwrap(), GameEnd::Quit { score: 0 });
        drop(game);
        // Only the first tick drew a frame
        assert_eq!(renderer.presented, 1);
        assert!(log.lines.is_empty());
    }

    #[test]
    fn test_loss_shows_message() {
        let mut renderer = RecordingRenderer::new(40);
        let mut game = Game::new(
            fast_settings(),
            1,
            &mut renderer,
            ScriptedInput::idle(),
            ManualClock::new(0, 10),
            MemoryScoreLog::default(),
        )
        .unwrap();
        park_sky(game.state_mut());
        let player = game.state().player.pos;
        game.state_mut().hazards[0].pos = player;

        assert_eq!(game.run().unwrap(), GameEnd::Lost { score: 0 });
        drop(game);

        let frames = renderer.take_frames();
        // Gameplay frame, then the lose screen
        assert_eq!(frames.len(), 2);
        assert!(frames[1].contains(&DrawCall::Text("You lost!".into(), 420, 350)));
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let mut settings = fast_settings();
        settings.respawn.vy = (5, 2);
        let result = Game::new(
            settings,
            1,
            RecordingRenderer::new(40),
            ScriptedInput::idle(),
            ManualClock::new(0, 10),
            MemoryScoreLog::default(),
        );
        assert!(matches!(result, Err(GameError::InvalidSettings(_))));
    }

    #[test]
    fn test_step_feeds_clock_to_hud() {
        let mut renderer = RecordingRenderer::new(40);
        let mut game = Game::new(
            fast_settings(),
            1,
            &mut renderer,
            ScriptedInput::idle(),
            ManualClock::new(7, 10),
            MemoryScoreLog::default(),
        )
        .unwrap();
        park_sky(game.state_mut());

        assert_eq!(game.step().unwrap(), TickStatus::Running);
        assert_eq!(game.state().elapsed_secs, 7);
        drop(game);
        assert!(renderer.last_texts().contains(&"00:07"));
    }
}
