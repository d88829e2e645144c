//! One iteration of the game loop
//!
//! Order matters and is fixed: win check, input, player move, falling
//! entities, draw, drop contacts, carrot contacts. The frame is drawn before
//! contacts are resolved, so it shows the pre-collision positions.

use std::convert::Infallible;

use super::collision::overlaps;
use super::input::{Control, InputEvent};
use super::kinematics::{Body, advance};
use super::spawn::respawn;
use super::state::{GameState, Outcome, Playfield};

/// Everything the outside world hands to a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput<'a> {
    /// Events drained from the input source since the last tick
    pub events: &'a [InputEvent],
    /// Seconds elapsed since the run started
    pub elapsed_secs: u32,
    /// Set by the clock once the time limit has passed
    pub time_limit_reached: bool,
}

/// Result of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    /// Escape or window close; no end screen
    Quit,
    Won,
    Lost,
}

/// Apply the player's velocity per axis, rejecting any axis whose move
/// would leave the allowed range. Velocity is kept either way.
pub fn move_player(player: &mut Body, playfield: &Playfield) {
    let next = player.next_pos();
    if (playfield.player_x.0..=playfield.player_x.1).contains(&next.x) {
        player.pos.x = next.x;
    }
    if (playfield.player_y.0..=playfield.player_y.1).contains(&next.y) {
        player.pos.y = next.y;
    }
}

/// Advance the game by one tick, calling `draw` once the frame is ready
pub fn tick<E, F>(state: &mut GameState, input: &TickInput<'_>, draw: F) -> Result<TickStatus, E>
where
    F: FnOnce(&GameState) -> Result<(), E>,
{
    match state.outcome {
        Outcome::Won => return Ok(TickStatus::Won),
        Outcome::Lost => return Ok(TickStatus::Lost),
        Outcome::Playing => {}
    }

    state.elapsed_secs = state.elapsed_secs.max(input.elapsed_secs);
    if input.time_limit_reached {
        state.outcome = Outcome::Won;
        log::info!("Time limit reached with score {}", state.score);
        return Ok(TickStatus::Won);
    }

    for &event in input.events {
        if state.input.apply(&mut state.player.vel, event) == Control::Quit {
            log::info!("Quit requested");
            return Ok(TickStatus::Quit);
        }
    }

    state.time_ticks += 1;
    move_player(&mut state.player, &state.playfield);

    for body in state.hazards.iter_mut().chain(state.rewards.iter_mut()) {
        advance(body);
    }

    draw(&*state)?;

    let player = state.player.rect();
    let playfield = state.playfield;

    for (i, hazard) in state.hazards.iter_mut().enumerate() {
        if overlaps(&player, &hazard.rect()) {
            state.outcome = Outcome::Lost;
            log::info!("Hit by drop {} at {:?}, score {}", i, hazard.pos, state.score);
            return Ok(TickStatus::Lost);
        }
        if hazard.pos.y > playfield.height {
            respawn(hazard, &playfield.respawn, &mut state.rng);
            log::debug!("Drop {} respawned at {:?}", i, hazard.pos);
        }
    }

    for (i, reward) in state.rewards.iter_mut().enumerate() {
        if overlaps(&player, &reward.rect()) {
            state.score += 1;
            reward.pos.y = playfield.height;
            log::debug!("Carrot {} collected, score {}", i, state.score);
        }
        if reward.pos.y >= playfield.height {
            respawn(reward, &playfield.respawn, &mut state.rng);
        }
    }

    Ok(TickStatus::Running)
}

/// `tick` without drawing
pub fn step(state: &mut GameState, input: &TickInput<'_>) -> TickStatus {
    tick(state, input, |_| Ok::<(), Infallible>(())).unwrap_or_else(|never| match never {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::input::Key;
    use glam::IVec2;
    use proptest::prelude::*;

    fn new_state() -> GameState {
        GameState::new(&Settings::default(), 12345)
    }

    /// Park every falling entity far above the screen so nothing collides
    fn clear_sky(state: &mut GameState) {
        for body in state.hazards.iter_mut().chain(state.rewards.iter_mut()) {
            body.pos = IVec2::new(0, -10_000);
            body.vel = IVec2::new(0, 2);
        }
    }

    fn events(events: &[InputEvent]) -> TickInput<'_> {
        TickInput {
            events,
            ..Default::default()
        }
    }

    #[test]
    fn test_hazard_overlap_loses() {
        let mut state = new_state();
        clear_sky(&mut state);
        state.player.pos = IVec2::new(400, 600);
        state.player.size = IVec2::new(64, 64);
        state.hazards[2].pos = IVec2::new(420, 618);
        state.hazards[2].size = IVec2::new(32, 32);
        state.hazards[2].vel = IVec2::new(0, 2);

        assert_eq!(step(&mut state, &TickInput::default()), TickStatus::Lost);
        assert_eq!(state.outcome, Outcome::Lost);
    }

    #[test]
    fn test_loss_skips_rewards_that_tick() {
        let mut state = new_state();
        clear_sky(&mut state);
        state.hazards[0].pos = state.player.pos;
        state.rewards[0].pos = state.player.pos;
        state.rewards[0].vel = IVec2::ZERO;

        assert_eq!(step(&mut state, &TickInput::default()), TickStatus::Lost);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_blocked_move_keeps_velocity() {
        let mut state = new_state();
        clear_sky(&mut state);
        state.player.pos = IVec2::new(0, 638);

        let input = [InputEvent::KeyDown(Key::Left)];
        step(&mut state, &events(&input));
        assert_eq!(state.player.pos, IVec2::new(0, 638));
        assert_eq!(state.player.vel, IVec2::new(-5, 0));
    }

    #[test]
    fn test_move_rejected_per_axis() {
        let mut state = new_state();
        clear_sky(&mut state);
        state.player.pos = IVec2::new(100, 638);

        let input = [InputEvent::KeyDown(Key::Right), InputEvent::KeyDown(Key::Down)];
        step(&mut state, &events(&input));
        // x moves, y would leave the range and stays put
        assert_eq!(state.player.pos, IVec2::new(105, 638));
        assert_eq!(state.player.vel, IVec2::new(5, 5));
    }

    #[test]
    fn test_hold_then_release() {
        let mut state = new_state();
        clear_sky(&mut state);
        let start = state.player.pos;

        step(&mut state, &events(&[InputEvent::KeyDown(Key::Up)]));
        step(&mut state, &TickInput::default());
        step(&mut state, &events(&[InputEvent::KeyUp(Key::Up)]));
        step(&mut state, &TickInput::default());
        assert_eq!(state.player.pos, start - IVec2::new(0, 10));
        assert_eq!(state.player.vel, IVec2::ZERO);
    }

    #[test]
    fn test_time_limit_wins_before_input() {
        let mut state = new_state();
        clear_sky(&mut state);
        let start = state.player.pos;
        let input = [InputEvent::KeyDown(Key::Left)];
        let tick_input = TickInput {
            events: &input,
            elapsed_secs: 11,
            time_limit_reached: true,
        };

        assert_eq!(step(&mut state, &tick_input), TickStatus::Won);
        assert_eq!(state.outcome, Outcome::Won);
        assert_eq!(state.player.vel, IVec2::ZERO);
        assert_eq!(state.player.pos, start);
        assert_eq!(state.elapsed_secs, 11);
    }

    #[test]
    fn test_quit_stops_before_moving() {
        let mut state = new_state();
        let before = state.hazards;
        let input = [InputEvent::KeyDown(Key::Escape)];
        assert_eq!(step(&mut state, &events(&input)), TickStatus::Quit);
        assert_eq!(state.hazards, before);
        assert_eq!(state.outcome, Outcome::Playing);
    }

    #[test]
    fn test_reward_collected_and_respawned() {
        let mut state = new_state();
        clear_sky(&mut state);
        state.score = 3;
        state.rewards[1].pos = state.player.pos + IVec2::new(10, 10);
        state.rewards[1].vel = IVec2::ZERO;

        assert_eq!(step(&mut state, &TickInput::default()), TickStatus::Running);
        assert_eq!(state.score, 4);
        let carrot = state.rewards[1];
        assert!(carrot.pos.y < 0);
        assert!((0..=924).contains(&carrot.pos.x));
        assert!((2..=5).contains(&carrot.vel.y));
    }

    #[test]
    fn test_drop_leaving_screen_respawns() {
        let mut state = new_state();
        clear_sky(&mut state);
        state.hazards[4].pos = IVec2::new(0, 767);
        state.hazards[4].vel = IVec2::new(0, 2);

        step(&mut state, &TickInput::default());
        assert!(state.hazards[4].pos.y < 0);
    }

    #[test]
    fn test_drop_at_screen_height_not_yet_respawned() {
        let mut state = new_state();
        clear_sky(&mut state);
        state.hazards[4].pos = IVec2::new(0, 766);
        state.hazards[4].vel = IVec2::new(0, 2);

        step(&mut state, &TickInput::default());
        assert_eq!(state.hazards[4].pos.y, 768);
    }

    #[test]
    fn test_draw_sees_pre_collision_frame() {
        let mut state = new_state();
        clear_sky(&mut state);
        state.rewards[0].pos = state.player.pos;
        state.rewards[0].vel = IVec2::ZERO;
        let mut drawn_score = None;

        let status = tick(&mut state, &TickInput::default(), |s| {
            drawn_score = Some(s.score);
            Ok::<(), ()>(())
        });
        assert_eq!(status, Ok(TickStatus::Running));
        assert_eq!(drawn_score, Some(0));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_draw_error_propagates() {
        let mut state = new_state();
        let result = tick(&mut state, &TickInput::default(), |_| Err("screen gone"));
        assert_eq!(result, Err("screen gone"));
    }

    #[test]
    fn test_terminal_state_is_inert() {
        for (outcome, status) in [
            (Outcome::Won, TickStatus::Won),
            (Outcome::Lost, TickStatus::Lost),
        ] {
            let mut state = new_state();
            state.outcome = outcome;
            let before = (state.player, state.hazards, state.rewards, state.score);
            let input = [InputEvent::KeyDown(Key::Right)];

            assert_eq!(step(&mut state, &events(&input)), status);
            assert_eq!(
                (state.player, state.hazards, state.rewards, state.score),
                before
            );
            assert_eq!(state.outcome, outcome);
            assert_eq!(state.time_ticks, 0);
        }
    }

    fn key_strategy() -> impl Strategy<Value = InputEvent> {
        prop_oneof![
            Just(InputEvent::KeyDown(Key::Left)),
            Just(InputEvent::KeyDown(Key::Right)),
            Just(InputEvent::KeyDown(Key::Up)),
            Just(InputEvent::KeyDown(Key::Down)),
            Just(InputEvent::KeyUp(Key::Left)),
            Just(InputEvent::KeyUp(Key::Right)),
            Just(InputEvent::KeyUp(Key::Up)),
            Just(InputEvent::KeyUp(Key::Down)),
        ]
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds_and_score_only_grows(
            seed in any::<u64>(),
            script in prop::collection::vec(prop::collection::vec(key_strategy(), 0..4), 1..200),
        ) {
            let mut state = GameState::new(&Settings::default(), seed);
            let mut last_score = state.score;
            for batch in &script {
                let status = step(&mut state, &events(batch));
                prop_assert!(state.playfield.player_in_bounds(state.player.pos));
                prop_assert!(state.score >= last_score);
                prop_assert!(state.score - last_score <= state.rewards.len() as u32);
                last_score = state.score;
                if status != TickStatus::Running {
                    break;
                }
            }
        }
    }
}
