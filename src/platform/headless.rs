//! Headless collaborators: a renderer that records draw calls and an input
//! source that replays scripted event batches.

use std::collections::VecDeque;

use crate::error::Result;
use crate::renderer::{Renderer, SpriteId};
use crate::sim::InputEvent;

use super::InputSource;

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Clear,
    Sprite(SpriteId, i32, i32),
    Text(String, i32, i32),
    Present,
}

/// Renderer that keeps every presented frame in memory
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Height reported for every line of text
    pub text_height: i32,
    current: Vec<DrawCall>,
    frames: Vec<Vec<DrawCall>>,
    /// Frames presented so far (survives `take_frames`)
    pub presented: u64,
}

impl RecordingRenderer {
    pub fn new(text_height: i32) -> Self {
        Self {
            text_height,
            ..Default::default()
        }
    }

    /// Presented frames, oldest first
    pub fn take_frames(&mut self) -> Vec<Vec<DrawCall>> {
        std::mem::take(&mut self.frames)
    }

    /// Text drawn in the last presented frame
    pub fn last_texts(&self) -> Vec<&str> {
        self.frames
            .last()
            .map(|frame| {
                frame
                    .iter()
                    .filter_map(|call| match call {
                        DrawCall::Text(text, ..) => Some(text.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) -> Result<()> {
        self.current.push(DrawCall::Clear);
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: SpriteId, x: i32, y: i32) -> Result<()> {
        self.current.push(DrawCall::Sprite(sprite, x, y));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<i32> {
        self.current.push(DrawCall::Text(text.to_string(), x, y));
        Ok(self.text_height)
    }

    fn present(&mut self) -> Result<()> {
        self.current.push(DrawCall::Present);
        self.frames.push(std::mem::take(&mut self.current));
        self.presented += 1;
        Ok(())
    }
}

/// Replays one batch of events per tick; empty batches once the script runs out
#[derive(Debug, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
    pending: VecDeque<InputEvent>,
    in_batch: bool,
    /// Emit `Quit` once the script is exhausted
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(batches: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            batches: batches.into_iter().collect(),
            ..Default::default()
        }
    }

    /// No input, ever
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn quit_when_done(mut self) -> Self {
        self.quit_when_done = true;
        self
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        if !self.in_batch {
            self.in_batch = true;
            match self.batches.pop_front() {
                Some(batch) => self.pending.extend(batch),
                None if self.quit_when_done => self.pending.push_back(InputEvent::Quit),
                None => {}
            }
        }

        match self.pending.pop_front() {
            Some(event) => Ok(Some(event)),
            None => {
                self.in_batch = false;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Key;

    #[test]
    fn test_scripted_input_batches_per_tick() {
        let mut input = ScriptedInput::new([
            vec![InputEvent::KeyDown(Key::Left), InputEvent::KeyDown(Key::Up)],
            vec![],
            vec![InputEvent::KeyUp(Key::Left)],
        ]);
        let mut tick = Vec::new();

        input.drain_into(&mut tick).unwrap();
        assert_eq!(tick, vec![InputEvent::KeyDown(Key::Left), InputEvent::KeyDown(Key::Up)]);

        tick.clear();
        input.drain_into(&mut tick).unwrap();
        assert!(tick.is_empty());

        input.drain_into(&mut tick).unwrap();
        assert_eq!(tick, vec![InputEvent::KeyUp(Key::Left)]);

        tick.clear();
        input.drain_into(&mut tick).unwrap();
        assert!(tick.is_empty());
    }

    #[test]
    fn test_scripted_input_quits_when_done() {
        let mut input = ScriptedInput::new([vec![]]).quit_when_done();
        let mut tick = Vec::new();
        input.drain_into(&mut tick).unwrap();
        assert!(tick.is_empty());
        input.drain_into(&mut tick).unwrap();
        assert_eq!(tick, vec![InputEvent::Quit]);
    }

    #[test]
    fn test_recording_renderer_splits_frames_on_present() {
        let mut renderer = RecordingRenderer::new(12);
        renderer.clear().unwrap();
        assert_eq!(renderer.draw_text("hi", 1, 2).unwrap(), 12);
        renderer.present().unwrap();
        renderer.clear().unwrap();
        renderer.present().unwrap();

        assert_eq!(renderer.last_texts(), Vec::<&str>::new());
        let frames = renderer.take_frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0][1], DrawCall::Text("hi".into(), 1, 2));
        assert_eq!(renderer.presented, 2);
    }
}
