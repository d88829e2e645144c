//! Terminal frontend (crossterm)
//!
//! The 1024x768 playfield is scaled onto whatever grid the terminal offers.
//! Frames are composed into a cell buffer and written in one batch on
//! `present`.

use std::io::{self, BufWriter, Stdout, Write};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};

use super::InputSource;
use crate::error::{GameError, Result};
use crate::renderer::{Renderer, SpriteId};
use crate::settings::Settings;
use crate::sim::{InputEvent, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::Reset,
    };
}

/// Glyph and color for each sprite
fn sprite_style(sprite: SpriteId) -> Cell {
    match sprite {
        SpriteId::Background => Cell {
            ch: '.',
            fg: Color::DarkGreen,
        },
        SpriteId::Player => Cell {
            ch: '@',
            fg: Color::White,
        },
        SpriteId::Hazard => Cell {
            ch: '|',
            fg: Color::Cyan,
        },
        SpriteId::Reward => Cell {
            ch: 'V',
            fg: Color::DarkYellow,
        },
    }
}

/// Renders into the terminal's alternate screen
pub struct TerminalRenderer {
    out: BufWriter<Stdout>,
    cols: u16,
    rows: u16,
    /// Playfield size in pixels
    field: (i32, i32),
    player_size: (i32, i32),
    hazard_size: (i32, i32),
    reward_size: (i32, i32),
    cells: Vec<Cell>,
}

impl TerminalRenderer {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    pub fn new(settings: &Settings) -> Result<Self> {
        let init = || -> io::Result<(u16, u16)> {
            terminal::enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(
                stdout,
                terminal::EnterAlternateScreen,
                cursor::Hide,
                terminal::DisableLineWrap,
                terminal::SetTitle(&settings.caption),
            )?;
            terminal::size()
        };
        let (cols, rows) = init().map_err(|e| GameError::resource_init("terminal", e))?;
        log::info!("Terminal renderer {}x{} cells", cols, rows);

        Ok(Self {
            out: BufWriter::with_capacity(16384, io::stdout()),
            cols: cols.max(1),
            rows: rows.max(1),
            field: (settings.screen_width, settings.screen_height),
            player_size: settings.player_size,
            hazard_size: settings.hazard_size,
            reward_size: settings.reward_size,
            cells: vec![Cell::BLANK; cols.max(1) as usize * rows.max(1) as usize],
        })
    }

    fn to_col(&self, x: i32) -> i64 {
        (x as i64 * self.cols as i64).div_euclid(self.field.0 as i64)
    }

    fn to_row(&self, y: i32) -> i64 {
        (y as i64 * self.rows as i64).div_euclid(self.field.1 as i64)
    }

    /// Pixel height of one terminal row
    fn row_height(&self) -> i32 {
        (self.field.1 + self.rows as i32 - 1) / self.rows as i32
    }

    fn put(&mut self, col: i64, row: i64, cell: Cell) {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells[idx] = cell;
    }

    fn fill(&mut self, x: i32, y: i32, (w, h): (i32, i32), cell: Cell) {
        let (c0, r0) = (self.to_col(x), self.to_row(y));
        let c1 = self.to_col(x + w).max(c0 + 1);
        let r1 = self.to_row(y + h).max(r0 + 1);
        for row in r0..r1 {
            for col in c0..c1 {
                self.put(col, row, cell);
            }
        }
    }

    fn restore(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            ResetColor,
            cursor::Show,
            terminal::EnableLineWrap,
            terminal::LeaveAlternateScreen,
        )?;
        terminal::disable_raw_mode()
    }
}

impl Renderer for TerminalRenderer {
    fn clear(&mut self) -> Result<()> {
        // Pick up resizes between frames
        if let Ok((cols, rows)) = terminal::size() {
            if (cols, rows) != (self.cols, self.rows) && cols > 0 && rows > 0 {
                self.cols = cols;
                self.rows = rows;
                self.cells = vec![Cell::BLANK; cols as usize * rows as usize];
            }
        }
        self.cells.fill(Cell::BLANK);
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: SpriteId, x: i32, y: i32) -> Result<()> {
        let size = match sprite {
            SpriteId::Background => self.field,
            SpriteId::Player => self.player_size,
            SpriteId::Hazard => self.hazard_size,
            SpriteId::Reward => self.reward_size,
        };
        self.fill(x, y, size, sprite_style(sprite));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<i32> {
        let (col, row) = (self.to_col(x), self.to_row(y));
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i64, row, Cell { ch, fg: Color::White });
        }
        Ok(self.row_height())
    }

    fn present(&mut self) -> Result<()> {
        let mut write = || -> io::Result<()> {
            let mut fg = Color::Reset;
            queue!(self.out, ResetColor)?;
            for row in 0..self.rows {
                queue!(self.out, cursor::MoveTo(0, row))?;
                let start = row as usize * self.cols as usize;
                for cell in &self.cells[start..start + self.cols as usize] {
                    if cell.fg != fg {
                        fg = cell.fg;
                        queue!(self.out, SetForegroundColor(fg))?;
                    }
                    queue!(self.out, Print(cell.ch))?;
                }
            }
            self.out.flush()
        };
        write().map_err(GameError::Render)
    }
}

/// Log a failed cleanup step; returns whether it succeeded
fn report_restore(what: &str, result: io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Couldn't restore {}: {}", what, e);
            false
        }
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let result = self.restore();
        report_restore("terminal", result);
    }
}

/// Keyboard input from the terminal.
///
/// Key releases need the keyboard enhancement protocol. Terminals without it
/// only report presses, so each press gets a synthetic release at the start
/// of the next poll round.
pub struct TerminalInput {
    releases_reported: bool,
    /// Synthetic releases owed for presses seen this round
    owed: Vec<Key>,
    /// Synthetic releases to deliver at the start of this round
    due: Vec<Key>,
}

impl TerminalInput {
    pub fn new() -> Result<Self> {
        let releases_reported = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if releases_reported {
            let mut stdout = io::stdout();
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .map_err(|e| GameError::resource_init("keyboard enhancement", e))?;
        } else {
            log::warn!("Terminal doesn't report key releases; each press moves for one tick");
        }

        Ok(Self {
            releases_reported,
            owed: Vec::new(),
            due: Vec::new(),
        })
    }

    fn translate(&mut self, key: KeyEvent) -> Option<InputEvent> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(InputEvent::Quit);
        }

        let mapped = match key.code {
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Esc => Key::Escape,
            _ => Key::Other,
        };

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if !self.releases_reported && mapped != Key::Escape && mapped != Key::Other {
                    self.owed.push(mapped);
                }
                Some(InputEvent::KeyDown(mapped))
            }
            KeyEventKind::Release => Some(InputEvent::KeyUp(mapped)),
        }
    }
}

impl InputSource for TerminalInput {
    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        if let Some(key) = self.due.pop() {
            return Ok(Some(InputEvent::KeyUp(key)));
        }

        while event::poll(Duration::ZERO).map_err(GameError::Input)? {
            if let Event::Key(key) = event::read().map_err(GameError::Input)? {
                if let Some(event) = self.translate(key) {
                    return Ok(Some(event));
                }
            }
        }

        self.due.append(&mut self.owed);
        Ok(None)
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if self.releases_reported {
            let mut stdout = io::stdout();
            report_restore(
                "keyboard flags",
                execute!(stdout, PopKeyboardEnhancementFlags),
            );
        }
    }
}
