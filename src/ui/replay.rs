/// Terminal replay of a finished run.
///
/// Draws the grid once, then walks the replay timeline moving the agent
/// glyph cell by cell. All commands are batched with `queue!` and flushed
/// once per frame. The overlay message is shown under the grid at the end,
/// and the screen stays up until a key is pressed.

use std::io::{self, BufWriter, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::config::MAX_SIZE;
use crate::sim::snapshot::Snapshot;
use crate::ui::overlay::overlay_message;
use crate::ui::timeline::timeline;

const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };
const CELL_FG: Color = Color::Rgb { r: 70, g: 70, b: 95 };
const TRAIL_FG: Color = Color::Rgb { r: 90, g: 140, b: 200 };
const GOAL_FG: Color = Color::Rgb { r: 240, g: 200, b: 60 };
const AGENT_FG: Color = Color::Rgb { r: 120, g: 230, b: 140 };

/// Columns per grid cell.
const CELL_W: u16 = 3;
const ORIGIN_X: u16 = 2;
const ORIGIN_Y: u16 = 1;

pub struct Replay {
    writer: BufWriter<Stdout>,
    size: usize,
}

impl Replay {
    /// `size` is bounded by `MAX_SIZE`, so cell coordinates fit in `u16`.
    pub fn new(size: usize) -> Self {
        debug_assert!(size <= MAX_SIZE);
        Replay {
            writer: BufWriter::with_capacity(4096, io::stdout()),
            size,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(BASE_BG),
            Clear(ClearType::All)
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Animate `snap.path`, show the overlay, wait for a key.
    pub fn play(&mut self, snap: &Snapshot, step_delay: Duration) -> io::Result<()> {
        self.draw_grid(snap.goal)?;

        let start = Instant::now();
        let mut prev: Option<(usize, usize)> = None;
        for frame in timeline(&snap.path, step_delay) {
            if let Some(wait) = frame.at.checked_sub(start.elapsed()) {
                thread::sleep(wait);
            }
            if let Some(cell) = prev {
                let glyph = if cell == snap.goal { "◆" } else { "•" };
                self.draw_cell(cell, glyph, TRAIL_FG)?;
            }
            self.draw_cell(frame.cell, "@", AGENT_FG)?;
            self.writer.flush()?;
            prev = Some(frame.cell);
        }

        let footer_y = ORIGIN_Y + self.size as u16 + 1;
        queue!(
            self.writer,
            MoveTo(ORIGIN_X, footer_y),
            SetForegroundColor(Color::White),
            Print(format!("Status: {}", snap.status)),
        )?;
        if let Some(msg) = overlay_message(snap) {
            queue!(
                self.writer,
                MoveTo(ORIGIN_X, footer_y + 1),
                SetForegroundColor(GOAL_FG),
                Print(msg),
            )?;
        }
        queue!(
            self.writer,
            MoveTo(ORIGIN_X, footer_y + 3),
            SetForegroundColor(CELL_FG),
            Print("press any key"),
        )?;
        self.writer.flush()?;

        wait_for_key()
    }

    fn draw_grid(&mut self, goal: (usize, usize)) -> io::Result<()> {
        for y in 0..self.size {
            for x in 0..self.size {
                if (x, y) == goal {
                    self.draw_cell((x, y), "◆", GOAL_FG)?;
                } else {
                    self.draw_cell((x, y), "·", CELL_FG)?;
                }
            }
        }
        self.writer.flush()
    }

    fn draw_cell(&mut self, (x, y): (usize, usize), glyph: &str, fg: Color) -> io::Result<()> {
        let col = ORIGIN_X + x as u16 * CELL_W + 1;
        let row = ORIGIN_Y + y as u16;
        queue!(
            self.writer,
            MoveTo(col, row),
            SetBackgroundColor(BASE_BG),
            SetForegroundColor(fg),
            Print(glyph),
        )
    }
}

fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
