/// Double-buffered, diff-based terminal output for the board's framebuffer.
///
/// How it works:
///   1. Build the next frame into `front` (one Cell per terminal column)
///   2. Compare each cell with `back` (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Each terminal character shows two 5x5 pixel blocks stacked vertically
/// using an upper-half block: foreground = top block, background = bottom.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::palette::rgb565_to_rgb;
use crate::hal::{SCAN_WIDTH, SCREEN_HEIGHT, VISIBLE_WIDTH};

/// Pixels per terminal column / per half-row.
const BLOCK: usize = 5;
pub const COLS: usize = VISIBLE_WIDTH / BLOCK;
pub const ROWS: usize = SCREEN_HEIGHT / (BLOCK * 2);
/// Status line below the picture.
const STATUS_ROW: usize = ROWS;
const HELP_ROW: usize = ROWS + 1;

const UPPER_HALF: char = '\u{2580}';

// ── Cell: the unit of the diff buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BASE_BG: Color = Color::Rgb { r: 0, g: 0, b: 0 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };
}

fn rgb(c: u16) -> Color {
    let (r, g, b) = rgb565_to_rgb(c);
    Color::Rgb { r, g, b }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width {
                break;
            }
            self.set(x + i, y, Cell { ch, fg, bg: Cell::BASE_BG });
        }
    }
}

/// What the status line shows alongside the picture.
pub struct Status {
    pub display: Option<u8>,
    pub led0: bool,
    pub sw0: bool,
    pub gamepad: bool,
}

pub struct Screen {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
}

impl Screen {
    pub fn new() -> Self {
        Screen {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(COLS, ROWS + 2),
            back: FrameBuffer::new(COLS, ROWS + 2),
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let entered = execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        );
        if let Err(e) = entered {
            // undo the part that did succeed
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        // Force full repaint on first frame.
        self.back.cells.fill(Cell::INVALID);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    /// Sample the visible part of a scan buffer and draw it.
    pub fn render(&mut self, framebuffer: &[u16], status: &Status) -> io::Result<()> {
        self.front.clear();
        self.compose_picture(framebuffer);
        self.compose_status(status);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    fn compose_picture(&mut self, fb: &[u16]) {
        let sample = |x: usize, y: usize| fb.get(y * SCAN_WIDTH + x).copied().unwrap_or(0);
        for row in 0..ROWS {
            for col in 0..COLS {
                let x = col * BLOCK;
                let top = sample(x, row * BLOCK * 2);
                let bottom = sample(x, row * BLOCK * 2 + BLOCK);
                self.front.set(col, row, Cell { ch: UPPER_HALF, fg: rgb(top), bg: rgb(bottom) });
            }
        }
    }

    fn compose_status(&mut self, status: &Status) {
        let hex = match status.display {
            Some(v) => format!("{v:02}"),
            None => "--".to_string(),
        };
        let led_color = if status.led0 { Color::Red } else { Color::DarkGrey };
        self.front.put_str(0, STATUS_ROW, &format!("HEX [{hex}]"), Color::Yellow);
        self.front.put_str(12, STATUS_ROW, "LED0 \u{25CF}", led_color);
        let sw = if status.sw0 { "SW0 up" } else { "SW0 dn" };
        self.front.put_str(21, STATUS_ROW, sw, Color::White);
        if status.gamepad {
            self.front.put_str(30, STATUS_ROW, "pad", Color::Green);
        }
        self.front.put_str(0, HELP_ROW, "arrows/WASD move  Tab switch  Esc quit", Color::DarkGrey);
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }
}
