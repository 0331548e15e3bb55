/// Frame renderer: back buffer, drawing primitives and scene composition.
///
/// All drawing lands in an off-screen back buffer the size of the visible
/// area (320x240, RGB565). Nothing reaches the board until `present()`,
/// which copies the whole buffer row by row into the visible part of the
/// 512-wide scan buffer. Every scene starts with a full-screen fill, so
/// the back buffer is completely rewritten each tick.

use crate::domain::maze::{Maze, Position, GRID_SIZE};
use crate::domain::palette::{self, PLAYER_COLORS};
use crate::hal::{Peripherals, SCREEN_HEIGHT, VISIBLE_WIDTH};
use crate::sim::game::{GameSession, GameState};

/// Player glyph shape, chosen by LED0.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GlyphShape {
    Square,
    Circle,
}

impl GlyphShape {
    /// LED0 lit draws a square, dark draws a circle.
    pub fn from_leds(leds: u32) -> Self {
        if leds & 0x1 != 0 {
            GlyphShape::Square
        } else {
            GlyphShape::Circle
        }
    }
}

pub struct FrameRenderer {
    back: Vec<u16>,
    /// Index into `PLAYER_COLORS` for the next glyph draw.
    color_step: usize,
}

impl FrameRenderer {
    pub fn new() -> Self {
        FrameRenderer {
            back: vec![palette::BLACK; VISIBLE_WIDTH * SCREEN_HEIGHT],
            color_step: 0,
        }
    }

    // ── Primitives ──

    /// Write one pixel. Outside the visible area this is a no-op.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u16) {
        if x >= 0 && (x as usize) < VISIBLE_WIDTH && y >= 0 && (y as usize) < SCREEN_HEIGHT {
            self.back[y as usize * VISIBLE_WIDTH + x as usize] = color;
        }
    }

    #[cfg(test)]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u16> {
        if x >= 0 && (x as usize) < VISIBLE_WIDTH && y >= 0 && (y as usize) < SCREEN_HEIGHT {
            Some(self.back[y as usize * VISIBLE_WIDTH + x as usize])
        } else {
            None
        }
    }

    /// Filled rectangle, both corners inclusive.
    pub fn tile(&mut self, x_start: i32, y_start: i32, x_end: i32, y_end: i32, color: u16) {
        for y in y_start..=y_end {
            for x in x_start..=x_end {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Filled circle: every pixel with dx² + dy² ≤ r².
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: u16) {
        let r2 = radius * radius;
        for y in (cy - radius)..=(cy + radius) {
            for x in (cx - radius)..=(cx + radius) {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    pub fn fill(&mut self, color: u16) {
        self.back.fill(color);
    }

    /// Copy the back buffer to the board, one visible row at a time.
    pub fn present<P: Peripherals>(&self, board: &mut P) {
        for (y, row) in self.back.chunks_exact(VISIBLE_WIDTH).enumerate() {
            board.write_pixel_row(y, row);
        }
    }

    // ── Game shapes ──

    fn cell(&mut self, pos: Position, color: u16) {
        let (x, y) = (pos.x * GRID_SIZE, pos.y * GRID_SIZE);
        self.tile(x, y, x + GRID_SIZE - 1, y + GRID_SIZE - 1, color);
    }

    pub fn draw_maze(&mut self, maze: &Maze, visible: bool) {
        let color = if visible { palette::WALL_VISIBLE } else { palette::WALL_HIDDEN };
        for wall in maze.walls() {
            self.cell(wall, color);
        }
    }

    pub fn draw_destination(&mut self, pos: Position) {
        self.cell(pos, palette::DESTINATION);
    }

    /// Draw the player and step the colour cycle.
    pub fn draw_player(&mut self, pos: Position, shape: GlyphShape) {
        let color = PLAYER_COLORS[self.color_step];
        match shape {
            GlyphShape::Square => self.cell(pos, color),
            GlyphShape::Circle => {
                let radius = GRID_SIZE / 2;
                self.fill_circle(pos.x * GRID_SIZE + radius, pos.y * GRID_SIZE + radius, radius, color);
            }
        }
        self.color_step = (self.color_step + 1) % PLAYER_COLORS.len();
    }

    /// Colour the next glyph draw will use.
    #[cfg(test)]
    pub fn next_player_color(&self) -> u16 {
        PLAYER_COLORS[self.color_step]
    }

    /// Compose the whole scene for the session's current state.
    pub fn compose(&mut self, session: &GameSession, shape: GlyphShape) {
        match session.state {
            GameState::Welcome => self.fill(palette::WELCOME_BG),
            GameState::Memorize => {
                self.fill(palette::MAZE_BG);
                self.draw_maze(session.maze(), true);
                self.draw_player(session.player, shape);
                self.draw_destination(session.destination());
            }
            GameState::Play => {
                self.fill(palette::MAZE_BG);
                self.draw_maze(session.maze(), false);
                self.draw_destination(session.destination());
                self.draw_player(session.player, shape);
            }
            GameState::GameWin => self.fill(palette::WIN_BG),
            GameState::GameLose => self.fill(palette::LOSE_BG),
        }
    }
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}
