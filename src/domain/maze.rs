/// Grid geometry and the immutable maze type.
///
/// A maze is a fixed 32x24 grid of wall / open cells. Every level shares
/// the same start and destination cells; only the walls differ.

pub const GRID_W: usize = 32;
pub const GRID_H: usize = 24;

/// Edge length of one grid cell in framebuffer pixels.
pub const GRID_SIZE: i32 = 10;

/// Grid cell coordinate. Signed so that a step off the map edge is
/// representable and can be rejected by `Maze::is_open`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Position { x: self.x + dx, y: self.y + dy }
    }

    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < GRID_W as i32 && self.y >= 0 && self.y < GRID_H as i32
    }
}

pub const START_POS: Position = Position::new(1, 1);
pub const END_POS: Position = Position::new(GRID_W as i32 - 2, GRID_H as i32 - 3);

#[derive(Clone, PartialEq, Eq)]
pub struct Maze {
    walls: [[bool; GRID_W]; GRID_H],
}

impl Maze {
    /// A maze with no walls at all.
    pub fn open() -> Self {
        Maze { walls: [[false; GRID_W]; GRID_H] }
    }

    /// Build from a text diagram: `#` is a wall, anything else is open.
    /// Rows or columns beyond the diagram stay open; extra ones are ignored.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut maze = Maze::open();
        for (y, row) in rows.iter().take(GRID_H).enumerate() {
            for (x, ch) in row.bytes().take(GRID_W).enumerate() {
                maze.walls[y][x] = ch == b'#';
            }
        }
        maze
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        pos.in_bounds() && self.walls[pos.y as usize][pos.x as usize]
    }

    /// Can the player occupy this cell? Off-grid cells are never open.
    pub fn is_open(&self, pos: Position) -> bool {
        pos.in_bounds() && !self.is_wall(pos)
    }

    /// Iterate over every wall cell, row-major.
    pub fn walls(&self) -> impl Iterator<Item = Position> + '_ {
        self.walls.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &wall)| wall)
                .map(move |(x, _)| Position::new(x as i32, y as i32))
        })
    }
}

impl std::fmt::Debug for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.walls {
            let line: String = row.iter().map(|&w| if w { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
