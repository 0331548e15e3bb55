/// Built-in level table.
///
/// Ten 32x24 mazes, `#` = wall. Parsed once at startup and never mutated.
/// Start is always (1,1) and the destination (30,21), see `maze.rs`.

use super::maze::{Maze, GRID_H};

pub const NUM_MAPS: usize = 10;

const LEVELS: [[&str; GRID_H]; NUM_MAPS] = [
    // Level 1
    [
        "################################",
        "#.#.....#.................#...##",
        "#.###.###.#####.#########.###.##",
        "#...#.#.......#.....#.#...#...##",
        "###.#.#.#########.#.#.#.###.####",
        "#...#...#...#...#.#.#.#.......##",
        "#.#######.#.#.#.###.#.#.#####.##",
        "#.#.......#.#.#.....#.#.....#.##",
        "#.#.#######.#.###.###.#####.#.##",
        "#...#.........#...........#.#.##",
        "#######.#######.#.###.#####.#.##",
        "#.......#.........#...#.....#.##",
        "###.#####.###.#####.###.#####.##",
        "#...#.......#...#...#...#.....##",
        "#.###.#########.#.###.###.#.#.##",
        "#.#...#.#.....#.#.#...#...#.#.##",
        "#.#.###.#.###.#.#.#.###.###.####",
        "#...#...#.#.#.....#.#.#.#.#...##",
        "#.#.###.#.#.#.#.###.#.#.#.###.##",
        "#.....#.#.#.....#...#.....#...##",
        "#####.#.#.#####.#.#########.#.##",
        "#.......#...................#..#",
        "################################",
        "################################",
    ],
    // Level 2
    [
        "################################",
        "#.#.............#.............##",
        "#.#.#######.###.###.###.########",
        "#.#.#.......#.#.......#.......##",
        "#.###.#######.###.#.#########.##",
        "#.#...#.....#.....#.#.....#...##",
        "#.#.###.###.#.#####.#.###.#.####",
        "#...#...#...#.....#.#.#...#...##",
        "###.#.###.#.#.#.#.#.#.#.###.#.##",
        "#...#...#...#.#.#...#.#.#...#.##",
        "#.#.###.#.#.#.###.###.#.#.###.##",
        "#.........#.#...#.#.#.#.#.#...##",
        "#.#######.#####.#.#.#.#.#.#.#.##",
        "#.#.....#.....#.....#.#.#.#.#.##",
        "###.###.###.#.#.###.#.#.###.####",
        "#...#.......#...#...#.#...#...##",
        "#.###.#######.#######.###.###.##",
        "#...#.#.......#.....#.#.......##",
        "###.###.#######.#.#.#.#######.##",
        "#...#...#.....#...#.#.....#...##",
        "#.###.###.###.###.#.#####.#.####",
        "#.........#.......#.......#....#",
        "################################",
        "################################",
    ],
    // Level 3
    [
        "################################",
        "#.....#.....#.......#.......#.##",
        "#####.#.###.#####.#.#.#####.#.##",
        "#...#...#.#...#.....#.....#...##",
        "#.#.#.###.###.#.###.###.#.###.##",
        "#.#.........#...#.#...#.#...#.##",
        "###.#.#####.#.###.###.#.#.#.#.##",
        "#.........#.....#...#...#.#.#.##",
        "#.###.#########.#.#.###.###.#.##",
        "#.#...............#...#.....#.##",
        "#.###.#################.#.###.##",
        "#...#.....#...#.....#...#...#.##",
        "#.#.###.#.#.#.#.###.#.###.#.####",
        "#.#.#.......#.#.#.#...#...#...##",
        "###.#.#####.###.#.###.#####.#.##",
        "#...#.#.......#...........#.#.##",
        "#.#.###.#####.###########.###.##",
        "#.#.#...#...#...........#.....##",
        "#.###.###.#.#####.###########.##",
        "#.....#...#.#...#.#...........##",
        "#.#######.#.###.#.#.############",
        "#.........#.....#..............#",
        "################################",
        "################################",
    ],
    // Level 4
    [
        "################################",
        "#...#.....#...........#.......##",
        "###.#.#.#.#####.#####.#.#####.##",
        "#.#...#.#...#...#.....#...#...##",
        "#.###.#.###.#.###.#.#####.#.####",
        "#.#...#.#.......#...#...#.#...##",
        "#.#.###.#######.#.###.#.#.###.##",
        "#.#.#.#.....#.....#...#.#...#.##",
        "#.#.#.#.###.#.#####.#.#.#####.##",
        "#.#.....#...#...#...#.#.....#.##",
        "#.#.###.#.#####.#.###.#####.#.##",
        "#.#.#...#.#...#.#.#...#...#.#.##",
        "#.#.#.#.#.###.#.###.###.#.#.#.##",
        "#.#...#...#...#.#...#...#.#...##",
        "#.#######.#.###.#.###.###.###.##",
        "#.#.............#.#.....#...#.##",
        "#.#.#.#.###.###.#.#.###.#####.##",
        "#.#...#.#.........#.#.#.....#.##",
        "#.###.#.#.###.#####.#.#####.#.##",
        "#.#...#...#...#...#...#.....#.##",
        "#.#.###.#.#.###.#.###.#.#####.##",
        "#.....#.....#...#.....#........#",
        "################################",
        "################################",
    ],
    // Level 5
    [
        "################################",
        "#.#.............#.............##",
        "#.#.###.#####.#.#.###.#.#.######",
        "#.#...#.#.......#.....#.#.....##",
        "#.#.#.###.#####.#.###.#######.##",
        "#.#.#.....#.....#...#...#.....##",
        "#.#.#######.#######.###.#.######",
        "#.#.#...#.......#...#.#.#.....##",
        "#.#.#.#.#######.#.###.#.#.###.##",
        "#...#.#...#...#.#...#.#.#...#.##",
        "#.#.#.###.#.#.#.###.#.#.#####.##",
        "#.#...#...#.#.......#.#.#.....##",
        "#.#####.#.###########.#.#.###.##",
        "#.#.....#.#.....#.......#.#.#.##",
        "#.#.###.###.###.#####.###.#.#.##",
        "#.......#.....#.....#.....#...##",
        "#.#.#####.#.#####.#.#######.####",
        "#.#.........#...#.#.......#...##",
        "#.#.#######.#.#.###.###.#.###.##",
        "#.........#.#.#.#...#...#...#.##",
        "###.#.###.###.#.#.###.#######.##",
        "#.............#...#............#",
        "################################",
        "################################",
    ],
    // Level 6
    [
        "################################",
        "#...#.....#...................##",
        "###.###.#.#.#######.#.###.######",
        "#.#.....#.#.#.#.....#.#.......##",
        "#.#.###.#.#.#.#.#######.#####.##",
        "#.#.....#.#...#.............#.##",
        "#.#.#.#.#.#####.#########.#.#.##",
        "#...#.....#...#.#.......#...#.##",
        "#.#########.#.#.#.#.###.#####.##",
        "#.#...........#.#.#...#.......##",
        "#.###.#.#.###.###.###.#######.##",
        "#.#...#.#.#.....#...#...#.....##",
        "#.#.#.###.#####.###.#.#.#.#.####",
        "#...#...#...#.......#.#.#.....##",
        "#######.#.#.#########.#.#####.##",
        "#.....#...#.....#...#.......#.##",
        "#.#.###.#######.#.###.#.#####.##",
        "#.....#...#.....#.#...#...#...##",
        "#####.###.#.#####.#.#####.#.####",
        "#.....#...#...#...#.#.#...#.#.##",
        "#.###.#.#####.#.###.#.#.###.#.##",
        "#.............#.......#........#",
        "################################",
        "################################",
    ],
    // Level 7
    [
        "################################",
        "#.#.....#...#.....#...#.......##",
        "#.#.#.#.#.#.#.#.#.###.#.#####.##",
        "#.#...#...#...#.#.....#...#...##",
        "#.#.###########.###.#.###.#.#.##",
        "#.#.#...........#.........#.#.##",
        "#.###.###########.#########.#.##",
        "#.....#.......#...#.....#...#.##",
        "#######.#####.#.###.###.#.###.##",
        "#...........#.#.#...#...#.#.#.##",
        "###.#######.#.#.#.###.###.#.#.##",
        "#.........#.#.#...#.#.....#...##",
        "#.#######.#.#####.#.#######.####",
        "#...#.....#.#.....#.......#...##",
        "#.#.#.###.#.#.#.#.#######.###.##",
        "#.#.#.........#...#.......#.#.##",
        "#.#.#.#.#.#.#.#.#.#.#####.#.#.##",
        "#.#.#.....#...#.#...#.......#.##",
        "###.#.###.#.###.#.###########.##",
        "#.....#.....#.#.#.......#.....##",
        "#.#####.#####.#.#.#####.#.######",
        "#.............#.......#........#",
        "################################",
        "################################",
    ],
    // Level 8
    [
        "################################",
        "#.#.........#.................##",
        "#.#.#####.#.#.###########.#.#.##",
        "#.#.....#.#...#...#.....#.#...##",
        "#.###.#.#.#####.#.#####.#.######",
        "#.....#.#.......#.....#.#.....##",
        "#######.#######.#####.#.#.###.##",
        "#.#...#.#...#...#...........#.##",
        "#.#.#.#.#.#.#.###.#######.###.##",
        "#...#.#...#.#.#...#.......#...##",
        "#####.#####.#.#.#####.###.#.#.##",
        "#.......#...#.#.......#...#.#.##",
        "#.#.#.###.###.#########.###.#.##",
        "#...#.....#.............#.#.#.##",
        "###.#.#.#####.#######.#.#.#.####",
        "#...#.#.....#.#.#.....#.#.#...##",
        "#.#########.#.#.#.###.#.#.###.##",
        "#.........#.#...#.#.........#.##",
        "###.###.###.###.#.###.#.###.#.##",
        "#.......#...#...#...........#.##",
        "#.###.###.#########.#.###.###.##",
        "#...................#..........#",
        "################################",
        "################################",
    ],
    // Level 9
    [
        "################################",
        "#.#.....#.......#.............##",
        "#.###.#.###.###.#.#.###.#####.##",
        "#.#...#...#.........#.#.......##",
        "#.#.###.#.#.#######.#.#####.#.##",
        "#.......#...#.....#.....#...#.##",
        "#####.#.#.#.#.#.#.#####.#.###.##",
        "#...#.#.....#.#.#.....#.#...#.##",
        "#.#.#.#######.#.#.#.#.#.###.####",
        "#.#.#.#.......#...#.#.#...#...##",
        "#.###.#.#.#######.###.#.#.###.##",
        "#.....#.#.......#...#.......#.##",
        "#.#########.###.###.#.#####.#.##",
        "#.#.......#.#...#.#.#.......#.##",
        "#.#.#.###.###.###.#.#########.##",
        "#.#.#.#...#...#...#...........##",
        "#.###.#.###.#####.###.#.#####.##",
        "#...#.......#.........#.....#.##",
        "###.#.#######.#.#####.#.###.#.##",
        "#...#...#.....#...#...#.#.#...##",
        "#.#####.#.###.#.#.#.#.#.#.######",
        "#.......#...#...#...#..........#",
        "################################",
        "################################",
    ],
    // Level 10
    [
        "################################",
        "#.#...#.........#.............##",
        "#.#.#.###.###.#.###.#.###.###.##",
        "#...#...#...#.#.#...#...#...#.##",
        "#######.#####.#.#.#.###.#.###.##",
        "#.....#.......#...#.#...#.....##",
        "###.#.#############.#.###.#.####",
        "#...#.......#.....#.#...#.#...##",
        "#.#####.###.#.#.#.#.###.#.###.##",
        "#.#.....#...#.#...#.#...#...#.##",
        "#.#####.#.###.#.###.#.#.###.#.##",
        "#.....#.......#...#...#.....#.##",
        "#####.#.#########.#####.#.###.##",
        "#.....#.#.......#.#.......#...##",
        "#.#.###.#.#####.###.###.#.#.####",
        "#.#.....#.....#.....#...#.#.#.##",
        "#.#.#.###.###.###.###.###.#.#.##",
        "#.#.#.......#.......#.........##",
        "#.###.###.#.###.###.#######.#.##",
        "#.....#.#.#.#.....#.#...#.....##",
        "#.#.###.#.###.#.#.#.#.#.###.#.##",
        "#.......#.....#.......#.....#..#",
        "################################",
        "################################",
    ],
];

/// Parse the whole table. Called once by `main`.
pub fn load_all() -> Vec<Maze> {
    LEVELS.iter().map(|rows| Maze::from_rows(rows)).collect()
}
