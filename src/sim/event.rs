/// Events emitted during a game step.
/// The tick pipeline consumes these for audio, debouncing and logging.

use crate::domain::maze::Position;

use super::game::GameState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    StateChanged { from: GameState, to: GameState },
    /// One countdown second elapsed.
    SecondElapsed { remaining: i32 },
    PlayerMoved { to: Position },
    /// Move attempt into a wall or off the grid.
    MoveBlocked { at: Position },
    LevelAdvanced { index: usize },
    /// Next tick must wait until every button is released.
    ReleaseRequired,
}
