/// The game state machine: one `step` per processed tick.
///
/// ```text
///   WELCOME ──any button──▶ MEMORIZE ──countdown ≤ 0──▶ PLAY
///      ▲                                               │  │
///      │        ┌──────── time < 0 ────────────────────┘  │
///      │        ▼                                         ▼ reached destination
///      ├── GAME_LOSE (same maze)              GAME_WIN (next maze)
///      └────────────── any button ◀──────────────────────┘
/// ```
///
/// PLAY loses only once the countdown goes *below* zero, so the player
/// keeps a final second at 0. A move that reaches the destination wins
/// even on the tick the time runs out.

use crate::domain::maze::{Maze, Position, END_POS, START_POS};
use crate::domain::palette::{DISPLAY_IDLE, DISPLAY_LOSE, DISPLAY_WELCOME, DISPLAY_WIN};
use crate::hal::Buttons;

use super::event::GameEvent;
use super::input::priority_direction;
use super::timing::TICKS_PER_SECOND;

/// Seconds to study the maze before it goes dark.
pub const MEMORIZE_TIME: i32 = 10;
/// Seconds to reach the destination.
pub const GAME_TIME: i32 = 60;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Welcome,
    Memorize,
    Play,
    GameWin,
    GameLose,
}

impl GameState {
    /// Fixed display value for non-gameplay states.
    pub fn sentinel(self) -> Option<i32> {
        match self {
            GameState::Welcome => Some(DISPLAY_WELCOME),
            GameState::GameWin => Some(DISPLAY_WIN),
            GameState::GameLose => Some(DISPLAY_LOSE),
            GameState::Memorize | GameState::Play => None,
        }
    }
}

/// Everything that survives between ticks.
pub struct GameSession {
    pub state: GameState,
    pub player: Position,
    pub time_remaining: i32,
    pub frame_counter: u32,
    pub map_index: usize,
    /// Value currently meant for the seven-segment display.
    pub display: i32,
    levels: Vec<Maze>,
}

impl GameSession {
    /// An empty level table falls back to a single wall-less maze.
    pub fn new(mut levels: Vec<Maze>) -> Self {
        if levels.is_empty() {
            tracing::warn!("no levels loaded, using an open maze");
            levels.push(Maze::open());
        }
        let mut session = GameSession {
            state: GameState::Welcome,
            player: START_POS,
            time_remaining: 0,
            frame_counter: 0,
            map_index: 0,
            display: DISPLAY_IDLE,
            levels,
        };
        session.reset();
        session
    }

    /// Back to WELCOME on the current maze.
    pub fn reset(&mut self) {
        self.player = START_POS;
        self.state = GameState::Welcome;
        self.display = DISPLAY_IDLE;
    }

    pub fn maze(&self) -> &Maze {
        &self.levels[self.map_index]
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn destination(&self) -> Position {
        END_POS
    }

    /// Advance one tick with the buttons read at its start.
    pub fn step(&mut self, buttons: Buttons) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let from = self.state;
        if let Some(value) = self.state.sentinel() {
            self.display = value;
        }

        match self.state {
            GameState::Welcome => self.step_welcome(buttons),
            GameState::Memorize => self.step_memorize(&mut events),
            GameState::Play => self.step_play(buttons, &mut events),
            GameState::GameWin => self.step_win(buttons, &mut events),
            GameState::GameLose => self.step_lose(buttons, &mut events),
        }

        if self.state != from {
            tracing::info!(?from, to = ?self.state, level = self.map_index, "state change");
            events.insert(0, GameEvent::StateChanged { from, to: self.state });
        }
        events
    }

    fn step_welcome(&mut self, buttons: Buttons) {
        if buttons.any_held() {
            self.state = GameState::Memorize;
            self.time_remaining = MEMORIZE_TIME;
            self.display = self.time_remaining;
            self.frame_counter = 0;
        }
    }

    /// Count one tick; true when a whole second has elapsed.
    fn count_frame(&mut self, events: &mut Vec<GameEvent>) -> bool {
        self.frame_counter += 1;
        if self.frame_counter < TICKS_PER_SECOND {
            return false;
        }
        self.frame_counter = 0;
        self.time_remaining -= 1;
        self.display = self.time_remaining;
        events.push(GameEvent::SecondElapsed { remaining: self.time_remaining });
        true
    }

    fn step_memorize(&mut self, events: &mut Vec<GameEvent>) {
        if self.count_frame(events) && self.time_remaining <= 0 {
            self.state = GameState::Play;
            self.time_remaining = GAME_TIME;
            self.display = self.time_remaining;
        }
    }

    fn step_play(&mut self, buttons: Buttons, events: &mut Vec<GameEvent>) {
        if self.count_frame(events) && self.time_remaining < 0 {
            self.state = GameState::GameLose;
        }

        let Some(dir) = priority_direction(buttons) else { return };
        let (dx, dy) = dir.delta();
        let target = self.player.offset(dx, dy);
        if self.maze().is_open(target) {
            self.player = target;
            events.push(GameEvent::PlayerMoved { to: target });
            if target == self.destination() {
                self.state = GameState::GameWin;
            }
        } else {
            tracing::debug!(x = target.x, y = target.y, ?dir, "move blocked");
            events.push(GameEvent::MoveBlocked { at: target });
        }
        events.push(GameEvent::ReleaseRequired);
    }

    fn step_win(&mut self, buttons: Buttons, events: &mut Vec<GameEvent>) {
        if buttons.any_held() {
            self.map_index = (self.map_index + 1) % self.levels.len();
            self.reset();
            events.push(GameEvent::LevelAdvanced { index: self.map_index });
            events.push(GameEvent::ReleaseRequired);
        }
    }

    fn step_lose(&mut self, buttons: Buttons, events: &mut Vec<GameEvent>) {
        if buttons.any_held() {
            self.reset();
            events.push(GameEvent::ReleaseRequired);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::levels::{self, NUM_MAPS};

    fn session_with(maze: Maze) -> GameSession {
        GameSession::new(vec![maze])
    }

    /// Run `n` ticks with no input.
    fn idle(s: &mut GameSession, n: u32) -> Vec<GameEvent> {
        (0..n).flat_map(|_| s.step(Buttons::empty())).collect()
    }

    fn into_play(s: &mut GameSession) {
        s.step(Buttons::UP);
        idle(s, MEMORIZE_TIME as u32 * TICKS_PER_SECOND);
        assert_eq!(s.state, GameState::Play);
    }

    fn blocked_count(events: &[GameEvent]) -> usize {
        events.iter().filter(|e| matches!(e, GameEvent::MoveBlocked { .. })).count()
    }

    // ── WELCOME ──

    #[test]
    fn starts_in_welcome_at_start_cell() {
        let s = GameSession::new(levels::load_all());
        assert_eq!(s.state, GameState::Welcome);
        assert_eq!(s.player, START_POS);
        assert_eq!(s.display, DISPLAY_IDLE);
    }

    #[test]
    fn empty_level_table_still_playable() {
        let mut s = GameSession::new(Vec::new());
        assert_eq!(s.level_count(), 1);
        assert_eq!(s.maze(), &Maze::open());
        into_play(&mut s);
        s.step(Buttons::RIGHT);
        assert_eq!(s.player, START_POS.offset(1, 0));
    }

    #[test]
    fn welcome_waits_without_input() {
        let mut s = session_with(Maze::open());
        assert!(idle(&mut s, 300).is_empty());
        assert_eq!(s.state, GameState::Welcome);
        assert_eq!(s.display, DISPLAY_WELCOME);
    }

    #[test]
    fn any_button_leaves_welcome() {
        for b in [Buttons::UP, Buttons::DOWN, Buttons::LEFT, Buttons::RIGHT, Buttons::all()] {
            let mut s = session_with(Maze::open());
            s.frame_counter = 37;
            let events = s.step(b);
            assert_eq!(s.state, GameState::Memorize);
            assert_eq!(s.time_remaining, MEMORIZE_TIME);
            assert_eq!(s.frame_counter, 0);
            assert_eq!(s.display, MEMORIZE_TIME);
            // leaving welcome does not demand a release
            assert!(!events.contains(&GameEvent::ReleaseRequired));
        }
    }

    // ── MEMORIZE ──

    #[test]
    fn memorize_counts_down_once_per_sixty_ticks() {
        let mut s = session_with(Maze::open());
        s.step(Buttons::UP);
        for i in 1..TICKS_PER_SECOND {
            s.step(Buttons::empty());
            assert_eq!(s.time_remaining, MEMORIZE_TIME);
            assert_eq!(s.frame_counter, i);
        }
        let events = s.step(Buttons::empty());
        assert_eq!(s.time_remaining, MEMORIZE_TIME - 1);
        assert_eq!(s.frame_counter, 0);
        assert_eq!(s.display, MEMORIZE_TIME - 1);
        assert_eq!(events, vec![GameEvent::SecondElapsed { remaining: MEMORIZE_TIME - 1 }]);
    }

    #[test]
    fn memorize_ignores_buttons() {
        let mut s = session_with(Maze::open());
        s.step(Buttons::UP);
        s.step(Buttons::RIGHT);
        assert_eq!(s.player, START_POS);
        assert_eq!(s.state, GameState::Memorize);
    }

    #[test]
    fn six_hundred_ticks_after_press_reach_play() {
        let mut s = session_with(Maze::open());
        s.step(Buttons::LEFT);
        idle(&mut s, 599);
        assert_eq!(s.state, GameState::Memorize);
        assert_eq!(s.time_remaining, 1);
        let events = s.step(Buttons::empty());
        assert_eq!(s.state, GameState::Play);
        assert_eq!(s.time_remaining, GAME_TIME);
        assert_eq!(s.display, GAME_TIME);
        assert_eq!(events[0], GameEvent::StateChanged { from: GameState::Memorize, to: GameState::Play });
    }

    // ── PLAY ──

    #[test]
    fn wall_blocks_and_open_cell_moves() {
        // player at (1,1), wall at (0,1) to the left and (1,0) above
        let mut s = session_with(Maze::from_rows(&[
            "###",
            "#..",
        ]));
        into_play(&mut s);
        assert_eq!(s.player, Position::new(1, 1));

        let events = s.step(Buttons::LEFT);
        assert_eq!(s.player, Position::new(1, 1));
        assert_eq!(blocked_count(&events), 1);
        assert!(events.contains(&GameEvent::MoveBlocked { at: Position::new(0, 1) }));

        let events = s.step(Buttons::UP);
        assert_eq!(s.player, Position::new(1, 1));
        assert_eq!(blocked_count(&events), 1);

        let events = s.step(Buttons::RIGHT);
        assert_eq!(s.player, Position::new(2, 1));
        assert_eq!(blocked_count(&events), 0);
        assert!(events.contains(&GameEvent::PlayerMoved { to: Position::new(2, 1) }));
    }

    #[test]
    fn grid_edge_blocks() {
        let mut s = session_with(Maze::open());
        into_play(&mut s);
        s.player = Position::new(0, 0);
        let events = s.step(Buttons::UP);
        assert_eq!(s.player, Position::new(0, 0));
        assert_eq!(blocked_count(&events), 1);
        let events = s.step(Buttons::LEFT);
        assert_eq!(s.player, Position::new(0, 0));
        assert_eq!(blocked_count(&events), 1);
    }

    #[test]
    fn only_highest_priority_direction_moves() {
        let mut s = session_with(Maze::open());
        into_play(&mut s);
        s.step(Buttons::DOWN | Buttons::RIGHT);
        assert_eq!(s.player, Position::new(1, 2));
    }

    #[test]
    fn every_move_attempt_requires_release() {
        let mut s = session_with(Maze::from_rows(&["###"]));
        into_play(&mut s);
        assert!(s.step(Buttons::UP).contains(&GameEvent::ReleaseRequired));
        assert!(s.step(Buttons::DOWN).contains(&GameEvent::ReleaseRequired));
        assert!(!s.step(Buttons::empty()).contains(&GameEvent::ReleaseRequired));
    }

    #[test]
    fn reaching_destination_wins() {
        let mut s = session_with(Maze::open());
        into_play(&mut s);
        s.player = END_POS.offset(-1, 0);
        let events = s.step(Buttons::RIGHT);
        assert_eq!(s.state, GameState::GameWin);
        assert!(events.contains(&GameEvent::StateChanged { from: GameState::Play, to: GameState::GameWin }));
    }

    #[test]
    fn standing_on_destination_without_moving_does_not_win() {
        let mut s = session_with(Maze::open());
        into_play(&mut s);
        s.player = END_POS;
        idle(&mut s, 5);
        assert_eq!(s.state, GameState::Play);
    }

    #[test]
    fn stepping_off_and_back_onto_destination_wins() {
        let mut s = session_with(Maze::open());
        into_play(&mut s);
        s.player = END_POS;
        s.step(Buttons::LEFT);
        assert_eq!(s.state, GameState::Play);
        s.step(Buttons::RIGHT);
        assert_eq!(s.state, GameState::GameWin);
    }

    #[test]
    fn zero_seconds_is_still_playable() {
        let mut s = session_with(Maze::open());
        into_play(&mut s);
        idle(&mut s, GAME_TIME as u32 * TICKS_PER_SECOND);
        assert_eq!(s.time_remaining, 0);
        assert_eq!(s.state, GameState::Play);

        idle(&mut s, TICKS_PER_SECOND - 1);
        assert_eq!(s.state, GameState::Play);
        s.step(Buttons::empty());
        assert_eq!(s.time_remaining, -1);
        assert_eq!(s.state, GameState::GameLose);
    }

    #[test]
    fn winning_move_overrides_timeout_on_same_tick() {
        let mut s = session_with(Maze::open());
        into_play(&mut s);
        s.time_remaining = 0;
        s.frame_counter = TICKS_PER_SECOND - 1;
        s.player = END_POS.offset(0, -1);
        s.step(Buttons::DOWN);
        assert_eq!(s.time_remaining, -1);
        assert_eq!(s.state, GameState::GameWin);
    }

    // ── GAME_WIN / GAME_LOSE ──

    #[test]
    fn win_shows_sentinel_and_waits() {
        let mut s = session_with(Maze::open());
        s.state = GameState::GameWin;
        idle(&mut s, 10);
        assert_eq!(s.state, GameState::GameWin);
        assert_eq!(s.display, DISPLAY_WIN);
    }

    #[test]
    fn win_advances_level_and_wraps() {
        let mut s = GameSession::new(levels::load_all());
        s.map_index = NUM_MAPS - 1;
        s.state = GameState::GameWin;
        s.player = END_POS;
        let events = s.step(Buttons::LEFT);
        assert_eq!(s.map_index, 0);
        assert_eq!(s.state, GameState::Welcome);
        assert_eq!(s.player, START_POS);
        assert_eq!(s.display, DISPLAY_IDLE);
        assert!(events.contains(&GameEvent::LevelAdvanced { index: 0 }));
        assert!(events.contains(&GameEvent::ReleaseRequired));

        s.state = GameState::GameWin;
        s.step(Buttons::UP);
        assert_eq!(s.map_index, 1);
    }

    #[test]
    fn lose_restarts_same_level() {
        let mut s = GameSession::new(levels::load_all());
        s.map_index = 4;
        s.state = GameState::GameLose;
        s.player = Position::new(7, 7);
        idle(&mut s, 3);
        assert_eq!(s.display, DISPLAY_LOSE);
        let events = s.step(Buttons::DOWN);
        assert_eq!(s.map_index, 4);
        assert_eq!(s.state, GameState::Welcome);
        assert_eq!(s.player, START_POS);
        assert!(events.contains(&GameEvent::ReleaseRequired));
    }

    #[test]
    fn sentinels_are_fixed_per_state() {
        assert_eq!(GameState::Welcome.sentinel(), Some(88));
        assert_eq!(GameState::GameWin.sentinel(), Some(11));
        assert_eq!(GameState::GameLose.sentinel(), Some(0));
        assert_eq!(GameState::Play.sentinel(), None);
        assert_eq!(GameState::Memorize.sentinel(), None);
    }
}
