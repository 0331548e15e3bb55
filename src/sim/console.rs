/// The per-tick pipeline tying the core together.
///
/// Processing order inside one tick:
///   1. Mirror SW0 onto LED0
///   2. Read buttons; drop the tick if a latched press is still held
///   3. Step the game state machine
///   4. Side effects from events (feedback tone, release latch)
///   5. Seven-segment update
///   6. Compose the scene into the back buffer
///   7. Present
///
/// Nothing at all happens between timer fires.

use crate::hal::{seven_seg, Peripherals};
use crate::ui::renderer::{FrameRenderer, GlyphShape};

use super::audio::play_wall_boop;
use super::event::GameEvent;
use super::game::GameSession;
use super::input::Debouncer;
use super::timing::{FrameTimer, CYCLES_PER_FRAME};

pub struct Console<P: Peripherals> {
    board: P,
    timer: FrameTimer,
    renderer: FrameRenderer,
    debounce: Debouncer,
    session: GameSession,
    last_display: Option<u32>,
    feedback_count: u64,
}

impl<P: Peripherals> Console<P> {
    /// Take over the board: blank the display and arm the frame timer.
    pub fn new(mut board: P, session: GameSession) -> Self {
        let pattern = seven_seg::encode(session.display);
        board.write_seven_seg(pattern);
        let timer = FrameTimer::start(&mut board, CYCLES_PER_FRAME);
        Console {
            board,
            timer,
            renderer: FrameRenderer::new(),
            debounce: Debouncer::new(),
            session,
            last_display: Some(pattern),
            feedback_count: 0,
        }
    }

    /// Poll the timer once. Runs a tick if it fired; returns whether a
    /// frame was presented.
    pub fn poll(&mut self) -> bool {
        if !self.timer.has_fired(&mut self.board) {
            return false;
        }
        self.tick()
    }

    /// Run one tick unconditionally. Returns `false` if it was deferred
    /// waiting for a button release.
    pub fn tick(&mut self) -> bool {
        let sw0 = self.board.switches() & 0x1;
        self.board.set_leds(sw0);

        let buttons = self.board.buttons();
        if self.debounce.defer(buttons) {
            tracing::trace!(bits = buttons.bits(), "tick deferred until release");
            return false;
        }

        let events = self.session.step(buttons);
        for event in &events {
            match event {
                GameEvent::MoveBlocked { .. } => {
                    play_wall_boop(&mut self.board);
                    self.feedback_count += 1;
                }
                GameEvent::ReleaseRequired => self.debounce.latch(),
                GameEvent::LevelAdvanced { index } => {
                    tracing::info!(level = index + 1, "next maze");
                }
                _ => {}
            }
        }

        let pattern = seven_seg::encode(self.session.display);
        if self.last_display != Some(pattern) {
            self.board.write_seven_seg(pattern);
            self.last_display = Some(pattern);
        }

        let shape = GlyphShape::from_leds(self.board.leds());
        self.renderer.compose(&self.session, shape);
        self.renderer.present(&mut self.board);
        true
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn board(&self) -> &P {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut P {
        &mut self.board
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Feedback tones played so far.
    pub fn feedback_count(&self) -> u64 {
        self.feedback_count
    }

    /// Ticks dropped while waiting for a button release.
    pub fn deferred_ticks(&self) -> u64 {
        self.debounce.deferred_ticks()
    }

    pub fn into_board(self) -> P {
        self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::levels;
    use crate::domain::maze::{Maze, Position, START_POS};
    use crate::domain::palette::*;
    use crate::hal::memory::MemoryBoard;
    use crate::hal::Buttons;
    use crate::sim::game::{GameState, GAME_TIME, MEMORIZE_TIME};

    fn console_with(maze: Maze) -> Console<MemoryBoard> {
        Console::new(MemoryBoard::new(), GameSession::new(vec![maze]))
    }

    /// Let one frame period elapse and poll once.
    fn frame(c: &mut Console<MemoryBoard>, buttons: Buttons) -> bool {
        c.board_mut().buttons = buttons;
        c.board_mut().advance_clock(CYCLES_PER_FRAME as u64);
        c.poll()
    }

    fn frames(c: &mut Console<MemoryBoard>, n: u32) {
        for _ in 0..n {
            assert!(frame(c, Buttons::empty()));
        }
    }

    fn displayed(c: &Console<MemoryBoard>) -> Option<u8> {
        seven_seg::decode(c.board().seven_seg())
    }

    #[test]
    fn new_arms_timer_and_blanks_display() {
        let c = Console::new(MemoryBoard::new(), GameSession::new(levels::load_all()));
        assert_eq!(c.board().timer_period(), CYCLES_PER_FRAME);
        assert_eq!(displayed(&c), Some(0));
    }

    #[test]
    fn no_work_between_fires() {
        let mut c = console_with(Maze::open());
        c.board_mut().buttons = Buttons::UP;
        c.board_mut().advance_clock(CYCLES_PER_FRAME as u64 - 1);
        for _ in 0..100 {
            assert!(!c.poll());
        }
        assert_eq!(c.session().state, GameState::Welcome);
        assert_eq!(c.board().rows_written(), 0);
    }

    #[test]
    fn every_processed_tick_presents_a_full_frame() {
        let mut c = console_with(Maze::open());
        frames(&mut c, 3);
        assert_eq!(c.board().rows_written(), 3 * 240);
        assert_eq!(c.board().pixel(0, 0), Some(WELCOME_BG));
        assert_eq!(displayed(&c), Some(88));
    }

    #[test]
    fn press_then_ten_seconds_reaches_play() {
        let mut c = console_with(Maze::open());
        frames(&mut c, 5);
        assert!(frame(&mut c, Buttons::RIGHT));
        assert_eq!(c.session().state, GameState::Memorize);
        assert_eq!(c.session().time_remaining, MEMORIZE_TIME);
        assert_eq!(displayed(&c), Some(10));

        // no release latch on leaving welcome
        frames(&mut c, 599);
        assert_eq!(c.session().state, GameState::Memorize);
        assert_eq!(displayed(&c), Some(1));
        frames(&mut c, 1);
        assert_eq!(c.session().state, GameState::Play);
        assert_eq!(c.session().time_remaining, GAME_TIME);
        assert_eq!(displayed(&c), Some(60));
    }

    fn play_console(maze: Maze) -> Console<MemoryBoard> {
        let mut c = console_with(maze);
        frame(&mut c, Buttons::UP);
        frames(&mut c, 600);
        assert_eq!(c.session().state, GameState::Play);
        c
    }

    #[test]
    fn blocked_move_plays_one_tone_and_open_move_commits() {
        // wall at (0,1) left of the start cell, open to the right
        let mut c = play_console(Maze::from_rows(&[
            "###",
            "#..",
        ]));
        assert_eq!(c.session().player, Position::new(1, 1));

        assert!(frame(&mut c, Buttons::LEFT));
        assert_eq!(c.session().player, Position::new(1, 1));
        assert_eq!(c.feedback_count(), 1);
        assert_eq!(c.board().fifo_clears(), 1);
        assert!(c.board().samples_accepted() > 0);

        // still held: deferred, no second tone
        assert!(!frame(&mut c, Buttons::LEFT));
        assert!(!frame(&mut c, Buttons::LEFT));
        assert_eq!(c.feedback_count(), 1);

        assert!(frame(&mut c, Buttons::empty()));
        assert!(frame(&mut c, Buttons::RIGHT));
        assert_eq!(c.session().player, Position::new(2, 1));
        assert_eq!(c.feedback_count(), 1);
    }

    #[test]
    fn holding_a_direction_moves_only_one_cell() {
        let mut c = play_console(Maze::open());
        for _ in 0..30 {
            frame(&mut c, Buttons::DOWN);
        }
        assert_eq!(c.session().player, START_POS.offset(0, 1));
        frame(&mut c, Buttons::empty());
        frame(&mut c, Buttons::DOWN);
        assert_eq!(c.session().player, START_POS.offset(0, 2));
    }

    #[test]
    fn countdown_freezes_while_waiting_for_release() {
        let mut c = play_console(Maze::open());
        frame(&mut c, Buttons::RIGHT);
        let counter = c.session().frame_counter;
        for _ in 0..120 {
            assert!(!frame(&mut c, Buttons::RIGHT));
        }
        assert_eq!(c.session().frame_counter, counter);
        assert_eq!(c.session().time_remaining, GAME_TIME);
        // the timer was still acknowledged every period
        assert_eq!(c.timer().ticks(), 1 + 600 + 1 + 120);
        assert_eq!(c.deferred_ticks(), 120);
    }

    #[test]
    fn win_press_advances_level_after_release() {
        let mut c = Console::new(MemoryBoard::new(), GameSession::new(levels::load_all()));
        frame(&mut c, Buttons::UP);
        frames(&mut c, 600);
        c.session.player = c.session.destination().offset(-1, 0);
        frame(&mut c, Buttons::RIGHT);
        assert_eq!(c.session().state, GameState::GameWin);
        assert!(!frame(&mut c, Buttons::RIGHT));
        assert!(frame(&mut c, Buttons::empty()));
        assert_eq!(c.board().pixel(0, 0), Some(WIN_BG));
        assert_eq!(displayed(&c), Some(11));

        frame(&mut c, Buttons::LEFT);
        assert_eq!(c.session().state, GameState::Welcome);
        assert_eq!(c.session().map_index, 1);
        assert_eq!(c.session().player, START_POS);
        assert_eq!(displayed(&c), Some(0));
        // held press from the win screen does not start the next level
        assert!(!frame(&mut c, Buttons::LEFT));
        assert_eq!(c.session().state, GameState::Welcome);
        assert!(frame(&mut c, Buttons::empty()));
        assert_eq!(displayed(&c), Some(88));
    }

    #[test]
    fn timeout_loses_and_restarts_same_level() {
        let mut c = play_console(Maze::open());
        frames(&mut c, 60 * 60);
        assert_eq!(c.session().state, GameState::Play);
        assert_eq!(displayed(&c), Some(0));
        frames(&mut c, 60);
        assert_eq!(c.session().state, GameState::GameLose);
        // -1 is clamped on the display
        assert_eq!(displayed(&c), Some(0));
        frames(&mut c, 1);
        assert_eq!(c.board().pixel(100, 100), Some(LOSE_BG));

        frame(&mut c, Buttons::UP);
        assert_eq!(c.session().state, GameState::Welcome);
        assert_eq!(c.session().map_index, 0);
    }

    #[test]
    fn switch_drives_led_and_glyph_shape() {
        let mut c = play_console(Maze::open());
        c.board_mut().switches = 1;
        frames(&mut c, 1);
        assert_eq!(c.board().leds() & 1, 1);
        // square glyph fills the cell corner
        assert_ne!(c.board().pixel(10, 10), Some(MAZE_BG));

        c.board_mut().switches = 0;
        frames(&mut c, 1);
        assert_eq!(c.board().leds() & 1, 0);
        assert_eq!(c.board().pixel(10, 10), Some(MAZE_BG));
        assert_ne!(c.board().pixel(15, 15), Some(MAZE_BG));
    }

    #[test]
    fn walls_visible_while_memorizing_hidden_while_playing() {
        let maze = Maze::from_rows(&["#"]);
        let mut c = console_with(maze.clone());
        frame(&mut c, Buttons::UP);
        assert_eq!(c.board().pixel(5, 5), Some(WALL_VISIBLE));
        frames(&mut c, 600);
        assert_eq!(c.board().pixel(5, 5), Some(MAZE_BG));
    }
}
