/// Button debouncing: held buttons → at most one move per physical press.
///
/// Direction priority for simultaneous presses: UP > DOWN > LEFT > RIGHT.
///
/// After a latch, ticks are deferred (acknowledged but not processed) until
/// the button register reads fully released. The timer keeps being
/// acknowledged at the top of the loop, so waiting never wedges timing.

use crate::hal::Buttons;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDir {
    /// Grid delta (dx, dy). Screen y grows downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDir::Up => (0, -1),
            MoveDir::Down => (0, 1),
            MoveDir::Left => (-1, 0),
            MoveDir::Right => (1, 0),
        }
    }
}

/// Highest-priority held direction, if any.
pub fn priority_direction(buttons: Buttons) -> Option<MoveDir> {
    if buttons.contains(Buttons::UP) {
        Some(MoveDir::Up)
    } else if buttons.contains(Buttons::DOWN) {
        Some(MoveDir::Down)
    } else if buttons.contains(Buttons::LEFT) {
        Some(MoveDir::Left)
    } else if buttons.contains(Buttons::RIGHT) {
        Some(MoveDir::Right)
    } else {
        None
    }
}

#[derive(Debug, Default)]
pub struct Debouncer {
    awaiting_release: bool,
    deferred_ticks: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a full release before the next tick is processed.
    pub fn latch(&mut self) {
        self.awaiting_release = true;
    }

    #[cfg(test)]
    pub fn is_latched(&self) -> bool {
        self.awaiting_release
    }

    /// Gate one tick. Returns `true` if the tick must be skipped because a
    /// latched press is still held. The first all-released read clears the
    /// latch and lets that tick through.
    pub fn defer(&mut self, buttons: Buttons) -> bool {
        if !self.awaiting_release {
            return false;
        }
        if buttons.any_held() {
            self.deferred_ticks += 1;
            return true;
        }
        self.awaiting_release = false;
        false
    }

    /// Ticks dropped while waiting for releases.
    pub fn deferred_ticks(&self) -> u64 {
        self.deferred_ticks
    }
}
