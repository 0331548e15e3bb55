/// Frame timing: one tick per 60 Hz period of the board's interval timer.

use crate::hal::{Peripherals, CLOCK_HZ};

pub const FRAME_RATE: u64 = 60;

/// 50 MHz / 60 = 833_333 cycles per frame.
pub const CYCLES_PER_FRAME: u32 = (CLOCK_HZ / FRAME_RATE) as u32;

/// Ticks that make up one countdown second.
pub const TICKS_PER_SECOND: u32 = FRAME_RATE as u32;

pub struct FrameTimer {
    fired: u64,
}

impl FrameTimer {
    /// Arm the board timer with a reload of `period` cycles.
    pub fn start<P: Peripherals>(board: &mut P, period: u32) -> Self {
        board.arm_timer(period);
        FrameTimer { fired: 0 }
    }

    /// True exactly once per elapsed period. Acknowledges the flag, so
    /// the next `true` needs another full period.
    pub fn has_fired<P: Peripherals>(&mut self, board: &mut P) -> bool {
        let fired = board.consume_timer_fired();
        if fired {
            self.fired += 1;
        }
        fired
    }

    /// Ticks observed since `start`.
    pub fn ticks(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::memory::MemoryBoard;

    #[test]
    fn frame_period_constant() {
        assert_eq!(CYCLES_PER_FRAME, 833_333);
    }

    #[test]
    fn fires_exactly_once_per_period() {
        let mut board = MemoryBoard::new();
        let mut timer = FrameTimer::start(&mut board, CYCLES_PER_FRAME);
        assert_eq!(board.timer_period(), CYCLES_PER_FRAME);
        assert!(!timer.has_fired(&mut board));

        board.advance_clock(CYCLES_PER_FRAME as u64 - 1);
        assert!(!timer.has_fired(&mut board));
        board.advance_clock(1);
        assert!(timer.has_fired(&mut board));
        assert!(!timer.has_fired(&mut board));

        for _ in 0..9 {
            board.advance_clock(CYCLES_PER_FRAME as u64);
            assert!(timer.has_fired(&mut board));
        }
        assert_eq!(timer.ticks(), 10);
    }
}
