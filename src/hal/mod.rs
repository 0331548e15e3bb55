/// Peripheral interface consumed by the game core.
///
/// The core never touches registers directly; everything goes through
/// `Peripherals`, so the same loop runs against the terminal board or the
/// in-memory board used by tests.
///
/// Register conventions (mirrors the FPGA board):
///   buttons   bit3=UP bit2=DOWN bit1=LEFT bit0=RIGHT, 1 = held
///   switches  bit0 selects the player glyph shape (via LED0)
///   timer     reload countdown in clock cycles, one-shot fired flag
///   hex       two segment patterns, tens digit in bits 8..15
///   audio     status word: bits 31..24 = free write slots (left),
///             bits 23..16 = free write slots (right)

pub mod memory;
pub mod seven_seg;

use bitflags::bitflags;

/// External clock feeding the interval timer.
pub const CLOCK_HZ: u64 = 50_000_000;

/// Full addressable scan width of the pixel buffer.
pub const SCAN_WIDTH: usize = 512;
/// Columns actually shown on screen.
pub const VISIBLE_WIDTH: usize = 320;
pub const SCREEN_HEIGHT: usize = 240;

/// Audio control bits: clear write FIFO | clear read FIFO.
pub const AUDIO_CLEAR_FIFOS: u32 = 0b1100;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct Buttons: u32 {
        const UP = 0b1000;
        const DOWN = 0b0100;
        const LEFT = 0b0010;
        const RIGHT = 0b0001;
    }
}

impl Buttons {
    /// Mask used for the "any button" checks.
    pub const ANY: Buttons = Buttons::all();

    pub fn any_held(self) -> bool {
        self.intersects(Buttons::ANY)
    }
}

pub trait Peripherals {
    fn buttons(&self) -> Buttons;
    fn switches(&self) -> u32;
    fn leds(&self) -> u32;
    fn set_leds(&mut self, value: u32);

    /// Load the reload value and start the timer in continuous mode.
    fn arm_timer(&mut self, cycles: u32);
    /// True once per elapsed period; reading acknowledges the flag.
    fn consume_timer_fired(&mut self) -> bool;

    /// Raw segment pattern, see `seven_seg::encode`.
    fn write_seven_seg(&mut self, pattern: u32);

    /// Copy one row into the visible region of the scan buffer.
    /// `pixels` holds at most `VISIBLE_WIDTH` entries.
    fn write_pixel_row(&mut self, row: usize, pixels: &[u16]);

    fn audio_control(&mut self, value: u32);
    fn audio_status(&mut self) -> u32;
    fn write_audio_sample(&mut self, left: i32, right: i32);
}

/// Free write slots reported by an audio status word.
pub fn audio_free_slots(status: u32) -> u32 {
    (status & 0xFF00_0000) >> 24
}
