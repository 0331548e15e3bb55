/// Software register file implementing `Peripherals`.
///
/// Holds every register the game touches in plain memory. Time only moves
/// when the owner calls `advance_clock`, and audio only drains through
/// `drain_audio`, which makes the board deterministic for tests and lets
/// the terminal board drive it from the wall clock.

use std::collections::VecDeque;

use super::{Buttons, Peripherals, AUDIO_CLEAR_FIFOS, SCAN_WIDTH, SCREEN_HEIGHT, VISIBLE_WIDTH};

pub const DEFAULT_FIFO_DEPTH: usize = 128;

pub struct MemoryBoard {
    pub buttons: Buttons,
    pub switches: u32,
    leds: u32,

    // Interval timer
    timer_period: u32,
    timer_remaining: u64,
    timer_running: bool,
    timer_fired: bool,

    seven_seg: u32,
    framebuffer: Vec<u16>,
    rows_written: u64,

    // Audio write FIFO (stereo pairs)
    fifo: VecDeque<(i32, i32)>,
    fifo_depth: usize,
    fifo_clears: u32,
    samples_accepted: u64,
    samples_dropped: u64,
}

impl MemoryBoard {
    pub fn new() -> Self {
        Self::with_fifo_depth(DEFAULT_FIFO_DEPTH)
    }

    pub fn with_fifo_depth(depth: usize) -> Self {
        MemoryBoard {
            buttons: Buttons::empty(),
            switches: 0,
            leds: 0,
            timer_period: 0,
            timer_remaining: 0,
            timer_running: false,
            timer_fired: false,
            seven_seg: 0,
            framebuffer: vec![0; SCAN_WIDTH * SCREEN_HEIGHT],
            rows_written: 0,
            fifo: VecDeque::with_capacity(depth),
            fifo_depth: depth,
            fifo_clears: 0,
            samples_accepted: 0,
            samples_dropped: 0,
        }
    }

    /// Let `cycles` clock cycles elapse. Returns how many periods expired.
    /// The fired flag is a single bit: several expiries before an
    /// acknowledge still read as one.
    pub fn advance_clock(&mut self, mut cycles: u64) -> u64 {
        if !self.timer_running || self.timer_period == 0 {
            return 0;
        }
        let mut expired = 0;
        while cycles >= self.timer_remaining {
            cycles -= self.timer_remaining;
            self.timer_remaining = self.timer_period as u64;
            self.timer_fired = true;
            expired += 1;
        }
        self.timer_remaining -= cycles;
        expired
    }

    #[cfg(test)]
    pub fn timer_period(&self) -> u32 {
        self.timer_period
    }

    pub fn seven_seg(&self) -> u32 {
        self.seven_seg
    }

    /// Pixel from the scan buffer; `None` outside the addressable area.
    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u16> {
        if x < SCAN_WIDTH && y < SCREEN_HEIGHT {
            Some(self.framebuffer[y * SCAN_WIDTH + x])
        } else {
            None
        }
    }

    pub fn framebuffer(&self) -> &[u16] {
        &self.framebuffer
    }

    /// Total rows copied in since power-on.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Pop up to `max` queued samples, as the codec would consume them.
    pub fn drain_audio(&mut self, max: usize) -> Vec<(i32, i32)> {
        let n = max.min(self.fifo.len());
        self.fifo.drain(..n).collect()
    }

    pub fn fifo_len(&self) -> usize {
        self.fifo.len()
    }

    /// Number of FIFO clear commands seen. Every feedback tone starts
    /// with one, so this doubles as a feedback counter.
    pub fn fifo_clears(&self) -> u32 {
        self.fifo_clears
    }

    pub fn samples_accepted(&self) -> u64 {
        self.samples_accepted
    }

    pub fn samples_dropped(&self) -> u64 {
        self.samples_dropped
    }
}

impl Default for MemoryBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Peripherals for MemoryBoard {
    fn buttons(&self) -> Buttons {
        self.buttons
    }

    fn switches(&self) -> u32 {
        self.switches
    }

    fn leds(&self) -> u32 {
        self.leds
    }

    fn set_leds(&mut self, value: u32) {
        self.leds = value;
    }

    fn arm_timer(&mut self, cycles: u32) {
        self.timer_period = cycles;
        self.timer_remaining = cycles as u64;
        self.timer_running = cycles > 0;
        self.timer_fired = false;
    }

    fn consume_timer_fired(&mut self) -> bool {
        std::mem::take(&mut self.timer_fired)
    }

    fn write_seven_seg(&mut self, pattern: u32) {
        self.seven_seg = pattern;
    }

    fn write_pixel_row(&mut self, row: usize, pixels: &[u16]) {
        if row >= SCREEN_HEIGHT {
            return;
        }
        let n = pixels.len().min(VISIBLE_WIDTH);
        let start = row * SCAN_WIDTH;
        self.framebuffer[start..start + n].copy_from_slice(&pixels[..n]);
        self.rows_written += 1;
    }

    fn audio_control(&mut self, value: u32) {
        if value & AUDIO_CLEAR_FIFOS != 0 {
            self.fifo.clear();
            self.fifo_clears += 1;
        }
    }

    fn audio_status(&mut self) -> u32 {
        let free = (self.fifo_depth - self.fifo.len()).min(0xFF) as u32;
        (free << 24) | (free << 16)
    }

    fn write_audio_sample(&mut self, left: i32, right: i32) {
        if self.fifo.len() < self.fifo_depth {
            self.fifo.push_back((left, right));
            self.samples_accepted += 1;
        } else {
            self.samples_dropped += 1;
        }
    }
}
