/// Terminal-backed board.
///
/// Wraps a `MemoryBoard` register file and feeds it from the host:
/// wall-clock time drives the interval timer, keyboard and gamepad drive
/// the button and switch registers, and the audio FIFO drains into the
/// sound sink at the codec rate. The framebuffer is shown through `Screen`.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
use crossterm::{execute, terminal};

use crate::config::GameConfig;
use crate::hal::memory::MemoryBoard;
use crate::hal::{seven_seg, Buttons, Peripherals, CLOCK_HZ};

use super::gamepad::GamepadState;
use super::input::InputState;
use super::screen::{Screen, Status};
use super::sound::SoundEngine;

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_SWITCH: &[KeyCode] = &[KeyCode::Tab, KeyCode::Char('0')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

/// Convert elapsed wall time into board clock cycles.
fn cycles_in(elapsed: Duration) -> u64 {
    (elapsed.as_nanos() * CLOCK_HZ as u128 / 1_000_000_000) as u64
}

/// Samples the codec consumes in `elapsed` at `rate` Hz.
fn samples_in(elapsed: Duration, rate: u32) -> u64 {
    (elapsed.as_nanos() * rate as u128 / 1_000_000_000) as u64
}

/// Pop what the codec consumed between `*synced` and `total` samples.
/// Time with an empty FIFO is not banked for later.
fn drain_due(regs: &mut MemoryBoard, synced: &mut u64, total: u64) -> Vec<(i32, i32)> {
    let due = total.saturating_sub(*synced) as usize;
    *synced = total;
    if due == 0 {
        return Vec::new();
    }
    regs.drain_audio(due)
}

pub struct TerminalBoard {
    regs: MemoryBoard,
    screen: Screen,
    keyboard: InputState,
    gamepad: GamepadState,
    sound: Option<SoundEngine>,
    sample_rate: u32,
    enhanced_keys: bool,

    started: Instant,
    cycles_synced: u64,
    samples_synced: u64,

    quit: bool,
    restored: bool,
}

impl TerminalBoard {
    /// Acquire the terminal. On failure nothing stays acquired.
    pub fn open(config: &GameConfig) -> Result<Self> {
        let mut screen = Screen::new();
        screen.init().context("could not take over the terminal")?;

        let enhanced_keys = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
            && execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .is_ok();
        tracing::debug!(enhanced_keys, "terminal acquired");

        let mut keyboard = InputState::new(
            Duration::from_millis(config.input.hold_timeout_ms),
            Duration::from_millis(config.input.repeat_delay_ms),
        );
        keyboard.honor_release = enhanced_keys;

        let sound = if config.audio.enabled {
            SoundEngine::new(config.audio.sample_rate, config.audio.volume)
        } else {
            None
        };

        Ok(TerminalBoard {
            regs: MemoryBoard::with_fifo_depth(config.audio.fifo_depth),
            screen,
            keyboard,
            gamepad: GamepadState::new(&config.gamepad),
            sound,
            sample_rate: config.audio.sample_rate,
            enhanced_keys,
            started: Instant::now(),
            cycles_synced: 0,
            samples_synced: 0,
            quit: false,
            restored: false,
        })
    }

    /// Sample the host input devices into the button and switch registers.
    pub fn pump(&mut self) {
        self.keyboard.drain_events();
        self.gamepad.update();

        let kb = &self.keyboard;
        if kb.ctrl_c_pressed() || kb.any_pressed(KEYS_QUIT) {
            self.quit = true;
        }
        if kb.any_pressed(KEYS_SWITCH) || self.gamepad.toggle_pressed() {
            self.regs.switches ^= 1;
            tracing::debug!(sw0 = self.regs.switches & 1, "switch toggled");
        }

        let mut held = self.gamepad.buttons();
        held.set(Buttons::UP, held.contains(Buttons::UP) || kb.any_held(KEYS_UP));
        held.set(Buttons::DOWN, held.contains(Buttons::DOWN) || kb.any_held(KEYS_DOWN));
        held.set(Buttons::LEFT, held.contains(Buttons::LEFT) || kb.any_held(KEYS_LEFT));
        held.set(Buttons::RIGHT, held.contains(Buttons::RIGHT) || kb.any_held(KEYS_RIGHT));
        self.regs.buttons = held;

        // the codec keeps draining between ticks, not only while a tone is written
        self.sync_audio();
        if let Some(sound) = &mut self.sound {
            sound.flush();
        }
    }

    /// Show the current framebuffer and front-panel state.
    pub fn refresh(&mut self) -> Result<()> {
        let status = Status {
            display: seven_seg::decode(self.regs.seven_seg()),
            led0: self.regs.leds() & 1 != 0,
            sw0: self.regs.switches & 1 != 0,
            gamepad: self.gamepad.connected,
        };
        self.screen
            .render(self.regs.framebuffer(), &status)
            .context("terminal write failed")
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Release the terminal.
    pub fn close(mut self) -> Result<()> {
        tracing::debug!(
            rows = self.regs.rows_written(),
            clears = self.regs.fifo_clears(),
            accepted = self.regs.samples_accepted(),
            dropped = self.regs.samples_dropped(),
            "board totals"
        );
        self.restore()
    }

    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        if self.enhanced_keys {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        self.screen.cleanup().context("could not restore the terminal")
    }

    fn sync_clock(&mut self) {
        let total = cycles_in(self.started.elapsed());
        let delta = total - self.cycles_synced;
        self.cycles_synced = total;
        self.regs.advance_clock(delta);
    }

    fn sync_audio(&mut self) {
        let total = samples_in(self.started.elapsed(), self.sample_rate);
        let played = drain_due(&mut self.regs, &mut self.samples_synced, total);
        if played.is_empty() {
            return;
        }
        tracing::trace!(played = played.len(), queued = self.regs.fifo_len(), "codec drain");
        if let Some(sound) = &mut self.sound {
            sound.queue(&played);
        }
    }
}

impl Drop for TerminalBoard {
    fn drop(&mut self) {
        // error path: best effort
        let _ = self.restore();
    }
}

impl Peripherals for TerminalBoard {
    fn buttons(&self) -> Buttons {
        self.regs.buttons()
    }

    fn switches(&self) -> u32 {
        self.regs.switches()
    }

    fn leds(&self) -> u32 {
        self.regs.leds()
    }

    fn set_leds(&mut self, value: u32) {
        self.regs.set_leds(value);
    }

    fn arm_timer(&mut self, cycles: u32) {
        self.sync_clock();
        self.regs.arm_timer(cycles);
    }

    fn consume_timer_fired(&mut self) -> bool {
        self.sync_clock();
        self.regs.consume_timer_fired()
    }

    fn write_seven_seg(&mut self, pattern: u32) {
        self.regs.write_seven_seg(pattern);
    }

    fn write_pixel_row(&mut self, row: usize, pixels: &[u16]) {
        self.regs.write_pixel_row(row, pixels);
    }

    fn audio_control(&mut self, value: u32) {
        self.regs.audio_control(value);
    }

    fn audio_status(&mut self) -> u32 {
        self.sync_audio();
        self.regs.audio_status()
    }

    fn write_audio_sample(&mut self, left: i32, right: i32) {
        self.regs.write_audio_sample(left, right);
    }
}
