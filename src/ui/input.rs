/// Keyboard state tracker.
///
/// Tracks which keys are currently held down so the terminal board can
/// report a held-button register, and which keys were freshly pressed for
/// toggles (the switch) and meta keys (quit).
///
/// Uses crossterm's keyboard enhancement for Release events when available.
/// Falls back to timeout-based release detection on terminals that don't support it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One key that is currently down, as far as the event stream tells.
#[derive(Clone, Copy, Debug)]
struct Hold {
    last_event: Instant,
    /// An auto-repeat has arrived since the press.
    repeating: bool,
}

pub struct InputState {
    held: HashMap<KeyCode, Hold>,

    /// Keys that went from "not held" to "held" during the most recent
    /// `drain_events()` call.
    fresh_presses: Vec<KeyCode>,

    /// Raw key events collected during drain, for meta-key handling.
    pub raw_events: Vec<KeyEvent>,

    /// Whether to honor Release events. Only true when keyboard
    /// enhancement is confirmed working.
    pub honor_release: bool,

    /// Silence allowed between auto-repeats before a key counts as released.
    hold_timeout: Duration,
    /// Silence allowed between the press and the first auto-repeat.
    repeat_delay: Duration,
}

impl InputState {
    pub fn new(hold_timeout: Duration, repeat_delay: Duration) -> Self {
        InputState {
            held: HashMap::with_capacity(16),
            fresh_presses: Vec::with_capacity(8),
            raw_events: Vec::with_capacity(8),
            honor_release: false,
            hold_timeout,
            repeat_delay: repeat_delay.max(hold_timeout),
        }
    }

    /// Drain all pending terminal events and update key states.
    pub fn drain_events(&mut self) {
        self.fresh_presses.clear();
        self.raw_events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                self.apply(key, Instant::now());
            }
        }
        self.expire(Instant::now());
    }

    // Without enhancement every auto-repeat also arrives as a Press, so
    // "second event while held" is what marks a key as repeating.
    fn apply(&mut self, key: KeyEvent, now: Instant) {
        self.raw_events.push(key);
        match key.kind {
            KeyEventKind::Release if self.honor_release => {
                self.held.remove(&key.code);
            }
            KeyEventKind::Release => {
                // rely on timeout-based expiry instead
            }
            _ => match self.held.get_mut(&key.code) {
                Some(hold) => {
                    hold.last_event = now;
                    hold.repeating = true;
                }
                None => {
                    self.held.insert(key.code, Hold { last_event: now, repeating: false });
                    self.fresh_presses.push(key.code);
                }
            },
        }
    }

    fn expire(&mut self, now: Instant) {
        if self.honor_release {
            return;
        }
        let (gap, delay) = (self.hold_timeout, self.repeat_delay);
        self.held.retain(|_, hold| {
            let limit = if hold.repeating { gap } else { delay };
            now.duration_since(hold.last_event) < limit
        });
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains_key(&code)
    }

    pub fn any_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.is_held(*c))
    }

    /// Was this key freshly pressed this frame? (edge trigger)
    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.fresh_presses.contains(&code)
    }

    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.was_pressed(*c))
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.raw_events.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::Buttons;
    use crate::sim::input::Debouncer;

    const GAP: Duration = Duration::from_millis(160);
    const DELAY: Duration = Duration::from_millis(700);

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    fn state() -> InputState {
        InputState::new(GAP, DELAY)
    }

    #[test]
    fn press_is_held_and_fresh_once() {
        let mut s = state();
        let t0 = Instant::now();
        s.apply(key(KeyCode::Left, KeyEventKind::Press), t0);
        assert!(s.is_held(KeyCode::Left));
        assert!(s.was_pressed(KeyCode::Left));
        // auto-repeat is not a fresh press
        s.fresh_presses.clear();
        s.apply(key(KeyCode::Left, KeyEventKind::Repeat), t0);
        assert!(s.is_held(KeyCode::Left));
        assert!(!s.was_pressed(KeyCode::Left));
    }

    #[test]
    fn release_honored_only_with_enhancement() {
        let mut s = state();
        let t0 = Instant::now();
        s.apply(key(KeyCode::Up, KeyEventKind::Press), t0);
        s.apply(key(KeyCode::Up, KeyEventKind::Release), t0);
        assert!(s.is_held(KeyCode::Up));

        s.honor_release = true;
        s.apply(key(KeyCode::Up, KeyEventKind::Release), t0);
        assert!(!s.is_held(KeyCode::Up));
    }

    #[test]
    fn press_survives_until_repeat_delay() {
        let mut s = state();
        let t0 = Instant::now();
        s.apply(key(KeyCode::Down, KeyEventKind::Press), t0);
        s.expire(t0 + Duration::from_millis(200));
        assert!(s.is_held(KeyCode::Down));
        s.expire(t0 + DELAY);
        assert!(!s.is_held(KeyCode::Down));
    }

    #[test]
    fn repeating_key_expires_after_short_gap() {
        let mut s = state();
        let t0 = Instant::now();
        s.apply(key(KeyCode::Down, KeyEventKind::Press), t0);
        let t1 = t0 + Duration::from_millis(500);
        // plain terminals report repeats as presses
        s.apply(key(KeyCode::Down, KeyEventKind::Press), t1);
        s.expire(t1 + Duration::from_millis(100));
        assert!(s.is_held(KeyCode::Down));
        s.expire(t1 + GAP);
        assert!(!s.is_held(KeyCode::Down));
    }

    #[test]
    fn long_hold_without_release_events_moves_once() {
        let mut s = state();
        let mut debounce = Debouncer::new();
        let t0 = Instant::now();
        let frame = Duration::from_micros(16_667);
        let mut moves = 0;

        s.apply(key(KeyCode::Left, KeyEventKind::Press), t0);
        for n in 0..120u32 {
            let now = t0 + frame * n;
            // OS repeat: 500 ms delay, then every 33 ms, key let go at 1.2 s
            let ms = (frame * n).as_millis();
            if ms >= 500 && ms <= 1200 && n % 2 == 0 {
                s.apply(key(KeyCode::Left, KeyEventKind::Press), now);
            }
            s.expire(now);
            let buttons = if s.is_held(KeyCode::Left) { Buttons::LEFT } else { Buttons::empty() };
            if !debounce.defer(buttons) && buttons.any_held() {
                moves += 1;
                debounce.latch();
            }
        }
        assert_eq!(moves, 1);
        assert!(!s.is_held(KeyCode::Left));
    }

    #[test]
    fn repeat_delay_never_shorter_than_gap() {
        let s = InputState::new(Duration::from_millis(300), Duration::from_millis(100));
        assert_eq!(s.repeat_delay, Duration::from_millis(300));
    }

    #[test]
    fn ctrl_c_detected() {
        let mut s = state();
        s.apply(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Instant::now());
        assert!(s.ctrl_c_pressed());
    }
}
