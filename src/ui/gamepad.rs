/// Gamepad input tracker using gilrs.
///
/// D-pad / left stick drive the four direction bits of the button register.
/// The buttons listed in `[gamepad] switch_toggle` flip SW0.
/// Default toggle buttons: Select, Y.

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::hal::Buttons;

const STICK_DEADZONE: f32 = 0.25;

/// Logical button identifiers (one per physical face/shoulder button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,
    R1,
    Start,
    Select,
}

impl Btn {
    pub fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH" => Some(Btn::A),
            "B" | "EAST" => Some(Btn::B),
            "X" | "WEST" => Some(Btn::X),
            "Y" | "NORTH" => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER" => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South => Some(Btn::A),
            Button::East => Some(Btn::B),
            Button::West => Some(Btn::X),
            Button::North => Some(Btn::Y),
            Button::LeftTrigger => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start => Some(Btn::Start),
            Button::Select => Some(Btn::Select),
            _ => None,
        }
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    dpad: Buttons,
    stick_x: f32,
    stick_y: f32,
    toggle_buttons: Vec<Btn>,
    toggle_pressed: bool,

    pub connected: bool,
}

impl GamepadState {
    pub fn new(cfg: &GamepadConfig) -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = match Gilrs::new() {
            Ok(g) => {
                let has_pad = g.gamepads().next().is_some();
                (Some(g), has_pad)
            }
            Err(e) => {
                tracing::warn!("gamepad support unavailable: {e}");
                (None, false)
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        let mut toggle_buttons: Vec<Btn> =
            cfg.switch_toggle.iter().filter_map(|s| Btn::from_name(s)).collect();
        if toggle_buttons.is_empty() {
            toggle_buttons = vec![Btn::Select, Btn::Y];
        }

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            dpad: Buttons::empty(),
            stick_x: 0.0,
            stick_y: 0.0,
            toggle_buttons,
            toggle_pressed: false,
            connected,
        }
    }

    pub fn update(&mut self) {
        self.toggle_pressed = false;

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    self.set_button(btn, true);
                }
                EventType::ButtonReleased(btn, _) => {
                    self.connected = true;
                    self.set_button(btn, false);
                }
                EventType::AxisChanged(axis, value, _) => {
                    self.connected = true;
                    match axis {
                        Axis::LeftStickX => self.stick_x = value,
                        Axis::LeftStickY => self.stick_y = value,
                        _ => {}
                    }
                }
                EventType::Connected => self.connected = true,
                EventType::Disconnected => {
                    self.connected = false;
                    self.release_all();
                }
                _ => {}
            }
        }
    }

    #[cfg(feature = "gamepad")]
    fn set_button(&mut self, btn: Button, held: bool) {
        let bit = match btn {
            Button::DPadUp => Buttons::UP,
            Button::DPadDown => Buttons::DOWN,
            Button::DPadLeft => Buttons::LEFT,
            Button::DPadRight => Buttons::RIGHT,
            other => {
                if held && Btn::from_gilrs(other).is_some_and(|b| self.toggle_buttons.contains(&b)) {
                    self.toggle_pressed = true;
                }
                return;
            }
        };
        self.dpad.set(bit, held);
    }

    /// Direction bits currently held (d-pad or stick).
    pub fn buttons(&self) -> Buttons {
        let mut held = self.dpad;
        held.set(Buttons::LEFT, held.contains(Buttons::LEFT) || self.stick_x < -STICK_DEADZONE);
        held.set(Buttons::RIGHT, held.contains(Buttons::RIGHT) || self.stick_x > STICK_DEADZONE);
        held.set(Buttons::UP, held.contains(Buttons::UP) || self.stick_y > STICK_DEADZONE);
        held.set(Buttons::DOWN, held.contains(Buttons::DOWN) || self.stick_y < -STICK_DEADZONE);
        held
    }

    /// A switch-toggle button went down since the last `update`.
    pub fn toggle_pressed(&self) -> bool {
        self.toggle_pressed
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn release_all(&mut self) {
        self.dpad = Buttons::empty();
        self.stick_x = 0.0;
        self.stick_y = 0.0;
    }
}
