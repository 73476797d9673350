/// Gamepad input tracker using gilrs.
///
/// Button mapping is loaded from config.toml via `load_button_config()`.
/// Default mapping:
///   D-pad / Left Stick    →  Movement (one command per press)
///   Start                 →  Restart
///   Select                →  Quit
///
/// Without the `gamepad` feature every query reports nothing.

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::command::Direction;
use crate::sim::input_queue::InputQueue;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.25;

const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,      // LeftTrigger
    R1,      // RightTrigger
    L2,      // LeftTrigger2
    R2,      // RightTrigger2
    Start,
    Select,
}

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "L2" | "LT" | "LEFTTRIGGER2"  => Some(Btn::L2),
            "R2" | "RT" | "RIGHTTRIGGER2" => Some(Btn::R2),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South     => Some(Btn::A),
            Button::East      => Some(Btn::B),
            Button::West      => Some(Btn::X),
            Button::North     => Some(Btn::Y),
            Button::LeftTrigger  => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::LeftTrigger2  => Some(Btn::L2),
            Button::RightTrigger2 => Some(Btn::R2),
            Button::Start     => Some(Btn::Start),
            Button::Select    => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Per-input state: held (continuous) and just_pressed (edge).
#[derive(Clone, Copy, Debug, Default)]
struct BtnState {
    held: bool,
    just_pressed: bool,
}

impl BtnState {
    /// Update from a digital level, flagging the rising edge.
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn set_level(&mut self, held: bool) {
        if held && !self.held {
            self.just_pressed = true;
        }
        self.held = held;
    }
}

/// Action-to-button mapping (loaded from config).
struct ActionMap {
    quit: Vec<Btn>,
    restart: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            quit:    vec![Btn::Select],
            restart: vec![Btn::Start],
        }
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    // All tracked buttons (indexed by Btn)
    buttons: [BtnState; 10],

    // D-pad and stick, indexed like DIRECTIONS
    dpad: [BtnState; 4],
    stick: [BtnState; 4],
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_x: f32,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_y: f32,

    action_map: ActionMap,

    pub connected: bool,
}

fn btn_index(btn: Btn) -> usize {
    btn as usize
}

fn dir_index(dir: Direction) -> usize {
    match dir {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = {
            match Gilrs::new() {
                Ok(g) => {
                    let has_pad = g.gamepads().next().is_some();
                    (Some(g), has_pad)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "gamepad support unavailable");
                    (None, false)
                }
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            buttons: [BtnState::default(); 10],
            dpad: [BtnState::default(); 4],
            stick: [BtnState::default(); 4],
            stick_x: 0.0,
            stick_y: 0.0,
            action_map: ActionMap::default(),
            connected,
        }
    }

    /// Load button mapping from config.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        fn parse_list(names: &[String]) -> Vec<Btn> {
            names.iter().filter_map(|s| Btn::from_name(s)).collect()
        }
        let map = &mut self.action_map;
        let q = parse_list(&cfg.quit);
        if !q.is_empty() { map.quit = q; }
        let r = parse_list(&cfg.restart);
        if !r.is_empty() { map.restart = r; }
    }

    /// Poll the pad and append one command per fresh directional press.
    pub fn update(&mut self, queue: &mut InputQueue) {
        self.clear_just_pressed();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();

        for dir in self.pressed_directions() {
            queue.push(dir);
        }
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
                    self.update_axis(axis, value);
                }
                EventType::Connected => {
                    tracing::info!("gamepad connected");
                    self.connected = true;
                }
                EventType::Disconnected => {
                    tracing::info!("gamepad disconnected");
                    self.connected = false;
                    self.release_all();
                }
                _ => {}
            }
        }

        // Derive stick digital states
        let (sx, sy) = (self.stick_x, self.stick_y);
        self.stick[dir_index(Direction::Left)].set_level(sx < -STICK_DEADZONE);
        self.stick[dir_index(Direction::Right)].set_level(sx > STICK_DEADZONE);
        self.stick[dir_index(Direction::Up)].set_level(sy > STICK_DEADZONE);
        self.stick[dir_index(Direction::Down)].set_level(sy < -STICK_DEADZONE);
    }

    #[cfg(feature = "gamepad")]
    fn set_button(&mut self, gilrs_btn: Button, held: bool) {
        // D-pad handled separately (not in Btn enum)
        let dpad_dir = match gilrs_btn {
            Button::DPadUp    => Some(Direction::Up),
            Button::DPadDown  => Some(Direction::Down),
            Button::DPadLeft  => Some(Direction::Left),
            Button::DPadRight => Some(Direction::Right),
            _ => None,
        };
        if let Some(dir) = dpad_dir {
            self.dpad[dir_index(dir)].set_level(held);
            return;
        }

        if let Some(btn) = Btn::from_gilrs(gilrs_btn) {
            self.buttons[btn_index(btn)].set_level(held);
        }
    }

    #[cfg(feature = "gamepad")]
    fn update_axis(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::LeftStickX => self.stick_x = value,
            Axis::LeftStickY => self.stick_y = value,
            _ => {}
        }
    }

    // ── Action queries (config-driven) ──

    fn any_just_pressed(&self, btns: &[Btn]) -> bool {
        btns.iter().any(|&b| self.buttons[btn_index(b)].just_pressed)
    }

    pub fn quit_pressed(&self) -> bool {
        self.any_just_pressed(&self.action_map.quit)
    }

    pub fn restart_pressed(&self) -> bool {
        self.any_just_pressed(&self.action_map.restart)
    }

    /// Directions freshly pressed on the D-pad or stick this frame.
    fn pressed_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        DIRECTIONS.into_iter().filter(move |&d| {
            let i = dir_index(d);
            self.dpad[i].just_pressed || self.stick[i].just_pressed
        })
    }

    // ── Internal ──

    fn clear_just_pressed(&mut self) {
        for b in self.buttons.iter_mut().chain(&mut self.dpad).chain(&mut self.stick) {
            b.just_pressed = false;
        }
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn release_all(&mut self) {
        for b in self.buttons.iter_mut().chain(&mut self.dpad).chain(&mut self.stick) {
            *b = BtnState::default();
        }
        self.stick_x = 0.0;
        self.stick_y = 0.0;
    }
}
