/// Keyboard capture.
///
/// Drains every pending terminal event once per frame and turns key
/// presses into simulation input:
///   - Arrow keys / WASD  → one directional command per Press or Repeat
///   - R                  → restart request
///   - Esc / Q / Ctrl+C   → quit request
///
/// Release events are ignored: like a browser `keydown`, auto-repeat
/// delivers one command per repeat while a key is held.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::command::Direction;
use crate::sim::input_queue::InputQueue;

/// Meta actions raised by the keyboard this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyActions {
    pub quit: bool,
    pub restart: bool,
}

pub struct InputState {
    /// Raw key events collected during the last drain.
    raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { raw_events: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events without blocking.
    /// Directional presses are appended to `queue` in arrival order.
    pub fn drain_events(&mut self, queue: &mut InputQueue) -> std::io::Result<KeyActions> {
        self.raw_events.clear();

        while poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.raw_events.push(key);
            }
        }

        Ok(apply_keys(&self.raw_events, queue))
    }
}

/// Translate key events into queued commands and meta actions.
pub fn apply_keys(keys: &[KeyEvent], queue: &mut InputQueue) -> KeyActions {
    let mut actions = KeyActions::default();
    for key in keys {
        if key.kind == KeyEventKind::Release {
            continue;
        }
        if is_quit(key) {
            actions.quit = true;
        } else if matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R')) {
            actions.restart = true;
        } else if let Some(dir) = direction_for(key.code) {
            queue.push(dir);
        }
    }
    actions
}

pub fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        _ => None,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'));
    ctrl_c || matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE, kind, state: KeyEventState::NONE }
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyEventKind::Press)
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(direction_for(KeyCode::Left), Some(Direction::Left));
        assert_eq!(direction_for(KeyCode::Char('w')), Some(Direction::Up));
        assert_eq!(direction_for(KeyCode::Char('S')), Some(Direction::Down));
        assert_eq!(direction_for(KeyCode::Char('d')), Some(Direction::Right));
        assert_eq!(direction_for(KeyCode::Char('x')), None);
    }

    #[test]
    fn each_press_and_repeat_queues_one_command() {
        let mut q = InputQueue::new();
        let keys = [
            press(KeyCode::Right),
            key(KeyCode::Right, KeyEventKind::Repeat),
            key(KeyCode::Right, KeyEventKind::Release),
            press(KeyCode::Char('a')),
        ];
        let actions = apply_keys(&keys, &mut q);
        assert_eq!(actions, KeyActions::default());
        let drained: Vec<_> = q.drain().collect();
        assert_eq!(drained, vec![Direction::Left, Direction::Right, Direction::Right]);
    }

    #[test]
    fn quit_and_restart_are_not_queued() {
        let mut q = InputQueue::new();
        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        let actions = apply_keys(&[press(KeyCode::Char('r')), ctrl_c], &mut q);
        assert!(actions.quit);
        assert!(actions.restart);
        assert!(q.is_empty());
    }

    #[test]
    fn escape_quits() {
        let mut q = InputQueue::new();
        assert!(apply_keys(&[press(KeyCode::Esc)], &mut q).quit);
    }
}
