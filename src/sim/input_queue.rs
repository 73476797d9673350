/// Pending directional commands.
///
/// Input capture appends with `push()`; the tick drains with `drain()`,
/// which yields commands last-in-first-out. Several key presses landing in
/// the same frame are therefore applied in reverse arrival order. Kept as a
/// stack on purpose: switching to FIFO changes multi-key-per-tick behavior.
///
/// Capture and tick run on the same thread (events are polled at the top of
/// each frame), so no locking is needed.

use crate::domain::command::Direction;

#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    pending: Vec<Direction>,
}

impl InputQueue {
    pub fn new() -> Self {
        InputQueue { pending: Vec::with_capacity(8) }
    }

    pub fn push(&mut self, dir: Direction) {
        self.pending.push(dir);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Pop every pending command, newest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Direction> + '_ {
        self.pending.drain(..).rev()
    }
}
