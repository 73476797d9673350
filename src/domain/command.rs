/// Directional commands produced by input capture and consumed by the tick.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Which movement rule a command dispatches to, with its step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    Horizontal(i32),
    Vertical(i32),
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left => Axis::Horizontal(-1),
            Direction::Right => Axis::Horizontal(1),
            Direction::Up => Axis::Vertical(-1),
            Direction::Down => Axis::Vertical(1),
        }
    }
}
