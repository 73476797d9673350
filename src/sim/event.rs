/// Events emitted during a simulation tick.
/// The binary logs them; tests assert on them.

use crate::domain::tile::Tile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PlayerMoved { x: usize, y: usize },
    BlockShoved { from_x: usize, to_x: usize, y: usize },
    LocksOpened { lock: Tile, count: usize },
    /// A block dropped one row and now sits at (x, y).
    BlockFell { x: usize, y: usize },
    BlockLanded { x: usize, y: usize },
}
