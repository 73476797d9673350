/// Movement rules: what happens when the player tries to enter a cell.
///
/// Rules are pure: they inspect a `MapView` and return a `Move` describing
/// the outcome. The grid applies it (see `sim::step`).
///
/// ## Truth Table (target = cell the player tries to enter)
///
/// ┌──────────────────────────────┬──────────────────────┬──────────────┐
/// │ Target                       │ Horizontal           │ Vertical     │
/// ├──────────────────────────────┼──────────────────────┼──────────────┤
/// │ Air, Flux                    │ Enter                │ Enter        │
/// │ Key1 / Key2                  │ Unlock, then Enter   │ same         │
/// │ Stone/Box Resting, beyond is │                      │              │
/// │   Air, below target not Air  │ Shove                │ Blocked      │
/// │ Stone/Box Falling            │ Blocked              │ Blocked      │
/// │ Unbreakable, Locks, Player   │ Blocked              │ Blocked      │
/// └──────────────────────────────┴──────────────────────┴──────────────┘

use super::command::{Axis, Direction};
use super::tile::{FallState, Tile};

/// Immutable view of the tile map for rule queries.
pub struct MapView<'a> {
    pub tiles: &'a [Vec<Tile>],
    pub width: usize,
    pub height: usize,
}

impl<'a> MapView<'a> {
    pub fn tile_at(&self, x: usize, y: usize) -> Tile {
        if x >= self.width || y >= self.height {
            return Tile::Unbreakable; // out of bounds = wall
        }
        self.tiles[y][x]
    }

    /// Tile at `(x + dx, y + dy)`; anything off the map reads as a wall.
    pub fn tile_offset(&self, x: usize, y: usize, dx: i32, dy: i32) -> Tile {
        match (offset(x, dx), offset(y, dy)) {
            (Some(nx), Some(ny)) => self.tile_at(nx, ny),
            _ => Tile::Unbreakable,
        }
    }
}

/// `v + d` if it stays non-negative.
pub fn offset(v: usize, d: i32) -> Option<usize> {
    v.checked_add_signed(d as isize)
}

/// Outcome of a movement attempt.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Move {
    Blocked,
    /// Player steps onto (x, y).
    Enter { x: usize, y: usize },
    /// Block at (x, y) moves to (to_x, y); player steps onto (x, y).
    Shove { x: usize, y: usize, to_x: usize },
    /// Every `lock` tile is cleared, then player steps onto (x, y).
    Unlock { x: usize, y: usize, lock: Tile },
}

/// Resolve a directional command from the player's position.
pub fn resolve(map: &MapView, px: usize, py: usize, dir: Direction) -> Move {
    match dir.axis() {
        Axis::Horizontal(dx) => horizontal(map, px, py, dx),
        Axis::Vertical(dy) => vertical(map, px, py, dy),
    }
}

pub fn horizontal(map: &MapView, px: usize, py: usize, dx: i32) -> Move {
    let x = match offset(px, dx) {
        Some(x) if x < map.width => x,
        _ => return Move::Blocked,
    };
    let y = py;
    let target = map.tile_at(x, y);

    if let Some(m) = enter_or_unlock(target, x, y) {
        return m;
    }

    match target.fall_state() {
        Some(FallState::Resting) => {
            let beyond = map.tile_offset(x, y, dx, 0);
            let below = map.tile_offset(x, y, 0, 1);
            match offset(x, dx) {
                Some(to_x) if beyond.is_air() && !below.is_air() => Move::Shove { x, y, to_x },
                _ => Move::Blocked,
            }
        }
        // Falling blocks cannot be pushed mid-air.
        Some(FallState::Falling) => Move::Blocked,
        None => Move::Blocked,
    }
}

pub fn vertical(map: &MapView, px: usize, py: usize, dy: i32) -> Move {
    let y = match offset(py, dy) {
        Some(y) if y < map.height => y,
        _ => return Move::Blocked,
    };
    let x = px;
    enter_or_unlock(map.tile_at(x, y), x, y).unwrap_or(Move::Blocked)
}

/// Rules shared by both axes: walkable tiles and keys.
fn enter_or_unlock(target: Tile, x: usize, y: usize) -> Option<Move> {
    match target {
        Tile::Air | Tile::Flux => Some(Move::Enter { x, y }),
        Tile::Key1 | Tile::Key2 => target.opens().map(|lock| Move::Unlock { x, y, lock }),
        _ => None,
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
