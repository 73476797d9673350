/// The step function: advances the grid by one tick.
///
/// Processing order:
///   1. Input resolution: drain the queue (newest first), apply each move
///   2. Gravity pass: bottom row to top, left to right, update every block
///
/// Rules decide (domain::rules, domain::physics); this module applies.
/// Every player move goes through `Grid::move_to_tile`.

use crate::domain::physics::{self, FallStep};
use crate::domain::rules::{self, Move};
use crate::domain::tile::{FallState, Tile};
use super::event::GameEvent;
use super::grid::Grid;
use super::input_queue::InputQueue;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(grid: &mut Grid, inputs: &mut InputQueue) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();

    resolve_inputs(grid, inputs, &mut events);
    debug_assert!(grid.player_is_consistent());
    resolve_gravity(grid, &mut events);

    events
}

// ══════════════════════════════════════════════════════════════
// Movement
// ══════════════════════════════════════════════════════════════

fn resolve_inputs(grid: &mut Grid, inputs: &mut InputQueue, events: &mut Vec<GameEvent>) {
    for dir in inputs.drain() {
        let (px, py) = grid.player_pos();
        let outcome = rules::resolve(&grid.view(), px, py, dir);
        apply_move(grid, outcome, events);
    }
}

fn apply_move(grid: &mut Grid, outcome: Move, events: &mut Vec<GameEvent>) {
    let (x, y) = match outcome {
        Move::Blocked => return,
        Move::Enter { x, y } => (x, y),
        Move::Shove { x, y, to_x } => {
            let block = grid.tile_at(x, y);
            grid.set_tile(to_x, y, block);
            events.push(GameEvent::BlockShoved { from_x: x, to_x, y });
            (x, y)
        }
        Move::Unlock { x, y, lock } => {
            let count = grid.remove(lock);
            events.push(GameEvent::LocksOpened { lock, count });
            (x, y)
        }
    };
    grid.move_to_tile(x, y);
    events.push(GameEvent::PlayerMoved { x, y });
}

// ══════════════════════════════════════════════════════════════
// Gravity
// ══════════════════════════════════════════════════════════════

fn resolve_gravity(grid: &mut Grid, events: &mut Vec<GameEvent>) {
    for (x, y) in physics::gravity_order(grid.width(), grid.height()) {
        if grid.tile_at(x, y).can_fall() {
            update_tile(grid, x, y, events);
        }
    }
}

fn update_tile(grid: &mut Grid, x: usize, y: usize, events: &mut Vec<GameEvent>) {
    let tile = grid.tile_at(x, y);
    let state = match tile.fall_state() {
        Some(s) => s,
        None => return,
    };

    match physics::fall_step(state, grid.tile_at(x, y + 1)) {
        FallStep::Drop => {
            grid.set_tile(x, y + 1, tile.with_fall_state(FallState::Falling));
            grid.set_tile(x, y, Tile::Air);
            events.push(GameEvent::BlockFell { x, y: y + 1 });
        }
        FallStep::Land => {
            grid.set_tile(x, y, tile.with_fall_state(FallState::Resting));
            events.push(GameEvent::BlockLanded { x, y });
        }
        FallStep::Hold => {}
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::command::Direction;
    use crate::sim::level;

    const RESTING_STONE: Tile = Tile::Stone(FallState::Resting);
    const FALLING_STONE: Tile = Tile::Stone(FallState::Falling);

    /// Legend: '#' wall, ' ' air, '.' flux, 'P' player, 'o'/'O' stone resting/falling,
    /// 'b'/'B' box resting/falling, 'k'/'l' key1/lock1, 'K'/'L' key2/lock2.
    fn grid_from(rows: &[&str]) -> Grid {
        let codes: Vec<Vec<u8>> = rows
            .iter()
            .map(|r| {
                r.chars()
                    .map(|c| match c {
                        ' ' => 0,
                        '.' => 1,
                        '#' => 2,
                        'P' => 3,
                        'o' => 4,
                        'O' => 5,
                        'b' => 6,
                        'B' => 7,
                        'k' => 8,
                        'l' => 9,
                        'K' => 10,
                        'L' => 11,
                        other => panic!("bad legend char {other:?}"),
                    })
                    .collect()
            })
            .collect();
        level::load(&codes).unwrap()
    }

    fn tick(grid: &mut Grid, dirs: &[Direction]) -> Vec<GameEvent> {
        let mut q = InputQueue::new();
        for &d in dirs {
            q.push(d);
        }
        let events = step(grid, &mut q);
        assert!(q.is_empty());
        assert!(grid.player_is_consistent(), "player desync after tick");
        events
    }

    // ── Scenarios ──

    #[test]
    fn walk_onto_flux_then_shove_stone() {
        let mut g = grid_from(&[
            "#######",
            "#P.o ##",
            "#######",
        ]);

        tick(&mut g, &[Direction::Right]);
        assert_eq!(g.player_pos(), (2, 1));
        assert_eq!(g.tile_at(1, 1), Tile::Air);
        assert_eq!(g.tile_at(3, 1), RESTING_STONE);

        let events = tick(&mut g, &[Direction::Right]);
        assert_eq!(g.player_pos(), (3, 1));
        assert_eq!(g.tile_at(4, 1), RESTING_STONE);
        assert_eq!(g.tile_at(2, 1), Tile::Air);
        assert!(events.contains(&GameEvent::BlockShoved { from_x: 3, to_x: 4, y: 1 }));
    }

    #[test]
    fn stone_falls_one_row_per_tick_then_rests() {
        let mut g = grid_from(&[
            "#####",
            "#Po #",
            "#   #",
            "#   #",
            "#####",
        ]);

        let events = tick(&mut g, &[]);
        assert_eq!(g.tile_at(2, 2), FALLING_STONE);
        assert_eq!(g.tile_at(2, 1), Tile::Air);
        assert_eq!(events, vec![GameEvent::BlockFell { x: 2, y: 2 }]);

        tick(&mut g, &[]);
        assert_eq!(g.tile_at(2, 3), FALLING_STONE);
        assert_eq!(g.tile_at(2, 2), Tile::Air);

        let events = tick(&mut g, &[]);
        assert_eq!(g.tile_at(2, 3), RESTING_STONE);
        assert_eq!(events, vec![GameEvent::BlockLanded { x: 2, y: 3 }]);

        let events = tick(&mut g, &[]);
        assert_eq!(g.tile_at(2, 3), RESTING_STONE);
        assert!(events.is_empty());
    }

    #[test]
    fn stacked_blocks_fall_together_one_row_each() {
        let mut g = grid_from(&[
            "#####",
            "#Po #",
            "# b #",
            "#   #",
            "#####",
        ]);

        tick(&mut g, &[]);
        assert_eq!(g.tile_at(2, 3), Tile::Box(FallState::Falling));
        assert_eq!(g.tile_at(2, 2), FALLING_STONE);
        assert_eq!(g.tile_at(2, 1), Tile::Air);
    }

    #[test]
    fn block_rests_on_player() {
        let mut g = grid_from(&[
            "####",
            "#O #",
            "#P #",
            "####",
        ]);
        tick(&mut g, &[]);
        assert_eq!(g.tile_at(1, 1), RESTING_STONE);
    }

    // ── Shove rules ──

    #[test]
    fn falling_box_cannot_be_shoved_until_landed() {
        let mut g = grid_from(&[
            "######",
            "#PB  #",
            "######",
        ]);

        tick(&mut g, &[Direction::Right]);
        assert_eq!(g.player_pos(), (1, 1));
        // Input runs before gravity, so it landed after the failed push.
        assert_eq!(g.tile_at(2, 1), Tile::Box(FallState::Resting));

        tick(&mut g, &[Direction::Right]);
        assert_eq!(g.player_pos(), (2, 1));
        assert_eq!(g.tile_at(3, 1), Tile::Box(FallState::Resting));
    }

    #[test]
    fn shoved_stone_off_ledge_starts_falling() {
        let mut g = grid_from(&[
            "#####",
            "#Po #",
            "### #",
            "#   #",
            "#####",
        ]);

        let events = tick(&mut g, &[Direction::Right]);
        assert_eq!(g.player_pos(), (2, 1));
        // Shoved to (3, 1), then gravity drops it into the shaft in the same tick.
        assert_eq!(g.tile_at(3, 1), Tile::Air);
        assert_eq!(g.tile_at(3, 2), FALLING_STONE);
        assert_eq!(
            events,
            vec![
                GameEvent::BlockShoved { from_x: 2, to_x: 3, y: 1 },
                GameEvent::PlayerMoved { x: 2, y: 1 },
                GameEvent::BlockFell { x: 3, y: 2 },
            ]
        );
    }

    #[test]
    fn no_vertical_push() {
        let mut g = grid_from(&[
            "###",
            "#P#",
            "#o#",
            "# #",
            "###",
        ]);
        // The stone drops away during this tick's gravity pass, after the blocked move.
        tick(&mut g, &[Direction::Down]);
        assert_eq!(g.player_pos(), (1, 1));
    }

    // ── Keys ──

    #[test]
    fn key1_opens_every_lock1_in_same_tick() {
        let mut g = grid_from(&[
            "#######",
            "#Pk l #",
            "#l L l#",
            "#######",
        ]);

        let events = tick(&mut g, &[Direction::Right]);
        assert_eq!(g.player_pos(), (2, 1));
        assert_eq!(g.count(Tile::Lock1), 0);
        assert_eq!(g.count(Tile::Lock2), 1);
        assert!(events.contains(&GameEvent::LocksOpened { lock: Tile::Lock1, count: 3 }));
    }

    #[test]
    fn key2_leaves_lock1_alone() {
        let mut g = grid_from(&[
            "#####",
            "#P l#",
            "#K L#",
            "#####",
        ]);

        tick(&mut g, &[Direction::Down]);
        assert_eq!(g.player_pos(), (1, 2));
        assert_eq!(g.count(Tile::Lock2), 0);
        assert_eq!(g.count(Tile::Lock1), 1);
    }

    #[test]
    fn lock_blocks_until_opened() {
        let mut g = grid_from(&[
            "######",
            "#Pl k#",
            "######",
        ]);
        tick(&mut g, &[Direction::Right]);
        assert_eq!(g.player_pos(), (1, 1));
    }

    // ── Input order ──

    #[test]
    fn same_tick_inputs_apply_newest_first() {
        let mut g = grid_from(&[
            "####",
            "#P #",
            "# ##",
            "####",
        ]);
        // Pushed Right then Down: Down runs first to (1, 2), then Right hits the wall.
        // Oldest-first would have ended on (2, 1).
        tick(&mut g, &[Direction::Right, Direction::Down]);
        assert_eq!(g.player_pos(), (1, 2));
    }

    // ── Invariant ──

    #[test]
    fn player_stays_consistent_over_long_run() {
        let mut g = level::load(&level::DEFAULT_LEVEL).unwrap();
        let dirs = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let n = (seed >> 16) as usize % 3;
            let batch: Vec<Direction> =
                (0..n).map(|i| dirs[((seed >> (4 * i)) & 3) as usize]).collect();
            tick(&mut g, &batch);
            assert_eq!(g.count(Tile::Player), 1);
        }
    }
}
