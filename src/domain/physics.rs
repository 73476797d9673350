/// Gravity rules: single source of truth for falling blocks.
///
/// ## Fall State Machine
///
/// ┌─────────────────────────────┬──────────────────────────────┐
/// │ Condition (priority order)  │ Outcome                      │
/// ├─────────────────────────────┼──────────────────────────────┤
/// │ cell below is Air           │ Drop: move down, Falling     │
/// │ current = Falling           │ Land: stay, become Resting   │
/// │ otherwise                   │ Hold: nothing                │
/// └─────────────────────────────┴──────────────────────────────┘
///
/// A landing block spends one tick going Falling → Resting without
/// moving. Only Resting blocks can be shoved (see `rules`).
///
/// ## Scan Order
///
/// The gravity pass visits rows bottom to top, each row left to right.
/// A block dropped from row y into y+1 has already had row y+1 visited,
/// so it cannot fall twice in one pass.

use super::tile::{FallState, Tile};

/// Result of one gravity update on a movable block.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FallStep {
    /// Move to the cell below; the block is now Falling.
    Drop,
    /// Stay put; the block is now Resting.
    Land,
    /// No change.
    Hold,
}

/// Decide what a block in `state` does given the tile below it.
pub fn fall_step(state: FallState, below: Tile) -> FallStep {
    if below.is_air() {
        FallStep::Drop
    } else if state == FallState::Falling {
        FallStep::Land
    } else {
        FallStep::Hold
    }
}

/// Gravity pass visiting order: bottom row first, left to right within a row.
pub fn gravity_order(width: usize, height: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..height).rev().flat_map(move |y| (0..width).map(move |x| (x, y)))
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
