/// Draw descriptors: what the renderer should paint for the current grid.
///
/// One filled square per non-empty cell, in row-major order, at
/// `(cell index × tile size)`. Air and the player cell emit nothing during
/// the map pass; the player is emitted last as a red square so it is always
/// on top.

use crate::domain::tile::{Rgb, PLAYER_COLOR};
use super::grid::Grid;

/// Default size of one cell in descriptor units.
pub const TILE_SIZE: u32 = 30;

/// Largest tile size the config accepts.
pub const MAX_TILE_SIZE: u32 = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
    pub color: Rgb,
}

/// Feed every descriptor for `grid` to `draw`, player last.
pub fn render(grid: &Grid, tile_size: u32, mut draw: impl FnMut(FillRect)) {
    // Saturate instead of wrapping when a caller passes an oversized tile.
    let scale = |v: usize| u32::try_from(v).unwrap_or(u32::MAX).saturating_mul(tile_size);
    let at = |x: usize, y: usize, color: Rgb| FillRect {
        x: scale(x),
        y: scale(y),
        size: tile_size,
        color,
    };

    for (x, y, tile) in grid.cells() {
        if let Some(color) = tile.color() {
            draw(at(x, y, color));
        }
    }

    let (px, py) = grid.player_pos();
    draw(at(px, py, PLAYER_COLOR));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tile::{STONE_COLOR, UNBREAKABLE_COLOR};
    use crate::sim::level;

    fn collect(grid: &Grid, size: u32) -> Vec<FillRect> {
        let mut out = vec![];
        render(grid, size, |r| out.push(r));
        out
    }

    #[test]
    fn player_is_drawn_last_in_red() {
        let g = level::load(&level::DEFAULT_LEVEL).unwrap();
        let rects = collect(&g, TILE_SIZE);
        let last = rects.last().copied().unwrap();
        assert_eq!(last, FillRect { x: 30, y: 30, size: 30, color: PLAYER_COLOR });
        assert_eq!(rects.iter().filter(|r| r.color == PLAYER_COLOR).count(), 1);
    }

    #[test]
    fn oversized_tile_saturates_instead_of_overflowing() {
        let g = level::load(&level::DEFAULT_LEVEL).unwrap();
        let rects = collect(&g, 1_000_000_000);
        assert_eq!(rects[0], FillRect { x: 0, y: 0, size: 1_000_000_000, color: UNBREAKABLE_COLOR });
        let bottom_right = rects.iter().find(|r| r.y == u32::MAX && r.x == u32::MAX);
        assert!(bottom_right.is_some());
        assert_eq!(rects.last().map(|r| (r.x, r.y)), Some((1_000_000_000, 1_000_000_000)));
    }

    #[test]
    fn air_cells_are_skipped() {
        let rows: [[u8; 3]; 3] = [[2, 2, 2], [2, 3, 2], [2, 2, 2]];
        let g = level::load(&rows).unwrap();
        // 8 walls + player.
        assert_eq!(collect(&g, 10).len(), 9);

        let rows: [[u8; 4]; 3] = [[2, 2, 2, 2], [2, 3, 0, 2], [2, 2, 2, 2]];
        let g = level::load(&rows).unwrap();
        assert_eq!(collect(&g, 10).len(), 11);
    }

    #[test]
    fn coordinates_scale_with_tile_size() {
        let rows: [[u8; 4]; 3] = [[2, 2, 2, 2], [2, 3, 4, 2], [2, 2, 2, 2]];
        let g = level::load(&rows).unwrap();
        let rects = collect(&g, 8);
        assert!(rects.contains(&FillRect { x: 16, y: 8, size: 8, color: STONE_COLOR }));
        assert_eq!(rects[0], FillRect { x: 0, y: 0, size: 8, color: UNBREAKABLE_COLOR });
    }
}
