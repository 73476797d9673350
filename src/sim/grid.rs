/// Grid: the tile map plus the player's coordinates.
///
/// ## Player Position
///
/// The player is stored twice: as the `Tile::Player` cell and as
/// `(player_x, player_y)`. `move_to_tile()` is the only path that moves the
/// player and updates both at once. `player_is_consistent()` checks the
/// pair; tests assert it after every tick.
///
/// All other tile mutations go through `set_tile()` / `remove()`.
/// Reads outside the map return `Tile::Unbreakable`.

use crate::domain::rules::MapView;
use crate::domain::tile::Tile;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
    width: usize,
    height: usize,
    player_x: usize,
    player_y: usize,
}

impl Grid {
    /// Build from rectangular rows. The caller (`sim::level`) has validated
    /// the shape and that `(player_x, player_y)` holds the only `Tile::Player`.
    pub(crate) fn from_parts(tiles: Vec<Vec<Tile>>, player_x: usize, player_y: usize) -> Self {
        let height = tiles.len();
        let width = tiles.first().map_or(0, |r| r.len());
        Grid { tiles, width, height, player_x, player_y }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn player_pos(&self) -> (usize, usize) {
        (self.player_x, self.player_y)
    }

    pub fn view(&self) -> MapView<'_> {
        MapView { tiles: &self.tiles, width: self.width, height: self.height }
    }

    /// Query tile at (x, y). Out of bounds reads as a wall.
    #[inline]
    pub fn tile_at(&self, x: usize, y: usize) -> Tile {
        if x < self.width && y < self.height {
            self.tiles[y][x]
        } else {
            Tile::Unbreakable
        }
    }

    /// Replace the tile at (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_tile(&mut self, x: usize, y: usize, tile: Tile) {
        if x < self.width && y < self.height {
            self.tiles[y][x] = tile;
        }
    }

    /// Move the player to (new_x, new_y): old cell becomes Air, new cell
    /// becomes Player. No rule checks; movement rules validate first.
    pub fn move_to_tile(&mut self, new_x: usize, new_y: usize) {
        if new_x >= self.width || new_y >= self.height {
            return;
        }
        self.tiles[self.player_y][self.player_x] = Tile::Air;
        self.tiles[new_y][new_x] = Tile::Player;
        self.player_x = new_x;
        self.player_y = new_y;
    }

    /// Replace every cell equal to `tile` with Air. Returns how many were cleared.
    pub fn remove(&mut self, tile: Tile) -> usize {
        let mut cleared = 0;
        for row in &mut self.tiles {
            for cell in row.iter_mut().filter(|c| **c == tile) {
                *cell = Tile::Air;
                cleared += 1;
            }
        }
        cleared
    }

    /// Number of cells holding `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().flatten().filter(|c| **c == tile).count()
    }

    /// Row-major iterator over `(x, y, tile)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, &t)| (x, y, t))
        })
    }

    /// Exactly one Player cell, located at the stored coordinates.
    pub fn player_is_consistent(&self) -> bool {
        self.count(Tile::Player) == 1 && self.tile_at(self.player_x, self.player_y).is_player()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tile::FallState;

    fn grid() -> Grid {
        Grid::from_parts(
            vec![
                vec![Tile::Unbreakable, Tile::Unbreakable, Tile::Unbreakable, Tile::Unbreakable],
                vec![Tile::Unbreakable, Tile::Player, Tile::Lock1, Tile::Unbreakable],
                vec![Tile::Unbreakable, Tile::Lock1, Tile::Lock2, Tile::Unbreakable],
                vec![Tile::Unbreakable, Tile::Unbreakable, Tile::Unbreakable, Tile::Unbreakable],
            ],
            1,
            1,
        )
    }

    #[test]
    fn dimensions_follow_rows() {
        let g = grid();
        assert_eq!((g.width(), g.height()), (4, 4));
        assert!(g.player_is_consistent());
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let g = grid();
        assert_eq!(g.tile_at(4, 0), Tile::Unbreakable);
        assert_eq!(g.tile_at(0, 99), Tile::Unbreakable);
    }

    #[test]
    fn out_of_bounds_write_is_ignored() {
        let mut g = grid();
        let before = g.clone();
        g.set_tile(10, 10, Tile::Air);
        assert_eq!(g, before);
    }

    #[test]
    fn move_to_tile_updates_both_representations() {
        let mut g = grid();
        g.set_tile(2, 1, Tile::Air);
        g.move_to_tile(2, 1);
        assert_eq!(g.player_pos(), (2, 1));
        assert_eq!(g.tile_at(1, 1), Tile::Air);
        assert_eq!(g.tile_at(2, 1), Tile::Player);
        assert!(g.player_is_consistent());
    }

    #[test]
    fn remove_clears_every_match_only() {
        let mut g = grid();
        assert_eq!(g.remove(Tile::Lock1), 2);
        assert_eq!(g.count(Tile::Lock1), 0);
        assert_eq!(g.count(Tile::Lock2), 1);
        assert_eq!(g.tile_at(2, 1), Tile::Air);
    }

    #[test]
    fn remove_matches_fall_state_exactly() {
        let mut g = grid();
        g.set_tile(2, 1, Tile::Stone(FallState::Falling));
        assert_eq!(g.remove(Tile::Stone(FallState::Resting)), 0);
        assert_eq!(g.tile_at(2, 1), Tile::Stone(FallState::Falling));
    }

    #[test]
    fn inconsistent_player_is_detected() {
        let mut g = grid();
        g.set_tile(2, 2, Tile::Player);
        assert!(!g.player_is_consistent());
    }

    #[test]
    fn cells_are_row_major() {
        let g = grid();
        let first: Vec<_> = g.cells().take(5).map(|(x, y, _)| (x, y)).collect();
        assert_eq!(first, vec![(0, 0), (1, 0), (2, 0), (3, 0), (0, 1)]);
    }
}
