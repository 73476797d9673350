/// Level loader: integer-coded grid literal → `Grid`.
///
/// ## Tile codes:
///   0 = Air            1 = Flux           2 = Unbreakable
///   3 = Player         4 = Stone          5 = Falling stone
///   6 = Box            7 = Falling box    8 = Key 1
///   9 = Lock 1        10 = Key 2         11 = Lock 2
///
/// A level must be rectangular, at least 3×3, contain exactly one player,
/// and be walled with Unbreakable on every border cell. Anything else is
/// rejected with a `LevelError`; the loader never substitutes a default.

use thiserror::Error;

use crate::domain::tile::Tile;
use crate::sim::grid::Grid;

/// Smallest playable side: one open cell inside a wall.
pub const MIN_SIDE: usize = 3;

/// Built-in level.
pub const DEFAULT_LEVEL: [[u8; 8]; 6] = [
    [2, 2, 2, 2, 2, 2, 2, 2],
    [2, 3, 0, 1, 1, 2, 0, 2],
    [2, 4, 2, 6, 1, 2, 0, 2],
    [2, 8, 4, 1, 1, 2, 0, 2],
    [2, 4, 1, 1, 1, 9, 0, 2],
    [2, 2, 2, 2, 2, 2, 2, 2],
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    #[error("level is {width}x{height}, minimum is {min}x{min}", min = MIN_SIDE)]
    TooSmall { width: usize, height: usize },
    #[error("unknown tile code {code} at ({x}, {y})")]
    UnknownCode { x: usize, y: usize, code: i64 },
    #[error("level has no player cell")]
    NoPlayer,
    #[error("second player cell at ({x}, {y})")]
    ExtraPlayer { x: usize, y: usize },
    #[error("border cell ({x}, {y}) is not unbreakable")]
    OpenBorder { x: usize, y: usize },
}

/// Decode and validate a level. Cells may be any integer type; codes
/// outside the table (negative or too large) are `UnknownCode`.
pub fn load<R, C>(rows: &[R]) -> Result<Grid, LevelError>
where
    R: AsRef<[C]>,
    C: Copy + Into<i64>,
{
    let height = rows.len();
    let width = rows.first().map(|r| r.as_ref().len()).ok_or(LevelError::Empty)?;
    if width == 0 {
        return Err(LevelError::Empty);
    }

    let mut tiles = Vec::with_capacity(height);
    let mut player = None;

    for (y, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != width {
            return Err(LevelError::Ragged { row: y, expected: width, found: row.len() });
        }
        let mut decoded = Vec::with_capacity(width);
        for (x, &cell) in row.iter().enumerate() {
            let code: i64 = cell.into();
            let tile = u8::try_from(code)
                .ok()
                .and_then(Tile::from_code)
                .ok_or(LevelError::UnknownCode { x, y, code })?;
            if tile.is_player() {
                if player.is_some() {
                    return Err(LevelError::ExtraPlayer { x, y });
                }
                player = Some((x, y));
            }
            decoded.push(tile);
        }
        tiles.push(decoded);
    }

    if width < MIN_SIDE || height < MIN_SIDE {
        return Err(LevelError::TooSmall { width, height });
    }

    let (px, py) = player.ok_or(LevelError::NoPlayer)?;

    if let Some((x, y)) = first_open_border(&tiles, width, height) {
        return Err(LevelError::OpenBorder { x, y });
    }

    Ok(Grid::from_parts(tiles, px, py))
}

fn first_open_border(tiles: &[Vec<Tile>], width: usize, height: usize) -> Option<(usize, usize)> {
    let on_border = |x: usize, y: usize| x == 0 || y == 0 || x + 1 == width || y + 1 == height;
    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&(x, y)| on_border(x, y))
        .find(|&(x, y)| tiles[y][x] != Tile::Unbreakable)
}
