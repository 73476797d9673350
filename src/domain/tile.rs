/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

/// Physics state of a movable tile (Stone / Box).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FallState {
    Falling,
    Resting,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Air,
    Flux,             // Walkable, consumed when entered
    Unbreakable,      // Wall
    Player,
    Stone(FallState),
    Box(FallState),
    Key1,             // Opens every Lock1
    Lock1,
    Key2,             // Opens every Lock2
    Lock2,
}

/// Fill color of a render descriptor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn hex(v: u32) -> Self {
        Rgb { r: (v >> 16) as u8, g: (v >> 8) as u8, b: v as u8 }
    }
}

pub const FLUX_COLOR: Rgb = Rgb::hex(0xccffcc);
pub const UNBREAKABLE_COLOR: Rgb = Rgb::hex(0x999999);
pub const STONE_COLOR: Rgb = Rgb::hex(0x0000cc);
pub const BOX_COLOR: Rgb = Rgb::hex(0x8b4513);
pub const LOCK1_COLOR: Rgb = Rgb::hex(0xffcc00);
pub const LOCK2_COLOR: Rgb = Rgb::hex(0x00ccff);
pub const PLAYER_COLOR: Rgb = Rgb::hex(0xff0000);

impl Tile {
    /// Decode a level cell. See `sim::level` for the code table.
    pub fn from_code(code: u8) -> Option<Tile> {
        let tile = match code {
            0 => Tile::Air,
            1 => Tile::Flux,
            2 => Tile::Unbreakable,
            3 => Tile::Player,
            4 => Tile::Stone(FallState::Resting),
            5 => Tile::Stone(FallState::Falling),
            6 => Tile::Box(FallState::Resting),
            7 => Tile::Box(FallState::Falling),
            8 => Tile::Key1,
            9 => Tile::Lock1,
            10 => Tile::Key2,
            11 => Tile::Lock2,
            _ => return None,
        };
        Some(tile)
    }

    pub fn is_air(self) -> bool {
        matches!(self, Tile::Air)
    }

    pub fn is_lock1(self) -> bool {
        matches!(self, Tile::Lock1)
    }

    pub fn is_lock2(self) -> bool {
        matches!(self, Tile::Lock2)
    }

    pub fn is_player(self) -> bool {
        matches!(self, Tile::Player)
    }

    /// Is this tile subject to gravity? Only Stone and Box.
    pub fn can_fall(self) -> bool {
        matches!(self, Tile::Stone(_) | Tile::Box(_))
    }

    /// Fall state of a Stone/Box, `None` for everything else.
    pub fn fall_state(self) -> Option<FallState> {
        match self {
            Tile::Stone(s) | Tile::Box(s) => Some(s),
            _ => None,
        }
    }

    /// Same kind of tile with a different fall state.
    /// Tiles that cannot fall are returned unchanged.
    pub fn with_fall_state(self, state: FallState) -> Tile {
        match self {
            Tile::Stone(_) => Tile::Stone(state),
            Tile::Box(_) => Tile::Box(state),
            other => other,
        }
    }

    /// The lock tile this key opens, if this is a key.
    pub fn opens(self) -> Option<Tile> {
        match self {
            Tile::Key1 => Some(Tile::Lock1),
            Tile::Key2 => Some(Tile::Lock2),
            _ => None,
        }
    }

    /// Fill color for the render descriptor.
    /// Air and Player draw nothing here; the player is painted last by the frame builder.
    pub fn color(self) -> Option<Rgb> {
        match self {
            Tile::Air | Tile::Player => None,
            Tile::Flux => Some(FLUX_COLOR),
            Tile::Unbreakable => Some(UNBREAKABLE_COLOR),
            Tile::Stone(_) => Some(STONE_COLOR),
            Tile::Box(_) => Some(BOX_COLOR),
            Tile::Key1 | Tile::Lock1 => Some(LOCK1_COLOR),
            Tile::Key2 | Tile::Lock2 => Some(LOCK2_COLOR),
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Air
    }
}
