/// Tile code stored in chunks.
///
/// The numeric codes are shared with the renderer, which owns the colour
/// lookup; the engine only cares about solidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Void = 0,
    Floor = 1,
    Wall = 2,
    DamagedFloor = 3,
    DamagedWall = 4,
}

/// Indexed by tile code.
const SOLID: [bool; 5] = [false, false, true, false, true];

impl Tile {
    pub const ALL: [Tile; 5] = [
        Tile::Void,
        Tile::Floor,
        Tile::Wall,
        Tile::DamagedFloor,
        Tile::DamagedWall,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Tile> {
        match code {
            0 => Some(Tile::Void),
            1 => Some(Tile::Floor),
            2 => Some(Tile::Wall),
            3 => Some(Tile::DamagedFloor),
            4 => Some(Tile::DamagedWall),
            _ => None,
        }
    }

    /// Does this tile block movement and line of sight?
    pub const fn is_solid(self) -> bool {
        SOLID[self as usize]
    }

    /// Can an entity stand here? VOID is non-solid but not ground.
    pub const fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor | Tile::DamagedFloor)
    }
}
