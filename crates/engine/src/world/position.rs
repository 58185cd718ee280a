use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// World units per tile edge.
pub const TILE_SIZE: i32 = 32;
/// Tiles per chunk edge.
pub const CHUNK_SIZE: i32 = 20;
/// Tile count in one chunk.
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
/// World units per chunk edge.
pub const CHUNK_WORLD_SIZE: i32 = CHUNK_SIZE * TILE_SIZE;

/// A point or displacement in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);
    pub const ONE: Vec2 = Vec2::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or zero for a zero-length vector.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::ZERO
        } else {
            self / len
        }
    }

    pub fn lerp(self, to: Vec2, t: f32) -> Self {
        self + (to - self) * t
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Absolute tile index in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The chunk this tile belongs to.
    pub const fn chunk(&self) -> ChunkPos {
        ChunkPos {
            x: self.x.div_euclid(CHUNK_SIZE),
            y: self.y.div_euclid(CHUNK_SIZE),
        }
    }

    /// Position within the owning chunk (0..CHUNK_SIZE each axis).
    pub const fn local(&self) -> LocalTilePos {
        LocalTilePos {
            x: self.x.rem_euclid(CHUNK_SIZE) as u8,
            y: self.y.rem_euclid(CHUNK_SIZE) as u8,
        }
    }

    /// World-space centre of this tile.
    pub fn center(&self) -> Vec2 {
        tile_to_world(*self, None) + Vec2::new(TILE_SIZE as f32 / 2.0, TILE_SIZE as f32 / 2.0)
    }
}

/// Chunk index; chunk (0, 0) covers tiles 0..CHUNK_SIZE on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Absolute tile index of this chunk's top-left cell.
    pub const fn tile_origin(&self) -> TilePos {
        TilePos::new(self.x * CHUNK_SIZE, self.y * CHUNK_SIZE)
    }

    /// The neighbor sharing this chunk's left edge.
    pub const fn left(&self) -> ChunkPos {
        ChunkPos::new(self.x - 1, self.y)
    }

    /// The neighbor sharing this chunk's top edge.
    pub const fn top(&self) -> ChunkPos {
        ChunkPos::new(self.x, self.y - 1)
    }

    pub const fn right(&self) -> ChunkPos {
        ChunkPos::new(self.x + 1, self.y)
    }

    pub const fn bottom(&self) -> ChunkPos {
        ChunkPos::new(self.x, self.y + 1)
    }

    /// Chebyshev distance in chunks.
    pub fn chebyshev(&self, other: ChunkPos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Tile position local to a chunk (x, y in 0..CHUNK_SIZE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalTilePos {
    pub x: u8,
    pub y: u8,
}

impl LocalTilePos {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Absolute tile index once placed inside `chunk`.
    pub const fn in_chunk(&self, chunk: ChunkPos) -> TilePos {
        let origin = chunk.tile_origin();
        TilePos::new(origin.x + self.x as i32, origin.y + self.y as i32)
    }
}

/// World space to tile space: `floor(p / TILE_SIZE)` per axis.
pub fn world_to_tile(p: Vec2) -> TilePos {
    let size = TILE_SIZE as f32;
    TilePos::new((p.x / size).floor() as i32, (p.y / size).floor() as i32)
}

/// Tile space to chunk space: `floor(p / CHUNK_SIZE)` per axis.
pub const fn tile_to_chunk(p: TilePos) -> ChunkPos {
    p.chunk()
}

pub fn world_to_chunk(p: Vec2) -> ChunkPos {
    tile_to_chunk(world_to_tile(p))
}

/// Tile space to world space. With `chunk`, `p` is taken as local to that
/// chunk and offset by the chunk's origin before scaling.
pub fn tile_to_world(p: TilePos, chunk: Option<ChunkPos>) -> Vec2 {
    let (x, y) = match chunk {
        Some(c) => {
            let origin = c.tile_origin();
            (p.x + origin.x, p.y + origin.y)
        }
        None => (p.x, p.y),
    };
    let size = TILE_SIZE as f32;
    Vec2::new(x as f32 * size, y as f32 * size)
}
