use super::WorldRng;
use super::generation::ChunkGenerator;
use super::position::{CHUNK_AREA, CHUNK_SIZE, ChunkPos, LocalTilePos};
use super::tile::Tile;

/// A chunk edge that can carry a doorway to the neighbor across it.
///
/// Only the left and top edges are tracked per chunk; the right and bottom
/// doorways belong to the neighbors on those sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
}

impl Edge {
    const fn index(self) -> usize {
        match self {
            Edge::Left => 0,
            Edge::Top => 1,
        }
    }
}

/// A CHUNK_SIZE x CHUNK_SIZE grid of tiles.
///
/// Stored as a flat row-major array. Coordinates are chunk-local; callers
/// working in absolute tiles go through `WorldMap`.
#[derive(Clone)]
pub struct Chunk {
    pos: ChunkPos,
    tiles: Box<[Tile; CHUNK_AREA]>,
    doored: [bool; 2],
    populated: bool,
    dirty: bool,
}

impl Chunk {
    pub fn new_filled(pos: ChunkPos, tile: Tile) -> Self {
        Self {
            pos,
            tiles: Box::new([tile; CHUNK_AREA]),
            doored: [false; 2],
            populated: false,
            dirty: true,
        }
    }

    /// Build a chunk and run `generator` over it once.
    pub fn generate(pos: ChunkPos, generator: &dyn ChunkGenerator, rng: &mut WorldRng) -> Self {
        let mut chunk = Self::new_filled(pos, Tile::Void);
        generator.fill(&mut chunk, rng);
        chunk
    }

    #[inline]
    const fn index(x: u8, y: u8) -> usize {
        (y as usize) * CHUNK_SIZE as usize + (x as usize)
    }

    #[inline]
    const fn in_bounds(x: u8, y: u8) -> bool {
        (x as i32) < CHUNK_SIZE && (y as i32) < CHUNK_SIZE
    }

    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// Tile at a chunk-local position, or `None` outside `0..CHUNK_SIZE`.
    pub fn get_tile(&self, x: u8, y: u8) -> Option<Tile> {
        Self::in_bounds(x, y).then(|| self.tiles[Self::index(x, y)])
    }

    /// Write a tile at a chunk-local position. Out-of-range writes are
    /// ignored and return false.
    pub fn set_tile(&mut self, x: u8, y: u8, tile: Tile) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        self.tiles[Self::index(x, y)] = tile;
        self.dirty = true;
        true
    }

    pub fn tile_at(&self, pos: LocalTilePos) -> Option<Tile> {
        self.get_tile(pos.x, pos.y)
    }

    /// Local positions of every tile matching `pred`, row by row.
    pub fn positions_where(&self, pred: impl Fn(Tile) -> bool) -> Vec<LocalTilePos> {
        let mut out = Vec::new();
        for y in 0..CHUNK_SIZE as u8 {
            for x in 0..CHUNK_SIZE as u8 {
                if pred(self.tiles[Self::index(x, y)]) {
                    out.push(LocalTilePos::new(x, y));
                }
            }
        }
        out
    }

    pub fn doored(&self, edge: Edge) -> bool {
        self.doored[edge.index()]
    }

    /// Once set, an edge is never retried or reset.
    pub(crate) fn mark_doored(&mut self, edge: Edge) {
        self.doored[edge.index()] = true;
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Set by the spawner after placing content. There is no way back.
    pub fn mark_populated(&mut self) {
        self.populated = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clean(&mut self) {
        self.dirty = false;
    }
}
