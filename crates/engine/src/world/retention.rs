use super::chunk::Chunk;
use super::position::ChunkPos;

/// Decides which chunks stay resident when `WorldMap::enforce_retention` runs.
///
/// Evicting a chunk forgets its tiles and door flags. If it is created again
/// later it is regenerated from the seed and glues to its left and top
/// neighbors afresh. Neighbors to its right and bottom that had already
/// doored the shared edge get a new doorway when it is regenerated.
pub trait RetentionPolicy {
    fn retain(&self, pos: ChunkPos, chunk: &Chunk, focus: ChunkPos) -> bool;
}

/// Keep everything for the lifetime of the map.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetainAll;

impl RetentionPolicy for RetainAll {
    fn retain(&self, _pos: ChunkPos, _chunk: &Chunk, _focus: ChunkPos) -> bool {
        true
    }
}

/// Keep chunks within `radius` chunks (Chebyshev) of the focus.
#[derive(Debug, Clone, Copy)]
pub struct RetainWithinRadius {
    pub radius: i32,
}

impl RetentionPolicy for RetainWithinRadius {
    fn retain(&self, pos: ChunkPos, _chunk: &Chunk, focus: ChunkPos) -> bool {
        pos.chebyshev(focus) <= self.radius
    }
}
