pub mod chunk;
pub mod generation;
pub mod position;
pub mod raycast;
pub mod rect;
pub mod retention;
pub mod tile;

use std::collections::HashMap;

use chunk::{Chunk, Edge};
use generation::{ChunkGenerator, RoomsGenerator, chunk_rng};
use position::{CHUNK_SIZE, ChunkPos, LocalTilePos, TilePos, Vec2, world_to_chunk};
use rand::{Rng, SeedableRng};
use rect::Rect;
use retention::{RetainAll, RetentionPolicy};
use tile::Tile;

/// Seedable random source used for generation and door gluing.
pub type WorldRng = rand_chacha::ChaCha8Rng;

/// Upper bound on random index picks per glue attempt.
pub const MAX_GLUE_ATTEMPTS: u32 = 4 * CHUNK_SIZE as u32;

/// Everything known about one absolute tile position.
#[derive(Clone, Copy)]
pub struct TileProbe<'a> {
    pub tile: Tile,
    pub chunk: &'a Chunk,
    /// Position inside `chunk`.
    pub local: LocalTilePos,
    /// Absolute tile position that was probed.
    pub tile_pos: TilePos,
}

/// The four cells involved in one doorway across a shared edge.
///
/// `a` is the chunk being stitched, `b` the neighbor on its left or top.
struct Doorway {
    a_edge: LocalTilePos,
    a_inner: LocalTilePos,
    b_inner: LocalTilePos,
    b_edge: LocalTilePos,
}

impl Doorway {
    fn at(edge: Edge, i: u8) -> Self {
        let far = (CHUNK_SIZE - 1) as u8;
        let cell = |along: u8, across: u8| match edge {
            Edge::Left => LocalTilePos::new(across, along),
            Edge::Top => LocalTilePos::new(along, across),
        };
        Self {
            a_edge: cell(i, 0),
            a_inner: cell(i, 1),
            b_inner: cell(i, far - 1),
            b_edge: cell(i, far),
        }
    }
}

/// The whole tile world: a sparse, unbounded set of chunks.
///
/// Chunks are created on request and kept until a retention policy other
/// than the default `RetainAll` says otherwise. All access happens from the
/// single game timeline.
pub struct WorldMap {
    chunks: HashMap<ChunkPos, Chunk>,
    seed: u64,
    generator: Box<dyn ChunkGenerator>,
    retention: Box<dyn RetentionPolicy>,
    /// Drives door gluing. Generation uses per-chunk streams instead.
    rng: WorldRng,
}

impl WorldMap {
    pub fn new(seed: u64) -> Self {
        Self::with_generator(seed, Box::new(RoomsGenerator::default()))
    }

    pub fn with_generator(seed: u64, generator: Box<dyn ChunkGenerator>) -> Self {
        Self {
            chunks: HashMap::new(),
            seed,
            generator,
            retention: Box::new(RetainAll),
            rng: WorldRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn set_retention(&mut self, policy: Box<dyn RetentionPolicy>) {
        self.retention = policy;
    }

    /// Generate and store a chunk if none exists at `pos`. Returns true if a
    /// chunk was created.
    ///
    /// No doorway to the left or top is opened here. If `pos` was evicted
    /// earlier, neighbors to the right or bottom that had already doored
    /// their shared edge get a fresh doorway into the regenerated chunk.
    pub fn insert_chunk(&mut self, pos: ChunkPos) -> bool {
        if self.chunks.contains_key(&pos) {
            return false;
        }
        let mut rng = chunk_rng(self.seed, pos);
        let chunk = Chunk::generate(pos, self.generator.as_ref(), &mut rng);
        self.chunks.insert(pos, chunk);
        tracing::debug!("Generated chunk ({}, {})", pos.x, pos.y);

        self.restitch(pos.right(), pos, Edge::Left);
        self.restitch(pos.bottom(), pos, Edge::Top);
        true
    }

    /// Re-open the doorway across `edge` of `a` if `a` doored that edge
    /// against an earlier incarnation of `b`.
    fn restitch(&mut self, a: ChunkPos, b: ChunkPos, edge: Edge) {
        if self.chunks.get(&a).is_some_and(|c| c.doored(edge)) && !self.glue_edge(a, b, edge) {
            tracing::warn!(
                "Could not restore doorway between ({}, {}) and ({}, {})",
                a.x, a.y, b.x, b.y
            );
        }
    }

    /// Ensure a chunk exists at `pos`.
    ///
    /// Returns true when the chunk is new and still needs populating. For an
    /// existing chunk, retries the doorway to its top and left neighbors if
    /// they exist and that edge has not been doored yet, then returns false.
    pub fn create_chunk(&mut self, pos: ChunkPos) -> bool {
        if self.insert_chunk(pos) {
            return true;
        }
        self.try_glue(pos, Edge::Top);
        self.try_glue(pos, Edge::Left);
        false
    }

    fn try_glue(&mut self, pos: ChunkPos, edge: Edge) -> bool {
        let neighbor = match edge {
            Edge::Left => pos.left(),
            Edge::Top => pos.top(),
        };
        let pending = self.chunks.get(&pos).is_some_and(|c| !c.doored(edge));
        if !pending || !self.chunks.contains_key(&neighbor) {
            return false;
        }
        if !self.glue_edge(pos, neighbor, edge) {
            return false;
        }
        if let Some(chunk) = self.chunks.get_mut(&pos) {
            chunk.mark_doored(edge);
        }
        true
    }

    /// Carve a doorway between `a` and its neighbor `b` across `edge` of `a`.
    ///
    /// Picks random indices along the edge until both cells just inside the
    /// shared edge are FLOOR, then opens the two boundary cells. Gives up
    /// after `MAX_GLUE_ATTEMPTS` picks and returns false. Also returns false
    /// when `b` is not the neighbor across `edge`.
    pub fn glue_edge(&mut self, a: ChunkPos, b: ChunkPos, edge: Edge) -> bool {
        let neighbor = match edge {
            Edge::Left => a.left(),
            Edge::Top => a.top(),
        };
        if b != neighbor {
            return false;
        }
        let Self { chunks, rng, .. } = self;
        let (Some(a_chunk), Some(b_chunk)) = (chunks.get(&a), chunks.get(&b)) else {
            return false;
        };

        let mut found = None;
        for _ in 0..MAX_GLUE_ATTEMPTS {
            let i = rng.gen_range(1..(CHUNK_SIZE - 1) as u8);
            let door = Doorway::at(edge, i);
            if a_chunk.tile_at(door.a_inner) == Some(Tile::Floor)
                && b_chunk.tile_at(door.b_inner) == Some(Tile::Floor)
            {
                found = Some((i, door));
                break;
            }
        }

        let Some((i, door)) = found else {
            tracing::debug!(
                "No doorway found between ({}, {}) and ({}, {}) after {} attempts",
                a.x, a.y, b.x, b.y, MAX_GLUE_ATTEMPTS
            );
            return false;
        };

        if let Some(chunk) = chunks.get_mut(&a) {
            chunk.set_tile(door.a_edge.x, door.a_edge.y, Tile::Floor);
        }
        if let Some(chunk) = chunks.get_mut(&b) {
            chunk.set_tile(door.b_edge.x, door.b_edge.y, Tile::Floor);
        }
        tracing::debug!(
            "Doorway {:?} of ({}, {}) opened at index {}",
            edge, a.x, a.y, i
        );
        true
    }

    pub fn get_chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    pub fn get_chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }

    pub fn get_chunk_from_world(&self, pos: Vec2) -> Option<&Chunk> {
        self.get_chunk(world_to_chunk(pos))
    }

    pub fn has_chunk(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    /// Look up an absolute tile. `None` means no chunk covers it, which is
    /// distinct from a VOID tile.
    pub fn probe_tile(&self, pos: TilePos) -> Option<TileProbe<'_>> {
        let chunk = self.chunks.get(&pos.chunk())?;
        let local = pos.local();
        let tile = chunk.tile_at(local)?;
        Some(TileProbe {
            tile,
            chunk,
            local,
            tile_pos: pos,
        })
    }

    pub fn get_tile(&self, pos: TilePos) -> Option<Tile> {
        self.probe_tile(pos).map(|p| p.tile)
    }

    /// Write an absolute tile and mark its chunk dirty. Returns false when
    /// no chunk covers `pos`.
    pub fn set_tile(&mut self, pos: TilePos, tile: Tile) -> bool {
        let local = pos.local();
        match self.chunks.get_mut(&pos.chunk()) {
            Some(chunk) => chunk.set_tile(local.x, local.y, tile),
            None => false,
        }
    }

    /// First solid tile overlapped by `rect`, scanning columns left to right
    /// and each column top to bottom. Unmapped tiles are not solid.
    pub fn tile_collides(&self, rect: &Rect) -> Option<TilePos> {
        let (min, max) = rect.tile_bounds();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                let pos = TilePos::new(x, y);
                if self.get_tile(pos).is_some_and(Tile::is_solid) {
                    return Some(pos);
                }
            }
        }
        None
    }

    pub fn collides(&self, rect: &Rect) -> bool {
        self.tile_collides(rect).is_some()
    }

    pub fn mark_dirty_at(&mut self, pos: Vec2) {
        if let Some(chunk) = self.chunks.get_mut(&world_to_chunk(pos)) {
            chunk.mark_dirty();
        }
    }

    /// Clear every chunk's dirty flag. Runs at the start of each physics step.
    pub fn clean_chunks(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.clean();
        }
    }

    pub fn dirty_chunks(&self) -> Vec<ChunkPos> {
        self.chunks
            .iter()
            .filter(|(_, c)| c.is_dirty())
            .map(|(pos, _)| *pos)
            .collect()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn iter_chunks(&self) -> impl Iterator<Item = (&ChunkPos, &Chunk)> {
        self.chunks.iter()
    }

    /// Drop every chunk the retention policy rejects. Returns how many went.
    pub fn enforce_retention(&mut self, focus: ChunkPos) -> usize {
        self.enforce_retention_pinned(focus, |_| false)
    }

    /// Like `enforce_retention`, but chunks for which `pinned` is true stay
    /// regardless of the policy.
    pub fn enforce_retention_pinned(&mut self, focus: ChunkPos, pinned: impl Fn(ChunkPos) -> bool) -> usize {
        let before = self.chunks.len();
        let policy = self.retention.as_ref();
        self.chunks
            .retain(|pos, chunk| pinned(*pos) || policy.retain(*pos, chunk, focus));
        let evicted = before - self.chunks.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} chunks around ({}, {})", evicted, focus.x, focus.y);
        }
        evicted
    }
}

impl Default for WorldMap {
    fn default() -> Self {
        Self::new(0)
    }
}
