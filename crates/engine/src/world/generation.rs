//! Interior layout generation for freshly created chunks.
//!
//! A generator may lay out a chunk however it likes, with one contract that
//! door gluing depends on: for every edge there must be a FLOOR cell one step
//! in from that edge (local index 1 or `CHUNK_SIZE - 2`) at some index in
//! `1..CHUNK_SIZE - 1`. Gluing searches for an index where both sides of a
//! shared edge satisfy this.

use rand::{Rng, SeedableRng};

use super::WorldRng;
use super::chunk::Chunk;
use super::position::{CHUNK_SIZE, ChunkPos};
use super::tile::Tile;

/// Pluggable interior layout algorithm.
pub trait ChunkGenerator {
    /// Write every tile of `chunk`. Called exactly once per chunk.
    fn fill(&self, chunk: &mut Chunk, rng: &mut WorldRng);
}

/// Deterministic per-chunk RNG: the same seed and position always produce the
/// same layout, independent of the order chunks are created in.
pub fn chunk_rng(seed: u64, pos: ChunkPos) -> WorldRng {
    let mixed = seed
        ^ (pos.x as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (pos.y as i64 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    WorldRng::seed_from_u64(mixed)
}

/// Fills the whole chunk with a single tile.
///
/// A FLOOR fill satisfies the edge contract trivially; a solid fill never
/// does, which makes every glue attempt against it fail.
#[derive(Debug, Clone, Copy)]
pub struct UniformGenerator {
    pub tile: Tile,
}

impl ChunkGenerator for UniformGenerator {
    fn fill(&self, chunk: &mut Chunk, _rng: &mut WorldRng) {
        for y in 0..CHUNK_SIZE as u8 {
            for x in 0..CHUNK_SIZE as u8 {
                chunk.set_tile(x, y, self.tile);
            }
        }
    }
}

/// Walled rooms around a corridor ring.
///
/// The outer border is WALL. Just inside it runs a FLOOR ring that touches
/// every edge index, so any two neighbors always have a matching doorway
/// candidate. Rooms are carved in the middle and each one is joined to the
/// ring by a straight corridor. Cosmetic damage is sprinkled on walls and
/// room floors but never on the ring.
#[derive(Debug, Clone)]
pub struct RoomsGenerator {
    pub min_rooms: u32,
    pub max_rooms: u32,
    pub min_room_size: i32,
    pub max_room_size: i32,
    /// Probability that an eligible tile gets its damaged variant.
    pub damage_chance: f64,
}

impl Default for RoomsGenerator {
    fn default() -> Self {
        Self {
            min_rooms: 2,
            max_rooms: 4,
            min_room_size: 3,
            max_room_size: 6,
            damage_chance: 0.08,
        }
    }
}

/// Inner-most index of the corridor ring on the far side.
const RING_FAR: i32 = CHUNK_SIZE - 2;
/// Rooms live strictly inside the ring.
const ROOM_MIN: i32 = 2;
const ROOM_MAX: i32 = CHUNK_SIZE - 3;

fn on_ring(x: i32, y: i32) -> bool {
    let inside = (1..=RING_FAR).contains(&x) && (1..=RING_FAR).contains(&y);
    inside && (x == 1 || y == 1 || x == RING_FAR || y == RING_FAR)
}

fn carve(chunk: &mut Chunk, x: i32, y: i32) {
    chunk.set_tile(x as u8, y as u8, Tile::Floor);
}

impl RoomsGenerator {
    fn carve_room(&self, chunk: &mut Chunk, rng: &mut WorldRng) {
        let max_size = self.max_room_size.clamp(1, ROOM_MAX - ROOM_MIN + 1);
        let min_size = self.min_room_size.clamp(1, max_size);
        let w = rng.gen_range(min_size..=max_size);
        let h = rng.gen_range(min_size..=max_size);
        let x0 = rng.gen_range(ROOM_MIN..=ROOM_MAX + 1 - w);
        let y0 = rng.gen_range(ROOM_MIN..=ROOM_MAX + 1 - h);

        for y in y0..y0 + h {
            for x in x0..x0 + w {
                carve(chunk, x, y);
            }
        }

        // Straight corridor from the room centre out to the ring.
        let (cx, cy) = (x0 + w / 2, y0 + h / 2);
        match rng.gen_range(0..4) {
            0 => (1..cx).for_each(|x| carve(chunk, x, cy)),
            1 => (cx..=RING_FAR).for_each(|x| carve(chunk, x, cy)),
            2 => (1..cy).for_each(|y| carve(chunk, cx, y)),
            _ => (cy..=RING_FAR).for_each(|y| carve(chunk, cx, y)),
        }
    }

    fn damage(&self, chunk: &mut Chunk, rng: &mut WorldRng) {
        if self.damage_chance <= 0.0 {
            return;
        }
        let chance = self.damage_chance.min(1.0);
        for y in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                if on_ring(x, y) {
                    continue;
                }
                let damaged = match chunk.get_tile(x as u8, y as u8) {
                    Some(Tile::Wall) => Tile::DamagedWall,
                    Some(Tile::Floor) => Tile::DamagedFloor,
                    _ => continue,
                };
                if rng.gen_bool(chance) {
                    chunk.set_tile(x as u8, y as u8, damaged);
                }
            }
        }
    }
}

impl ChunkGenerator for RoomsGenerator {
    fn fill(&self, chunk: &mut Chunk, rng: &mut WorldRng) {
        UniformGenerator { tile: Tile::Wall }.fill(chunk, rng);

        for i in 1..=RING_FAR {
            carve(chunk, i, 1);
            carve(chunk, i, RING_FAR);
            carve(chunk, 1, i);
            carve(chunk, RING_FAR, i);
        }

        let rooms = if self.max_rooms > self.min_rooms {
            rng.gen_range(self.min_rooms..=self.max_rooms)
        } else {
            self.min_rooms
        };
        for _ in 0..rooms {
            self.carve_room(chunk, rng);
        }

        self.damage(chunk, rng);
    }
}
