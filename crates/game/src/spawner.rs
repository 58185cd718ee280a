use rand::Rng;
use tileworld_engine::physics::Body;
use tileworld_engine::world::WorldMap;
use tileworld_engine::world::chunk::Chunk;
use tileworld_engine::world::position::{CHUNK_AREA, CHUNK_SIZE, ChunkPos, TILE_SIZE, TilePos, Vec2, tile_to_world};
use tileworld_engine::world::tile::Tile;

use crate::entity::{Entities, EntityKind};

/// Random picks per spot before giving up on a chunk with no floor.
pub const MAX_SPAWN_ATTEMPTS: u32 = CHUNK_AREA as u32;

/// World-space centre of a random FLOOR tile in `chunk`, or `None` if none
/// turned up within `MAX_SPAWN_ATTEMPTS` picks.
pub fn safe_spot<R: Rng>(chunk: &Chunk, rng: &mut R) -> Option<Vec2> {
    let half = TILE_SIZE as f32 / 2.0;
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let x = rng.gen_range(0..CHUNK_SIZE as u8);
        let y = rng.gen_range(0..CHUNK_SIZE as u8);
        if chunk.get_tile(x, y) == Some(Tile::Floor) {
            let local = TilePos::new(x as i32, y as i32);
            return Some(tile_to_world(local, Some(chunk.pos())) + Vec2::new(half, half));
        }
    }
    None
}

/// What to put in a freshly created chunk.
#[derive(Debug, Clone, Copy)]
pub struct SpawnRules {
    pub enemies: u32,
    pub half_extent: f32,
    pub drag: f32,
}

/// Spawn enemies into the chunk at `pos` and mark it populated. Does nothing
/// for a missing or already populated chunk. Returns how many spawned.
pub fn populate_chunk<R: Rng>(
    map: &mut WorldMap,
    pos: ChunkPos,
    entities: &mut Entities,
    rules: SpawnRules,
    rng: &mut R,
) -> usize {
    let Some(chunk) = map.get_chunk(pos) else {
        return 0;
    };
    if chunk.is_populated() {
        return 0;
    }

    let spots: Vec<Vec2> = (0..rules.enemies)
        .filter_map(|_| safe_spot(chunk, rng))
        .collect();
    if spots.len() < rules.enemies as usize {
        tracing::warn!(
            "Chunk ({}, {}) has too little floor: spawned {} of {} enemies",
            pos.x, pos.y, spots.len(), rules.enemies
        );
    }

    let half = Vec2::new(rules.half_extent, rules.half_extent);
    for spot in &spots {
        entities.spawn(EntityKind::Enemy, Body::new(*spot, half, rules.drag));
    }
    if let Some(chunk) = map.get_chunk_mut(pos) {
        chunk.mark_populated();
    }
    spots.len()
}
