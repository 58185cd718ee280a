//! Grid raycasts: hit placement, ordering and termination.

use tileworld_engine::world::WorldMap;
use tileworld_engine::world::generation::UniformGenerator;
use tileworld_engine::world::position::{ChunkPos, TilePos, Vec2};
use tileworld_engine::world::tile::Tile;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn floor_world(r: i32) -> WorldMap {
    let mut map = WorldMap::with_generator(1, Box::new(UniformGenerator { tile: Tile::Floor }));
    for cx in -r..=r {
        for cy in -r..=r {
            map.create_chunk(ChunkPos::new(cx, cy));
        }
    }
    map
}

fn assert_ordered(start: Vec2, hits: &[Vec2]) {
    for pair in hits.windows(2) {
        assert!(
            start.distance(pair[0]) <= start.distance(pair[1]),
            "hits out of order: {:?}",
            hits
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn single_hit_at_wall_face() {
    let mut map = floor_world(1);
    map.set_tile(TilePos::new(5, 0), Tile::Wall);

    let hits = map.raycast(Vec2::new(0.0, 0.0), Vec2::new(1000.0, 0.0), 1);
    assert_eq!(hits.len(), 1);
    assert!((hits[0].x - 160.0).abs() < 0.01, "hit at {:?}", hits[0]);
    assert!(hits[0].y.abs() < 0.01);
}

#[test]
fn ray_traveling_negative_x_hits_far_face() {
    let mut map = floor_world(1);
    map.set_tile(TilePos::new(5, 0), Tile::Wall);

    let hits = map.raycast(Vec2::new(1000.0, 16.0), Vec2::new(0.0, 16.0), 1);
    assert_eq!(hits.len(), 1);
    assert!((hits[0].x - 192.0).abs() < 0.01, "hit at {:?}", hits[0]);
}

#[test]
fn hits_are_nearest_first() {
    let mut map = floor_world(1);
    for x in [3, 6, 9] {
        map.set_tile(TilePos::new(x, 0), Tile::Wall);
    }
    let start = Vec2::new(0.0, 16.0);
    let hits = map.raycast(start, Vec2::new(600.0, 16.0), 10);
    assert!(hits.len() >= 3);
    assert!((hits[0].x - 96.0).abs() < 0.01);
    assert_ordered(start, &hits);
}

#[test]
fn max_points_limits_hits() {
    let mut map = floor_world(1);
    for x in 2..12 {
        map.set_tile(TilePos::new(x, 3), Tile::Wall);
    }
    let hits = map.raycast(Vec2::new(0.0, 100.0), Vec2::new(500.0, 100.0), 3);
    assert_eq!(hits.len(), 3);
}

#[test]
fn hits_stay_within_ray_length() {
    let mut map = floor_world(1);
    map.set_tile(TilePos::new(8, 0), Tile::Wall);
    // Ends before the wall at x = 256.
    let hits = map.raycast(Vec2::new(0.0, 16.0), Vec2::new(250.0, 16.0), 5);
    assert!(hits.is_empty());
}

#[test]
fn open_floor_and_zero_length_rays_are_empty() {
    let map = floor_world(1);
    assert!(map.raycast(Vec2::new(10.0, 10.0), Vec2::new(600.0, 400.0), 4).is_empty());
    assert!(map.raycast(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0), 4).is_empty());
    assert!(map.raycast(Vec2::new(10.0, 10.0), Vec2::new(600.0, 10.0), 0).is_empty());
}

#[test]
fn diagonal_rays_terminate_in_order() {
    let mut map = floor_world(2);
    for i in -30..30 {
        map.set_tile(TilePos::new(i, (i * 7).rem_euclid(11) - 5), Tile::Wall);
        map.set_tile(TilePos::new((i * 3).rem_euclid(13) - 6, i), Tile::DamagedWall);
    }
    let starts = [Vec2::new(5.0, 5.0), Vec2::new(-300.0, 120.0), Vec2::new(64.0, -64.0)];
    let ends = [Vec2::new(-900.0, 700.0), Vec2::new(900.0, -850.0), Vec2::new(64.0, 900.0)];
    for start in starts {
        for end in ends {
            let hits = map.raycast(start, end, 8);
            assert!(hits.len() <= 8);
            assert_ordered(start, &hits);
            let length = start.distance(end);
            assert!(hits.iter().all(|h| start.distance(*h) <= length + 0.01));
        }
    }
}

#[test]
fn very_long_ray_returns_at_step_cap() {
    let map = floor_world(0);
    let hits = map.raycast(Vec2::new(0.0, 16.0), Vec2::new(10_000_000.0, 16.0), 1);
    assert!(hits.is_empty());
}
