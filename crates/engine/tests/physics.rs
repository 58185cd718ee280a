//! Substepped body integration against the tile grid.

use tileworld_engine::physics::{Body, CollisionQuery, SUBSTEPS};
use tileworld_engine::world::WorldMap;
use tileworld_engine::world::generation::UniformGenerator;
use tileworld_engine::world::position::{ChunkPos, TilePos, Vec2};
use tileworld_engine::world::rect::Rect;
use tileworld_engine::world::tile::Tile;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn floor_world() -> WorldMap {
    let mut map = WorldMap::with_generator(1, Box::new(UniformGenerator { tile: Tile::Floor }));
    map.create_chunk(ChunkPos::new(0, 0));
    map
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

struct Solid;

impl CollisionQuery for Solid {
    fn collides(&self, _rect: &Rect) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn unobstructed_motion_covers_full_step() {
    let map = floor_world();
    let mut body = Body::new(Vec2::new(320.0, 320.0), Vec2::new(8.0, 8.0), 0.5);
    body.velocity = Vec2::new(100.0, 0.0);

    let contact = body.step(0.05, &map);

    assert!(!contact.any());
    assert!(close(body.position.x, 320.0 + 100.0 * 0.5 * 0.05), "x = {}", body.position.x);
    assert!(close(body.position.y, 320.0));
    assert!(close(body.velocity.x, 50.0));
}

#[test]
fn drag_applies_once_per_step() {
    let map = floor_world();
    let mut body = Body::new(Vec2::new(320.0, 320.0), Vec2::new(8.0, 8.0), 0.5);
    body.velocity = Vec2::new(0.0, -80.0);
    body.step(0.01, &map);
    assert!(close(body.velocity.y, -40.0));
    body.step(0.01, &map);
    assert!(close(body.velocity.y, -20.0));
}

#[test]
fn wall_stops_body_at_its_face() {
    let mut map = floor_world();
    map.set_tile(TilePos::new(5, 0), Tile::Wall);

    let mut body = Body::new(Vec2::new(100.0, 16.0), Vec2::new(8.0, 8.0), 1.0);
    body.velocity = Vec2::new(2000.0, 0.0);

    let contact = body.step(0.05, &map);

    assert!(contact.x);
    assert_eq!(body.velocity.x, 0.0);
    assert!(body.rect().right <= 160.0, "leading edge at {}", body.rect().right);
    assert!(body.position.x > 100.0);
}

#[test]
fn body_slides_along_wall() {
    let mut map = floor_world();
    for y in 0..20 {
        map.set_tile(TilePos::new(5, y), Tile::Wall);
    }

    let mut body = Body::new(Vec2::new(140.0, 100.0), Vec2::new(8.0, 8.0), 1.0);
    body.velocity = Vec2::new(1000.0, 400.0);
    let contact = body.step(0.05, &map);

    assert!(contact.x && !contact.y);
    assert_eq!(body.velocity.x, 0.0);
    assert!(close(body.position.y, 120.0), "y = {}", body.position.y);
    assert!(body.rect().right <= 160.0);
}

#[test]
fn vertical_wall_blocks_only_y() {
    let mut map = floor_world();
    for x in 0..20 {
        map.set_tile(TilePos::new(x, 10), Tile::DamagedWall);
    }
    let mut body = Body::new(Vec2::new(200.0, 280.0), Vec2::new(8.0, 8.0), 1.0);
    body.velocity = Vec2::new(100.0, 1000.0);
    let contact = body.step(0.05, &map);

    assert!(contact.y && !contact.x);
    assert_eq!(body.velocity.y, 0.0);
    assert!(body.rect().bottom <= 320.0);
    assert!(close(body.position.x, 205.0));
}

#[test]
fn everything_solid_pins_body() {
    let mut body = Body::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0), 1.0);
    body.velocity = Vec2::new(30.0, -30.0);
    let contact = body.step(1.0 / 60.0, &Solid);
    assert!(contact.x && contact.y);
    assert_eq!(body.position, Vec2::new(0.0, 0.0));
    assert_eq!(body.velocity, Vec2::ZERO);
}

#[test]
fn unmapped_space_is_passable() {
    let map = WorldMap::new(0);
    let mut body = Body::new(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0), 1.0);
    body.velocity = Vec2::new(0.0, 100.0);
    body.step(0.1, &map);
    assert!(close(body.position.y, 10.0));
}

#[test]
fn fast_body_can_tunnel_thin_wall() {
    let mut map = floor_world();
    for y in 0..20 {
        map.set_tile(TilePos::new(5, y), Tile::Wall);
    }
    // 64 units per slice: samples land either side of the 32-unit wall.
    let slice = 64.0;
    let mut body = Body::new(Vec2::new(150.0, 100.0), Vec2::new(2.0, 2.0), 1.0);
    body.velocity = Vec2::new(slice * SUBSTEPS as f32, 0.0);
    let contact = body.step(1.0, &map);
    assert!(!contact.x);
    assert!(close(body.position.x, 150.0 + slice * SUBSTEPS as f32));
}
