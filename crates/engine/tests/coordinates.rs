//! Coordinate conversions, tile codes and rect bounds. No chunks involved.

use tileworld_engine::world::position::{
    CHUNK_AREA, CHUNK_SIZE, CHUNK_WORLD_SIZE, ChunkPos, LocalTilePos, TILE_SIZE, TilePos, Vec2,
    tile_to_chunk, tile_to_world, world_to_chunk, world_to_tile,
};
use tileworld_engine::world::rect::Rect;
use tileworld_engine::world::tile::Tile;

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

#[test]
fn constants_are_shared_values() {
    assert_eq!(TILE_SIZE, 32);
    assert_eq!(CHUNK_SIZE, 20);
    assert_eq!(CHUNK_AREA, 400);
    assert_eq!(CHUNK_WORLD_SIZE, 640);
}

#[test]
fn world_to_tile_floors_toward_negative_infinity() {
    assert_eq!(world_to_tile(Vec2::new(0.0, 0.0)), TilePos::new(0, 0));
    assert_eq!(world_to_tile(Vec2::new(31.9, 32.0)), TilePos::new(0, 1));
    assert_eq!(world_to_tile(Vec2::new(-0.1, -32.0)), TilePos::new(-1, -1));
    assert_eq!(world_to_tile(Vec2::new(-32.1, 65.0)), TilePos::new(-2, 2));
}

#[test]
fn tile_to_chunk_handles_negative_tiles() {
    assert_eq!(tile_to_chunk(TilePos::new(0, 19)), ChunkPos::new(0, 0));
    assert_eq!(tile_to_chunk(TilePos::new(20, -1)), ChunkPos::new(1, -1));
    assert_eq!(tile_to_chunk(TilePos::new(-20, -21)), ChunkPos::new(-1, -2));
}

#[test]
fn world_to_chunk_matches_direct_division() {
    let chunk_world = (TILE_SIZE * CHUNK_SIZE) as f32;
    let mut x = -2000.0f32;
    while x <= 2000.0 {
        let mut y = -1500.0f32;
        while y <= 1500.0 {
            let p = Vec2::new(x, y);
            let expected = ChunkPos::new(
                (x / chunk_world).floor() as i32,
                (y / chunk_world).floor() as i32,
            );
            assert_eq!(world_to_chunk(p), expected, "at {:?}", p);
            y += 37.5;
        }
        x += 41.25;
    }
}

#[test]
fn tile_to_world_with_and_without_chunk() {
    assert_eq!(tile_to_world(TilePos::new(3, -2), None), Vec2::new(96.0, -64.0));
    // Local (3, 4) inside chunk (1, -1) is absolute tile (23, -16).
    assert_eq!(
        tile_to_world(TilePos::new(3, 4), Some(ChunkPos::new(1, -1))),
        Vec2::new(23.0 * 32.0, -16.0 * 32.0)
    );
}

#[test]
fn local_positions_round_trip_through_chunk_origin() {
    for &(x, y) in &[(0, 0), (19, 19), (-1, -1), (-20, 45), (123, -77)] {
        let tile = TilePos::new(x, y);
        let local = tile.local();
        assert!((local.x as i32) < CHUNK_SIZE && (local.y as i32) < CHUNK_SIZE);
        assert_eq!(local.in_chunk(tile.chunk()), tile);
    }
    assert_eq!(TilePos::new(-1, -1).local(), LocalTilePos::new(19, 19));
}

#[test]
fn vec2_helpers() {
    let v = Vec2::new(3.0, 4.0);
    assert_eq!(v.length(), 5.0);
    assert_eq!(v.normalized(), Vec2::new(0.6, 0.8));
    assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    assert_eq!(Vec2::ZERO.lerp(Vec2::new(10.0, -10.0), 0.5), Vec2::new(5.0, -5.0));
}

// ---------------------------------------------------------------------------
// Tiles and rects
// ---------------------------------------------------------------------------

#[test]
fn tile_codes_and_solidity() {
    let expected = [
        (Tile::Void, 0, false),
        (Tile::Floor, 1, false),
        (Tile::Wall, 2, true),
        (Tile::DamagedFloor, 3, false),
        (Tile::DamagedWall, 4, true),
    ];
    for (tile, code, solid) in expected {
        assert_eq!(tile.code(), code);
        assert_eq!(Tile::from_code(code), Some(tile));
        assert_eq!(tile.is_solid(), solid, "{:?}", tile);
    }
    assert_eq!(Tile::from_code(5), None);
    assert!(!Tile::Void.is_walkable());
    assert!(Tile::DamagedFloor.is_walkable());
}

#[test]
fn rect_bounds_include_tile_on_grid_line() {
    let rect = Rect::new(64.0, 64.0, 128.0, 100.0);
    let (min, max) = rect.tile_bounds();
    assert_eq!(min, TilePos::new(2, 2));
    // Right edge sits exactly on x = 128, the start of tile 4.
    assert_eq!(max, TilePos::new(4, 3));
}

#[test]
fn rect_from_center() {
    let rect = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(8.0, 4.0));
    assert_eq!(rect, Rect::new(92.0, 46.0, 108.0, 54.0));
    assert_eq!(rect.width(), 16.0);
    assert_eq!(rect.height(), 8.0);
}
