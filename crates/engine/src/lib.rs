//! Infinite chunk-partitioned 2D tile world.
//!
//! `world` holds the coordinate space, chunks, generation and the `WorldMap`
//! query surface (collision boxes and grid raycasts). `physics` moves bodies
//! against it.

pub mod physics;
pub mod world;
