//! Top-down game loop on an endless tile world.
//!
//! Chunks are created around the camera as the player moves, enemies are
//! spawned into each new chunk once, and all bodies advance at a fixed
//! physics rate independent of the frame rate.

pub mod camera;
pub mod clock;
pub mod config;
pub mod entity;
pub mod input;
pub mod session;
pub mod spawner;
