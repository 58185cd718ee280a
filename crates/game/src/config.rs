//! Session configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change. Values are loaded from JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use tileworld_engine::world::position::CHUNK_WORLD_SIZE;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seeds chunk layouts, door placement, spawns and the autopilot.
    pub seed: u64,
    /// Seconds of game time per physics step.
    pub physics_interval: f32,
    /// Frame pacing for the headless loop.
    pub frame_interval_ms: u64,
    /// Stop after this many frames. 0 runs until Ctrl+C.
    pub frames: u64,
    /// Velocity multiplier applied once per physics step.
    pub drag: f32,
    /// World units per second while a movement key is held.
    pub player_speed: f32,
    pub player_half_extent: f32,
    pub enemy_half_extent: f32,
    pub enemies_per_chunk: u32,
    /// Camera catch-up rate per second.
    pub camera_smoothing: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Evict chunks further than this many chunks from the player.
    /// `None` keeps every chunk for the whole session. Must be at least
    /// `min_retain_radius()` for the configured viewport.
    pub retain_radius: Option<i32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            physics_interval: 1.0 / 60.0,
            frame_interval_ms: 16,
            frames: 0,
            drag: 0.5,
            player_speed: 400.0,
            player_half_extent: 10.0,
            enemy_half_extent: 10.0,
            enemies_per_chunk: 3,
            camera_smoothing: 10.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            retain_radius: None,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.physics_interval > 0.0,
            "physics_interval must be positive, got {}",
            self.physics_interval
        );
        ensure!(
            self.viewport_width > 0.0 && self.viewport_height > 0.0,
            "viewport must have a positive size"
        );
        ensure!(
            self.player_half_extent > 0.0 && self.enemy_half_extent > 0.0,
            "half extents must be positive"
        );
        if let Some(radius) = self.retain_radius {
            let needed = self.min_retain_radius();
            ensure!(
                radius >= needed,
                "retain_radius {} would evict chunks around the view, need at least {}",
                radius,
                needed
            );
        }
        Ok(())
    }

    /// Smallest `retain_radius` that keeps the whole chunk window around a
    /// view of this size: one spare column each side, two spare rows above.
    pub fn min_retain_radius(&self) -> i32 {
        let chunk = CHUNK_WORLD_SIZE as f32;
        let across = (self.viewport_width / 2.0 / chunk).ceil() as i32 + 1;
        let down = (self.viewport_height / 2.0 / chunk).ceil() as i32 + 2;
        across.max(down)
    }
}
