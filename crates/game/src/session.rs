//! One running game: the map, its entities, the camera and the per-frame
//! driving logic.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tileworld_engine::physics::Body;
use tileworld_engine::world::WorldMap;
use tileworld_engine::world::position::{CHUNK_WORLD_SIZE, ChunkPos, Vec2, world_to_chunk};
use tileworld_engine::world::retention::RetainWithinRadius;

use crate::camera::Camera;
use crate::clock::FrameTiming;
use crate::config::GameConfig;
use crate::entity::{EntityId, EntityKind, Entities};
use crate::input::FrameInput;
use crate::spawner::{SpawnRules, populate_chunk, safe_spot};

/// How far past the crosshair the laser is cast, as a multiple of the
/// player-to-crosshair offset.
pub const LASER_REACH: f32 = 100.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    pub physics_steps: u64,
    pub chunks_created: u64,
    pub enemies_spawned: u64,
    pub chunks_evicted: u64,
}

pub struct Session {
    config: GameConfig,
    map: WorldMap,
    entities: Entities,
    camera: Camera,
    player: EntityId,
    rng: ChaCha8Rng,
    crosshair: Vec2,
    laser_end: Vec2,
    laser_hit: bool,
    window: (ChunkPos, ChunkPos),
    stats: SessionStats,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let map = WorldMap::new(config.seed);
        Self::with_map(config, map)
    }

    /// Start a session on a prepared map. The starting chunk (0, 0) is
    /// created if missing and the player is placed on one of its floor tiles.
    /// Nothing else spawns there.
    pub fn with_map(config: GameConfig, mut map: WorldMap) -> Self {
        if let Some(radius) = config.retain_radius {
            map.set_retention(Box::new(RetainWithinRadius { radius }));
        }

        let origin = ChunkPos::new(0, 0);
        map.insert_chunk(origin);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let start = map
            .get_chunk_mut(origin)
            .and_then(|chunk| {
                chunk.mark_populated();
                safe_spot(chunk, &mut rng)
            })
            .unwrap_or_else(|| {
                tracing::warn!("No floor in the starting chunk, spawning player at its centre");
                Vec2::new(CHUNK_WORLD_SIZE as f32 / 2.0, CHUNK_WORLD_SIZE as f32 / 2.0)
            });

        let mut entities = Entities::new();
        let half = Vec2::new(config.player_half_extent, config.player_half_extent);
        let player = entities.spawn(EntityKind::Player, Body::new(start, half, config.drag));

        let viewport = Vec2::new(config.viewport_width, config.viewport_height);
        let mut camera = Camera::new(viewport, config.camera_smoothing);
        camera.follow(player);
        camera.update_focus(&entities, None);
        camera.snap();

        tracing::info!("Session started with seed {}, player at ({:.1}, {:.1})", config.seed, start.x, start.y);

        Self {
            config,
            map,
            entities,
            camera,
            player,
            rng,
            crosshair: start,
            laser_end: start,
            laser_hit: false,
            window: (origin, origin),
            stats: SessionStats::default(),
        }
    }

    /// Run one frame with timing from a `FixedClock`: physics if due, then
    /// the variable-rate tick, then camera smoothing.
    pub fn frame(&mut self, timing: FrameTiming, input: &FrameInput) {
        if timing.physics {
            self.physics(self.config.physics_interval);
        }
        self.tick(timing.dt, input);
        self.camera.tick(timing.dt);
        self.stats.frames += 1;
    }

    /// Variable-rate update: steer the player, aim, cast the laser and make
    /// sure every chunk around the view exists. Chunks in that window are
    /// never evicted, whatever the retention policy says.
    pub fn tick(&mut self, _dt: f32, input: &FrameInput) {
        let speed = self.config.player_speed;
        if let Some(player) = self.entities.get_mut(self.player) {
            player.body.velocity = input.movement.normalized() * speed;
        }

        self.crosshair = self.camera.screen_to_world(input.pointer);
        self.camera.update_focus(&self.entities, Some(self.crosshair));

        if let Some(origin) = self.player_position() {
            let target = origin + (self.crosshair - origin) * LASER_REACH;
            match self.map.raycast(origin, target, 1).first() {
                Some(hit) => {
                    self.laser_end = *hit;
                    self.laser_hit = true;
                }
                None => {
                    self.laser_end = target;
                    self.laser_hit = false;
                }
            }
        }

        self.fill_window();

        if let Some(origin) = self.player_position() {
            let (min, max) = self.fill_bounds();
            let in_window = |p: ChunkPos| (min.x..=max.x).contains(&p.x) && (min.y..=max.y).contains(&p.y);
            let evicted = self.map.enforce_retention_pinned(world_to_chunk(origin), in_window);
            if evicted > 0 {
                self.stats.chunks_evicted += evicted as u64;
                let dropped = self.entities.despawn_unmapped(&self.map);
                tracing::debug!("Evicted {} chunks and {} enemies", evicted, dropped);
            }
        }
    }

    /// Fixed-rate update.
    pub fn physics(&mut self, dt: f32) {
        self.map.clean_chunks();
        self.entities.physics(dt, &mut self.map);
        self.stats.physics_steps += 1;
    }

    /// Create every chunk from one column left of the view to one right of
    /// it, and from two rows above to one below, populating new ones.
    fn fill_window(&mut self) {
        let (top_left, bottom_right) = self.camera.visible_chunks();
        self.window = (top_left, bottom_right);
        let (min, max) = self.fill_bounds();
        let rules = SpawnRules {
            enemies: self.config.enemies_per_chunk,
            half_extent: self.config.enemy_half_extent,
            drag: self.config.drag,
        };

        for x in min.x..=max.x {
            for y in min.y..=max.y {
                let pos = ChunkPos::new(x, y);
                if self.map.create_chunk(pos) {
                    self.stats.chunks_created += 1;
                    let spawned = populate_chunk(&mut self.map, pos, &mut self.entities, rules, &mut self.rng);
                    self.stats.enemies_spawned += spawned as u64;
                }
            }
        }
    }

    /// Inclusive chunk range kept alive around the last visible window.
    fn fill_bounds(&self) -> (ChunkPos, ChunkPos) {
        let (top_left, bottom_right) = self.window;
        (
            ChunkPos::new(top_left.x - 1, top_left.y - 2),
            ChunkPos::new(bottom_right.x + 1, bottom_right.y + 1),
        )
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.entities.get(self.player).map(|e| e.body.position)
    }

    pub fn crosshair(&self) -> Vec2 {
        self.crosshair
    }

    /// Where the laser ends and whether it stopped on a solid tile.
    pub fn laser(&self) -> (Vec2, bool) {
        (self.laser_end, self.laser_hit)
    }

    /// Chunks under the view corners as of the last tick.
    pub fn visible_window(&self) -> (ChunkPos, ChunkPos) {
        self.window
    }

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut WorldMap {
        &mut self.map
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut Entities {
        &mut self.entities
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}
