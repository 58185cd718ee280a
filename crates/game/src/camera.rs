//! Camera following a tracked entity.
//!
//! The camera never holds a reference into entity state. It keeps the id of
//! what it follows and reads that position through a `TargetProvider` each
//! tick.

use tileworld_engine::world::position::{ChunkPos, Vec2, world_to_chunk};

use crate::entity::EntityId;

/// Fraction of the way from the target toward the crosshair the camera aims.
pub const LOOKAHEAD: f32 = 0.3;

/// Read access to the current position of a trackable entity.
pub trait TargetProvider {
    fn target_position(&self, id: EntityId) -> Option<Vec2>;
}

#[derive(Debug, Clone)]
pub struct Camera {
    /// Where the camera wants to be.
    pub position: Vec2,
    /// Where it is drawn from; eases toward `position`.
    virtual_position: Vec2,
    pub smoothing: f32,
    viewport: Vec2,
    target: Option<EntityId>,
}

impl Camera {
    pub fn new(viewport: Vec2, smoothing: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            virtual_position: Vec2::ZERO,
            smoothing,
            viewport,
            target: None,
        }
    }

    pub fn follow(&mut self, id: EntityId) {
        self.target = Some(id);
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Re-aim at the tracked entity, pulled toward `crosshair` if given.
    /// Returns false and leaves the aim alone when the target is gone.
    pub fn update_focus(&mut self, provider: &dyn TargetProvider, crosshair: Option<Vec2>) -> bool {
        let Some(target) = self.target.and_then(|id| provider.target_position(id)) else {
            return false;
        };
        self.position = match crosshair {
            Some(c) => target.lerp(c, LOOKAHEAD),
            None => target,
        };
        true
    }

    pub fn tick(&mut self, dt: f32) {
        let t = (dt * self.smoothing).clamp(0.0, 1.0);
        self.virtual_position = self.virtual_position.lerp(self.position, t);
    }

    /// Jump straight to the aim point.
    pub fn snap(&mut self) {
        self.virtual_position = self.position;
    }

    pub fn virtual_position(&self) -> Vec2 {
        self.virtual_position
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, size: Vec2) {
        self.viewport = size;
    }

    /// Screen pixels (origin top-left) to world units.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen - self.viewport * 0.5 + self.virtual_position
    }

    /// Normalized viewport coordinates (0..1 each axis) to world units.
    pub fn viewport_to_world(&self, normalized: Vec2) -> Vec2 {
        self.screen_to_world(Vec2::new(
            normalized.x * self.viewport.x,
            normalized.y * self.viewport.y,
        ))
    }

    /// Chunks under the top-left and bottom-right viewport corners.
    pub fn visible_chunks(&self) -> (ChunkPos, ChunkPos) {
        (
            world_to_chunk(self.viewport_to_world(Vec2::ZERO)),
            world_to_chunk(self.viewport_to_world(Vec2::ONE)),
        )
    }
}
