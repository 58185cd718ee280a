use slotmap::{SlotMap, new_key_type};
use tileworld_engine::physics::Body;
use tileworld_engine::world::WorldMap;
use tileworld_engine::world::position::{Vec2, world_to_chunk};

use crate::camera::TargetProvider;

new_key_type! {
    /// Stable handle for a live entity.
    pub struct EntityId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub kind: EntityKind,
    pub body: Body,
}

/// Every live entity in the session.
pub struct Entities {
    entities: SlotMap<EntityId, Entity>,
}

impl Entities {
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
        }
    }

    pub fn spawn(&mut self, kind: EntityKind, body: Body) -> EntityId {
        self.entities.insert(Entity { kind, body })
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|e| e.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    /// One physics step for every body. Chunks holding an entity afterwards
    /// are marked dirty. Returns how many bodies hit something.
    pub fn physics(&mut self, dt: f32, map: &mut WorldMap) -> usize {
        let mut blocked = 0;
        for entity in self.entities.values_mut() {
            if entity.body.step(dt, &*map).any() {
                blocked += 1;
            }
            map.mark_dirty_at(entity.body.position);
        }
        blocked
    }

    /// Drop enemies standing in chunks that no longer exist.
    pub fn despawn_unmapped(&mut self, map: &WorldMap) -> usize {
        let before = self.entities.len();
        self.entities.retain(|_, e| {
            e.kind == EntityKind::Player || map.has_chunk(world_to_chunk(e.body.position))
        });
        before - self.entities.len()
    }
}

impl Default for Entities {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetProvider for Entities {
    fn target_position(&self, id: EntityId) -> Option<Vec2> {
        self.get(id).map(|e| e.body.position)
    }
}
