//! Fixed-step movement of axis-aligned bodies against solid tiles.
//!
//! Each step applies drag once, then advances in `SUBSTEPS` equal slices.
//! Every slice moves x first and y second, testing the body's box after each
//! axis and reverting just that axis on contact. Resolving the axes
//! separately lets a body slide along a wall instead of sticking to corners.
//!
//! This is not a swept test: a body that covers more than a tile per slice
//! can pass through a one-tile wall.

use crate::world::WorldMap;
use crate::world::position::Vec2;
use crate::world::rect::Rect;

/// Slices per physics step.
pub const SUBSTEPS: u32 = 10;

/// Anything that can answer "does this box overlap something solid?".
pub trait CollisionQuery {
    fn collides(&self, rect: &Rect) -> bool;
}

impl CollisionQuery for WorldMap {
    fn collides(&self, rect: &Rect) -> bool {
        WorldMap::collides(self, rect)
    }
}

/// Which axes were blocked during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contact {
    pub x: bool,
    pub y: bool,
}

impl Contact {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// A dynamic body. `velocity` is in world units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub half_extent: Vec2,
    /// Velocity multiplier applied once per step.
    pub drag: f32,
}

impl Body {
    pub fn new(position: Vec2, half_extent: Vec2, drag: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            half_extent,
            drag,
        }
    }

    pub fn rect_at(&self, center: Vec2) -> Rect {
        Rect::from_center(center, self.half_extent)
    }

    pub fn rect(&self) -> Rect {
        self.rect_at(self.position)
    }

    /// Advance one physics step of `dt` seconds.
    pub fn step(&mut self, dt: f32, world: &impl CollisionQuery) -> Contact {
        self.velocity *= self.drag;
        let mut contact = Contact::default();

        for _ in 0..SUBSTEPS {
            let slice = self.velocity * (dt / SUBSTEPS as f32);
            let mut next = self.position;

            next.x += slice.x;
            if world.collides(&self.rect_at(Vec2::new(next.x, self.position.y))) {
                next.x = self.position.x;
                self.velocity.x = 0.0;
                contact.x = true;
            }

            next.y += slice.y;
            if world.collides(&self.rect_at(next)) {
                next.y = self.position.y;
                self.velocity.y = 0.0;
                contact.y = true;
            }

            self.position = next;
        }

        contact
    }
}
