//! Grid DDA line-of-sight queries.

use super::WorldMap;
use super::position::{TILE_SIZE, Vec2, world_to_tile};

/// Offset of the two extra samples taken toward -x and -y at every step.
///
/// A step always lands exactly on a grid line, where `floor` picks the tile
/// on the positive side. The offset samples catch the tile on the other side.
pub const RAYCAST_EDGE_EPSILON: f32 = 2.0;

/// Hard cap on grid steps for a single ray.
pub const MAX_RAYCAST_STEPS: u32 = 10_000;

/// Per-axis DDA state.
struct Axis {
    /// Ray parameter at which the next grid line on this axis is crossed.
    t_max: f32,
    /// Ray parameter between consecutive grid lines on this axis.
    t_delta: f32,
}

impl Axis {
    fn new(origin: f32, dir: f32) -> Self {
        if dir == 0.0 {
            return Self {
                t_max: f32::INFINITY,
                t_delta: f32::INFINITY,
            };
        }
        let size = TILE_SIZE as f32;
        let cell = (origin / size).floor();
        let boundary = if dir > 0.0 { (cell + 1.0) * size } else { cell * size };
        Self {
            t_max: (boundary - origin) / dir,
            t_delta: size / dir.abs(),
        }
    }
}

impl WorldMap {
    fn solid_at(&self, p: Vec2) -> bool {
        self.get_tile(world_to_tile(p)).is_some_and(|t| t.is_solid())
    }

    /// Walk the grid from `start` toward `end` and collect the points where
    /// the ray crosses into solid tiles, nearest first.
    ///
    /// Stops at `end`, after `max_points` hits, or after `MAX_RAYCAST_STEPS`
    /// grid steps. A zero-length ray returns no hits.
    pub fn raycast(&self, start: Vec2, end: Vec2, max_points: usize) -> Vec<Vec2> {
        let mut hits = Vec::new();
        let delta = end - start;
        let length = delta.length();
        if length == 0.0 || !length.is_finite() || max_points == 0 {
            return hits;
        }
        let dir = delta / length;

        let mut x = Axis::new(start.x, dir.x);
        let mut y = Axis::new(start.y, dir.y);
        let offset_x = Vec2::new(-RAYCAST_EDGE_EPSILON, 0.0);
        let offset_y = Vec2::new(0.0, -RAYCAST_EDGE_EPSILON);

        for _ in 0..MAX_RAYCAST_STEPS {
            let t = if x.t_max < y.t_max {
                let t = x.t_max;
                x.t_max += x.t_delta;
                t
            } else {
                let t = y.t_max;
                y.t_max += y.t_delta;
                t
            };
            if t >= length {
                return hits;
            }

            let point = start + dir * t;
            if self.solid_at(point) || self.solid_at(point + offset_x) || self.solid_at(point + offset_y)
            {
                hits.push(point);
                if hits.len() >= max_points {
                    return hits;
                }
            }
        }

        tracing::warn!(
            "Raycast from ({}, {}) to ({}, {}) hit the {} step cap",
            start.x, start.y, end.x, end.y, MAX_RAYCAST_STEPS
        );
        hits
    }
}
