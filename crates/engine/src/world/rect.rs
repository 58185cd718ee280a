use super::position::{TILE_SIZE, TilePos, Vec2};

/// Axis-aligned box in world units. `top < bottom` (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_center(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            left: center.x - half_extent.x,
            top: center.y - half_extent.y,
            right: center.x + half_extent.x,
            bottom: center.y + half_extent.y,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Inclusive tile range touched by this box, as `(min, max)`.
    ///
    /// Each edge maps through `floor(edge / TILE_SIZE)`, so an edge lying
    /// exactly on a grid line counts the tile that starts there.
    pub fn tile_bounds(&self) -> (TilePos, TilePos) {
        let size = TILE_SIZE as f32;
        let min = TilePos::new(
            (self.left / size).floor() as i32,
            (self.top / size).floor() as i32,
        );
        let max = TilePos::new(
            (self.right / size).floor() as i32,
            (self.bottom / size).floor() as i32,
        );
        (min, max)
    }
}
