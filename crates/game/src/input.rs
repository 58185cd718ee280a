//! Per-frame player intent.
//!
//! Device mapping lives outside this crate; the loop only sees a movement
//! direction and a pointer position. `Autopilot` fabricates both for
//! headless runs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tileworld_engine::world::position::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Desired movement direction; zero means no key held.
    pub movement: Vec2,
    /// Pointer in screen pixels, origin top-left.
    pub pointer: Vec2,
}

/// Wanders in random 8-way headings, holding each for a random stretch of
/// frames and aiming the pointer ahead of the heading.
pub struct Autopilot {
    rng: ChaCha8Rng,
    viewport: Vec2,
    heading: Vec2,
    frames_left: u32,
}

impl Autopilot {
    pub fn new(seed: u64, viewport: Vec2) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed ^ 0xA076_1D64_78BD_642F),
            viewport,
            heading: Vec2::ZERO,
            frames_left: 0,
        }
    }

    pub fn next_input(&mut self) -> FrameInput {
        if self.frames_left == 0 {
            self.frames_left = self.rng.gen_range(30..120);
            self.heading = if self.rng.gen_bool(0.15) {
                Vec2::ZERO
            } else {
                let x = self.rng.gen_range(-1..=1) as f32;
                let y = self.rng.gen_range(-1..=1) as f32;
                Vec2::new(x, y).normalized()
            };
        }
        self.frames_left -= 1;

        let center = self.viewport * 0.5;
        FrameInput {
            movement: self.heading,
            pointer: center + self.heading * (self.viewport.y * 0.3),
        }
    }
}
