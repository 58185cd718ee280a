//! Frame timing with a fixed-rate physics cadence.
//!
//! Every frame adds its elapsed time to an accumulator. When the accumulator
//! exceeds the physics interval, one physics step is due and one interval is
//! consumed. Only one step runs per frame, so after a long stall the backlog
//! drains over several frames and the game visibly slows down.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Run one physics step this frame.
    pub physics: bool,
}

#[derive(Debug, Clone)]
pub struct FixedClock {
    interval: f32,
    accumulator: f32,
    last: Option<Duration>,
    blurred: bool,
}

impl FixedClock {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
            last: None,
            blurred: false,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Unconsumed game time in seconds.
    pub fn backlog(&self) -> f32 {
        self.accumulator
    }

    pub fn is_blurred(&self) -> bool {
        self.blurred
    }

    /// Account for a frame at `now` (any monotonic origin). Returns `None`
    /// while blurred; no frames are scheduled then.
    pub fn frame(&mut self, now: Duration) -> Option<FrameTiming> {
        if self.blurred {
            return None;
        }
        let last = *self.last.get_or_insert(now);
        let dt = now.saturating_sub(last).as_secs_f32();
        self.last = Some(now);

        self.accumulator += dt;
        let physics = self.accumulator > self.interval;
        if physics {
            self.accumulator -= self.interval;
        }
        Some(FrameTiming { dt, physics })
    }

    /// Focus lost: stop producing frames.
    pub fn blur(&mut self) {
        self.blurred = true;
    }

    /// Focus regained. The next frame starts a fresh baseline so the time
    /// spent unfocused is not counted.
    pub fn focus(&mut self) {
        self.blurred = false;
        self.last = None;
    }
}
