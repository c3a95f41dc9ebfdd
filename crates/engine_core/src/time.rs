//! Time management for the game loop.
//!
//! Gameplay advances in fixed ticks (60 Hz by default). Every per-tick
//! constant in the game (move speed, gravity, the superhuman countdown) is
//! expressed in ticks, so the wall clock only decides *how many* ticks a
//! frame runs, never how far a single tick moves things.

use std::time::{Duration, Instant};

/// Upper bound on ticks drained in one frame. A long stall (window drag,
/// debugger) drops the excess instead of fast-forwarding the world.
const MAX_TICKS_PER_FRAME: u32 = 8;

/// Manages frame timing and the fixed-tick accumulator.
#[derive(Debug)]
pub struct Time {
    /// Time of the last frame.
    last_frame: Instant,
    /// Fixed timestep for gameplay ticks.
    fixed_timestep: Duration,
    /// Accumulated time not yet consumed by ticks.
    accumulator: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager ticking at 60 Hz.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
            accumulator: Duration::ZERO,
        }
    }

    /// Update timing at the start of a new frame from the wall clock.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta);
    }

    /// Feed an explicit frame duration (used by `update` and by tests).
    pub fn advance(&mut self, delta: Duration) {
        self.accumulator += delta;

        let cap = self.fixed_timestep * MAX_TICKS_PER_FRAME;
        if self.accumulator > cap {
            log::debug!(
                "Frame took {:.1} ms, dropping {:.1} ms of simulation",
                delta.as_secs_f64() * 1000.0,
                (self.accumulator - cap).as_secs_f64() * 1000.0
            );
            self.accumulator = cap;
        }
    }

    /// Check if a fixed tick should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }

    /// Set the fixed timestep rate in Hz.
    pub fn set_fixed_rate(&mut self, hz: f64) {
        self.fixed_timestep = Duration::from_secs_f64(1.0 / hz);
    }
}
