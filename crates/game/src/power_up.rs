//! Power-up component.

use engine_core::{Oscillator, Vec3};
use procgen::{PowerUpKind, PowerUpSpawn};

/// Height of the marker beacon above its power-up.
pub const BEACON_HEIGHT: f32 = 1.5;

/// A collectible lying in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Position the bob oscillates around.
    pub rest_position: Vec3,
    pub bob: Oscillator,
    pub pulse: Oscillator,
    collected: bool,
}

impl PowerUp {
    pub fn from_spawn(spawn: &PowerUpSpawn) -> Self {
        Self {
            kind: spawn.kind,
            rest_position: spawn.position,
            bob: spawn.kind.bob(spawn.phase),
            pulse: spawn.kind.pulse(spawn.phase),
            collected: false,
        }
    }

    /// Mark as collected. Returns `false` if it already was; the flag never resets.
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Whether `position` (the player) is within `radius` of `at` (this
    /// power-up's current position). A collected power-up never collides.
    pub fn check_collision(&self, at: Vec3, position: Vec3, radius: f32) -> bool {
        !self.collected && at.distance(position) < radius
    }
}
