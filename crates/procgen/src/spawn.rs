//! Spawn descriptions produced by the chunk generator.
//!
//! These are plain data: turning them into live entities is the caller's job.

use engine_core::{Oscillator, Vec3};

/// Height power-ups hover at.
pub const POWER_UP_HOVER_HEIGHT: f32 = 1.0;

/// The closed set of power-up kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// A baguette and a bottle of wine. Grants superhuman mode.
    BaguetteAndWine,
}

impl PowerUpKind {
    pub fn model(&self) -> &'static str {
        match self {
            PowerUpKind::BaguetteAndWine => "powerup/baguette_and_wine",
        }
    }

    /// Model of the pulsing marker hovering above the pickup.
    pub fn beacon_model(&self) -> &'static str {
        "powerup/beacon_arrow"
    }

    /// Vertical bob: 0.1 units at 2 rad/s.
    pub fn bob(&self, phase: f32) -> Oscillator {
        Oscillator::new(phase, 2.0, 0.1)
    }

    /// Beacon scale pulse: ±20% at 5 rad/s.
    pub fn pulse(&self, phase: f32) -> Oscillator {
        Oscillator::new(phase, 5.0, 0.2)
    }
}

/// Where a creature starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureSpawn {
    pub position: Vec3,
    pub heading: f32,
}

/// Where a power-up appears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpSpawn {
    pub kind: PowerUpKind,
    /// Rest position; the bob oscillates around it.
    pub position: Vec3,
    pub yaw: f32,
    pub phase: f32,
}
