//! Common ECS components used across the game.

use glam::Vec3;

/// Velocity component for moving entities, in world units per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub linear: Vec3,
}

impl Velocity {
    pub fn new(linear: Vec3) -> Self {
        Self { linear }
    }

    /// Exponentially blend toward `target` by `factor` (0 = keep, 1 = snap).
    pub fn smooth_toward(&mut self, target: Vec3, factor: f32) {
        self.linear = self.linear.lerp(target, factor);
    }

    pub fn reset(&mut self) {
        self.linear = Vec3::ZERO;
    }
}

/// Per-entity animation parameters, consumed by the central animation pass.
///
/// Every animated thing (tree sway, floating pickups) samples
/// `amplitude * sin(clock * frequency + phase)` from the shared tick clock,
/// so no entity owns its own timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub phase: f32,
    /// Radians per second.
    pub frequency: f32,
    pub amplitude: f32,
}

impl Oscillator {
    pub fn new(phase: f32, frequency: f32, amplitude: f32) -> Self {
        Self {
            phase,
            frequency,
            amplitude,
        }
    }

    /// Sample the oscillation at `seconds` on the game clock.
    pub fn sample(&self, seconds: f32) -> f32 {
        self.amplitude * (seconds * self.frequency + self.phase).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_moves_a_tenth_of_the_way() {
        let mut v = Velocity::default();
        v.smooth_toward(Vec3::new(1.0, 0.0, 0.0), 0.1);
        assert!((v.linear.x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn oscillator_is_bounded_by_amplitude() {
        let osc = Oscillator::new(0.3, 2.0, 0.1);
        for i in 0..200 {
            assert!(osc.sample(i as f32 * 0.05).abs() <= 0.1 + 1e-6);
        }
    }
}
