//! Trees scattered over each chunk.

use engine_core::{Oscillator, Vec3};
use noise::{NoiseFn, Perlin};

use crate::terrain::deterministic_noise_seed;

/// Tree species. Each maps to its own model and sways differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeKind {
    Pine,
    Oak,
    Birch,
}

impl TreeKind {
    pub fn model(&self) -> &'static str {
        match self {
            TreeKind::Pine => "tree/pine",
            TreeKind::Oak => "tree/oak",
            TreeKind::Birch => "tree/birch",
        }
    }

    /// Peak sway angle in radians. Slim trees bend more.
    pub fn sway_amplitude(&self) -> f32 {
        match self {
            TreeKind::Pine => 0.02,
            TreeKind::Oak => 0.03,
            TreeKind::Birch => 0.05,
        }
    }
}

/// One placed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub kind: TreeKind,
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
    /// Wind sway about the tree's local Z axis.
    pub sway: Oscillator,
}

/// Picks tree species from a noise field so species form groves.
pub struct GroveMap {
    noise: Perlin,
    frequency: f64,
}

impl GroveMap {
    pub fn new(world_seed: u64) -> Self {
        Self {
            noise: Perlin::new(deterministic_noise_seed(world_seed, 2)),
            frequency: 0.02,
        }
    }

    /// Species growing at a world position.
    pub fn kind_at(&self, position: Vec3) -> TreeKind {
        let n = self
            .noise
            .get([position.x as f64 * self.frequency, position.z as f64 * self.frequency]);
        if n < -0.15 {
            TreeKind::Pine
        } else if n < 0.2 {
            TreeKind::Oak
        } else {
            TreeKind::Birch
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grove_map_is_deterministic() {
        let a = GroveMap::new(42);
        let b = GroveMap::new(42);
        for i in 0..50 {
            let p = Vec3::new(i as f32 * 13.7, 0.0, i as f32 * -7.3);
            assert_eq!(a.kind_at(p), b.kind_at(p));
        }
    }

    #[test]
    fn grove_map_produces_every_species() {
        let groves = GroveMap::new(3);
        let mut seen = std::collections::HashSet::new();
        for x in 0..60 {
            for z in 0..60 {
                seen.insert(groves.kind_at(Vec3::new(x as f32 * 9.0, 0.0, z as f32 * 9.0)));
            }
        }
        assert_eq!(seen.len(), 3);
    }
}
