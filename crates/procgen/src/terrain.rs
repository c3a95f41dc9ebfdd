//! Ground patches.
//!
//! The ground is flat; what varies between chunks is the grass shade, taken
//! from a low-frequency fractal noise field so neighbouring chunks blend into
//! meadows instead of a checkerboard. Noise is seeded from the world seed, so
//! the same coordinate always gets the same shade regardless of load order.

use engine_core::{ChunkCoord, Vec3};
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// Base grass color, multiplied by the per-chunk shade.
const GRASS: [f32; 3] = [0.34, 0.58, 0.24];
/// Shade spread around 1.0 (0.15 = ±15%).
const SHADE_SPREAD: f32 = 0.15;

/// Derive a deterministic u32 noise seed from a world seed and an offset.
#[inline]
pub(crate) fn deterministic_noise_seed(seed: u64, offset: u64) -> u32 {
    ((seed.wrapping_add(offset))
        .wrapping_mul(0x9e3779b97f4a7c15_u64)
        .wrapping_add(offset.wrapping_mul(0x6c078965_u64))
        >> 32) as u32
}

/// The ground tile of one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainPatch {
    pub coord: ChunkCoord,
    /// Minimum corner in world space.
    pub origin: Vec3,
    pub size: f32,
    pub tint: [f32; 3],
}

impl TerrainPatch {
    pub const MODEL: &'static str = "terrain/grass";

    /// World-space center of the patch (at ground height).
    pub fn center(&self) -> Vec3 {
        self.origin + Vec3::new(self.size * 0.5, 0.0, self.size * 0.5)
    }

    /// Whether a world position lies over this patch.
    pub fn contains(&self, position: Vec3) -> bool {
        position.x >= self.origin.x
            && position.x < self.origin.x + self.size
            && position.z >= self.origin.z
            && position.z < self.origin.z + self.size
    }
}

/// Samples ground shade across the world.
pub struct GroundShader {
    noise: Fbm<Perlin>,
    frequency: f64,
}

impl GroundShader {
    pub fn new(world_seed: u64) -> Self {
        let noise = Fbm::<Perlin>::new(deterministic_noise_seed(world_seed, 1)).set_octaves(3);
        Self {
            noise,
            frequency: 0.004,
        }
    }

    /// Build the patch for `coord`.
    pub fn patch(&self, coord: ChunkCoord, chunk_size: f32) -> TerrainPatch {
        let origin = coord.origin(chunk_size);
        let center = origin + Vec3::new(chunk_size * 0.5, 0.0, chunk_size * 0.5);
        let n = self
            .noise
            .get([center.x as f64 * self.frequency, center.z as f64 * self.frequency])
            as f32;
        let shade = 1.0 + n.clamp(-1.0, 1.0) * SHADE_SPREAD;

        TerrainPatch {
            coord,
            origin,
            size: chunk_size,
            tint: [GRASS[0] * shade, GRASS[1] * shade, GRASS[2] * shade],
        }
    }
}
