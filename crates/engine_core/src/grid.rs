//! Chunk grid addressing.

use glam::Vec3;

/// Integer address of a square world chunk.
///
/// Chunk `(cx, cz)` covers `[cx * size, (cx + 1) * size)` on X and the same
/// on Z, so world positions map to chunks by flooring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the world-space point `(x, z)`.
    pub fn from_world(x: f32, z: f32, chunk_size: f32) -> Self {
        Self {
            x: (x / chunk_size).floor() as i32,
            z: (z / chunk_size).floor() as i32,
        }
    }

    /// Per-axis (Chebyshev) distance in chunks.
    pub fn chebyshev(&self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// World-space minimum corner of this chunk (at ground height).
    pub fn origin(&self, chunk_size: f32) -> Vec3 {
        Vec3::new(self.x as f32 * chunk_size, 0.0, self.z as f32 * chunk_size)
    }

    /// Every coordinate within `radius` chunks of `self`, row by row.
    pub fn window(&self, radius: i32) -> impl Iterator<Item = ChunkCoord> {
        let center = *self;
        (-radius..=radius).flat_map(move |dz| {
            (-radius..=radius).map(move |dx| ChunkCoord::new(center.x + dx, center.z + dz))
        })
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}
