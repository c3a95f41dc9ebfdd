//! Loaded chunk state.

use engine_core::{ChunkCoord, Entity, Transform, Visual, VisualKey};
use procgen::{TerrainPatch, Tree};

/// A chunk in the active window.
///
/// Owns its terrain and trees outright. Creatures and the power-up live in
/// the entity registry; the chunk only remembers their handles so they can
/// be swept out when the chunk is evicted.
#[derive(Debug)]
pub struct LoadedChunk {
    pub coord: ChunkCoord,
    pub terrain: TerrainPatch,
    pub trees: Vec<Tree>,
    pub creatures: Vec<Entity>,
    pub power_up: Option<Entity>,
}

impl LoadedChunk {
    /// Every entity handle this chunk spawned.
    pub fn spawned_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.creatures.iter().copied().chain(self.power_up)
    }

    /// Visuals for the chunk's static content (ground and trees).
    pub fn static_visuals(&self) -> Vec<Visual> {
        let mut visuals = Vec::with_capacity(1 + self.trees.len());
        visuals.push(Visual {
            key: VisualKey::Terrain(self.coord),
            model: TerrainPatch::MODEL,
            transform: Transform::from_position(self.terrain.origin),
            tint: Some(self.terrain.tint),
        });
        for (index, tree) in self.trees.iter().enumerate() {
            visuals.push(Visual {
                key: VisualKey::Tree(self.coord, index as u16),
                model: tree.kind.model(),
                transform: Transform::from_position_yaw(tree.position, tree.yaw)
                    .with_uniform_scale(tree.scale),
                tint: None,
            });
        }
        visuals
    }

    /// Keys of the chunk's static content.
    pub fn static_keys(&self) -> impl Iterator<Item = VisualKey> + '_ {
        std::iter::once(VisualKey::Terrain(self.coord))
            .chain((0..self.trees.len()).map(move |i| VisualKey::Tree(self.coord, i as u16)))
    }
}
