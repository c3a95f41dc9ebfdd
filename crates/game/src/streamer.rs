//! World streaming.
//!
//! Keeps exactly the `(2R+1)²` square of chunks around the player's chunk
//! loaded. Leaving chunks take everything they spawned with them; entering
//! chunks are generated and their creatures and power-up registered.

use engine_core::{ChunkCoord, Entity, SceneGraph, Transform, Vec3, Visual, VisualKey};
use procgen::{ChunkGenerator, CreatureSpawn};

use crate::chunk::LoadedChunk;
use crate::creature::{Behavior, Creature};
use crate::power_up::BEACON_HEIGHT;
use crate::registry::EntityRegistry;
use crate::spatial_hash::ChunkIndex;

/// How newly loaded creatures are set up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRules {
    pub creature_speed: f32,
    /// Behavior matching the current game mode.
    pub behavior: Behavior,
    /// Minimum planar distance between a fresh creature and the player.
    pub clearance: f32,
}

/// What one `reconcile` call changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub loaded: usize,
    pub evicted: usize,
}

/// Manages the window of loaded chunks around the player.
pub struct WorldStreamer {
    index: ChunkIndex<LoadedChunk>,
    generator: ChunkGenerator,
    radius: i32,
    chunk_size: f32,
    /// Chunk the window was last centered on.
    center: Option<ChunkCoord>,
}

impl WorldStreamer {
    pub fn new(generator: ChunkGenerator, radius: i32) -> Self {
        let chunk_size = generator.config().chunk_size;
        Self {
            index: ChunkIndex::new(),
            generator,
            radius,
            chunk_size,
            center: None,
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    pub fn center(&self) -> Option<ChunkCoord> {
        self.center
    }

    pub fn loaded_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.index.contains(coord)
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&LoadedChunk> {
        self.index.get(coord)
    }

    pub fn loaded_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.index.keys()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &LoadedChunk> {
        self.index.values()
    }

    fn window_len(&self) -> usize {
        let side = (2 * self.radius + 1) as usize;
        side * side
    }

    /// Bring the loaded set in line with the window around `(player_x, player_z)`.
    ///
    /// Cheap when the player stays inside the same chunk; otherwise the work is
    /// proportional to the window size.
    pub fn reconcile(
        &mut self,
        player_x: f32,
        player_z: f32,
        rules: &SpawnRules,
        registry: &mut EntityRegistry,
        scene: &mut dyn SceneGraph,
    ) -> StreamStats {
        let current = ChunkCoord::from_world(player_x, player_z, self.chunk_size);
        if self.center == Some(current) && self.index.len() == self.window_len() {
            return StreamStats::default();
        }

        let mut stats = StreamStats::default();

        // Eviction
        let radius = self.radius;
        let stale: Vec<ChunkCoord> = self
            .index
            .keys()
            .filter(|coord| coord.chebyshev(current) > radius)
            .collect();
        for coord in stale {
            if let Some(chunk) = self.index.remove(coord) {
                unload_chunk(chunk, registry, scene);
                stats.evicted += 1;
            }
        }

        // Loading, nearest chunks first
        let mut missing: Vec<ChunkCoord> = current
            .window(radius)
            .filter(|coord| !self.index.contains(*coord))
            .collect();
        missing.sort_unstable_by_key(|coord| {
            (coord.x - current.x).abs() + (coord.z - current.z).abs()
        });
        let player = Vec3::new(player_x, 0.0, player_z);
        for coord in missing {
            let chunk = self.load_chunk(coord, player, rules, registry, scene);
            self.index.insert(coord, chunk);
            stats.loaded += 1;
        }

        self.center = Some(current);
        if stats != StreamStats::default() {
            log::debug!(
                "Streamed around chunk {}: +{} -{} ({} loaded)",
                current,
                stats.loaded,
                stats.evicted,
                self.index.len()
            );
        }
        stats
    }

    fn load_chunk(
        &mut self,
        coord: ChunkCoord,
        player: Vec3,
        rules: &SpawnRules,
        registry: &mut EntityRegistry,
        scene: &mut dyn SceneGraph,
    ) -> LoadedChunk {
        let generated = self.generator.generate(coord);

        let creatures: Vec<Entity> = generated
            .creature_spawns
            .iter()
            .map(|spawn| {
                let spawn = CreatureSpawn {
                    position: clear_of(spawn.position, player, rules.clearance),
                    ..*spawn
                };
                let entity = registry.spawn_creature(&spawn, rules.creature_speed, rules.behavior);
                scene.add(Visual {
                    key: VisualKey::Creature(entity),
                    model: Creature::MODEL,
                    transform: Transform::from_position_yaw(spawn.position, spawn.heading),
                    tint: None,
                });
                entity
            })
            .collect();

        let power_up = generated.power_up.map(|spawn| {
            let entity = registry.spawn_power_up(&spawn);
            scene.add(Visual {
                key: VisualKey::PowerUp(entity),
                model: spawn.kind.model(),
                transform: Transform::from_position_yaw(spawn.position, spawn.yaw),
                tint: None,
            });
            scene.add(Visual {
                key: VisualKey::Beacon(entity),
                model: spawn.kind.beacon_model(),
                transform: Transform::from_position(spawn.position + Vec3::Y * BEACON_HEIGHT),
                tint: None,
            });
            entity
        });

        let chunk = LoadedChunk {
            coord,
            terrain: generated.terrain,
            trees: generated.trees,
            creatures,
            power_up,
        };
        for visual in chunk.static_visuals() {
            scene.add(visual);
        }
        chunk
    }

    /// Unload every chunk (new game / shutdown).
    pub fn clear(&mut self, registry: &mut EntityRegistry, scene: &mut dyn SceneGraph) {
        let chunks: Vec<LoadedChunk> = self.index.drain().map(|(_, chunk)| chunk).collect();
        for chunk in chunks {
            unload_chunk(chunk, registry, scene);
        }
        self.center = None;
    }
}

/// Remove a chunk's visuals and whichever of its entities are still alive.
fn unload_chunk(chunk: LoadedChunk, registry: &mut EntityRegistry, scene: &mut dyn SceneGraph) {
    for key in chunk.static_keys() {
        scene.remove(key);
    }
    for &entity in &chunk.creatures {
        if registry.despawn(entity) {
            scene.remove(VisualKey::Creature(entity));
        }
    }
    if let Some(entity) = chunk.power_up {
        if registry.despawn(entity) {
            scene.remove(VisualKey::PowerUp(entity));
            scene.remove(VisualKey::Beacon(entity));
        }
    }
}

/// Push `point` out to `clearance` from `player` on the ground plane.
fn clear_of(point: Vec3, player: Vec3, clearance: f32) -> Vec3 {
    let offset = Vec3::new(point.x - player.x, 0.0, point.z - player.z);
    let distance = offset.length();
    if distance >= clearance {
        return point;
    }
    let direction = if distance > 1e-6 { offset / distance } else { Vec3::X };
    Vec3::new(player.x, point.y, player.z) + direction * clearance
}
