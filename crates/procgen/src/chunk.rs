//! Chunk generation.
//!
//! `ChunkGenerator::generate` is a pure factory: it returns everything a
//! chunk brings into the world and registers nothing. Ground shade and tree
//! species come from world-seeded noise (stable per coordinate); placement,
//! headings and the power-up roll come from the generator's RNG.

use std::f32::consts::TAU;

use engine_core::{ChunkCoord, Oscillator, Vec3};
use rand::prelude::*;

use crate::decoration::{GroveMap, Tree};
use crate::spawn::{CreatureSpawn, PowerUpKind, PowerUpSpawn, POWER_UP_HOVER_HEIGHT};
use crate::terrain::{GroundShader, TerrainPatch};

/// Parameters for chunk generation.
#[derive(Debug, Clone)]
pub struct ChunkGenConfig {
    /// Edge length of a chunk in world units.
    pub chunk_size: f32,
    /// Trees per chunk (fixed).
    pub trees_per_chunk: usize,
    /// Creatures per chunk (fixed).
    pub creatures_per_chunk: usize,
    /// Probability that a chunk holds exactly one power-up.
    pub power_up_chance: f64,
    /// Seed for the ground and grove noise fields.
    pub world_seed: u64,
}

impl Default for ChunkGenConfig {
    fn default() -> Self {
        Self {
            chunk_size: 50.0,
            trees_per_chunk: 8,
            creatures_per_chunk: 3,
            power_up_chance: 0.2,
            world_seed: 0,
        }
    }
}

/// Everything a freshly generated chunk contains.
#[derive(Debug, Clone)]
pub struct GeneratedChunk {
    pub coord: ChunkCoord,
    pub terrain: TerrainPatch,
    pub trees: Vec<Tree>,
    pub creature_spawns: Vec<CreatureSpawn>,
    pub power_up: Option<PowerUpSpawn>,
}

/// Produces chunks on demand.
pub struct ChunkGenerator {
    config: ChunkGenConfig,
    ground: GroundShader,
    groves: GroveMap,
    rng: StdRng,
}

impl ChunkGenerator {
    /// Generator with entropy-seeded placement.
    pub fn new(config: ChunkGenConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Generator whose placement is reproducible (tests, replays).
    pub fn seeded(config: ChunkGenConfig, placement_seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(placement_seed))
    }

    fn with_rng(config: ChunkGenConfig, rng: StdRng) -> Self {
        Self {
            ground: GroundShader::new(config.world_seed),
            groves: GroveMap::new(config.world_seed),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &ChunkGenConfig {
        &self.config
    }

    /// Generate the chunk at `coord`.
    pub fn generate(&mut self, coord: ChunkCoord) -> GeneratedChunk {
        let size = self.config.chunk_size;
        let terrain = self.ground.patch(coord, size);
        let origin = terrain.origin;

        let trees = (0..self.config.trees_per_chunk)
            .map(|_| {
                let position = self.random_point(origin);
                let kind = self.groves.kind_at(position);
                Tree {
                    kind,
                    position,
                    yaw: self.rng.gen::<f32>() * TAU,
                    scale: self.rng.gen_range(0.8..1.25),
                    sway: Oscillator::new(
                        self.rng.gen::<f32>() * TAU,
                        self.rng.gen_range(0.8..1.6),
                        kind.sway_amplitude(),
                    ),
                }
            })
            .collect();

        let creature_spawns = (0..self.config.creatures_per_chunk)
            .map(|_| CreatureSpawn {
                position: self.random_point(origin),
                heading: self.rng.gen::<f32>() * TAU,
            })
            .collect();

        let power_up = if self.rng.gen_bool(self.config.power_up_chance.clamp(0.0, 1.0)) {
            let ground = self.random_point(origin);
            Some(PowerUpSpawn {
                kind: PowerUpKind::BaguetteAndWine,
                position: Vec3::new(ground.x, POWER_UP_HOVER_HEIGHT, ground.z),
                yaw: self.rng.gen::<f32>() * TAU,
                phase: self.rng.gen::<f32>() * TAU,
            })
        } else {
            None
        };

        log::trace!(
            "Generated chunk {} ({} trees, power-up: {})",
            coord,
            self.config.trees_per_chunk,
            power_up.is_some()
        );

        GeneratedChunk {
            coord,
            terrain,
            trees,
            creature_spawns,
            power_up,
        }
    }

    /// Uniform ground point inside the chunk whose minimum corner is `origin`.
    fn random_point(&mut self, origin: Vec3) -> Vec3 {
        let size = self.config.chunk_size;
        let dx = self.rng.gen_range(0.0..size);
        let dz = self.rng.gen_range(0.0..size);
        Vec3::new(offset_within(origin.x, dx, size), origin.y, offset_within(origin.z, dz, size))
    }
}

/// `start + offset`, kept strictly below `start + size` when the sum rounds up.
fn offset_within(start: f32, offset: f32, size: f32) -> f32 {
    let end = start + size;
    let point = start + offset;
    if point < end {
        return point;
    }
    let below = if end > 0.0 {
        f32::from_bits(end.to_bits() - 1)
    } else if end < 0.0 {
        f32::from_bits(end.to_bits() + 1)
    } else {
        -f32::from_bits(1)
    };
    below.max(start)
}
