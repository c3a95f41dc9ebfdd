//! Entity registry: every live creature and power-up.
//!
//! Backed by a `hecs::World`, so each entity is addressed by a generational
//! handle. Chunks keep handles to what they spawned; a handle whose entity
//! was already consumed simply fails to resolve, which makes bulk eviction
//! and mid-iteration removal safe without any index bookkeeping.

use engine_core::{Entity, Transform, Vec3, Velocity};
use hecs::World;
use procgen::{CreatureSpawn, PowerUpSpawn};

use crate::creature::{Behavior, Creature};
use crate::power_up::PowerUp;

#[derive(Default)]
pub struct EntityRegistry {
    world: World,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a creature at its spawn point.
    pub fn spawn_creature(&mut self, spawn: &CreatureSpawn, speed: f32, behavior: Behavior) -> Entity {
        self.world.spawn((
            Transform::from_position_yaw(spawn.position, spawn.heading),
            Velocity::default(),
            Creature::new(speed, spawn.heading, behavior),
        ))
    }

    /// Register a power-up.
    pub fn spawn_power_up(&mut self, spawn: &PowerUpSpawn) -> Entity {
        self.world.spawn((
            Transform::from_position_yaw(spawn.position, spawn.yaw),
            PowerUp::from_spawn(spawn),
        ))
    }

    /// Remove an entity. Returns `false` if it was already gone.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity).is_ok()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn creature_count(&self) -> usize {
        self.world.query::<&Creature>().iter().count()
    }

    pub fn power_up_count(&self) -> usize {
        self.world.query::<&PowerUp>().iter().count()
    }

    /// Current position of any registered entity.
    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.world
            .get::<&Transform>(entity)
            .ok()
            .map(|transform| transform.position)
    }

    pub fn creature(&self, entity: Entity) -> Option<Creature> {
        self.world.get::<&Creature>(entity).ok().map(|c| *c)
    }

    pub fn power_up(&self, entity: Entity) -> Option<PowerUp> {
        self.world.get::<&PowerUp>(entity).ok().map(|p| *p)
    }

    /// Snapshot of `(entity, position)` for every creature.
    pub fn creature_positions(&self) -> Vec<(Entity, Vec3)> {
        self.world
            .query::<(&Transform, &Creature)>()
            .iter()
            .map(|(entity, (transform, _))| (entity, transform.position))
            .collect()
    }

    /// Snapshot of every creature's transform (render dispatch).
    pub fn creature_transforms(&self) -> Vec<(Entity, Transform)> {
        self.world
            .query::<(&Transform, &Creature)>()
            .iter()
            .map(|(entity, (transform, _))| (entity, *transform))
            .collect()
    }

    /// Direct access for systems that iterate components in place.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Drop every entity.
    pub fn clear(&mut self) {
        self.world.clear();
    }
}
