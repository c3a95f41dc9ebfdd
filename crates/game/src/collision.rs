//! Collision resolution between the player and registered entities.
//!
//! Runs in two phases per tick: power-ups first, then creatures. Each phase
//! snapshots the handles it will act on before touching the registry, so
//! removal never races the iteration that found it.

use engine_core::{Entity, SceneGraph, Transform, Vec3, VisualKey};
use procgen::PowerUpKind;

use crate::config::GameConfig;
use crate::power_up::PowerUp;
use crate::registry::EntityRegistry;
use crate::state::{GameMode, GameStateMachine};

/// Radii and score deltas for collision resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRules {
    pub power_up_radius: f32,
    /// Creatures farther than this are not considered at all.
    pub creature_cutoff: f32,
    pub consume_score: u32,
    pub escape_score: u32,
}

impl Default for CollisionRules {
    fn default() -> Self {
        Self {
            power_up_radius: 1.5,
            creature_cutoff: 5.0,
            consume_score: 100,
            escape_score: 50,
        }
    }
}

impl From<&GameConfig> for CollisionRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            power_up_radius: config.power_up_radius,
            creature_cutoff: config.creature_cutoff,
            consume_score: config.consume_score,
            escape_score: config.escape_score,
        }
    }
}

/// What happened to one entity this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    PickedUp(Entity, PowerUpKind),
    /// Inside the superhuman bubble.
    Consumed(Entity),
    /// Between one and two bubble radii while superhuman.
    Escaped(Entity),
    /// Reached the player in Normal mode.
    Caught(Entity),
}

/// Resolve every contact for the player at `player`.
pub fn resolve(
    player: Vec3,
    rules: &CollisionRules,
    state: &mut GameStateMachine,
    registry: &mut EntityRegistry,
    scene: &mut dyn SceneGraph,
) -> Vec<Contact> {
    if state.is_game_over() {
        return Vec::new();
    }
    let mut contacts = resolve_power_ups(player, rules, state, registry, scene);
    contacts.extend(resolve_creatures(player, rules, state, registry, scene));
    contacts
}

fn resolve_power_ups(
    player: Vec3,
    rules: &CollisionRules,
    state: &mut GameStateMachine,
    registry: &mut EntityRegistry,
    scene: &mut dyn SceneGraph,
) -> Vec<Contact> {
    let hits: Vec<Entity> = registry
        .world()
        .query::<(&Transform, &PowerUp)>()
        .iter()
        .filter(|(_, (transform, power_up))| {
            power_up.check_collision(transform.position, player, rules.power_up_radius)
        })
        .map(|(entity, _)| entity)
        .collect();

    let mut contacts = Vec::with_capacity(hits.len());
    for entity in hits {
        let kind = {
            let Ok(mut power_up) = registry.world().get::<&mut PowerUp>(entity) else {
                continue;
            };
            if !power_up.collect() {
                continue;
            }
            power_up.kind
        };
        registry.despawn(entity);
        scene.remove(VisualKey::PowerUp(entity));
        scene.remove(VisualKey::Beacon(entity));
        state.power_up_collected(registry, scene);
        log::debug!("Picked up {:?}", kind);
        contacts.push(Contact::PickedUp(entity, kind));
    }
    contacts
}

fn resolve_creatures(
    player: Vec3,
    rules: &CollisionRules,
    state: &mut GameStateMachine,
    registry: &mut EntityRegistry,
    scene: &mut dyn SceneGraph,
) -> Vec<Contact> {
    let bubble = state.bubble_radius();
    let nearby: Vec<(Entity, f32)> = registry
        .creature_positions()
        .into_iter()
        .map(|(entity, position)| (entity, position.distance(player)))
        .filter(|(_, distance)| *distance <= rules.creature_cutoff)
        .collect();

    let mut contacts = Vec::new();
    match state.mode() {
        GameMode::Normal => {
            if let Some(&(entity, _)) = nearby.iter().find(|(_, d)| *d < bubble) {
                state.creature_contact();
                contacts.push(Contact::Caught(entity));
            }
        }
        GameMode::Superhuman => {
            for (entity, distance) in nearby {
                let (contact, points) = if distance < bubble {
                    (Contact::Consumed(entity), rules.consume_score)
                } else if distance < bubble * 2.0 {
                    (Contact::Escaped(entity), rules.escape_score)
                } else {
                    continue;
                };
                if registry.despawn(entity) {
                    scene.remove(VisualKey::Creature(entity));
                    state.award(points);
                    log::debug!("{:?} for {} points", contact, points);
                    contacts.push(contact);
                }
            }
        }
        GameMode::GameOver => {}
    }
    contacts
}
