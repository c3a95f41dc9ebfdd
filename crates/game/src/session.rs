//! One game session: the world and the per-tick loop that drives it.
//!
//! `WorldState` owns everything a run of the game mutates. Restarting means
//! tearing one down and building a fresh one; nothing outlives a session.

use engine_core::{
    Hud, HudSnapshot, SceneGraph, Soundtrack, Transform, Vec3, Visual, VisualKey,
};
use input::InputState;
use procgen::ChunkGenerator;

use crate::animation;
use crate::collision::{self, CollisionRules, Contact};
use crate::config::GameConfig;
use crate::creature::Steering;
use crate::hud::HudRelay;
use crate::player::Character;
use crate::registry::EntityRegistry;
use crate::state::{GameMode, GameStateMachine, ModeTuning};
use crate::streamer::{SpawnRules, StreamStats, WorldStreamer};

/// The collaborators a session talks to.
pub struct Io<'a> {
    pub scene: &'a mut dyn SceneGraph,
    pub soundtrack: &'a mut dyn Soundtrack,
    pub hud: &'a mut dyn Hud,
}

/// What one tick did.
#[derive(Debug, Default)]
pub struct TickReport {
    pub streamed: StreamStats,
    pub contacts: Vec<Contact>,
    /// `false` when the world was frozen (game over).
    pub simulated: bool,
}

pub struct WorldState {
    streamer: WorldStreamer,
    registry: EntityRegistry,
    state: GameStateMachine,
    character: Character,
    steering: Steering,
    collision_rules: CollisionRules,
    creature_speed: f32,
    spawn_clearance: f32,
    tick_rate: u32,
    ticks: u64,
    hud: HudRelay,
}

impl WorldState {
    pub fn new(config: &GameConfig, generator: ChunkGenerator) -> Self {
        Self {
            streamer: WorldStreamer::new(generator, config.chunk_radius),
            registry: EntityRegistry::new(),
            state: GameStateMachine::new(ModeTuning::from(config)),
            character: Character::new(config),
            steering: Steering::from(config),
            collision_rules: CollisionRules::from(config),
            creature_speed: config.creature_speed,
            spawn_clearance: config.spawn_clearance,
            tick_rate: config.tick_rate.max(1),
            ticks: 0,
            hud: HudRelay::new(),
        }
    }

    /// Place the character and stream in the starting window.
    pub fn begin(&mut self, io: &mut Io<'_>) {
        io.scene.add(Visual {
            key: VisualKey::Character,
            model: Character::MODEL,
            transform: self.character.transform,
            tint: None,
        });
        io.scene.set_character_style(self.state.character_style());
        io.scene.set_character_pose(animation::character_pose(0.0, false));
        let position = self.character.position();
        let stats = self.stream(position, io.scene);
        log::info!("New game: {} chunks loaded", stats.loaded);
        self.hud.invalidate();
        let snapshot = self.hud_snapshot();
        self.hud.push(snapshot, io.hud);
    }

    /// Run one fixed tick.
    pub fn tick(&mut self, input: &InputState, io: &mut Io<'_>) -> TickReport {
        if input.is_mute_pressed() {
            io.soundtrack.toggle_mute();
        }
        if self.state.is_game_over() {
            let snapshot = self.hud_snapshot();
            self.hud.push(snapshot, io.hud);
            return TickReport::default();
        }

        self.ticks += 1;
        let seconds = self.clock_seconds();

        // Movement
        self.character.update(input, self.state.move_speed());
        let player = self.character.position();

        // Streaming
        let streamed = self.stream(player, io.scene);

        // Entities
        self.steering.update_all(self.registry.world_mut(), player);
        animation::float_power_ups(seconds, &mut self.registry, io.scene);

        // Collisions, then the countdown
        let contacts = collision::resolve(
            player,
            &self.collision_rules,
            &mut self.state,
            &mut self.registry,
            io.scene,
        );
        self.state.tick(&mut self.registry, io.scene);

        self.dispatch(seconds, input.is_moving(), io.scene);
        let snapshot = self.hud_snapshot();
        self.hud.push(snapshot, io.hud);

        TickReport {
            streamed,
            contacts,
            simulated: true,
        }
    }

    fn stream(&mut self, player: Vec3, scene: &mut dyn SceneGraph) -> StreamStats {
        let rules = SpawnRules {
            creature_speed: self.creature_speed,
            behavior: self.state.creature_behavior(),
            clearance: self.spawn_clearance,
        };
        self.streamer
            .reconcile(player.x, player.z, &rules, &mut self.registry, scene)
    }

    /// Push this tick's transforms to the scene.
    fn dispatch(&self, seconds: f32, walking: bool, scene: &mut dyn SceneGraph) {
        for (entity, transform) in self.registry.creature_transforms() {
            scene.set_transform(VisualKey::Creature(entity), transform);
        }
        animation::sway_trees(seconds, &self.streamer, scene);
        scene.set_transform(
            VisualKey::Character,
            Transform::from_position(self.character.position()),
        );
        scene.set_character_pose(animation::character_pose(seconds, walking));
    }

    pub fn hud_snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.state.score(),
            countdown: self.state.countdown_secs(),
            game_over: self.state.is_game_over(),
        }
    }

    /// Unload the world and remove the character from the scene.
    pub fn teardown(&mut self, scene: &mut dyn SceneGraph) {
        self.streamer.clear(&mut self.registry, scene);
        self.registry.clear();
        scene.remove(VisualKey::Character);
        log::info!("Session ended after {} ticks, score {}", self.ticks, self.state.score());
    }

    fn clock_seconds(&self) -> f32 {
        (self.ticks as f64 / self.tick_rate as f64) as f32
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn state(&self) -> &GameStateMachine {
        &self.state
    }

    pub fn streamer(&self) -> &WorldStreamer {
        &self.streamer
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::{Behavior, Creature};
    use crate::scene::SceneLedger;
    use engine_core::{Entity, Visual};
    use input::{ElementState, KeyCode};
    use procgen::{ChunkGenConfig, CreatureSpawn, PowerUpKind, PowerUpSpawn};
    use std::path::Path;

    #[derive(Default)]
    struct Recorder {
        snapshots: Vec<HudSnapshot>,
    }

    impl Hud for Recorder {
        fn present(&mut self, snapshot: &HudSnapshot) {
            self.snapshots.push(*snapshot);
        }
    }

    #[derive(Default)]
    struct Speaker {
        mutes: usize,
    }

    impl Soundtrack for Speaker {
        fn play_background_music(&mut self, _track: &Path, _volume: f64) {}

        fn toggle_mute(&mut self) {
            self.mutes += 1;
        }
    }

    struct Harness {
        world: WorldState,
        scene: SceneLedger,
        speaker: Speaker,
        hud: Recorder,
    }

    impl Harness {
        /// An empty world: no random creatures or power-ups.
        fn empty() -> Self {
            let config = GameConfig {
                creatures_per_chunk: 0,
                power_up_chance: 0.0,
                ..Default::default()
            };
            Self::with_config(&config)
        }

        fn with_config(config: &GameConfig) -> Self {
            let generator = ChunkGenerator::seeded(config.chunk_gen(7), 11);
            let mut harness = Self {
                world: WorldState::new(config, generator),
                scene: SceneLedger::new(),
                speaker: Speaker::default(),
                hud: Recorder::default(),
            };
            let mut io = Io {
                scene: &mut harness.scene,
                soundtrack: &mut harness.speaker,
                hud: &mut harness.hud,
            };
            harness.world.begin(&mut io);
            harness
        }

        fn tick(&mut self, input: &InputState) -> TickReport {
            let mut io = Io {
                scene: &mut self.scene,
                soundtrack: &mut self.speaker,
                hud: &mut self.hud,
            };
            self.world.tick(input, &mut io)
        }

        fn creature_at(&mut self, position: Vec3) -> Entity {
            let behavior = self.world.state().creature_behavior();
            let entity = self.world.registry_mut().spawn_creature(
                &CreatureSpawn {
                    position,
                    heading: 0.0,
                },
                0.05,
                behavior,
            );
            self.scene.add(Visual {
                key: VisualKey::Creature(entity),
                model: "creature/lizard",
                transform: Transform::from_position(position),
                tint: None,
            });
            entity
        }

        fn power_up_at(&mut self, position: Vec3) -> Entity {
            self.world.registry_mut().spawn_power_up(&PowerUpSpawn {
                kind: PowerUpKind::BaguetteAndWine,
                position,
                yaw: 0.0,
                phase: 0.0,
            })
        }
    }

    fn holding(keys: &[KeyCode]) -> InputState {
        let mut input = InputState::new();
        for key in keys {
            input.process_keyboard(*key, ElementState::Pressed);
        }
        input
    }

    #[test]
    fn begin_loads_window_and_shows_hud() {
        let h = Harness::with_config(&GameConfig::default());
        assert_eq!(h.world.streamer().loaded_count(), 25);
        assert!(h.scene.contains(VisualKey::Character));
        assert_eq!(
            h.hud.snapshots.last(),
            Some(&HudSnapshot {
                score: 0,
                countdown: None,
                game_over: false
            })
        );
    }

    #[test]
    fn no_instant_game_over_from_fresh_chunks() {
        let mut h = Harness::with_config(&GameConfig::default());
        h.tick(&InputState::new());
        assert_eq!(h.world.mode(), GameMode::Normal);
    }

    #[test]
    fn creature_within_bubble_freezes_world() {
        let mut h = Harness::empty();
        let creature = h.creature_at(Vec3::new(0.4, 0.0, 0.0));
        let report = h.tick(&InputState::new());
        assert!(report.contacts.contains(&Contact::Caught(creature)));
        assert!(h.world.is_game_over());

        let creature_pos = h.world.registry().position(creature);
        let player_pos = h.world.character().position();
        let ticks = h.world.ticks();
        let run = holding(&[KeyCode::ArrowRight, KeyCode::Space]);
        for _ in 0..120 {
            let report = h.tick(&run);
            assert!(!report.simulated);
        }
        assert_eq!(h.world.registry().position(creature), creature_pos);
        assert_eq!(h.world.character().position(), player_pos);
        assert_eq!(h.world.ticks(), ticks);
        assert_eq!(h.hud.snapshots.last().map(|s| s.game_over), Some(true));
    }

    #[test]
    fn game_over_ignores_power_ups() {
        let mut h = Harness::empty();
        h.creature_at(Vec3::new(0.2, 0.0, 0.0));
        h.tick(&InputState::new());
        let power_up = h.power_up_at(Vec3::new(0.0, 1.0, 0.0));
        h.tick(&InputState::new());
        assert!(h.world.registry().contains(power_up));
        assert_eq!(h.world.mode(), GameMode::GameOver);
        assert_eq!(h.world.score(), 0);
    }

    #[test]
    fn pickup_makes_superhuman_and_doubles_speed() {
        let mut h = Harness::empty();
        let far = h.creature_at(Vec3::new(30.0, 0.0, 0.0));
        h.power_up_at(Vec3::new(0.0, 1.0, 0.0));

        h.tick(&InputState::new());
        assert_eq!(h.world.mode(), GameMode::Superhuman);
        assert_eq!(h.world.state().countdown_secs(), Some(10));
        assert_eq!(
            h.world.registry().creature(far).map(|c| c.behavior),
            Some(Behavior::Fleeing)
        );
        assert!(h.scene.character_style().empowered);

        let before = h.world.character().position();
        h.tick(&holding(&[KeyCode::KeyD]));
        let moved = h.world.character().position().x - before.x;
        assert!((moved - 0.2).abs() < 1e-5);
    }

    #[test]
    fn superhuman_wears_off_after_ten_seconds() {
        let mut h = Harness::empty();
        let far = h.creature_at(Vec3::new(40.0, 0.0, 0.0));
        h.power_up_at(Vec3::new(0.0, 1.0, 0.0));
        let idle = InputState::new();
        // The pickup tick is the first of the 600.
        h.tick(&idle);
        for _ in 0..598 {
            h.tick(&idle);
        }
        assert_eq!(h.world.mode(), GameMode::Superhuman);
        h.tick(&idle);
        assert_eq!(h.world.mode(), GameMode::Normal);
        assert_eq!(
            h.world.registry().creature(far).map(|c| c.behavior),
            Some(Behavior::Pursuing)
        );

        let before = h.world.character().position();
        h.tick(&holding(&[KeyCode::KeyD]));
        let moved = h.world.character().position().x - before.x;
        assert!((moved - 0.1).abs() < 1e-5);
    }

    #[test]
    fn superhuman_consumes_nearby_creatures_for_points() {
        let mut h = Harness::empty();
        h.power_up_at(Vec3::new(0.0, 1.0, 0.0));
        h.tick(&InputState::new());
        let victim = h.creature_at(Vec3::new(1.0, 0.0, 0.0));
        h.tick(&InputState::new());
        assert!(!h.world.registry().contains(victim));
        assert!(!h.scene.contains(VisualKey::Creature(victim)));
        assert_eq!(h.world.score(), 100);
        assert_eq!(h.hud.snapshots.last().map(|s| s.score), Some(100));
    }

    #[test]
    fn walking_across_a_chunk_border_streams() {
        let mut h = Harness::empty();
        let run = holding(&[KeyCode::ArrowRight]);
        let mut loaded = 0;
        for _ in 0..510 {
            loaded += h.tick(&run).streamed.loaded;
        }
        assert_eq!(loaded, 5);
        assert_eq!(h.world.streamer().loaded_count(), 25);
        assert!(h.world.streamer().is_loaded(engine_core::ChunkCoord::new(3, 0)));
    }

    #[test]
    fn chunks_streamed_while_superhuman_spawn_fleeing_creatures() {
        let config = GameConfig {
            power_up_chance: 0.0,
            ..Default::default()
        };
        let mut h = Harness::with_config(&config);
        h.power_up_at(Vec3::new(0.0, 1.0, 0.0));
        h.tick(&InputState::new());
        assert_eq!(h.world.mode(), GameMode::Superhuman);

        let run = holding(&[KeyCode::ArrowRight]);
        let mut loaded = 0;
        for _ in 0..400 {
            loaded += h.tick(&run).streamed.loaded;
            if loaded > 0 {
                break;
            }
        }
        assert_eq!(loaded, 5);
        assert_eq!(h.world.mode(), GameMode::Superhuman);

        let fresh: Vec<Entity> = h
            .world
            .streamer()
            .chunk(engine_core::ChunkCoord::new(3, 0))
            .map(|chunk| chunk.spawned_entities().collect())
            .unwrap_or_default();
        let fresh_creatures: Vec<Creature> = fresh
            .iter()
            .filter_map(|&e| h.world.registry().creature(e))
            .collect();
        assert_eq!(fresh_creatures.len(), 3);
        assert!(fresh_creatures.iter().all(|c| c.behavior == Behavior::Fleeing));

        let everyone = h.world.registry().creature_positions();
        assert!(!everyone.is_empty());
        for (entity, _) in everyone {
            assert_eq!(
                h.world.registry().creature(entity).map(|c| c.behavior),
                Some(Behavior::Fleeing)
            );
        }
    }

    #[test]
    fn mute_works_even_after_game_over() {
        let mut h = Harness::empty();
        let mute = {
            let mut input = InputState::new();
            input.process_keyboard(KeyCode::KeyM, ElementState::Pressed);
            input
        };
        h.tick(&mute);
        h.creature_at(Vec3::new(0.1, 0.0, 0.0));
        h.tick(&InputState::new());
        h.tick(&mute);
        assert!(h.world.is_game_over());
        assert_eq!(h.speaker.mutes, 2);
    }

    #[test]
    fn teardown_leaves_an_empty_scene() {
        let mut h = Harness::with_config(&GameConfig::default());
        h.tick(&holding(&[KeyCode::KeyS]));
        h.world.teardown(&mut h.scene);
        assert!(h.scene.is_empty());
        assert_eq!(h.world.registry().creature_count(), 0);
        assert_eq!(h.world.streamer().loaded_count(), 0);
    }

    #[test]
    fn default_generator_config_matches_game_config() {
        let config = GameConfig::default();
        let generated = config.chunk_gen(0);
        let defaults = ChunkGenConfig::default();
        assert_eq!(generated.chunk_size, defaults.chunk_size);
        assert_eq!(generated.creatures_per_chunk, defaults.creatures_per_chunk);
    }
}
